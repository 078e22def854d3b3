use crate::utils::error::{FacadeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "aws-facade.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub aws: AwsSection,
    pub dynamodb: DynamoDbSection,
    pub s3: S3Section,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSection {
    /// Named profile from the shared AWS config files; the default provider chain when unset.
    pub profile: Option<String>,
    /// Overrides the service endpoints, e.g. for LocalStack or MinIO.
    pub endpoint_url: Option<String>,
    pub connect_timeout_ms: u64,
    pub operation_timeout_secs: u64,
}

impl Default for AwsSection {
    fn default() -> Self {
        Self {
            profile: None,
            endpoint_url: None,
            connect_timeout_ms: 750,
            operation_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamoDbSection {
    pub region: String,
    pub list_limit: usize,
}

impl Default for DynamoDbSection {
    fn default() -> Self {
        Self {
            region: "eu-west-1".to_string(),
            list_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Section {
    pub region: String,
    pub force_path_style: bool,
    pub bucket: Option<String>,
    pub key: Option<String>,
}

impl Default for S3Section {
    fn default() -> Self {
        Self {
            region: "eu-west-3".to_string(),
            force_path_style: false,
            bucket: None,
            key: None,
        }
    }
}

impl FacadeConfig {
    /// Loads `path` when given. Without a path, `aws-facade.toml` in the working directory is
    /// used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FacadeError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FacadeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FacadeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.aws.connect_timeout_ms)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.aws.operation_timeout_secs)
    }
}

impl Validate for FacadeConfig {
    fn validate(&self) -> Result<()> {
        if let Some(profile) = &self.aws.profile {
            validation::validate_non_empty_string("aws.profile", profile)?;
        }
        if let Some(endpoint) = &self.aws.endpoint_url {
            validation::validate_url("aws.endpoint_url", endpoint)?;
        }
        validation::validate_timeout("aws.connect_timeout_ms", self.connect_timeout())?;
        validation::validate_timeout("aws.operation_timeout_secs", self.operation_timeout())?;

        validation::validate_aws_region("dynamodb.region", &self.dynamodb.region)?;
        validation::validate_list_limit("dynamodb.list_limit", self.dynamodb.list_limit)?;

        validation::validate_aws_region("s3.region", &self.s3.region)?;
        if let Some(bucket) = &self.s3.bucket {
            validation::validate_s3_bucket_name("s3.bucket", bucket)?;
        }
        if let Some(key) = &self.s3.key {
            validation::validate_non_empty_string("s3.key", key)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
