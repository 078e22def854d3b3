pub mod toml_config;

pub use toml_config::FacadeConfig;

#[cfg(feature = "cli")]
use crate::domain::model::ObjectLocation;
#[cfg(feature = "cli")]
use crate::utils::error::{FacadeError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_s3_bucket_name};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "aws-facade")]
#[command(about = "List DynamoDB tables and move files to and from S3")]
pub struct CliConfig {
    /// Path to a TOML configuration file (defaults to ./aws-facade.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Override the per-operation timeout from the config
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Override the AWS profile from the config
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Override the endpoint URL from the config
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List DynamoDB table names
    Tables {
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, help = "Print the names as a JSON array")]
        json: bool,
    },
    /// Upload a local file to S3
    Put(TransferArgs),
    /// Download an S3 object to a local file
    Get(TransferArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct TransferArgs {
    /// Bucket name (defaults to [s3].bucket)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Object key (defaults to [s3].key)
    #[arg(long)]
    pub key: Option<String>,

    /// Local file to read from or write to
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long, help = "Print the transfer outcome as JSON")]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command-line flags win over the file.
    pub fn apply_overrides(&self, config: &mut FacadeConfig) {
        if let Some(timeout) = self.timeout_secs {
            config.aws.operation_timeout_secs = timeout;
            tracing::debug!("Operation timeout overridden to {}s", timeout);
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(endpoint) = &self.endpoint_url {
            config.aws.endpoint_url = Some(endpoint.clone());
        }
        if let Command::Tables {
            limit: Some(limit), ..
        } = self.command
        {
            config.dynamodb.list_limit = limit;
        }
    }
}

#[cfg(feature = "cli")]
impl TransferArgs {
    /// `--bucket`/`--key` fall back to `[s3]` field by field; the result gets the same checks
    /// a bucket from the file would.
    pub fn location(&self, config: &FacadeConfig) -> Result<ObjectLocation> {
        let bucket = self
            .bucket
            .clone()
            .or_else(|| config.s3.bucket.clone())
            .ok_or_else(|| FacadeError::ConfigValidationError {
                field: "s3.bucket".to_string(),
                message: "no bucket given with --bucket or in the config".to_string(),
            })?;
        let key = self
            .key
            .clone()
            .or_else(|| config.s3.key.clone())
            .ok_or_else(|| FacadeError::ConfigValidationError {
                field: "s3.key".to_string(),
                message: "no key given with --key or in the config".to_string(),
            })?;

        validate_s3_bucket_name("bucket", &bucket)?;
        validate_non_empty_string("key", &key)?;

        Ok(ObjectLocation::new(bucket, key))
    }
}
