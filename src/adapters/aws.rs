use crate::adapters::dynamodb::DynamoTableCatalog;
use crate::adapters::s3::S3ObjectStore;
use crate::config::FacadeConfig;
use crate::core::facade::CloudFacade;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};

pub type AwsFacade = CloudFacade<DynamoTableCatalog, S3ObjectStore>;

/// SDK clients built from one shared configuration, each pinned to its own region.
///
/// Both clients share the HTTP connector the loader sets up, so the connection pool lives as
/// long as the clients do.
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub dynamodb: aws_sdk_dynamodb::Client,
    pub s3: aws_sdk_s3::Client,
}

impl AwsClients {
    pub async fn connect(config: &FacadeConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .connect_timeout(config.connect_timeout())
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
        if let Some(profile) = &config.aws.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.aws.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let dynamodb_config = aws_sdk_dynamodb::config::Builder::from(&shared)
            .region(Region::new(config.dynamodb.region.clone()))
            .build();
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(config.s3.region.clone()))
            .force_path_style(config.s3.force_path_style)
            .build();

        tracing::debug!(
            "AWS clients ready (dynamodb: {}, s3: {}, profile: {})",
            config.dynamodb.region,
            config.s3.region,
            config.aws.profile.as_deref().unwrap_or("<default chain>")
        );

        Self {
            dynamodb: aws_sdk_dynamodb::Client::from_conf(dynamodb_config),
            s3: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    pub fn into_facade(self) -> AwsFacade {
        CloudFacade::new(
            DynamoTableCatalog::new(self.dynamodb),
            S3ObjectStore::new(self.s3),
        )
    }
}
