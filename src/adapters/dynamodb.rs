use crate::domain::ports::TableCatalog;
use crate::utils::error::{FacadeError, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::Client as DynamoDbClient;

#[derive(Debug, Clone)]
pub struct DynamoTableCatalog {
    client: DynamoDbClient,
}

impl DynamoTableCatalog {
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableCatalog for DynamoTableCatalog {
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);

        let output = self
            .client
            .list_tables()
            .limit(limit)
            .send()
            .await
            .map_err(list_tables_error)?;

        Ok(output.table_names().to_vec())
    }
}

fn list_tables_error(err: SdkError<ListTablesError>) -> FacadeError {
    if let Some(service_err) = err.as_service_error() {
        if service_err.code() == Some("ResourceNotFoundException") {
            return FacadeError::NotFound {
                resource: "table",
                name: service_err.message().unwrap_or("ListTables").to_string(),
            };
        }
    }

    tracing::warn!("ListTables failed: {}", DisplayErrorContext(&err));
    FacadeError::service("ListTables", err)
}
