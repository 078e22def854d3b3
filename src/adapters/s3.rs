use crate::domain::model::{ObjectLocation, TransferReceipt};
use crate::domain::ports::ObjectStore;
use crate::utils::error::{FacadeError, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload_file(
        &self,
        location: &ObjectLocation,
        source: &Path,
    ) -> Result<TransferReceipt> {
        let bytes = tokio::fs::metadata(source).await?.len();
        let body = ByteStream::from_path(source)
            .await
            .map_err(|e| FacadeError::service("PutObject", e))?;

        let output = self
            .client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .body(body)
            .send()
            .await
            .map_err(|e| classify_error("PutObject", location, e))?;

        Ok(TransferReceipt {
            bytes,
            e_tag: output.e_tag().map(str::to_string),
        })
    }

    async fn download_file(
        &self,
        location: &ObjectLocation,
        destination: &Path,
    ) -> Result<TransferReceipt> {
        let mut output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| classify_error("GetObject", location, e))?;

        let e_tag = output.e_tag().map(str::to_string);
        let mut file = tokio::fs::File::create(destination).await?;
        let mut bytes = 0u64;

        while let Some(chunk) = output
            .body
            .try_next()
            .await
            .map_err(|e| FacadeError::service("GetObject", e))?
        {
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(TransferReceipt { bytes, e_tag })
    }
}

/// Missing keys and buckets become `NotFound`; anything else keeps the SDK error as its cause.
fn classify_error<E>(
    operation: &'static str,
    location: &ObjectLocation,
    err: SdkError<E>,
) -> FacadeError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err
        .as_service_error()
        .and_then(|e| e.code())
        .map(str::to_owned);
    let status = err.raw_response().map(|r| r.status().as_u16());

    match (code.as_deref(), status) {
        (Some("NoSuchBucket"), _) => FacadeError::NotFound {
            resource: "bucket",
            name: location.bucket.clone(),
        },
        (Some("NoSuchKey"), _) | (_, Some(404)) => FacadeError::NotFound {
            resource: "object",
            name: location.to_string(),
        },
        _ => {
            tracing::warn!("{} {} failed: {}", operation, location, DisplayErrorContext(&err));
            FacadeError::service(operation, err)
        }
    }
}
