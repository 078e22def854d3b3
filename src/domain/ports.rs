use crate::domain::model::{ObjectLocation, TransferReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Key-value table service, reduced to listing table names.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Returns up to `limit` table names in the order the service reports them.
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>>;
}

/// Object storage, reduced to whole-file put and get.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload_file(&self, location: &ObjectLocation, source: &Path)
        -> Result<TransferReceipt>;

    /// Writes the object to `destination`, creating or truncating it.
    async fn download_file(
        &self,
        location: &ObjectLocation,
        destination: &Path,
    ) -> Result<TransferReceipt>;
}
