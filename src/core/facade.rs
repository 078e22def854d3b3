use crate::core::wait::bounded_wait;
use crate::domain::model::{ObjectLocation, TransferDirection, TransferOutcome, TransferReceipt};
use crate::domain::ports::{ObjectStore, TableCatalog};
use crate::utils::error::{FacadeError, Result};
use crate::utils::validation::{
    validate_list_limit, validate_non_empty_string, validate_path, validate_timeout,
};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Distinguishes partial files of concurrent downloads to the same destination.
static PARTIAL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Narrow synchronous-looking surface over a table catalog and an object store.
///
/// The facade owns both backends. It keeps no per-call state, so it can be shared behind an
/// `Arc` and called concurrently; every call carries its own timeout.
pub struct CloudFacade<T: TableCatalog, O: ObjectStore> {
    tables: T,
    objects: O,
}

impl<T: TableCatalog, O: ObjectStore> CloudFacade<T, O> {
    pub fn new(tables: T, objects: O) -> Self {
        Self { tables, objects }
    }

    pub fn tables(&self) -> &T {
        &self.tables
    }

    pub fn objects(&self) -> &O {
        &self.objects
    }

    /// Lists up to `limit` table names, in service order.
    pub async fn list_table_names(&self, limit: usize, timeout: Duration) -> Result<Vec<String>> {
        validate_list_limit("limit", limit)?;
        validate_timeout("timeout", timeout)?;

        tracing::debug!("Listing up to {} tables (timeout {:?})", limit, timeout);
        let started = Instant::now();

        let mut names = bounded_wait("ListTables", timeout, self.tables.list_tables(limit)).await?;
        names.truncate(limit);

        for name in &names {
            tracing::debug!("  {}", name.to_uppercase());
        }
        tracing::info!("Listed {} tables in {:?}", names.len(), started.elapsed());

        Ok(names)
    }

    /// Moves one object between `local_path` and `location`.
    ///
    /// Downloads land in a sibling `.part` file owned by this call and are renamed into place only
    /// once the whole body has been written; the partial file is removed on failure or timeout.
    pub async fn transfer_object(
        &self,
        direction: TransferDirection,
        location: &ObjectLocation,
        local_path: &Path,
        timeout: Duration,
    ) -> Result<TransferOutcome> {
        validate_non_empty_string("bucket", &location.bucket)?;
        validate_non_empty_string("key", &location.key)?;
        validate_path("local_path", &local_path.to_string_lossy())?;
        validate_timeout("timeout", timeout)?;

        tracing::debug!(
            "Starting {} of {} <-> {} (timeout {:?})",
            direction,
            location,
            local_path.display(),
            timeout
        );
        let started = Instant::now();

        let (receipt, local_path) = match direction {
            TransferDirection::Upload => {
                let receipt = self.upload(location, local_path, timeout).await?;
                (receipt, local_path.to_path_buf())
            }
            TransferDirection::Download => self.download(location, local_path, timeout).await?,
        };

        let outcome = TransferOutcome {
            direction,
            location: location.clone(),
            local_path,
            bytes: receipt.bytes,
            e_tag: receipt.e_tag,
            elapsed: started.elapsed(),
            completed_at: Utc::now(),
        };

        tracing::info!(
            "✅ {} of {} finished: {} bytes in {:?}",
            outcome.direction,
            outcome.location,
            outcome.bytes,
            outcome.elapsed
        );

        Ok(outcome)
    }

    /// Releases both backends and the connection pools they hold.
    pub fn shutdown(self) {
        tracing::debug!("Shutting down cloud facade");
        drop(self);
    }

    async fn upload(
        &self,
        location: &ObjectLocation,
        source: &Path,
        timeout: Duration,
    ) -> Result<TransferReceipt> {
        match tokio::fs::metadata(source).await {
            Ok(meta) if meta.is_file() => {}
            _ => {
                return Err(FacadeError::MissingLocalFile {
                    path: source.to_path_buf(),
                })
            }
        }

        bounded_wait("PutObject", timeout, self.objects.upload_file(location, source)).await
    }

    async fn download(
        &self,
        location: &ObjectLocation,
        local_path: &Path,
        timeout: Duration,
    ) -> Result<(TransferReceipt, PathBuf)> {
        let destination = resolve_destination(local_path, location).await?;
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let partial = partial_path(&destination)?;
        let result = bounded_wait(
            "GetObject",
            timeout,
            self.objects.download_file(location, &partial),
        )
        .await;

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                discard_partial(&partial).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&partial, &destination).await {
            discard_partial(&partial).await;
            return Err(e.into());
        }

        Ok((receipt, destination))
    }
}

/// An existing directory receives the object under the last segment of its key.
async fn resolve_destination(local_path: &Path, location: &ObjectLocation) -> Result<PathBuf> {
    let is_dir = tokio::fs::metadata(local_path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !is_dir {
        return Ok(local_path.to_path_buf());
    }

    let file_name = location
        .key
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .ok_or_else(|| FacadeError::InvalidConfigValueError {
            field: "key".to_string(),
            value: location.key.clone(),
            reason: "Key has no file name to download into a directory".to_string(),
        })?;

    Ok(local_path.join(file_name))
}

fn partial_path(destination: &Path) -> Result<PathBuf> {
    let file_name = destination
        .file_name()
        .ok_or_else(|| FacadeError::InvalidConfigValueError {
            field: "local_path".to_string(),
            value: destination.display().to_string(),
            reason: "Download destination must name a file".to_string(),
        })?;

    let seq = PARTIAL_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut partial = std::ffi::OsString::from(".");
    partial.push(file_name);
    partial.push(format!(".{}.{}.part", std::process::id(), seq));
    Ok(destination.with_file_name(partial))
}

async fn discard_partial(partial: &Path) {
    match tokio::fs::remove_file(partial).await {
        Ok(()) => tracing::debug!("Removed partial download {}", partial.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove partial download {}: {}", partial.display(), e),
    }
}
