//! In-memory implementations of the facade ports.
//!
//! Handy for exercising the facade without AWS: state lives behind `Arc<Mutex<..>>`, so clones
//! share the same tables and objects, and an optional latency makes timeouts reproducible.

use crate::domain::model::{ObjectLocation, TransferReceipt};
use crate::domain::ports::{ObjectStore, TableCatalog};
use crate::utils::error::{FacadeError, Result};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type BucketStorage = Arc<Mutex<HashMap<String, HashMap<String, Vec<u8>>>>>;

fn lock<'a, T>(state: &'a Arc<Mutex<T>>, operation: &'static str) -> Result<MutexGuard<'a, T>> {
    state
        .lock()
        .map_err(|_| FacadeError::service(operation, "in-memory state lock poisoned"))
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTableCatalog {
    tables: Arc<Mutex<Vec<String>>>,
    latency: Option<Duration>,
}

impl InMemoryTableCatalog {
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: Arc::new(Mutex::new(tables.into_iter().map(Into::into).collect())),
            latency: None,
        }
    }

    /// Every listing sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn add_table(&self, name: impl Into<String>) -> Result<()> {
        lock(&self.tables, "CreateTable")?.push(name.into());
        Ok(())
    }
}

#[async_trait]
impl TableCatalog for InMemoryTableCatalog {
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let tables = lock(&self.tables, "ListTables")?;
        Ok(tables.iter().take(limit).cloned().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    buckets: BucketStorage,
    latency: Option<Duration>,
    upload_calls: Arc<AtomicUsize>,
}

impl InMemoryObjectStore {
    pub fn with_buckets<I, S>(buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let buckets = buckets
            .into_iter()
            .map(|name| (name.into(), HashMap::new()))
            .collect();

        Self {
            buckets: Arc::new(Mutex::new(buckets)),
            ..Self::default()
        }
    }

    /// Uploads sleep before storing; downloads write the body and then stall, so a timed out
    /// download leaves bytes behind for the caller to clean up.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&self, location: &ObjectLocation, data: Vec<u8>) {
        if let Ok(mut buckets) = self.buckets.lock() {
            buckets
                .entry(location.bucket.clone())
                .or_default()
                .insert(location.key.clone(), data);
        }
    }

    pub fn get(&self, location: &ObjectLocation) -> Option<Vec<u8>> {
        let buckets = self.buckets.lock().ok()?;
        buckets.get(&location.bucket)?.get(&location.key).cloned()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        let buckets = lock(&self.buckets, "GetObject")?;
        let bucket = buckets
            .get(&location.bucket)
            .ok_or_else(|| FacadeError::NotFound {
                resource: "bucket",
                name: location.bucket.clone(),
            })?;

        bucket
            .get(&location.key)
            .cloned()
            .ok_or_else(|| FacadeError::NotFound {
                resource: "object",
                name: location.to_string(),
            })
    }
}

fn e_tag(data: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload_file(
        &self,
        location: &ObjectLocation,
        source: &Path,
    ) -> Result<TransferReceipt> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let data = tokio::fs::read(source).await?;
        let receipt = TransferReceipt {
            bytes: data.len() as u64,
            e_tag: Some(e_tag(&data)),
        };

        let mut buckets = lock(&self.buckets, "PutObject")?;
        let bucket = buckets
            .get_mut(&location.bucket)
            .ok_or_else(|| FacadeError::NotFound {
                resource: "bucket",
                name: location.bucket.clone(),
            })?;
        bucket.insert(location.key.clone(), data);

        Ok(receipt)
    }

    async fn download_file(
        &self,
        location: &ObjectLocation,
        destination: &Path,
    ) -> Result<TransferReceipt> {
        let data = self.lookup(location)?;
        tokio::fs::write(destination, &data).await?;

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        Ok(TransferReceipt {
            bytes: data.len() as u64,
            e_tag: Some(e_tag(&data)),
        })
    }
}
