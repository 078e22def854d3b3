use aws_facade::{
    CloudFacade, FacadeError, InMemoryObjectStore, InMemoryTableCatalog, ObjectLocation,
    TransferDirection,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const BUCKET: &str = "ea-sftp-01";
const KEY: &str = "test.txt";

fn leftover_partials(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.to_string_lossy().ends_with(".part"))
        .collect()
}

fn tables() -> Vec<String> {
    (1..=8).map(|i| format!("table_{:02}", 9 - i)).collect()
}

#[tokio::test]
async fn test_list_returns_at_most_limit_in_service_order() {
    let facade = CloudFacade::new(
        InMemoryTableCatalog::with_tables(tables()),
        InMemoryObjectStore::default(),
    );

    let names = facade
        .list_table_names(5, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(
        names,
        vec!["table_08", "table_07", "table_06", "table_05", "table_04"]
    );
}

#[tokio::test]
async fn test_list_with_fewer_tables_than_limit() {
    let facade = CloudFacade::new(
        InMemoryTableCatalog::with_tables(["terraform_locks"]),
        InMemoryObjectStore::default(),
    );

    let names = facade
        .list_table_names(5, Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(names, vec!["terraform_locks"]);
}

#[tokio::test]
async fn test_upload_then_download_round_trips_bytes() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("test.txt");
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    std::fs::write(&source, &payload).unwrap();

    let store = InMemoryObjectStore::with_buckets([BUCKET]);
    let facade = CloudFacade::new(InMemoryTableCatalog::default(), store.clone());
    let location = ObjectLocation::new(BUCKET, KEY);

    let uploaded = facade
        .transfer_object(
            TransferDirection::Upload,
            &location,
            &source,
            Duration::from_secs(5),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.bytes, payload.len() as u64);
    assert!(uploaded.e_tag.is_some());
    assert_eq!(store.get(&location), Some(payload.clone()));

    let destination = dir.path().join("fromS3").join("test-fromS3.txt");
    let downloaded = facade
        .transfer_object(
            TransferDirection::Download,
            &location,
            &destination,
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert_eq!(downloaded.local_path, destination);
    assert_eq!(downloaded.bytes, payload.len() as u64);
    assert_eq!(downloaded.e_tag, uploaded.e_tag);
    assert_eq!(std::fs::read(&destination).unwrap(), payload);
    assert!(leftover_partials(&dir.path().join("fromS3")).is_empty());
}

#[tokio::test]
async fn test_slow_listing_times_out_instead_of_hanging() {
    let facade = CloudFacade::new(
        InMemoryTableCatalog::with_tables(tables()).with_latency(Duration::from_secs(10)),
        InMemoryObjectStore::default(),
    );

    let started = std::time::Instant::now();
    let result = facade.list_table_names(5, Duration::from_millis(50)).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    match result {
        Err(FacadeError::Timeout { operation, after }) => {
            assert_eq!(operation, "ListTables");
            assert_eq!(after, Duration::from_millis(50));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_upload_times_out() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("test.txt");
    std::fs::write(&source, b"payload").unwrap();

    let store = InMemoryObjectStore::with_buckets([BUCKET]).with_latency(Duration::from_secs(10));
    let facade = CloudFacade::new(InMemoryTableCatalog::default(), store.clone());

    let result = facade
        .transfer_object(
            TransferDirection::Upload,
            &ObjectLocation::new(BUCKET, KEY),
            &source,
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(FacadeError::Timeout { operation: "PutObject", .. })));
    assert_eq!(store.get(&ObjectLocation::new(BUCKET, KEY)), None);
}

#[tokio::test]
async fn test_timed_out_download_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    let store = InMemoryObjectStore::with_buckets([BUCKET]).with_latency(Duration::from_secs(10));
    store.insert(&ObjectLocation::new(BUCKET, KEY), b"stalled body".to_vec());
    let facade = CloudFacade::new(InMemoryTableCatalog::default(), store);

    let destination = dir.path().join("test.txt");
    let result = facade
        .transfer_object(
            TransferDirection::Download,
            &ObjectLocation::new(BUCKET, KEY),
            &destination,
            Duration::from_millis(100),
        )
        .await;

    assert!(matches!(result, Err(FacadeError::Timeout { operation: "GetObject", .. })));
    assert!(!destination.exists());
    assert!(leftover_partials(dir.path()).is_empty());
}

#[tokio::test]
async fn test_missing_key_is_not_found() {
    let dir = TempDir::new().unwrap();
    let facade = CloudFacade::new(
        InMemoryTableCatalog::default(),
        InMemoryObjectStore::with_buckets([BUCKET]),
    );

    let destination = dir.path().join("missing.txt");
    let result = facade
        .transfer_object(
            TransferDirection::Download,
            &ObjectLocation::new(BUCKET, "does/not/exist.txt"),
            &destination,
            Duration::from_secs(5),
        )
        .await;

    match result {
        Err(FacadeError::NotFound { resource, name }) => {
            assert_eq!(resource, "object");
            assert_eq!(name, "s3://ea-sftp-01/does/not/exist.txt");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_failed_download_keeps_existing_destination() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("keep.txt");
    std::fs::write(&destination, b"previous contents").unwrap();

    let facade = CloudFacade::new(
        InMemoryTableCatalog::default(),
        InMemoryObjectStore::with_buckets([BUCKET]),
    );

    let result = facade
        .transfer_object(
            TransferDirection::Download,
            &ObjectLocation::new(BUCKET, "absent"),
            &destination,
            Duration::from_secs(5),
        )
        .await;

    assert!(matches!(result, Err(FacadeError::NotFound { .. })));
    assert_eq!(std::fs::read(&destination).unwrap(), b"previous contents");
}

#[tokio::test]
async fn test_upload_to_missing_bucket_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("test.txt");
    std::fs::write(&source, b"payload").unwrap();

    let facade = CloudFacade::new(InMemoryTableCatalog::default(), InMemoryObjectStore::default());
    let result = facade
        .transfer_object(
            TransferDirection::Upload,
            &ObjectLocation::new("no-such-bucket", KEY),
            &source,
            Duration::from_secs(5),
        )
        .await;

    assert!(matches!(
        result,
        Err(FacadeError::NotFound { resource: "bucket", .. })
    ));
}

#[tokio::test]
async fn test_concurrent_calls_keep_their_own_timeouts() {
    let facade = Arc::new(CloudFacade::new(
        InMemoryTableCatalog::with_tables(tables()).with_latency(Duration::from_millis(300)),
        InMemoryObjectStore::default(),
    ));

    let impatient = {
        let facade = Arc::clone(&facade);
        tokio::spawn(async move { facade.list_table_names(5, Duration::from_millis(20)).await })
    };
    let patient = {
        let facade = Arc::clone(&facade);
        tokio::spawn(async move { facade.list_table_names(3, Duration::from_secs(10)).await })
    };

    let impatient = impatient.await.unwrap();
    let patient = patient.await.unwrap();

    assert!(matches!(impatient, Err(FacadeError::Timeout { .. })));
    assert_eq!(patient.unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_downloads_to_same_path_do_not_interfere() {
    let dir = TempDir::new().unwrap();
    let store =
        InMemoryObjectStore::with_buckets([BUCKET]).with_latency(Duration::from_millis(300));
    store.insert(&ObjectLocation::new(BUCKET, KEY), b"shared destination".to_vec());
    let facade = Arc::new(CloudFacade::new(InMemoryTableCatalog::default(), store));
    let destination = dir.path().join("test.txt");

    let impatient = {
        let facade = Arc::clone(&facade);
        let destination = destination.clone();
        tokio::spawn(async move {
            facade
                .transfer_object(
                    TransferDirection::Download,
                    &ObjectLocation::new(BUCKET, KEY),
                    &destination,
                    Duration::from_millis(30),
                )
                .await
        })
    };
    let patient = {
        let facade = Arc::clone(&facade);
        let destination = destination.clone();
        tokio::spawn(async move {
            facade
                .transfer_object(
                    TransferDirection::Download,
                    &ObjectLocation::new(BUCKET, KEY),
                    &destination,
                    Duration::from_secs(5),
                )
                .await
        })
    };

    let impatient = impatient.await.unwrap();
    let patient = patient.await.unwrap();

    assert!(matches!(impatient, Err(FacadeError::Timeout { operation: "GetObject", .. })));
    let outcome = patient.unwrap();
    assert_eq!(outcome.local_path, destination);
    assert_eq!(std::fs::read(&destination).unwrap(), b"shared destination");
    assert!(leftover_partials(dir.path()).is_empty());
}

#[tokio::test]
async fn test_shutdown_releases_backends() {
    let store = InMemoryObjectStore::with_buckets([BUCKET]);
    let facade = CloudFacade::new(InMemoryTableCatalog::default(), store.clone());

    facade.shutdown();

    // The clone kept outside still sees the shared state after the facade is gone.
    store.insert(&ObjectLocation::new(BUCKET, KEY), b"after".to_vec());
    assert_eq!(store.get(&ObjectLocation::new(BUCKET, KEY)), Some(b"after".to_vec()));
}
