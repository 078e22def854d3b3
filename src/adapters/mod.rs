// Adapters layer: concrete implementations of the domain ports.

pub mod aws;
pub mod dynamodb;
pub mod memory;
pub mod s3;

pub use aws::{AwsClients, AwsFacade};
pub use dynamodb::DynamoTableCatalog;
pub use memory::{InMemoryObjectStore, InMemoryTableCatalog};
pub use s3::S3ObjectStore;
