pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AwsClients, AwsFacade, InMemoryObjectStore, InMemoryTableCatalog};
pub use config::FacadeConfig;
pub use crate::core::{facade::CloudFacade, wait::bounded_wait};
pub use domain::model::{ObjectLocation, TransferDirection, TransferOutcome};
pub use utils::error::{FacadeError, Result};
