pub mod facade;
pub mod wait;

pub use crate::domain::model::{ObjectLocation, TransferDirection, TransferOutcome, TransferReceipt};
pub use crate::domain::ports::{ObjectStore, TableCatalog};
pub use crate::utils::error::Result;
