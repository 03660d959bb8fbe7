// Service exports
pub mod catalog;
pub mod verification;

pub use catalog::{CatalogError, CatalogStore};
pub use verification::{VerificationError, VerificationStore};
