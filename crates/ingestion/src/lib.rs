//! Transaction history ingestion — CSV parsing and cleaning ahead of the
//! segmentation core.

pub mod loader;

pub use loader::{load_transactions, load_transactions_file, RawTransaction};
