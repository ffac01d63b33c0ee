pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{RfmError, RfmResult};
pub use types::{
    CustomerMetrics, RfmCode, ScoredCustomer, Segment, SegmentDistribution, TransactionRecord,
};
