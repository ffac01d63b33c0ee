//! RFM segmentation core — metric aggregation, population-relative quartile
//! scoring, and ordered-rule segment classification.

pub mod engine;
pub mod metrics;
pub mod quartile;
pub mod rules;

pub use engine::SegmentationEngine;
pub use metrics::{aggregate, snapshot_instant};
pub use rules::{default_rules, DigitRange, SegmentRule};
