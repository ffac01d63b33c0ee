//! Reporting collaborators for the segmentation core — distribution table,
//! segment bar chart, and JSON export of the scored population.

pub mod chart;
pub mod export;
pub mod table;

pub use chart::render_segment_chart;
pub use export::write_scored_json;
pub use table::distribution_table;
