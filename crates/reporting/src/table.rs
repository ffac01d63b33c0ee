//! Fixed-width terminal table of the segment distribution.

use rfm_core::SegmentDistribution;
use std::fmt::Write;

/// Render segment counts as a text table, largest segment first.
pub fn distribution_table(distribution: &SegmentDistribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<22}{:>10}", "Segment", "Customers");
    let _ = writeln!(out, "{:-<32}", "");
    for (segment, count) in distribution.sorted_counts() {
        let _ = writeln!(out, "{:<22}{:>10}", segment.to_string(), count);
    }
    let _ = writeln!(out, "{:-<32}", "");
    let _ = writeln!(out, "{:<22}{:>10}", "Total", distribution.total());
    out
}
