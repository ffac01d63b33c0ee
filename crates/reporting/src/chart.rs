//! Segment distribution bar chart rendered to a PNG file.

use plotters::prelude::*;
use rfm_core::{RfmError, RfmResult, SegmentDistribution};
use std::path::Path;
use tracing::info;

/// Draw one bar per segment, largest first, and save the chart as PNG.
/// Empty segments are drawn with zero-height bars so the full label set is
/// always visible.
pub fn render_segment_chart(
    distribution: &SegmentDistribution,
    output_path: &Path,
    size: (u32, u32),
) -> RfmResult<()> {
    let rows = distribution.sorted_counts();
    let labels: Vec<String> = rows.iter().map(|(s, _)| s.to_string()).collect();
    let max_count = rows.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1) as f64;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RfmError::Report(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Customer Segmentation Distribution", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(rows.len() as f64 - 0.5), 0f64..(max_count * 1.1))
        .map_err(|e| RfmError::Report(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| {
            let idx = x.round() as isize;
            if idx >= 0 && (idx as usize) < labels.len() && (x - idx as f64).abs() < 0.25 {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .x_desc("Customer Segment")
        .y_desc("Number of Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| RfmError::Report(e.to_string()))?;

    for (i, &(_, count)) in rows.iter().enumerate() {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(i as f64 - 0.4, 0.0), (i as f64 + 0.4, count as f64)],
                BLUE.filled(),
            )))
            .map_err(|e| RfmError::Report(e.to_string()))?;
    }

    root.present().map_err(|e| RfmError::Report(e.to_string()))?;
    info!(path = %output_path.display(), "segment chart written");
    Ok(())
}
