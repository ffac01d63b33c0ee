//! Machine-readable export of the scored population.

use rfm_core::{RfmResult, ScoredCustomer};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Write the scored population as pretty-printed JSON.
pub fn write_scored_json(scored: &[ScoredCustomer], path: &Path) -> RfmResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), scored)?;
    info!(customers = scored.len(), path = %path.display(), "scored population written");
    Ok(())
}
