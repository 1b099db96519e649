use log::{info, warn};

use crate::error::Result;
use crate::exporter::write_csv_atomic;
use crate::flatten::flatten;
use crate::importer::read_document;
use crate::utils::{ConvertConfig, ConvertOutcome};

/// Read, flatten and write. The output file is only created when there is
/// at least one record and every node converted cleanly.
pub fn execute(config: &ConvertConfig) -> Result<ConvertOutcome> {
    let document = read_document(&config.input)?;
    info!(
        "Read {} top-level nodes from {}",
        document.nodes.len(),
        config.input.display()
    );

    let flat = flatten(&document, config.compat)?;
    for (kind, count) in &flat.stats.skipped {
        warn!("Skipped {count} entries of unsupported type {kind:?}");
    }

    if flat.records.is_empty() {
        return Ok(ConvertOutcome::Empty);
    }

    write_csv_atomic(&config.output, &flat.records)?;
    info!(
        "Wrote {} rows to {}",
        flat.records.len(),
        config.output.display()
    );

    Ok(ConvertOutcome::Written {
        records: flat.records.len(),
        skipped: flat.stats.skipped_total(),
    })
}
