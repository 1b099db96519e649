use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};
use crate::record::Record;

/// Write the header row followed by one row per record.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(Record::HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the CSV next to `path` under a temporary name, then rename it into
/// place. `path` is untouched if anything fails before the rename.
///
/// The temporary file is created with owner-only permissions, which the
/// rename preserves.
pub fn write_csv_atomic(path: &Path, records: &[Record]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    debug!("Rendering {} rows into {}", records.len(), tmp.path().display());

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_records(&mut writer, records)?;
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(path).map_err(|e| ConvertError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
