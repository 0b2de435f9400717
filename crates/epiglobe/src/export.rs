//! CSV export of normalized metrics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{EpiglobeError, Result};
use crate::models::NormalizedCountryMetric;

/// Write `metrics` as CSV with a header row.
pub fn write_csv<W: Write>(metrics: &[NormalizedCountryMetric], writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for metric in metrics {
        out.serialize(metric)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `metrics` as CSV to `path`, replacing any existing file.
pub fn export_csv(metrics: &[NormalizedCountryMetric], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| EpiglobeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(metrics, file)
}
