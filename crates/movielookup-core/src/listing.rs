//! Reading and writing whole listings.
//!
//! A listing is a tab-delimited text file with one [`Row`] per line. Output
//! goes through a temporary file in the destination directory that is
//! persisted over the target only once fully written, so an interrupted run
//! never leaves a partial artifact behind.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::{LookupError, Row};

/// Split listing text into rows. Accepts `\n` and `\r\n` line endings.
pub fn parse_listing(text: &str) -> Vec<Row> {
    text.lines()
        .enumerate()
        .map(|(i, line)| Row::from_line(line, i == 0))
        .collect()
}

/// Render rows back to listing text, one `\n`-terminated line per row.
pub fn render_listing(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.to_line());
        out.push('\n');
    }
    out
}

/// Read and parse the listing at `path`.
///
/// Fails with [`LookupError::EmptyInput`] when the file has no lines.
pub fn read_listing(path: &Path) -> Result<Vec<Row>, LookupError> {
    let text = std::fs::read_to_string(path).map_err(|source| LookupError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_listing(&text);
    if rows.is_empty() {
        return Err(LookupError::EmptyInput(path.to_path_buf()));
    }
    info!(path = %path.display(), rows = rows.len(), "read listing");
    Ok(rows)
}

/// Atomically replace `path` with the rendered listing.
pub fn write_listing(path: &Path, rows: &[Row]) -> Result<(), LookupError> {
    let write_err = |source: std::io::Error| LookupError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(render_listing(rows).as_bytes())
        .map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), rows = rows.len(), "wrote listing");
    Ok(())
}
