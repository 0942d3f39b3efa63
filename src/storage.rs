use crate::layout::LayoutReport;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save layout reports as CSV with header.
pub fn save_csv<P: AsRef<Path>>(reports: &[LayoutReport], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for r in reports {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save layout reports as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(reports: &[LayoutReport], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(reports)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save to CSV or JSON depending on the file extension (CSV when unknown).
pub fn save_report<P: AsRef<Path>>(reports: &[LayoutReport], path: P) -> Result<()> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => save_json(reports, path),
        Some("csv") | None => save_csv(reports, path),
        Some(other) => anyhow::bail!("unsupported report format: {}", other),
    }
}
