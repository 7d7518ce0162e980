//! Scan report rendering.

use std::io::{self, Write};

use serde::Serialize;

use crate::scanner::{ScanEntry, ScanReport};

/// Trailing disclaimer printed after every text report.
pub const DISCLAIMER: &str = "Note: 'Likely Direct Play compatible' is an assumption based on \
common codecs and containers. Actual direct play depends on your client.";

/// Write the human-readable report: counts, then one detail section per
/// non-empty bucket in the order files were found.
pub fn write_text<W: Write>(report: &ScanReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n--- Scan Results ---")?;
    writeln!(out, "Total video files found: {}", report.total())?;
    writeln!(
        out,
        "Files likely Direct Play compatible: {}",
        report.compatible.len()
    )?;
    writeln!(
        out,
        "Files likely need conversion (or transcode): {}",
        report.needs_conversion.len()
    )?;
    writeln!(
        out,
        "Files that could not be processed: {}",
        report.unprocessed.len()
    )?;

    write_entries(
        out,
        "Details of Likely Direct Play Compatible Files",
        &report.compatible,
    )?;
    write_entries(
        out,
        "Details of Files Likely Needing Conversion/Transcoding",
        &report.needs_conversion,
    )?;

    if !report.unprocessed.is_empty() {
        writeln!(out, "\n--- Details of Unprocessed Files (Check ffprobe errors) ---")?;
        for path in &report.unprocessed {
            writeln!(out, "- {}", path.display())?;
        }
    }

    writeln!(out, "\n{}", DISCLAIMER)
}

fn write_entries<W: Write>(out: &mut W, title: &str, entries: &[ScanEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    writeln!(out, "\n--- {} ---", title)?;
    for entry in entries {
        writeln!(out, "- {} ({})", entry.path.display(), entry.reason)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    #[serde(flatten)]
    report: &'a ScanReport,
}

/// Write the report as a pretty-printed JSON object with a `total` field and
/// the three buckets.
pub fn write_json<W: Write>(report: &ScanReport, out: &mut W) -> io::Result<()> {
    let json = JsonReport {
        total: report.total(),
        report,
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)
}
