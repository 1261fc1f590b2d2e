// Wed Aug 19 2026 - Alex

use crate::engine::aggregator::ScanReport;
use crate::output::OutputFormat;
use crate::provider::arn::parse_arn;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn save_report(
    report: &ScanReport,
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => write_json(report, &mut writer, pretty)?,
        OutputFormat::Csv => write_csv(report, &mut writer)?,
        OutputFormat::Text => write_text(report, &mut writer)?,
    }

    writer.flush()?;
    log::info!("Saved {} resources to {}", report.resource_count(), path.display());
    Ok(())
}

// The artifact is the flat ARN list; errors and counters stay on the
// console/log side.
fn write_json<W: Write>(report: &ScanReport, writer: &mut W, pretty: bool) -> io::Result<()> {
    let arns: Vec<&str> = report.identifiers.iter().map(String::as_str).collect();

    if pretty {
        serde_json::to_writer_pretty(writer, &arns)?;
    } else {
        serde_json::to_writer(writer, &arns)?;
    }
    Ok(())
}

fn write_csv<W: Write>(report: &ScanReport, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "arn,partition,service,region,account,resource")?;

    for arn in &report.identifiers {
        match parse_arn(arn) {
            Some(parts) => writeln!(
                writer,
                "{},{},{},{},{},{}",
                csv_field(arn),
                parts.partition,
                parts.service,
                parts.region,
                parts.account,
                csv_field(&parts.resource)
            )?,
            // Pseudo-identifiers (hosted zone records and the like) still get
            // a row; the parsed columns stay blank.
            None => writeln!(writer, "{},,,,,", csv_field(arn))?,
        }
    }
    Ok(())
}

fn write_text<W: Write>(report: &ScanReport, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "AWS Resource Inventory")?;
    writeln!(writer, "======================")?;
    writeln!(writer, "Resources found: {}", report.resource_count())?;
    writeln!(
        writer,
        "Scan items: {} scanned, {} skipped",
        report.items_scanned, report.items_skipped
    )?;
    writeln!(writer)?;

    let mut arns: Vec<&String> = report.identifiers.iter().collect();
    arns.sort();
    for arn in arns {
        writeln!(writer, "{}", arn)?;
    }

    if !report.errors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Errors ({}):", report.errors.len())?;
        for error in &report.errors {
            writeln!(writer, "  {}", error.summary())?;
        }
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
