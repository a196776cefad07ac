use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde_json::Value;

use varwin_core::models::WindowTable;
use varwin_windowize::AggregationResult;

pub const WINDOW_HEADER: [&str; 4] = ["index", "start", "end", "length"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid output format: {}. Valid options are 'tsv' or 'json'",
                s
            )),
        }
    }
}

/// Open the output path for writing, or stdout when no path is given.
pub fn open_output(path: Option<&String>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

pub fn write_windows<W: Write>(
    table: &WindowTable,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            writeln!(out, "{}", WINDOW_HEADER.join("\t"))?;
            for window in table {
                writeln!(out, "{}", window)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, table.windows())?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

///
/// Write an aggregation result, optionally followed by a `gc` column.
///
/// In TSV output windows without unambiguous bases get `NA` for `gc`; in JSON
/// they get `null`.
///
pub fn write_result<W: Write>(
    result: &AggregationResult,
    gc: Option<&[Option<f64>]>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            let mut header: Vec<&str> = WINDOW_HEADER.to_vec();
            header.extend(result.column_names());
            if gc.is_some() {
                header.push("gc");
            }
            writeln!(out, "{}", header.join("\t"))?;

            for (i, row) in result.rows().enumerate() {
                write!(out, "{}", row.window)?;
                for (_, count) in &row.counts {
                    write!(out, "\t{}", count)?;
                }
                if let Some(gc) = gc {
                    match gc[i] {
                        Some(fraction) => write!(out, "\t{:.4}", fraction)?,
                        None => write!(out, "\tNA")?,
                    }
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            let mut rows = serde_json::to_value(result)?;
            if let (Some(gc), Value::Array(rows)) = (gc, &mut rows) {
                for (row, fraction) in rows.iter_mut().zip(gc) {
                    if let Value::Object(map) = row {
                        map.insert("gc".to_string(), serde_json::json!(fraction));
                    }
                }
            }
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
