use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::rows::Rows;

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    Pretty,
    File,
}

/// Renders `rows` according to `mode`, `None` prints them plainly to stdout.
pub fn control_output<const N: usize>(
    rows: &Rows<N>,
    mode: Option<OutputMode>,
    results_dir: &Path,
    run_name: &str,
) -> Result<()> {
    let stdout = io::stdout();
    match mode {
        None => write_plain(rows, &mut stdout.lock())?,
        Some(OutputMode::Pretty) => write_pretty(rows, &mut stdout.lock())?,
        Some(OutputMode::File) => {
            let path = write_file(rows, results_dir, run_name, Local::now())?;
            log::info!("Results saved to {}", path.display());
        }
    }
    Ok(())
}

pub fn write_plain<W: Write, const N: usize>(rows: &Rows<N>, out: &mut W) -> io::Result<()> {
    for record in rows.records() {
        writeln!(out, "{}", record.join(" "))?;
    }
    Ok(())
}

pub fn write_pretty<W: Write, const N: usize>(rows: &Rows<N>, out: &mut W) -> io::Result<()> {
    let mut widths = [0; N];
    for record in rows.records() {
        for (width, cell) in widths.iter_mut().zip(record) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let rule = format!("+{rule}+");

    writeln!(out, "{rule}")?;
    for (i, record) in rows.records().enumerate() {
        let cells = record
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {cell:<width$} "))
            .collect::<Vec<_>>()
            .join("|");
        writeln!(out, "|{cells}|")?;
        if i == 0 {
            writeln!(out, "{rule}")?;
        }
    }
    writeln!(out, "{rule}")
}

/// Writes a CSV file named `<run_name>_<timestamp>.csv` under `results_dir`.
pub fn write_file<const N: usize>(
    rows: &Rows<N>,
    results_dir: &Path,
    run_name: &str,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    fs_err::create_dir_all(results_dir)?;
    let path = results_dir.join(format!("{run_name}_{}.csv", now.format(DATETIME_FORMAT)));

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("Couldn't create {}", path.display()))?;
    for record in rows.records() {
        wtr.write_record(record)?;
    }
    wtr.flush()?;

    Ok(path)
}
