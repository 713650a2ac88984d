// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! CSV files of filter experiment results
//!
//! Each row holds `distance,y,error` and optionally a fourth `mse` column.
//! Coefficient files hold one filter tap per row in the first column.

use anyhow::{Context, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One row of an experiment result file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentRecord {
    /// Desired signal sample
    pub distance: f64,
    /// Filter output sample
    pub y: f64,
    /// Error sample
    pub error: f64,
    pub mse: Option<f64>,
}

impl ExperimentRecord {
    pub fn new(distance: f64, y: f64, error: f64) -> Self {
        Self {
            distance,
            y,
            error,
            mse: None,
        }
    }
}

/// Zip result columns into records.
///
/// `distance`, `y` and `error` must have the same length; `mse` may be
/// shorter, rows past its end carry no mse value.
pub fn records_from_columns(
    distance: &[f64],
    y: &[f64],
    error: &[f64],
    mse: &[f64],
) -> Result<Vec<ExperimentRecord>> {
    if distance.len() != y.len() || distance.len() != error.len() {
        anyhow::bail!(
            "Column lengths must agree: distance {}, y {}, error {}",
            distance.len(),
            y.len(),
            error.len()
        );
    }
    Ok((0..distance.len())
        .map(|i| ExperimentRecord {
            distance: distance[i],
            y: y[i],
            error: error[i],
            mse: mse.get(i).copied(),
        })
        .collect())
}

/// Write records as CSV, without a header
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ExperimentRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file at {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let written = match record.mse {
            Some(mse) => writeln!(
                writer,
                "{},{},{},{}",
                record.distance, record.y, record.error, mse
            ),
            None => writeln!(writer, "{},{},{}", record.distance, record.y, record.error),
        };
        written.with_context(|| format!("Failed to write CSV row to {:?}", path))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file {:?}", path))?;

    debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

fn parse_field(field: &str, line: usize, column: &str) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Line {}: invalid {} value {:?}", line, column, field))
}

/// Read records written by `write_records`. Blank lines are skipped.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<ExperimentRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file at {:?}", path))?;

    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            anyhow::bail!(
                "Line {} of {:?}: expected at least 3 columns, found {}",
                line_no,
                path,
                fields.len()
            );
        }
        let mse = match fields.get(3) {
            Some(field) => Some(parse_field(field, line_no, "mse")?),
            None => None,
        };
        records.push(ExperimentRecord {
            distance: parse_field(fields[0], line_no, "distance")?,
            y: parse_field(fields[1], line_no, "y")?,
            error: parse_field(fields[2], line_no, "error")?,
            mse,
        });
    }
    Ok(records)
}

/// Read filter coefficients from the first column of a CSV file
pub fn read_coefficients<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read coefficient file at {:?}", path))?;

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let first = line.split(',').next().unwrap_or_default();
            parse_field(first, index + 1, "coefficient")
        })
        .collect()
}
