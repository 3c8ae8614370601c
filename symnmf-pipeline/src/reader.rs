//! Comma-separated vector input.
//!
//! One vector per line, values separated by `,`, no header. Blank lines are
//! skipped; every other line must have the same number of values as the
//! first, and every value must be a finite number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use symnmf_core::VectorSet;

use crate::error::{PipelineError, Result};

pub fn read_vectors(path: impl AsRef<Path>) -> Result<VectorSet> {
    let path = path.as_ref();
    info!("Reading vectors from {}", path.display());
    let file = File::open(path)?;
    parse_vectors(file)
}

pub fn parse_vectors<R: Read>(reader: R) -> Result<VectorSet> {
    // Row widths are checked below so ragged input gets a line-numbered error.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width = None;

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record
            .position()
            .map_or(idx + 1, |pos| pos.line() as usize);
        let row = parse_record(&record, line)?;
        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(PipelineError::RaggedRow {
                    line,
                    expected,
                    actual: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    debug!("Parsed {} vectors of dim {}", rows.len(), width.unwrap_or(0));
    Ok(VectorSet::new(&rows)?)
}

fn parse_record(record: &StringRecord, line: usize) -> Result<Vec<f64>> {
    record
        .iter()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PipelineError::Parse {
                line,
                token: token.to_string(),
            }),
        })
        .collect()
}
