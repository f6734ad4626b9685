// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSV loading for stock price tables.
//!
//! The expected columns are `company`, `date` (`YYYY-MM-DD`) and `price`, where prices
//! carry a one-character currency prefix (`$123.45`, `€99`). Extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use trellis_transforms::{DataPoint, Dataset, DatasetError};

/// Errors from [`load_path`] and [`load_reader`].
///
/// Every per-record variant carries the 1-based line of the offending record.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("failed to open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: malformed record")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: invalid date {value:?}, expected YYYY-MM-DD")]
    Date {
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("line {line}: invalid price {value:?}")]
    Price { line: u64, value: String },
    #[error("line {line}: rejected point")]
    Dataset {
        line: u64,
        #[source]
        source: DatasetError,
    },
}

#[derive(Debug, Deserialize)]
struct Row {
    company: String,
    date: String,
    price: String,
}

/// Loads a dataset from a CSV file.
pub(crate) fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Loads a dataset from any CSV byte stream.
pub(crate) fn load_reader(reader: impl Read) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Csv { line: 1, source })?
        .clone();

    let mut dataset = Dataset::new();
    for record in rdr.records() {
        let record = record.map_err(|source| LoadError::Csv {
            line: error_line(&source),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: Row = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { line, source })?;

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|source| {
            LoadError::Date {
                line,
                value: row.date.clone(),
                source,
            }
        })?;
        let price = parse_price(&row.price).ok_or_else(|| LoadError::Price {
            line,
            value: row.price.clone(),
        })?;
        dataset
            .push(DataPoint::new(row.company, date, price))
            .map_err(|source| LoadError::Dataset { line, source })?;
    }

    tracing::info!(points = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Parses a price such as `$1,234.50` or `€12.50`.
///
/// One leading currency symbol and any thousands separators are optional.
fn parse_price(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut chars = s.chars();
    let s = match chars.next() {
        Some(c) if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) => chars.as_str(),
        _ => s,
    };
    if s.is_empty() {
        return None;
    }
    s.replace(',', "").parse().ok()
}

fn error_line(err: &csv::Error) -> u64 {
    err.position().map_or(0, csv::Position::line)
}
