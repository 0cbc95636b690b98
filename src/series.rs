//! Loading historical price series from local files
//!
//! Two formats are accepted:
//!
//! - a JSON array of numbers, e.g. `[100.0, 101.5, 99.8]`
//! - CSV (or plain text with one value per line), read with the `csv` crate
//!
//! For CSV with a header row the price column is the one named `close`,
//! `adj close`, `adj_close` or `price` (case-insensitive); a header with a
//! single column is used as is. Without a header the last column holds the
//! price. Thousands separators inside quoted fields (`"1,234.50"`) are
//! accepted.

use crate::error::{Error, Result};
use crate::returns::validate_prices;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// Header names recognized as the price column
pub const PRICE_COLUMNS: [&str; 4] = ["close", "adj close", "adj_close", "price"];

/// Reads and validates a price series from a file
pub fn load_prices(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let content = std::fs::read_to_string(path)?;
    parse_prices(&content)
}

/// Parses and validates a price series from file content
///
/// # Example
/// ```
/// use price_forecast::series::parse_prices;
///
/// let csv = "date,open,close,volume\n2024-01-02,99,100.5,120000\n2024-01-03,100,101,98000\n";
/// assert_eq!(parse_prices(csv).unwrap(), vec![100.5, 101.0]);
/// ```
pub fn parse_prices(content: &str) -> Result<Vec<f64>> {
    let prices = if content.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<f64>>(content)?
    } else {
        parse_csv(content)?
    };

    if prices.is_empty() {
        return Err(Error::EmptySeries);
    }
    validate_prices(&prices)?;
    Ok(prices)
}

fn parse_csv(content: &str) -> Result<Vec<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let Some(first) = records.next().transpose()? else {
        return Ok(Vec::new());
    };
    let last = first.len().saturating_sub(1);

    let mut prices = Vec::new();
    let column = if let Some(column) = header_column(&first) {
        column
    } else if first.get(last).and_then(parse_price).is_some() {
        prices.push(record_price(&first, last)?);
        last
    } else if first.len() == 1 {
        0
    } else {
        return Err(Error::MissingPriceColumn(
            first.iter().collect::<Vec<_>>().join(","),
        ));
    };

    for record in records {
        prices.push(record_price(&record?, column)?);
    }
    Ok(prices)
}

fn header_column(header: &StringRecord) -> Option<usize> {
    header
        .iter()
        .position(|h| PRICE_COLUMNS.iter().any(|c| h.eq_ignore_ascii_case(c)))
}

fn parse_price(field: &str) -> Option<f64> {
    field.replace(',', "").parse().ok()
}

fn record_price(record: &StringRecord, column: usize) -> Result<f64> {
    record
        .get(column)
        .and_then(parse_price)
        .ok_or_else(|| Error::Parse {
            line: record.position().map_or(0, |p| p.line() as usize),
            content: record.iter().collect::<Vec<_>>().join(","),
        })
}
