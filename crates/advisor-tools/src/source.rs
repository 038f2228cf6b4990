//! Price and NAV history sources
//!
//! The analysis tools never fetch data themselves. A [`SeriesSource`] hands
//! them a validated [`Series`] for an identifier; the CSV source reads
//! exports such as Yahoo Finance downloads or AMFI NAV histories.

use advisor_analysis::{InvestmentType, Series};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, ToolError};

/// Date formats accepted in CSV files, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d-%b-%Y"];

/// Column names holding the observed value, in order of preference
const VALUE_COLUMNS: [&str; 5] = ["value", "nav", "adj close", "adj_close", "close"];

/// Provides the price or NAV history of an instrument
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn load(&self, identifier: &str, investment_type: InvestmentType) -> Result<Series>;
}

/// Series held in memory, keyed by identifier
#[derive(Debug, Default, Clone)]
pub struct InMemorySeriesSource {
    series: HashMap<String, Series>,
}

impl InMemorySeriesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, identifier: impl Into<String>, series: Series) -> Self {
        self.insert(identifier, series);
        self
    }

    pub fn insert(&mut self, identifier: impl Into<String>, series: Series) {
        self.series.insert(identifier.into(), series);
    }
}

#[async_trait]
impl SeriesSource for InMemorySeriesSource {
    async fn load(&self, identifier: &str, _investment_type: InvestmentType) -> Result<Series> {
        self.series
            .get(identifier)
            .cloned()
            .ok_or_else(|| ToolError::Source(format!("no data found for '{identifier}'")))
    }
}

/// Reads `<identifier>.csv` files from a directory
///
/// `<dir>/<investment_type>/<identifier>.csv` is tried first, then
/// `<dir>/<identifier>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    dir: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self, identifier: &str, investment_type: InvestmentType) -> Vec<PathBuf> {
        let file = format!("{identifier}.csv");
        vec![
            self.dir.join(investment_type.as_str()).join(&file),
            self.dir.join(file),
        ]
    }
}

#[async_trait]
impl SeriesSource for CsvSeriesSource {
    async fn load(&self, identifier: &str, investment_type: InvestmentType) -> Result<Series> {
        if identifier.is_empty()
            || identifier.contains(['/', '\\'])
            || identifier.starts_with('.')
        {
            return Err(ToolError::InvalidParameters(format!(
                "invalid identifier '{identifier}'"
            )));
        }

        for path in self.candidates(identifier, investment_type) {
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    debug!(path = %path.display(), "Loading series from CSV");
                    let series = parse_csv(&text)?;
                    info!(
                        identifier,
                        points = series.len(),
                        start = %series.first().date,
                        end = %series.last().date,
                        "Loaded series"
                    );
                    return Ok(series);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Err(ToolError::Source(format!(
            "no data found for '{identifier}' in {}",
            self.dir.display()
        )))
    }
}

/// Parse a CSV history with a `date` column and a value column
///
/// The value column is the first of `value`, `nav`, `adj close`, `adj_close`
/// or `close` present (case-insensitive). Rows whose date or value does not
/// parse are dropped. The result is sorted by date; for duplicate dates the
/// last row wins.
pub fn parse_csv(text: &str) -> Result<Series> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let date_col = headers
        .iter()
        .position(|h| h == "date")
        .ok_or_else(|| ToolError::Source("CSV has no 'date' column".to_string()))?;
    let value_col = VALUE_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
        .ok_or_else(|| {
            ToolError::Source(format!(
                "CSV has no value column (expected one of: {})",
                VALUE_COLUMNS.join(", ")
            ))
        })?;

    let mut rows = BTreeMap::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "Skipping malformed CSV row");
                dropped += 1;
                continue;
            }
        };
        let date = record.get(date_col).and_then(parse_date);
        let value = record
            .get(value_col)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite());
        match (date, value) {
            (Some(date), Some(value)) => {
                rows.insert(date, value);
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = rows.len(), "Dropped unparsable CSV rows");
    }
    if rows.is_empty() {
        return Err(ToolError::Source("CSV contains no usable rows".to_string()));
    }

    Ok(Series::from_pairs(rows)?)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
