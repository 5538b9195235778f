use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::cache::{fingerprint, LoadCache};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural load failures. Bad dates are not errors; they are coerced to
/// the missing marker and counted on the resulting [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: value '{raw}' is not a number")]
    BadValue { row: usize, raw: String },

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Columns every uploaded file must carry (names compared after the header
/// whitespace is stripped).
pub const REQUIRED_COLUMNS: [&str; 4] = ["country", "sector", "date", "value"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file on disk, consulting `cache` by content
/// fingerprint so a byte-identical re-upload skips the parse.
pub fn load_file(path: &Path, cache: &mut LoadCache) -> Result<Dataset> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let key = fingerprint(&bytes);
    if let Some(dataset) = cache.get(key) {
        log::debug!("load cache hit for {}", path.display());
        return Ok(dataset.clone());
    }

    let dataset =
        load_bytes(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    cache.insert(key, dataset.clone());
    Ok(dataset)
}

/// One CSV row as decoded by serde. Extra columns are ignored; `value` is
/// kept as text so a bad cell can be reported with its row number.
#[derive(Debug, Deserialize)]
struct RawRecord {
    country: String,
    sector: String,
    date: String,
    value: String,
}

/// Parse raw CSV bytes into a [`Dataset`].
///
/// Header names are stripped of surrounding whitespace before the required
/// columns are located. The `date` column is parsed day-first; unparseable
/// cells become `None` and are counted, never raised.
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    let mut date_parse_failures = 0usize;

    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;

        let value: f64 = raw.value.trim().parse().map_err(|_| LoadError::BadValue {
            row,
            raw: raw.value.clone(),
        })?;

        let date = parse_dayfirst(&raw.date);
        if date.is_none() {
            date_parse_failures += 1;
        }

        records.push(Record {
            country: raw.country,
            sector: raw.sector,
            date,
            value,
        });
    }

    if date_parse_failures > 0 {
        log::warn!("failed to parse {date_parse_failures} date value(s)");
    }

    Ok(Dataset::from_records(records, date_parse_failures))
}

// ---------------------------------------------------------------------------
// Day-first date parsing
// ---------------------------------------------------------------------------

/// Formats tried in order. Day comes before month, so "03/04/2021" is
/// April 3rd. ISO dates are accepted as a fallback since they are
/// unambiguous.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

fn parse_dayfirst(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
country,sector,date,value
A,Energy,01/02/2020,10
A,Transport,02/02/2020,5
B,Energy,01/02/2020,20
";

    #[test]
    fn loads_the_sample_table() {
        let ds = load_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.countries, vec!["A", "B"]);
        assert_eq!(ds.sectors, vec!["Energy", "Transport"]);
        assert_eq!(ds.date_parse_failures, 0);
        // 01/02/2020 is February 1st under day-first rules.
        assert_eq!(
            ds.records[0].date,
            Some(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap())
        );
    }

    #[test]
    fn dayfirst_end_of_year_is_not_out_of_range() {
        let d = parse_dayfirst("31/12/2020").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
    }

    #[test]
    fn header_whitespace_is_stripped() {
        let csv = " country , sector , date , value \nA,Energy,01/02/2020,1\n";
        let ds = load_bytes(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].country, "A");
    }

    #[test]
    fn missing_value_column_is_a_structural_error() {
        let csv = "country,sector,date\nA,Energy,01/02/2020\n";
        let err = load_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("value")));
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn bad_dates_are_coerced_and_counted() {
        let csv = "country,sector,date,value\nA,Energy,not-a-date,1\nB,Energy,31/12/2020,2\n";
        let ds = load_bytes(csv.as_bytes()).unwrap();
        assert_eq!(ds.date_parse_failures, 1);
        assert_eq!(ds.records[0].date, None);
        assert!(ds.records[1].date.is_some());
    }

    #[test]
    fn bad_numeric_value_names_the_row() {
        let csv = "country,sector,date,value\nA,Energy,01/02/2020,abc\n";
        let err = load_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::BadValue { row: 0, .. }));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "country,sector,date,value,unit\nA,Energy,01/02/2020,1,Mt\n";
        let ds = load_bytes(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
    }
}
