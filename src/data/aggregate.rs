use std::collections::BTreeMap;

use ahash::AHashMap;
use chrono::NaiveDate;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Group-by-sum reductions
// ---------------------------------------------------------------------------
//
// Every function here takes the dataset plus the indices that survived
// filtering, and returns a fresh owned value. Nothing mutates the input and
// an empty index slice yields an empty output.

/// Countries with the largest summed emission value, descending.
///
/// Ties keep first-appearance order (the sort is stable). At most `n`
/// entries are returned.
pub fn top_countries(dataset: &Dataset, indices: &[usize], n: usize) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut positions: AHashMap<&str, usize> = AHashMap::new();

    for &i in indices {
        let rec = &dataset.records[i];
        match positions.get(rec.country.as_str()) {
            Some(&pos) => totals[pos].1 += rec.value,
            None => {
                positions.insert(rec.country.as_str(), totals.len());
                totals.push((rec.country.clone(), rec.value));
            }
        }
    }

    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(n);
    totals
}

/// Summed emission value per sector, in natural (lexicographic) label order.
pub fn sector_totals(dataset: &Dataset, indices: &[usize]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *totals.entry(&rec.sector).or_default() += rec.value;
    }
    totals
        .into_iter()
        .map(|(sector, total)| (sector.to_string(), total))
        .collect()
}

// ---------------------------------------------------------------------------
// Pass-through views
// ---------------------------------------------------------------------------

/// Raw emission values per sector, for the distribution (box) view.
/// Quartiles are left to the chart layer.
pub fn sector_values(dataset: &Dataset, indices: &[usize]) -> BTreeMap<String, Vec<f64>> {
    let mut values: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        values.entry(rec.sector.clone()).or_default().push(rec.value);
    }
    values
}

/// Two-level country → sector → summed value nesting for the hierarchy view.
pub fn country_sector_totals(
    dataset: &Dataset,
    indices: &[usize],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut nested: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *nested
            .entry(rec.country.clone())
            .or_default()
            .entry(rec.sector.clone())
            .or_default() += rec.value;
    }
    nested
}

/// Per-day sector totals for the animated view, keyed chronologically.
/// Records with a missing date carry no position on the time axis and are
/// dropped.
pub fn daily_sector_totals(
    dataset: &Dataset,
    indices: &[usize],
) -> BTreeMap<NaiveDate, BTreeMap<String, f64>> {
    let mut frames: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        let Some(date) = rec.date else { continue };
        *frames
            .entry(date)
            .or_default()
            .entry(rec.sector.clone())
            .or_default() += rec.value;
    }
    frames
}

/// Per-sector `(date, value)` series for the trend line, sorted by date.
/// Records with a missing date are dropped.
pub fn trend_points(
    dataset: &Dataset,
    indices: &[usize],
) -> BTreeMap<String, Vec<(NaiveDate, f64)>> {
    let mut series: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        let Some(date) = rec.date else { continue };
        series
            .entry(rec.sector.clone())
            .or_default()
            .push((date, rec.value));
    }
    for points in series.values_mut() {
        points.sort_by_key(|&(d, _)| d);
    }
    series
}

/// ISO-style time-axis label for a date.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics of the `value` column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

pub fn value_summary(dataset: &Dataset, indices: &[usize]) -> ValueSummary {
    if indices.is_empty() {
        return ValueSummary::default();
    }
    let mut total = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &i in indices {
        let v = dataset.records[i].value;
        total += v;
        min = min.min(v);
        max = max.max(v);
    }
    ValueSummary {
        count: indices.len(),
        total,
        mean: total / indices.len() as f64,
        min,
        max,
    }
}
