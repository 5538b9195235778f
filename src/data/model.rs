use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one row of the uploaded CSV
// ---------------------------------------------------------------------------

/// A single emission record (one row of the source table).
///
/// Rows are immutable once loaded; identity is row position within the
/// owning [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub sector: String,
    /// Calendar date of the measurement. `None` marks a value that could
    /// not be parsed under the day-first convention.
    pub date: Option<NaiveDate>,
    /// Emission quantity.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Dimension – the categorical columns usable for filtering
// ---------------------------------------------------------------------------

/// A categorical column used for grouping and filtering.
///
/// Filter constraints can only name these variants, so a constraint on a
/// column absent from the schema is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Country,
    Sector,
}

impl Dimension {
    /// Field accessor for a record along this dimension.
    pub fn of(self, record: &Record) -> &str {
        match self {
            Dimension::Country => &record.country,
            Dimension::Sector => &record.sector,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique dimension values.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows), in file order.
    pub records: Vec<Record>,
    /// Sorted unique country names.
    pub countries: Vec<String>,
    /// Sorted unique sector names.
    pub sectors: Vec<String>,
    /// How many `date` cells failed day-first parsing and were coerced to
    /// the missing marker.
    pub date_parse_failures: usize,
}

impl Dataset {
    /// Build dimension indices from the loaded records.
    pub fn from_records(records: Vec<Record>, date_parse_failures: usize) -> Self {
        let mut countries: BTreeSet<&str> = BTreeSet::new();
        let mut sectors: BTreeSet<&str> = BTreeSet::new();
        for rec in &records {
            countries.insert(&rec.country);
            sectors.insert(&rec.sector);
        }
        let countries = countries.into_iter().map(str::to_owned).collect();
        let sectors = sectors.into_iter().map(str::to_owned).collect();
        Dataset {
            records,
            countries,
            sectors,
            date_parse_failures,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique values along a dimension, in sorted order.
    pub fn unique_values(&self, dim: Dimension) -> &[String] {
        match dim {
            Dimension::Country => &self.countries,
            Dimension::Sector => &self.sectors,
        }
    }
}
