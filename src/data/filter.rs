use super::model::{Dataset, Dimension};

// ---------------------------------------------------------------------------
// Selection – one widget's constraint on a dimension
// ---------------------------------------------------------------------------

/// Constraint on a single dimension: the "All" sentinel (no constraint) or
/// an exact, case-sensitive value match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    /// Label shown in the selection widget.
    pub fn label(&self) -> &str {
        match self {
            Selection::All => "All",
            Selection::Only(v) => v,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState – per-dimension selections, combined conjunctively
// ---------------------------------------------------------------------------

/// One [`Selection`] per dimension. Constraints are independent and a record
/// must satisfy every one of them.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub country: Selection,
    pub sector: Selection,
}

impl FilterState {
    pub fn selection(&self, dim: Dimension) -> &Selection {
        match dim {
            Dimension::Country => &self.country,
            Dimension::Sector => &self.sector,
        }
    }

    pub fn set(&mut self, dim: Dimension, selection: Selection) {
        match dim {
            Dimension::Country => self.country = selection,
            Dimension::Sector => self.sector = selection,
        }
    }
}

/// Return indices of records passing every active selection, in file order.
///
/// With both selections at `All` this is every index of the dataset.
pub fn apply(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            [Dimension::Country, Dimension::Sector]
                .into_iter()
                .all(|dim| filters.selection(dim).matches(dim.of(rec)))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn sample() -> Dataset {
        let rows = [
            ("A", "Energy", 10.0),
            ("A", "Transport", 5.0),
            ("B", "Energy", 20.0),
        ];
        let records = rows
            .iter()
            .map(|&(c, s, v)| Record {
                country: c.to_string(),
                sector: s.to_string(),
                date: None,
                value: v,
            })
            .collect();
        Dataset::from_records(records, 0)
    }

    fn only(v: &str) -> Selection {
        Selection::Only(v.to_string())
    }

    #[test]
    fn no_constraints_returns_every_row() {
        let ds = sample();
        assert_eq!(apply(&ds, &FilterState::default()), vec![0, 1, 2]);
    }

    #[test]
    fn country_constraint_keeps_matching_rows() {
        let ds = sample();
        let filters = FilterState {
            country: only("A"),
            sector: Selection::All,
        };
        let idx = apply(&ds, &filters);
        assert_eq!(idx, vec![0, 1]);
        let total: f64 = idx.iter().map(|&i| ds.records[i].value).sum();
        assert_eq!(total, 15.0);
    }

    #[test]
    fn constraints_combine_conjunctively() {
        let ds = sample();
        let filters = FilterState {
            country: only("A"),
            sector: only("Energy"),
        };
        assert_eq!(apply(&ds, &filters), vec![0]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let ds = sample();
        let filters = FilterState {
            country: only("a"),
            sector: Selection::All,
        };
        assert!(apply(&ds, &filters).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let filters = FilterState {
            country: only("A"),
            sector: Selection::All,
        };
        let once = apply(&ds, &filters);

        // Re-apply the same constraint to the already-filtered rows.
        let survivors: Vec<Record> = once.iter().map(|&i| ds.records[i].clone()).collect();
        let again = apply(&Dataset::from_records(survivors, 0), &filters);
        assert_eq!(again.len(), once.len());
    }

    #[test]
    fn every_returned_row_satisfies_every_constraint() {
        let ds = sample();
        let filters = FilterState {
            country: only("B"),
            sector: only("Energy"),
        };
        for &i in &apply(&ds, &filters) {
            assert!(filters.country.matches(&ds.records[i].country));
            assert!(filters.sector.matches(&ds.records[i].sector));
        }
    }
}
