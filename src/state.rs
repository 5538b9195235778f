use crate::color::SectorColors;
use crate::data::cache::LoadCache;
use crate::data::filter::{self, FilterState, Selection};
use crate::data::model::{Dataset, Dimension};

// ---------------------------------------------------------------------------
// Page – explicit navigation targets
// ---------------------------------------------------------------------------

/// The three dashboard pages, dispatched by variant rather than by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Explorer,
    SectorDashboard,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Explorer, Page::SectorDashboard];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Explorer => "Dataset Explorer",
            Page::SectorDashboard => "CO₂ Sector Dashboard",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Currently displayed page.
    pub page: Page,

    /// Loaded dataset (None until the user opens a file on this page).
    pub dataset: Option<Dataset>,

    /// Country/sector selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Consistent per-sector chart colours.
    pub sector_colors: SectorColors,

    /// Selected frame of the animated chart.
    pub anim_frame: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Parsed-dataset cache, keyed by file content fingerprint. Outlives
    /// page navigation so re-opening the same file is cheap.
    pub cache: LoadCache,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::default(),
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            sector_colors: SectorColors::default(),
            anim_frame: 0,
            status_message: None,
            cache: LoadCache::default(),
        }
    }
}

impl AppState {
    /// Navigate to another page. No state is shared across pages, so the
    /// dataset and filters are dropped; the load cache survives.
    pub fn set_page(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        self.page = page;
        self.dataset = None;
        self.filters = FilterState::default();
        self.visible_indices.clear();
        self.sector_colors = SectorColors::default();
        self.anim_frame = 0;
        self.status_message = None;
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = FilterState::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.sector_colors = SectorColors::new(&dataset.sectors);
        self.anim_frame = 0;
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Change one dimension's selection and recompute the visible rows.
    pub fn set_selection(&mut self, dim: Dimension, selection: Selection) {
        self.filters.set(dim, selection);
        self.anim_frame = 0;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter::apply(ds, &self.filters);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let records = vec![
            Record {
                country: "A".to_string(),
                sector: "Energy".to_string(),
                date: None,
                value: 1.0,
            },
            Record {
                country: "B".to_string(),
                sector: "Transport".to_string(),
                date: None,
                value: 2.0,
            },
        ];
        Dataset::from_records(records, 0)
    }

    #[test]
    fn loading_a_dataset_shows_every_row() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn changing_a_selection_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_selection(Dimension::Country, Selection::Only("B".to_string()));
        assert_eq!(state.visible_indices, vec![1]);

        state.set_selection(Dimension::Country, Selection::All);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn page_navigation_drops_the_dataset() {
        let mut state = AppState::default();
        state.set_page(Page::SectorDashboard);
        state.set_dataset(dataset());
        state.set_selection(Dimension::Sector, Selection::Only("Energy".to_string()));

        state.set_page(Page::Explorer);
        assert!(state.dataset.is_none());
        assert_eq!(state.filters.sector, Selection::All);
        assert!(state.visible_indices.is_empty());
    }
}
