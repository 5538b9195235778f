use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate;
use crate::data::filter::Selection;
use crate::data::loader;
use crate::data::model::Dimension;
use crate::state::{AppState, Page};
use crate::ui::charts;

const PREVIEW_ROWS: usize = 100;

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the navigation sidebar, and the filter widgets on the dashboard
/// page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.title())
            .clicked()
        {
            state.set_page(page);
        }
    }

    if state.page != Page::SectorDashboard {
        return;
    }

    ui.separator();
    if ui.button("Open CSV dataset…").clicked() {
        open_csv_dialog(state);
    }

    let Some(ds) = &state.dataset else { return };

    ui.separator();
    ui.strong("Filter Options");

    // Clone the option lists so the combo closures can mutate state.
    let countries = ds.unique_values(Dimension::Country).to_vec();
    let sectors = ds.unique_values(Dimension::Sector).to_vec();

    dimension_combo(ui, state, Dimension::Country, "Select Country", &countries);
    dimension_combo(ui, state, Dimension::Sector, "Select Sector", &sectors);
}

/// One "All"-plus-values combo box for a dimension.
fn dimension_combo(
    ui: &mut Ui,
    state: &mut AppState,
    dim: Dimension,
    label: &str,
    values: &[String],
) {
    ui.label(label);
    let current = state.filters.selection(dim).clone();

    egui::ComboBox::from_id_salt(label)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == Selection::All, "All")
                .clicked()
            {
                state.set_selection(dim, Selection::All);
            }
            for value in values {
                let selected = current == Selection::Only(value.clone());
                if ui.selectable_label(selected, value).clicked() {
                    state.set_selection(dim, Selection::Only(value.clone()));
                }
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Global CO₂ Emission Dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Static landing page.
pub fn home_page(ui: &mut Ui) {
    ui.heading("Global CO₂ Emission Visualization");
    ui.add_space(8.0);
    ui.label("Explore global CO₂ emissions with an interactive dashboard.");
    ui.add_space(8.0);
    ui.label("Features:");
    ui.label("  • Multi-page navigation");
    ui.label("  • Open your own CSV dataset");
    ui.label("  • Multiple interactive charts");
    ui.label("  • Sector-based emission analytics");
    ui.separator();
    ui.strong("How to start");
    ui.label("Go to the Dataset Explorer to load a CO₂ dataset.");
}

/// Dataset explorer: preview, summary statistics, top-10 countries.
pub fn explorer_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset Explorer");

    if ui.button("Open CSV dataset…").clicked() {
        open_csv_dialog(state);
    }

    let Some(ds) = &state.dataset else {
        ui.add_space(8.0);
        ui.label("Open a CO₂ dataset (CSV with country, sector, date, value) to continue.");
        return;
    };

    let mut summary_line = format!("Dataset loaded: {} records.", ds.len());
    if ds.date_parse_failures > 0 {
        summary_line.push_str(&format!(
            " {} date value(s) could not be parsed.",
            ds.date_parse_failures
        ));
    }
    ui.label(summary_line);
    let summary = aggregate::value_summary(ds, &state.visible_indices);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Preview");
            preview_table(ui, state);
            ui.separator();

            ui.strong("Summary Statistics");
            ui.label(format!(
                "count {}   total {:.2}   mean {:.2}   min {:.2}   max {:.2}",
                summary.count, summary.total, summary.mean, summary.min, summary.max
            ));
            ui.separator();

            ui.strong("Top 10 Emitting Countries (Total Value)");
            charts::top_countries_bar(ui, state);
        });
}

/// First rows of the loaded dataset.
fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let n_rows = ds.len().min(PREVIEW_ROWS);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["country", "sector", "date", "value"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, n_rows, |mut row| {
                let rec = &ds.records[row.index()];
                row.col(|ui| {
                    ui.label(&rec.country);
                });
                row.col(|ui| {
                    ui.label(&rec.sector);
                });
                row.col(|ui| {
                    let date = rec
                        .date
                        .map(aggregate::date_label)
                        .unwrap_or_else(|| "—".to_string());
                    ui.label(date);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.value));
                });
            });
        });
}

/// Sector dashboard: five charts over the filtered rows.
pub fn dashboard_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("CO₂ Emission Sector Dashboard");

    let Some(ds) = &state.dataset else {
        ui.add_space(8.0);
        ui.label("Open a dataset in the sidebar to begin.");
        return;
    };

    ui.label(format!(
        "Showing data for: {} | {}",
        state.filters.country.label(),
        state.filters.sector.label()
    ));
    ui.separator();

    // Frame keys for the animated chart, computed before any &mut borrow.
    let frame_dates: Vec<_> = aggregate::daily_sector_totals(ds, &state.visible_indices)
        .into_keys()
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Emission Trend Over Time");
            charts::trend_line(ui, state);
            ui.separator();

            ui.strong("Total Emissions by Sector");
            charts::sector_totals_bar(ui, state);
            ui.separator();

            ui.strong("Distribution of Emissions");
            charts::distribution_box(ui, state);
            ui.separator();

            ui.strong("Sector Breakdown by Country");
            charts::hierarchy_stacked_bar(ui, state);
            ui.separator();

            ui.strong("CO₂ Change Over Time (Animated)");
            if frame_dates.is_empty() {
                ui.label("No rows with a parseable date to animate.");
                return;
            }

            state.anim_frame = state.anim_frame.min(frame_dates.len() - 1);
            let date = frame_dates[state.anim_frame];
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    egui::Slider::new(&mut state.anim_frame, 0..=frame_dates.len() - 1)
                        .text("frame"),
                );
                ui.label(aggregate::date_label(date));
            });
            charts::animated_sector_bar(ui, state, date);
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CO₂ emission data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path, &mut state.cache) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} records, {} countries, {} sectors",
                    dataset.len(),
                    dataset.countries.len(),
                    dataset.sectors.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
