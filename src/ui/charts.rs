use std::ops::RangeInclusive;

use chrono::NaiveDate;
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints};

use crate::data::aggregate;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;
const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Explorer: top emitting countries
// ---------------------------------------------------------------------------

/// Bar chart of the ten largest country totals.
pub fn top_countries_bar(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let totals = aggregate::top_countries(ds, &state.visible_indices, TOP_N);

    let labels: Vec<String> = totals.iter().map(|(c, _)| c.clone()).collect();
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (country, total))| {
            Bar::new(i as f64, *total)
                .name(country)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    Plot::new("top_countries")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Total CO₂ Emission")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Dashboard: trend over time
// ---------------------------------------------------------------------------

/// Per-sector emission trend, dates on the x axis.
pub fn trend_line(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let series = aggregate::trend_points(ds, &state.visible_indices);

    Plot::new("emission_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(date_formatter())
        .y_axis_label("CO₂ Emission")
        .show(ui, |plot_ui| {
            for (sector, points) in &series {
                let points: PlotPoints = points
                    .iter()
                    .map(|&(date, value)| [day_number(date), value])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(sector)
                        .color(state.sector_colors.color_for(sector))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Dashboard: totals by sector
// ---------------------------------------------------------------------------

/// Bar chart of summed emissions per sector.
pub fn sector_totals_bar(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let totals = aggregate::sector_totals(ds, &state.visible_indices);

    let labels: Vec<String> = totals.iter().map(|(s, _)| s.clone()).collect();
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (sector, total))| {
            Bar::new(i as f64, *total)
                .name(sector)
                .fill(state.sector_colors.color_for(sector))
        })
        .collect();

    Plot::new("sector_totals")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Total CO₂ Emission")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Dashboard: distribution of values per sector
// ---------------------------------------------------------------------------

/// Box plot of the raw value distribution within each sector.
pub fn distribution_box(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let per_sector = aggregate::sector_values(ds, &state.visible_indices);

    let labels: Vec<String> = per_sector.keys().cloned().collect();
    let boxes: Vec<BoxElem> = per_sector
        .iter()
        .enumerate()
        .filter_map(|(i, (sector, values))| {
            let (min, q1, median, q3, max) = quartiles(values)?;
            Some(
                BoxElem::new(i as f64, BoxSpread::new(min, q1, median, q3, max))
                    .name(sector)
                    .fill(state.sector_colors.color_for(sector)),
            )
        })
        .collect();

    Plot::new("value_distribution")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("CO₂ Emission")
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Dashboard: country → sector hierarchy
// ---------------------------------------------------------------------------

/// Stacked bar per country with one segment per sector, a flat rendering of
/// the country → sector hierarchy.
pub fn hierarchy_stacked_bar(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let nested = aggregate::country_sector_totals(ds, &state.visible_indices);

    let labels: Vec<String> = nested.keys().cloned().collect();
    let mut bars: Vec<Bar> = Vec::new();
    for (i, (_country, sectors)) in nested.iter().enumerate() {
        let mut base = 0.0;
        for (sector, total) in sectors {
            bars.push(
                Bar::new(i as f64, *total)
                    .base_offset(base)
                    .name(sector)
                    .fill(state.sector_colors.color_for(sector)),
            );
            base += total;
        }
    }

    Plot::new("country_sector_breakdown")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Total CO₂ Emission")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Dashboard: animated per-day sector bars
// ---------------------------------------------------------------------------

/// Sector bar chart for a single day of the animation. The frame slider
/// lives in the panel; this draws whichever frame is selected.
pub fn animated_sector_bar(ui: &mut Ui, state: &AppState, date: NaiveDate) {
    let Some(ds) = &state.dataset else { return };
    let frames = aggregate::daily_sector_totals(ds, &state.visible_indices);
    let Some(sectors) = frames.get(&date) else { return };

    let labels: Vec<String> = sectors.keys().cloned().collect();
    let bars: Vec<Bar> = sectors
        .iter()
        .enumerate()
        .map(|(i, (sector, total))| {
            Bar::new(i as f64, *total)
                .name(sector)
                .fill(state.sector_colors.color_for(sector))
        })
        .collect();

    Plot::new("animated_sectors")
        .height(CHART_HEIGHT)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("CO₂ Emission")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Formatter that labels integral grid marks with category names.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 0.001 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

/// Formatter that turns day numbers back into ISO date labels.
fn date_formatter() -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    |mark, _range| {
        NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
            .map(aggregate::date_label)
            .unwrap_or_default()
    }
}

/// Continuous x position for a date: days since the common era.
fn day_number(date: NaiveDate) -> f64 {
    chrono::Datelike::num_days_from_ce(&date) as f64
}

/// Five-number summary (min, q1, median, q3, max) with linear interpolation
/// between order statistics. Returns `None` for an empty slice.
fn quartiles(values: &[f64]) -> Option<(f64, f64, f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pick = |p: f64| -> f64 {
        let pos = p * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    };

    Some((sorted[0], pick(0.25), pick(0.5), pick(0.75), sorted[sorted.len() - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_of_a_simple_run() {
        let (min, q1, median, q3, max) = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(min, 1.0);
        assert_eq!(q1, 2.0);
        assert_eq!(median, 3.0);
        assert_eq!(q3, 4.0);
        assert_eq!(max, 5.0);
    }

    #[test]
    fn quartiles_of_a_single_value_collapse() {
        let (min, q1, median, q3, max) = quartiles(&[7.0]).unwrap();
        assert_eq!((min, q1, median, q3, max), (7.0, 7.0, 7.0, 7.0, 7.0));
    }

    #[test]
    fn quartiles_of_nothing_is_none() {
        assert!(quartiles(&[]).is_none());
    }

    #[test]
    fn day_numbers_round_trip_through_the_axis_formatter() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        let fmt = date_formatter();
        let mark = GridMark {
            value: day_number(date),
            step_size: 1.0,
        };
        assert_eq!(fmt(mark, &(0.0..=1.0)), "2020-12-31");
    }
}
