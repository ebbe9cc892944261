use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Rect, RichText, Sense, Stroke, Ui,
    pos2, vec2};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::heat_color;
use crate::data::model::service_label;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

/// Rows painted in the coverage heatmap (the most populous matches).
const HEATMAP_ROW_CAP: usize = 40;

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// Render the KPI card row over the current view.
pub fn kpi_cards(ui: &mut Ui, state: &AppState) {
    let kpis = &state.kpis;
    let metric_label = format!("Mean {}", state.selection.metric.label().to_lowercase());
    ui.columns(4, |cols: &mut [Ui]| {
        kpi_card(&mut cols[0], "Sub-counties in view", kpis.subcounties.to_string());
        kpi_card(&mut cols[1], &metric_label, fmt_mean(kpis.mean_metric));
        kpi_card(
            &mut cols[2],
            "Avg facilities per 10k",
            fmt_mean(kpis.mean_facilities_per_10k),
        );
        kpi_card(&mut cols[3], "Avg beds per 10k", fmt_mean(kpis.mean_beds_per_10k));
    });
}

fn kpi_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.small(label);
            ui.label(RichText::new(value).heading());
        });
    });
}

/// KPI number formatting; empty views show a placeholder.
fn fmt_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "–".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Top-N bar chart
// ---------------------------------------------------------------------------

/// Horizontal bar chart of the view rows, highest value at the top.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let metric = state.selection.metric;
    ui.strong(format!("Top {} by {}", state.selection.top_n, metric.label()));

    let n = state.view.rows.len();
    let mut bars = Vec::with_capacity(n);
    let mut labels = vec![String::new(); n];
    for (rank, &idx) in state.view.rows.iter().enumerate() {
        let row = &state.table.rows[idx];
        let pos = n - 1 - rank;
        labels[pos] = row.subcounty.clone();
        bars.push(
            Bar::new(pos as f64, metric.value(row))
                .name(&row.subcounty)
                .fill(state.county_colors.color_for(&row.county)),
        );
    }
    let chart = BarChart::new(bars).horizontal();

    Plot::new("top_n_bar")
        .height(CHART_HEIGHT)
        .x_axis_label(metric.label())
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 0.01 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Facilities vs beds scatter
// ---------------------------------------------------------------------------

/// Scatter of every matched row, point size scaled by population.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Facilities vs beds");

    let max_pop = state
        .view
        .matched
        .iter()
        .map(|&i| state.table.rows[i].population)
        .fold(0.0_f64, f64::max);

    Plot::new("facilities_beds")
        .height(CHART_HEIGHT)
        .x_axis_label("Total facilities")
        .y_axis_label("Beds")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &idx in &state.view.matched {
                let row = &state.table.rows[idx];
                let radius = if max_pop > 0.0 {
                    2.0 + 7.0 * ((row.population / max_pop) as f32).sqrt()
                } else {
                    3.0
                };
                plot_ui.points(
                    Points::new(vec![[row.total_facilities, row.beds]])
                        .radius(radius)
                        .color(state.county_colors.color_for(&row.county))
                        .name(&row.subcounty),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Service coverage heatmap
// ---------------------------------------------------------------------------

/// Painter-drawn heatmap: one row per sub-county (most populous matches
/// first), one column per service-coverage percentage.
pub fn heatmap(ui: &mut Ui, state: &AppState) {
    ui.strong("Service coverage heatmap");

    let table = &state.table;
    if table.service_cols.is_empty() {
        ui.label("No service coverage columns in this dataset.");
        return;
    }

    let mut rows = state.view.matched.clone();
    // Stable sort: population ties keep original row order.
    rows.sort_by(|&a, &b| table.rows[b].population.total_cmp(&table.rows[a].population));
    rows.truncate(HEATMAP_ROW_CAP);
    if rows.is_empty() {
        ui.label("No sub-counties match the current filter.");
        return;
    }

    const CELL_H: f32 = 16.0;
    const HEADER_H: f32 = 18.0;
    const LABEL_W: f32 = 130.0;

    let width = ui.available_width();
    let height = HEADER_H + rows.len() as f32 * CELL_H;
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let rect = response.rect;
    let n_cols = table.service_cols.len();
    let cell_w = (rect.width() - LABEL_W) / n_cols as f32;
    let text_color = ui.visuals().text_color();

    for (ci, col) in table.service_cols.iter().enumerate() {
        let x = rect.left() + LABEL_W + (ci as f32 + 0.5) * cell_w;
        painter.text(
            pos2(x, rect.top() + HEADER_H * 0.5),
            Align2::CENTER_CENTER,
            service_label(col),
            FontId::proportional(10.0),
            text_color,
        );
    }

    for (ri, &idx) in rows.iter().enumerate() {
        let row = &table.rows[idx];
        let y = rect.top() + HEADER_H + ri as f32 * CELL_H;
        painter.text(
            pos2(rect.left() + LABEL_W - 6.0, y + CELL_H * 0.5),
            Align2::RIGHT_CENTER,
            &row.subcounty,
            FontId::proportional(10.0),
            text_color,
        );
        for (ci, &pct) in row.service_pct.iter().take(n_cols).enumerate() {
            let cell = Rect::from_min_size(
                pos2(rect.left() + LABEL_W + ci as f32 * cell_w, y),
                vec2(cell_w - 1.0, CELL_H - 1.0),
            );
            painter.rect_filled(cell, CornerRadius::same(2), heat_color(pct / 100.0));
        }
    }
}

// ---------------------------------------------------------------------------
// Service coverage radar
// ---------------------------------------------------------------------------

/// Radar of mean service-coverage percentages over the matched rows.
pub fn radar_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Mean service coverage");

    let table = &state.table;
    if table.service_cols.is_empty() {
        ui.label("No service coverage columns in this dataset.");
        return;
    }

    let k = table.service_cols.len();
    let means = service_means(state);
    let text_color = ui.visuals().text_color();
    let accent = ui.visuals().hyperlink_color;
    let guide = Color32::from_gray(120);

    // Axis angle for service column i, starting at 12 o'clock.
    let angle = move |i: usize| FRAC_PI_2 - TAU * i as f64 / k as f64;

    Plot::new("service_radar")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for frac in [0.25, 0.5, 0.75, 1.0] {
                let ring: PlotPoints = (0..=60)
                    .map(|i| {
                        let a = TAU * i as f64 / 60.0;
                        [frac * a.cos(), frac * a.sin()]
                    })
                    .collect();
                plot_ui.line(Line::new(ring).color(guide).width(0.5));
            }

            for (i, col) in table.service_cols.iter().enumerate() {
                let (x, y) = (angle(i).cos(), angle(i).sin());
                plot_ui.line(
                    Line::new(vec![[0.0, 0.0], [x, y]])
                        .color(guide)
                        .width(0.5),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(x * 1.2, y * 1.2),
                    RichText::new(service_label(col)).color(text_color).size(10.0),
                ));
            }

            if let Some(means) = means {
                let pts: Vec<[f64; 2]> = means
                    .iter()
                    .enumerate()
                    .map(|(i, &m)| {
                        let r = (m / 100.0).clamp(0.0, 1.0);
                        [r * angle(i).cos(), r * angle(i).sin()]
                    })
                    .collect();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(pts))
                        .fill_color(accent.gamma_multiply(0.3))
                        .stroke(Stroke::new(1.5, accent)),
                );
            }
        });
}

/// Per-service-column mean over the matched rows; `None` when nothing
/// matches.
fn service_means(state: &AppState) -> Option<Vec<f64>> {
    let matched = &state.view.matched;
    if matched.is_empty() {
        return None;
    }
    let k = state.table.service_cols.len();
    let mut sums = vec![0.0; k];
    for &idx in matched {
        for (ci, &pct) in state.table.rows[idx].service_pct.iter().take(k).enumerate() {
            sums[ci] += pct;
        }
    }
    Some(sums.into_iter().map(|s| s / matched.len() as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_mean_handles_empty_views() {
        assert_eq!(fmt_mean(None), "–");
        assert_eq!(fmt_mean(Some(3.14159)), "3.14");
    }
}
