use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data table (bottom of the dashboard)
// ---------------------------------------------------------------------------

const HEADERS: [&str; 8] = [
    "Sub-county",
    "County",
    "Population",
    "Facilities",
    "Beds",
    "Facilities / 10k",
    "Beds / 10k",
    "Operational %",
];

/// Render the current view rows as a striped table.
///
/// The table lives inside the dashboard's outer scroll area, so its own
/// vertical scrolling is disabled and all (at most Top-N) rows render inline.
pub fn metrics_table(ui: &mut Ui, state: &AppState) {
    let table = &state.table;
    let view = &state.view;

    if view.rows.is_empty() {
        ui.label("No sub-counties match the current filter.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::auto().at_least(150.0))
        .column(Column::auto().at_least(100.0))
        .columns(Column::remainder(), HEADERS.len() - 2)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, view.rows.len(), |mut table_row| {
                let row = &table.rows[view.rows[table_row.index()]];
                table_row.col(|ui: &mut Ui| {
                    ui.label(&row.subcounty);
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(&row.county);
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", row.population));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", row.total_facilities));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", row.beds));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", row.facilities_per_10k));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", row.beds_per_10k));
                });
                table_row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", row.pct_operational));
                });
            });
        });
}
