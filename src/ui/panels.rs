use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Metric;
use crate::state::{AppState, Theme};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Metric selector ----
    ui.strong("Metric");
    egui::ComboBox::from_id_salt("metric_select")
        .selected_text(state.selection.metric.label())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in Metric::ALL {
                if ui
                    .selectable_label(state.selection.metric == metric, metric.label())
                    .clicked()
                {
                    state.set_metric(metric);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Top-N slider ----
    ui.strong("Top N");
    let mut top_n = state.selection.top_n;
    if ui
        .add(egui::Slider::new(&mut top_n, 5..=50).step_by(5.0))
        .changed()
    {
        state.set_top_n(top_n);
    }
    ui.add_space(8.0);
    ui.separator();

    // ---- County filter ----
    let counties = state.table.counties.clone();
    let n_selected = state.selection.counties.len();
    let header_text = if n_selected == 0 {
        format!("County (all {})", counties.len())
    } else {
        format!("County ({n_selected}/{})", counties.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("county_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_counties();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_counties();
                }
            });
            ui.small("Empty selection shows every county.");

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for county in &counties {
                        let is_selected = state.selection.counties.contains(county);
                        let text = RichText::new(county)
                            .color(state.county_colors.color_for(county));

                        let mut checked = is_selected;
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_county(county);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Sub-county Health Dashboard");
        ui.separator();

        ui.label(format!(
            "{} sub-counties loaded, {} in view",
            state.table.len(),
            state.view.rows.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.theme == Theme::Dark, "🌙 Dark")
            .clicked()
        {
            state.toggle_theme();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Open a replacement metrics CSV. Failures keep the current table and
/// surface in the status line.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sub-county metrics")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} sub-counties across {} counties from {}",
                    table.len(),
                    table.counties.len(),
                    path.display()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load metrics: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
