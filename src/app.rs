use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // ---- Top panel: menu bar, counts, theme toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPI cards, charts, data table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::kpi_cards(ui, &self.state);
                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [egui::Ui]| {
                        charts::bar_chart(&mut cols[0], &self.state);
                        charts::scatter_plot(&mut cols[1], &self.state);
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [egui::Ui]| {
                        charts::heatmap(&mut cols[0], &self.state);
                        charts::radar_chart(&mut cols[1], &self.state);
                    });
                    ui.add_space(8.0);

                    ui.separator();
                    ui.heading("Sub-county metrics");
                    table::metrics_table(ui, &self.state);
                });
        });
    }
}
