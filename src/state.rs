use eframe::egui;

use crate::color::CountyColors;
use crate::data::model::{Metric, MetricsTable};
use crate::data::view::{DerivedView, FilterSelection, Kpis, derive_view};

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Dashboard theme, toggled from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The metrics table is read-only after load; `view` and `kpis` are caches
/// of the pure transform, rebuilt by [`AppState::refresh_view`] on every
/// selection change.
pub struct AppState {
    pub table: MetricsTable,
    pub selection: FilterSelection,
    pub view: DerivedView,
    pub kpis: Kpis,
    pub county_colors: CountyColors,
    pub theme: Theme,
    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: MetricsTable) -> Self {
        let selection = FilterSelection::default();
        let view = derive_view(&table, &selection);
        let kpis = Kpis::compute(&table, &view, selection.metric);
        let county_colors = CountyColors::new(&table.counties);
        Self {
            table,
            selection,
            view,
            kpis,
            county_colors,
            theme: Theme::Light,
            status_message: None,
        }
    }

    /// Replace the table wholesale (File → Open). Resets the selection,
    /// since counties from the old table may no longer exist.
    pub fn set_table(&mut self, table: MetricsTable) {
        self.county_colors = CountyColors::new(&table.counties);
        self.table = table;
        self.selection = FilterSelection::default();
        self.status_message = None;
        self.refresh_view();
    }

    /// Recompute the derived view and KPIs after a selection change.
    pub fn refresh_view(&mut self) {
        self.view = derive_view(&self.table, &self.selection);
        self.kpis = Kpis::compute(&self.table, &self.view, self.selection.metric);
    }

    /// Toggle a single county in the filter.
    pub fn toggle_county(&mut self, county: &str) {
        if !self.selection.counties.remove(county) {
            self.selection.counties.insert(county.to_string());
        }
        self.refresh_view();
    }

    /// Select every county explicitly.
    pub fn select_all_counties(&mut self) {
        self.selection.counties = self.table.counties.iter().cloned().collect();
        self.refresh_view();
    }

    /// Clear the county filter (empty selection = show all).
    pub fn select_no_counties(&mut self) {
        self.selection.counties.clear();
        self.refresh_view();
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.selection.metric = metric;
        self.refresh_view();
    }

    pub fn set_top_n(&mut self, top_n: usize) {
        self.selection.top_n = top_n;
        self.refresh_view();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SubcountyRow;

    fn table() -> MetricsTable {
        let row = |name: &str, county: &str, beds: f64| SubcountyRow {
            subcounty: name.to_string(),
            county: county.to_string(),
            population: 1000.0,
            total_facilities: 5.0,
            beds,
            facilities_per_10k: 1.0,
            beds_per_10k: beds / 100.0,
            pct_operational: 90.0,
            service_pct: Vec::new(),
        };
        MetricsTable::new(
            vec![row("A", "Siaya", 10.0), row("B", "Kericho", 30.0)],
            Vec::new(),
        )
    }

    #[test]
    fn toggling_a_county_refreshes_the_view() {
        let mut state = AppState::new(table());
        assert_eq!(state.view.matched.len(), 2);

        state.toggle_county("Siaya");
        assert_eq!(state.view.matched.len(), 1);
        assert_eq!(state.kpis.subcounties, 1);

        state.toggle_county("Siaya");
        assert_eq!(state.view.matched.len(), 2);
    }

    #[test]
    fn replacing_the_table_resets_the_selection() {
        let mut state = AppState::new(table());
        state.toggle_county("Siaya");
        state.set_metric(Metric::Beds);

        state.set_table(table());
        assert!(state.selection.counties.is_empty());
        assert_eq!(state.selection.metric, Metric::FacilitiesPer10k);
        assert_eq!(state.view.matched.len(), 2);
    }
}
