use std::collections::BTreeSet;

use super::model::{Metric, MetricsTable};

// ---------------------------------------------------------------------------
// FilterSelection – the user's current choices
// ---------------------------------------------------------------------------

/// The user's current filter choices. Rebuilt on every interaction,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// Selected counties. An empty set means "no filter" (show all rows).
    pub counties: BTreeSet<String>,
    /// Metric used for ranking and the KPI summary.
    pub metric: Metric,
    /// Row cap applied after sorting.
    pub top_n: usize,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            counties: BTreeSet::new(),
            metric: Metric::FacilitiesPer10k,
            top_n: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedView – the filtered / sorted / truncated subset
// ---------------------------------------------------------------------------

/// The subset of the table produced by a [`FilterSelection`].
///
/// Always a pure function of `(MetricsTable, FilterSelection)`; recomputed
/// from scratch on every selection change, never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    /// Row indices filtered by county, sorted descending by the chosen
    /// metric, truncated to the Top-N cap. Ties keep original row order.
    pub rows: Vec<usize>,
    /// All row indices matching the county filter, in original row order.
    /// Feeds the charts that present the whole filtered set.
    pub matched: Vec<usize>,
}

/// Apply a selection to the table: filter, stable-sort descending by the
/// chosen metric, truncate to Top-N.
///
/// A Top-N larger than the match count returns every matching row; a filter
/// matching nothing yields an empty (but valid) view.
pub fn derive_view(table: &MetricsTable, selection: &FilterSelection) -> DerivedView {
    let matched: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            selection.counties.is_empty() || selection.counties.contains(&row.county)
        })
        .map(|(i, _)| i)
        .collect();

    let mut rows = matched.clone();
    // sort_by is stable: equal metric values keep original row order.
    rows.sort_by(|&a, &b| {
        selection
            .metric
            .value(&table.rows[b])
            .total_cmp(&selection.metric.value(&table.rows[a]))
    });
    rows.truncate(selection.top_n);

    DerivedView { rows, matched }
}

// ---------------------------------------------------------------------------
// Kpis – aggregates over the current view
// ---------------------------------------------------------------------------

/// KPI summary over exactly the rows of a [`DerivedView`].
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Number of sub-counties in the view.
    pub subcounties: usize,
    /// Mean of the selected metric; `None` when the view is empty.
    pub mean_metric: Option<f64>,
    pub mean_facilities_per_10k: Option<f64>,
    pub mean_beds_per_10k: Option<f64>,
}

impl Kpis {
    pub fn compute(table: &MetricsTable, view: &DerivedView, metric: Metric) -> Self {
        Kpis {
            subcounties: view.rows.len(),
            mean_metric: mean(view.rows.iter().map(|&i| metric.value(&table.rows[i]))),
            mean_facilities_per_10k: mean(
                view.rows.iter().map(|&i| table.rows[i].facilities_per_10k),
            ),
            mean_beds_per_10k: mean(view.rows.iter().map(|&i| table.rows[i].beds_per_10k)),
        }
    }
}

/// Arithmetic mean; `None` for an empty iterator.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SubcountyRow;

    fn row(subcounty: &str, county: &str, beds_per_10k: f64, fac_per_10k: f64) -> SubcountyRow {
        SubcountyRow {
            subcounty: subcounty.to_string(),
            county: county.to_string(),
            population: 100_000.0,
            total_facilities: 30.0,
            beds: 400.0,
            facilities_per_10k: fac_per_10k,
            beds_per_10k,
            pct_operational: 80.0,
            service_pct: vec![50.0, 60.0],
        }
    }

    fn sample_table() -> MetricsTable {
        MetricsTable::new(
            vec![
                row("BONDO", "Siaya", 12.0, 3.0),
                row("BELGUT", "Kericho", 19.0, 4.5),
                row("BURETI", "Kericho", 7.0, 2.0),
                row("BUTERE", "Kakamega", 19.0, 1.5),
                row("BUNA", "Wajir", 3.0, 0.8),
                row("BONDO EAST", "Siaya", 25.0, 5.0),
                row("BORABU", "Nyamira", 15.0, 2.2),
            ],
            vec!["maternity_pct".to_string(), "outpatient_pct".to_string()],
        )
    }

    fn selection(counties: &[&str], metric: Metric, top_n: usize) -> FilterSelection {
        FilterSelection {
            counties: counties.iter().map(|c| c.to_string()).collect(),
            metric,
            top_n,
        }
    }

    #[test]
    fn row_count_never_exceeds_top_n_or_match_count() {
        let table = sample_table();
        let view = derive_view(&table, &selection(&[], Metric::BedsPer10k, 3));
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.matched.len(), table.len());

        let view = derive_view(&table, &selection(&["Siaya"], Metric::BedsPer10k, 50));
        assert_eq!(view.rows.len(), 2);
        assert!(view.rows.len() <= view.matched.len().min(50));
    }

    #[test]
    fn rows_are_sorted_descending_by_metric() {
        let table = sample_table();
        let view = derive_view(&table, &selection(&[], Metric::FacilitiesPer10k, 50));
        let values: Vec<f64> = view
            .rows
            .iter()
            .map(|&i| table.rows[i].facilities_per_10k)
            .collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn zero_match_filter_yields_empty_view() {
        let table = sample_table();
        let view = derive_view(&table, &selection(&["Mombasa"], Metric::Beds, 20));
        assert!(view.rows.is_empty());
        assert!(view.matched.is_empty());

        let kpis = Kpis::compute(&table, &view, Metric::Beds);
        assert_eq!(kpis.subcounties, 0);
        assert_eq!(kpis.mean_metric, None);
    }

    #[test]
    fn top_5_beds_per_10k_returns_the_five_highest() {
        let table = sample_table();
        let view = derive_view(&table, &selection(&[], Metric::BedsPer10k, 5));
        let names: Vec<&str> = view
            .rows
            .iter()
            .map(|&i| table.rows[i].subcounty.as_str())
            .collect();
        // 25, 19 (BELGUT before BUTERE: tie, file order), 19, 15, 12
        assert_eq!(names, vec!["BONDO EAST", "BELGUT", "BUTERE", "BORABU", "BONDO"]);
    }

    #[test]
    fn ties_keep_original_row_order() {
        let table = MetricsTable::new(
            vec![
                row("A", "X", 10.0, 1.0),
                row("B", "X", 10.0, 1.0),
                row("C", "X", 10.0, 1.0),
            ],
            Vec::new(),
        );
        let view = derive_view(&table, &selection(&[], Metric::BedsPer10k, 10));
        assert_eq!(view.rows, vec![0, 1, 2]);
    }

    #[test]
    fn same_selection_twice_is_identical() {
        let table = sample_table();
        let sel = selection(&["Kericho", "Siaya"], Metric::PctOperational, 4);
        assert_eq!(derive_view(&table, &sel), derive_view(&table, &sel));
    }

    #[test]
    fn kpis_aggregate_exactly_the_view_rows() {
        let table = sample_table();
        let sel = selection(&["Siaya", "Kericho"], Metric::BedsPer10k, 3);
        let view = derive_view(&table, &sel);
        let kpis = Kpis::compute(&table, &view, sel.metric);

        let expected: f64 = view
            .rows
            .iter()
            .map(|&i| table.rows[i].beds_per_10k)
            .sum::<f64>()
            / view.rows.len() as f64;
        assert_eq!(kpis.subcounties, view.rows.len());
        assert_eq!(kpis.mean_metric, Some(expected));
    }
}
