use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Metric – the numeric columns a user can rank sub-counties by
// ---------------------------------------------------------------------------

/// A selectable numeric metric column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    FacilitiesPer10k,
    BedsPer10k,
    Beds,
    TotalFacilities,
    PctOperational,
}

impl Metric {
    /// All metrics, in the order they appear in the metric dropdown.
    pub const ALL: [Metric; 5] = [
        Metric::FacilitiesPer10k,
        Metric::BedsPer10k,
        Metric::Beds,
        Metric::TotalFacilities,
        Metric::PctOperational,
    ];

    /// Human-readable label for dropdowns and chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Metric::FacilitiesPer10k => "Facilities per 10k",
            Metric::BedsPer10k => "Beds per 10k",
            Metric::Beds => "Beds (absolute)",
            Metric::TotalFacilities => "Total facilities",
            Metric::PctOperational => "Operational %",
        }
    }

    /// Read this metric's value from a row.
    pub fn value(self, row: &SubcountyRow) -> f64 {
        match self {
            Metric::FacilitiesPer10k => row.facilities_per_10k,
            Metric::BedsPer10k => row.beds_per_10k,
            Metric::Beds => row.beds,
            Metric::TotalFacilities => row.total_facilities,
            Metric::PctOperational => row.pct_operational,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SubcountyRow – one row of the source table
// ---------------------------------------------------------------------------

/// A single sub-county (one row of the metrics CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct SubcountyRow {
    /// Sub-county name (the `matched_area_clean` column).
    pub subcounty: String,
    /// Administrative grouping the sub-county belongs to.
    pub county: String,
    pub population: f64,
    pub total_facilities: f64,
    pub beds: f64,
    pub facilities_per_10k: f64,
    pub beds_per_10k: f64,
    pub pct_operational: f64,
    /// Service-coverage percentages, aligned with
    /// [`MetricsTable::service_cols`].
    pub service_pct: Vec<f64>,
}

// ---------------------------------------------------------------------------
// MetricsTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full metrics table, immutable after load, with pre-computed
/// county and service-column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    /// All sub-counties (rows), in file order.
    pub rows: Vec<SubcountyRow>,
    /// Sorted unique county names.
    pub counties: Vec<String>,
    /// Raw header names of the service-coverage columns (ending in `_pct`).
    pub service_cols: Vec<String>,
}

impl MetricsTable {
    /// Build the county index from the loaded rows.
    pub fn new(rows: Vec<SubcountyRow>, service_cols: Vec<String>) -> Self {
        let counties: Vec<String> = rows
            .iter()
            .map(|r| r.county.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        MetricsTable {
            rows,
            counties,
            service_cols,
        }
    }

    /// Number of sub-counties.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Display label for a service column: `maternity_pct` → `MATERNITY`.
pub fn service_label(col: &str) -> String {
    col.strip_suffix("_pct").unwrap_or(col).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(subcounty: &str, county: &str) -> SubcountyRow {
        SubcountyRow {
            subcounty: subcounty.to_string(),
            county: county.to_string(),
            population: 0.0,
            total_facilities: 0.0,
            beds: 0.0,
            facilities_per_10k: 0.0,
            beds_per_10k: 0.0,
            pct_operational: 0.0,
            service_pct: Vec::new(),
        }
    }

    #[test]
    fn counties_are_sorted_and_unique() {
        let table = MetricsTable::new(
            vec![
                row("BONDO", "Siaya"),
                row("BELGUT", "Kericho"),
                row("BURETI", "Kericho"),
            ],
            Vec::new(),
        );
        assert_eq!(
            table.counties,
            vec!["Kericho".to_string(), "Siaya".to_string()]
        );
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn service_label_strips_suffix_and_uppercases() {
        assert_eq!(service_label("maternity_pct"), "MATERNITY");
        assert_eq!(service_label("odd"), "ODD");
    }
}
