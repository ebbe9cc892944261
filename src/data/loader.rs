use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{MetricsTable, SubcountyRow};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the metrics table from a CSV file.
///
/// Expected layout: a header row; one row per sub-county. The sub-county
/// name column is `matched_area_clean` (with a fallback scan, see
/// [`subcounty_column`]); the metric columns are required by name; every
/// column ending in `_pct` becomes a service-coverage series; a `county`
/// column is used when present, otherwise counties are derived from the
/// built-in sub-county mapping.
pub fn load_csv(path: &Path) -> Result<MetricsTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a metrics table from any reader (used directly by tests).
pub fn read_csv<R: Read>(reader: R) -> Result<MetricsTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let area_idx = subcounty_column(&headers)
        .context("CSV has no sub-county column (expected 'matched_area_clean')")?;
    let county_idx = headers.iter().position(|h| h == "county");

    let population_idx = headers.iter().position(|h| h == "population");
    let facilities_idx = required_column(&headers, "total_facilities")?;
    let beds_idx = required_column(&headers, "beds")?;
    let fac_per_10k_idx = required_column(&headers, "facilities_per_10k")?;
    let beds_per_10k_idx = required_column(&headers, "beds_per_10k")?;
    let operational_idx = required_column(&headers, "pct_operational")?;

    // Dynamic service-coverage columns, in header order.
    let service_idxs: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.ends_with("_pct") && *h != "pct_operational")
        .map(|(i, _)| i)
        .collect();
    let service_cols: Vec<String> = service_idxs.iter().map(|&i| headers[i].clone()).collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let subcounty = record.get(area_idx).unwrap_or("").trim().to_string();
        if subcounty.is_empty() {
            bail!("CSV row {row_no}: empty sub-county name");
        }

        let county = match county_idx.and_then(|i| record.get(i)) {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => county_for(&subcounty).to_string(),
        };

        let num = |idx: usize, name: &str| -> Result<f64> {
            parse_number(record.get(idx).unwrap_or(""), row_no, name)
        };

        let service_pct = service_idxs
            .iter()
            .map(|&i| num(i, &headers[i]))
            .collect::<Result<Vec<f64>>>()?;

        rows.push(SubcountyRow {
            subcounty,
            county,
            population: match population_idx {
                Some(i) => num(i, "population")?,
                None => 0.0,
            },
            total_facilities: num(facilities_idx, "total_facilities")?,
            beds: num(beds_idx, "beds")?,
            facilities_per_10k: num(fac_per_10k_idx, "facilities_per_10k")?,
            beds_per_10k: num(beds_per_10k_idx, "beds_per_10k")?,
            pct_operational: num(operational_idx, "pct_operational")?,
            service_pct,
        });
    }

    Ok(MetricsTable::new(rows, service_cols))
}

fn required_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV missing '{name}' column"))
}

/// Locate the sub-county name column: exact `matched_area_clean`, else the
/// first header mentioning "area" or "sub".
fn subcounty_column(headers: &[String]) -> Option<usize> {
    if let Some(i) = headers.iter().position(|h| h == "matched_area_clean") {
        return Some(i);
    }
    headers.iter().position(|h| {
        let h = h.to_lowercase();
        h.contains("area") || h.contains("sub")
    })
}

/// Numeric cell parse. Empty and NaN-ish cells become 0.0 (the dataset uses
/// blanks for missing values); anything else non-numeric is a hard error.
fn parse_number(s: &str, row_no: usize, col: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(0.0);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("CSV row {row_no}, column '{col}': '{s}' is not a number"))?;
    if v.is_nan() { Ok(0.0) } else { Ok(v) }
}

// ---------------------------------------------------------------------------
// Sub-county → county mapping
// ---------------------------------------------------------------------------

static COUNTY_MAP: &[(&str, &str)] = &[
    ("ATHI RIVER", "Machakos"),
    ("AWENDO", "Migori"),
    ("BALAMBALA", "Garissa"),
    ("BANISA", "Mandera"),
    ("BARINGO CENTRAL", "Baringo"),
    ("BARINGO NORTH", "Baringo"),
    ("BELGUT", "Kericho"),
    ("BOMET CENTRAL", "Bomet"),
    ("BOMET EAST", "Bomet"),
    ("BONDO", "Siaya"),
    ("BORABU", "Nyamira"),
    ("BUMULA", "Bungoma"),
    ("BUNA", "Wajir"),
    ("BUNGOMA CENTRAL", "Bungoma"),
    ("BUNGOMA EAST", "Bungoma"),
    ("BUNGOMA NORTH", "Bungoma"),
    ("BUNGOMA SOUTH", "Bungoma"),
    ("BUNGOMA WEST", "Bungoma"),
    ("BUNYALA", "Busia"),
    ("BURA", "Tana River"),
    ("BURETI", "Kericho"),
    ("BUSIA", "Busia"),
    ("BUTERE", "Kakamega"),
    ("BUTULA", "Busia"),
    ("BUURI", "Meru"),
    ("CHANGAMWE", "Mombasa"),
    ("CHEPALUNGU", "Bomet"),
    ("CHEPTAIS", "Bungoma"),
];

/// County for a sub-county name; `"Unknown"` when unmapped.
pub fn county_for(subcounty: &str) -> &'static str {
    let key = subcounty.trim().to_uppercase();
    COUNTY_MAP
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, county)| *county)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
matched_area_clean,population,total_facilities,beds,facilities_per_10k,beds_per_10k,pct_operational,maternity_pct,outpatient_pct
BONDO,120000,35,410,2.9,34.2,81.0,55.0,90.0
BELGUT,98000,22,250,2.2,25.5,76.5,48.0,85.0
NOWHERE,50000,5,60,1.0,12.0,,30.0,
";

    #[test]
    fn parses_rows_and_maps_counties() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].county, "Siaya");
        assert_eq!(table.rows[1].county, "Kericho");
        assert_eq!(table.rows[2].county, "Unknown");
        assert_eq!(table.service_cols, vec!["maternity_pct", "outpatient_pct"]);
        assert_eq!(table.rows[0].service_pct, vec![55.0, 90.0]);
    }

    #[test]
    fn blank_and_nan_cells_become_zero() {
        let table = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.rows[2].pct_operational, 0.0);
        assert_eq!(table.rows[2].service_pct, vec![30.0, 0.0]);
    }

    #[test]
    fn explicit_county_column_wins_over_mapping() {
        let csv = "\
matched_area_clean,county,population,total_facilities,beds,facilities_per_10k,beds_per_10k,pct_operational
BONDO,Elsewhere,1000,1,1,1.0,1.0,50.0
";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].county, "Elsewhere");
    }

    #[test]
    fn falls_back_to_any_area_like_header() {
        let csv = "\
sub_area,population,total_facilities,beds,facilities_per_10k,beds_per_10k,pct_operational
CHEPTAIS,1000,1,1,1.0,1.0,50.0
";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].subcounty, "CHEPTAIS");
        assert_eq!(table.rows[0].county, "Bungoma");
    }

    #[test]
    fn missing_metric_column_is_an_error() {
        let csv = "matched_area_clean,population\nBONDO,1000\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("total_facilities"));
    }

    #[test]
    fn garbage_numeric_cell_is_an_error() {
        let csv = "\
matched_area_clean,population,total_facilities,beds,facilities_per_10k,beds_per_10k,pct_operational
BONDO,lots,1,1,1.0,1.0,50.0
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }
}
