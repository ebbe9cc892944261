//! Writes a deterministic synthetic `subcounty_metrics.csv` for demos and
//! manual testing:
//!
//! ```sh
//! cargo run --bin generate_sample -- data/subcounty_metrics.csv
//! ```

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in `[lo, hi]`.
    fn range_usize(&mut self, lo: usize, hi: usize) -> usize {
        lo + (self.next_u64() as usize) % (hi - lo + 1)
    }
}

const COUNTIES: &[&str] = &[
    "Baringo", "Bomet", "Bungoma", "Busia", "Elgeyo-Marakwet", "Embu",
    "Garissa", "Homa Bay", "Isiolo", "Kajiado", "Kakamega", "Kericho",
    "Kiambu", "Kilifi", "Kirinyaga", "Kisii", "Kisumu", "Kitui", "Kwale",
    "Laikipia", "Lamu", "Machakos", "Makueni", "Mandera", "Marsabit", "Meru",
    "Migori", "Mombasa", "Murang'a", "Nairobi", "Nakuru", "Nandi", "Narok",
    "Nyamira", "Nyandarua", "Nyeri", "Samburu", "Siaya", "Taita-Taveta",
    "Tana River", "Tharaka-Nithi", "Trans Nzoia", "Turkana", "Uasin Gishu",
    "Vihiga", "Wajir", "West Pokot",
];

const SUFFIXES: &[&str] = &[
    "CENTRAL", "NORTH", "SOUTH", "EAST", "WEST", "TOWN", "RURAL", "UPLANDS",
];

/// Total rows written; matches the real dataset's sub-county count.
const TARGET_ROWS: usize = 309;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/subcounty_metrics.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {path}"))?;

    writer.write_record([
        "matched_area_clean",
        "county",
        "population",
        "total_facilities",
        "beds",
        "facilities_per_10k",
        "beds_per_10k",
        "pct_operational",
        "maternity_pct",
        "outpatient_pct",
        "inpatient_pct",
        "emergency_pct",
        "imaging_pct",
    ])?;

    let mut written = 0;
    'outer: loop {
        for county in COUNTIES {
            let n_subcounties = rng.range_usize(5, 8);
            for suffix in SUFFIXES.iter().take(n_subcounties) {
                if written == TARGET_ROWS {
                    break 'outer;
                }
                write_row(&mut writer, &mut rng, county, suffix)?;
                written += 1;
            }
        }
    }
    writer.flush()?;

    log::info!("Wrote {written} sub-counties to {path}");
    Ok(())
}

fn write_row(
    writer: &mut csv::Writer<std::fs::File>,
    rng: &mut SimpleRng,
    county: &str,
    suffix: &str,
) -> Result<()> {
    let name = format!("{} {}", county.to_uppercase(), suffix);

    let population = rng.range(30_000.0, 400_000.0);
    let facilities_per_10k = rng.range(0.4, 6.0);
    let total_facilities = (population / 10_000.0 * facilities_per_10k).round();
    let beds_per_facility = rng.range(8.0, 40.0);
    let beds = (total_facilities * beds_per_facility).round();
    let beds_per_10k = beds / population * 10_000.0;
    let pct_operational = rng.range(55.0, 99.0);

    writer.write_record([
        name,
        county.to_string(),
        format!("{population:.0}"),
        format!("{total_facilities:.0}"),
        format!("{beds:.0}"),
        format!("{facilities_per_10k:.2}"),
        format!("{beds_per_10k:.2}"),
        format!("{pct_operational:.1}"),
        format!("{:.1}", rng.range(20.0, 100.0)),
        format!("{:.1}", rng.range(40.0, 100.0)),
        format!("{:.1}", rng.range(15.0, 95.0)),
        format!("{:.1}", rng.range(10.0, 90.0)),
        format!("{:.1}", rng.range(5.0, 80.0)),
    ])?;
    Ok(())
}
