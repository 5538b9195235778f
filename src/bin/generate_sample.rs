//! Generates a deterministic sample CO₂ dataset for trying out the
//! dashboard:  `cargo run --bin generate_sample [output.csv]`

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

const COUNTRIES: [&str; 8] = [
    "Brazil", "China", "France", "Germany", "India", "Japan", "Spain", "US",
];
const SECTORS: [&str; 5] = [
    "Domestic Aviation",
    "Ground Transport",
    "Industry",
    "Power",
    "Residential",
];
const DAYS: u64 = 60;

/// Minimal deterministic PRNG (splitmix64), enough for plausible noise.
struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        SampleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Uniform float in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_co2.csv".to_string());

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {path}"))?;
    writer.write_record(["country", "sector", "date", "value"])?;

    let mut rng = SampleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid literal date");

    for day in 0..DAYS {
        let date = start
            .checked_add_days(Days::new(day))
            .context("date overflow")?;
        // Day-first formatting, matching the expected upload format.
        let date_str = date.format("%d/%m/%Y").to_string();

        for (ci, country) in COUNTRIES.iter().enumerate() {
            for (si, sector) in SECTORS.iter().enumerate() {
                // Country scale × sector share × mild seasonal drift + noise.
                let scale = 50.0 * (ci + 1) as f64;
                let share = 0.1 + 0.2 * si as f64;
                let drift = 1.0 + 0.1 * (day as f64 / DAYS as f64);
                let noise = 0.9 + 0.2 * rng.next_f64();
                let value = scale * share * drift * noise;

                // A few rows with an unparseable date exercise the
                // missing-date coercion path.
                let date_field = if day == 13 && ci == 0 && si == 0 {
                    "n/a".to_string()
                } else {
                    date_str.clone()
                };

                writer.write_record([
                    *country,
                    *sector,
                    &date_field,
                    &format!("{value:.3}"),
                ])?;
            }
        }
    }

    writer.flush()?;
    log::info!(
        "wrote {} rows to {path}",
        DAYS as usize * COUNTRIES.len() * SECTORS.len()
    );
    println!("Sample dataset written to {path}");
    Ok(())
}
