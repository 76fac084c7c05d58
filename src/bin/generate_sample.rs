//! Writes a synthetic commodity outlook CSV in the layout the dashboard
//! expects, including the index, usage and citation columns and the odd
//! unparseable quantity that the loader has to clean away.

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (commodity, world production in 2018, yearly growth)
const COMMODITIES: [(&str, f64, f64); 6] = [
    ("Cobalt", 140_000.0, 0.06),
    ("Lithium", 95_000.0, 0.18),
    ("Nickel", 2_300_000.0, 0.05),
    ("Graphite", 1_000_000.0, 0.07),
    ("Rare earths", 190_000.0, 0.08),
    ("Copper", 20_500_000.0, 0.02),
];

/// (region, share of world output)
const REGIONS: [(&str, f64); 7] = [
    ("Democratic Republic of the Congo", 0.22),
    ("Australia", 0.18),
    ("Chile", 0.14),
    ("China", 0.20),
    ("Indonesia", 0.12),
    ("Argentina", 0.06),
    ("United States", 0.08),
];

const FIRST_YEAR: i32 = 2018;
const LAST_YEAR: i32 = 2029;

fn note_for(year: i32) -> &'static str {
    match year {
        i32::MIN..=2022 => "",
        2023..=2024 => "estimated",
        _ => "projected",
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rare_earths_outlook_to_2029.csv".to_string());
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "",
        "Mineral Commodity",
        "Year",
        "Geographic Region",
        "Type",
        "Quantity",
        "Note",
        "Figure_Use",
        "Data Sources",
    ])?;

    let mut row_id = 0usize;
    for (commodity, base, growth) in COMMODITIES {
        for year in FIRST_YEAR..=LAST_YEAR {
            let trend = base * (1.0 + growth).powi(year - FIRST_YEAR);
            let kind = if year <= 2024 { "Production" } else { "Capacity" };

            let world = trend * (1.0 + rng.gauss(0.0, 0.02));
            let mut rows = vec![("World", world)];
            for (region, share) in REGIONS {
                rows.push((region, world * share * (1.0 + rng.gauss(0.0, 0.05))));
            }

            for (region, quantity) in rows {
                // roughly one row in forty carries an unusable quantity
                let quantity = if rng.next_f64() < 0.025 {
                    "N/A".to_string()
                } else {
                    format!("{:.0}", quantity.max(0.0))
                };
                writer.write_record([
                    row_id.to_string().as_str(),
                    commodity,
                    year.to_string().as_str(),
                    region,
                    kind,
                    quantity.as_str(),
                    note_for(year),
                    "outlook figure",
                    "national statistical surveys",
                ])?;
                row_id += 1;
            }
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {row_id} rows to {output_path}");
    Ok(())
}
