use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("KSC LC-39A", 0.25),
    ("VAFB SLC-4E", 0.15),
    ("CCAFS SLC-40", 0.15),
];

/// Booster category per era: (name, flights, payload range kg, success rate).
const ERAS: [(&str, usize, (f64, f64), f64); 5] = [
    ("v1.0", 5, (0.0, 700.0), 0.2),
    ("v1.1", 15, (500.0, 4500.0), 0.35),
    ("FT", 18, (2000.0, 9600.0), 0.6),
    ("B4", 11, (2000.0, 6800.0), 0.55),
    ("B5", 7, (3000.0, 9600.0), 0.9),
];

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick_weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let mut roll = self.next_f64() * choices.iter().map(|c| c.1).sum::<f64>();
        for &(name, weight) in choices {
            if roll < weight {
                return name;
            }
            roll -= weight;
        }
        choices[choices.len() - 1].0
    }
}

struct Launch {
    flight_number: i64,
    site: &'static str,
    payload_mass_kg: f64,
    booster_version: String,
    booster_category: &'static str,
    class: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    let mut launches = Vec::new();
    let mut flight_number = 1;
    for &(category, flights, (lo, hi), success_rate) in &ERAS {
        for _ in 0..flights {
            let site = rng.pick_weighted(&SITES);
            // Round to whole kilograms like the published manifests.
            let payload_mass_kg = rng.uniform(lo, hi).round();
            let class = i64::from(rng.next_f64() < success_rate);
            launches.push(Launch {
                flight_number,
                site,
                payload_mass_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
                booster_category: category,
                class,
            });
            flight_number += 1;
        }
    }
    launches
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "",
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for (i, l) in launches.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            l.flight_number.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_mass_kg),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write synthetic launch records as CSV and Parquet")]
struct Args {
    /// Directory to write spacex_launch_dash.{csv,parquet} into
    #[arg(default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let Args { out_dir } = Args::parse();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = out_dir.join("spacex_launch_dash.csv");
    let parquet_path = out_dir.join("spacex_launch_dash.parquet");
    write_csv(&csv_path, &launches)?;
    write_parquet(&parquet_path, &launches)?;

    println!(
        "Wrote {} launches to {} and {}",
        launches.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
