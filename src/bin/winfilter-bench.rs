use anyhow::{anyhow, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winfilter::bench::{self, BenchOptions, BenchRecord, Verdict};
use winfilter::enums::{FilterMethod, SampleType};
use winfilter::grid::SampleGrid;

#[derive(Parser, Debug)]
#[command(name = "winfilter-bench")]
#[command(about = "Cross-checks and times the window filters against imageproc")]
#[command(version)]
struct Args {
    /// Input image, reduced to a single 8-bit band
    #[arg(short, long)]
    input: PathBuf,

    /// Window radii to run
    #[arg(short, long, value_delimiter = ',', default_value = "1,2,3,5,7")]
    radii: Vec<usize>,

    /// Timed repetitions per filter
    #[arg(long, default_value = "10")]
    runs: usize,

    /// Rank gate for the median filters. Gates other than 0.5 are checked
    /// against the sorted window filter instead of imageproc
    #[arg(short, long, default_value = "0.5")]
    gate: f64,

    /// Sample types to synthesize (u8, u16, f32, f64)
    #[arg(short = 't', long, value_delimiter = ',', default_value = "u8,f32")]
    sample_types: Vec<String>,

    /// Filters to run (mean, histogram, twolevel, localsort)
    #[arg(short, long, value_delimiter = ',')]
    methods: Option<Vec<String>>,

    /// CSV log file
    #[arg(long, default_value = "log.csv")]
    csv: PathBuf,

    /// Optional JSON lines log file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Directory to save filtered 8-bit outputs into
    #[arg(long)]
    save_outputs: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

fn parse_list<T: std::str::FromStr<Err = anyhow::Error>>(values: &[String]) -> Result<Vec<T>> {
    values.iter().map(|s| s.parse::<T>()).collect()
}

fn write_csv(path: &Path, records: &[BenchRecord]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", BenchRecord::csv_header())?;
    for record in records.iter() {
        writeln!(w, "{}", record.to_csv_line())?;
    }
    w.flush()?;
    Ok(())
}

fn write_json(path: &Path, records: &[BenchRecord]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for record in records.iter() {
        writeln!(w, "{}", serde_json::to_string(record)?)?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let methods = match &args.methods {
        Some(m) => parse_list::<FilterMethod>(m)?,
        None => FilterMethod::all().to_vec(),
    };
    let options = BenchOptions {
        radii: args.radii.clone(),
        runs: args.runs,
        gate: args.gate,
        sample_types: parse_list::<SampleType>(&args.sample_types)?,
        methods,
        save_dir: args.save_outputs.clone(),
    };

    let image = SampleGrid::from_file(&args.input)?.to_image_luma8();
    tracing::info!(
        "Loaded {:?}: {}x{}",
        args.input,
        image.width(),
        image.height()
    );

    let records = bench::run(&image, &options)?;
    write_csv(&args.csv, &records)?;
    if let Some(json) = &args.json {
        write_json(json, &records)?;
    }

    let wrong = records
        .iter()
        .filter(|r| r.verdict == Verdict::Wrong)
        .count();
    if wrong > 0 {
        return Err(anyhow!("{} of {} checks disagree with the reference", wrong, records.len()));
    }
    tracing::info!("Finished {} checks, log written to {:?}", records.len(), args.csv);
    Ok(())
}
