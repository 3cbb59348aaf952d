//! Generate a Litchi waypoint mission CSV from a JSON flight description.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wpgen_cli::{generate_rows, read_request};
use wpgen_core::{
    write_csv, write_csv_file, OutputNamer, OutputTarget, RunCounterNamer, TempFileNamer,
};

/// Convert relative flight offsets into absolute Litchi waypoints
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON request file ("-" or omitted reads stdin)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Exact output path (skips run numbering)
    #[arg(long, short, conflicts_with_all = ["stdout", "temp"])]
    output: Option<PathBuf>,

    /// Directory for numbered output_N.csv files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write to a unique file in the system temp directory
    #[arg(long)]
    temp: bool,

    /// Print the CSV instead of saving it
    #[arg(long, conflicts_with = "temp")]
    stdout: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let request = read_request(args.input.as_deref())?;
    let rows = generate_rows(&request)?;

    if args.stdout {
        write_csv(&rows, std::io::stdout().lock())?;
        return Ok(());
    }

    let target = match args.output {
        Some(path) => OutputTarget {
            path,
            label: "manual".to_string(),
        },
        None if args.temp => TempFileNamer::new(std::env::temp_dir()).next_destination()?,
        None => RunCounterNamer::new(args.out_dir).next_destination()?,
    };
    write_csv_file(&target, &rows)?;

    println!(
        "Run #{}: Saved '{}' ({} waypoints)",
        target.label,
        target.path.display(),
        rows.len()
    );

    Ok(())
}
