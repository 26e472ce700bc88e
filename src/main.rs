extern crate floor_u_value;

use clap::Parser;
use floor_u_value::calculate_floor_u_value;
use floor_u_value::output::{FileOutput, StdoutOutput};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct FloorUValueArgs {
    #[arg(help = "Path to a floor description in .json format")]
    input_file: PathBuf,
    #[arg(long, short, help = "Write the result here instead of to stdout")]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Pretty-print the JSON result")]
    pretty: bool,
    #[arg(long, short, default_value_t = false, help = "Log debug information")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = FloorUValueArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = calculate_floor_u_value(BufReader::new(File::open(&args.input_file)?))?;
    info!(
        u_value = result.u_value,
        warnings = result.warnings.len(),
        "calculated U-value for {}",
        args.input_file.display()
    );

    match args.output {
        Some(path) => result.write_to(&FileOutput::new(path), args.pretty),
        None => result.write_to(&StdoutOutput, args.pretty),
    }
}
