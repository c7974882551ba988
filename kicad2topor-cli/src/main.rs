//! kicad2topor CLI - convert KiCad PCB files to TopoR board files.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use kicad2topor::{Converter, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kicad2topor")]
#[command(about = "Convert a KiCad PCB file to a TopoR board file", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the .kicad_pcb input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output path (default: the input path with .fst appended)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON settings file (fonts, hidden label patterns)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let settings = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
        None => Settings::default(),
    };

    match Converter::new(settings).convert_file(&cli.input, cli.output.as_deref()) {
        Ok(report) => {
            println!(
                "Converted {} -> {}",
                cli.input.display(),
                report.output.display()
            );
            println!("  {} modules, {} nets", report.modules, report.nets);
            if report.skipped_refs > 0 {
                eprintln!(
                    "Warning: {} dangling net reference(s) skipped",
                    report.skipped_refs
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
