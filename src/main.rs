use clap::{Parser, Subcommand};
use env_logger::fmt::Color;
use eyre::{Result, WrapErr};
use log::{error, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use svd_json::{Bundler, Extractor};

/// Converts a CMSIS-SVD file into per-peripheral JSON and bundles it for the
/// register viewer.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Verbosity. Can be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes one JSON file per peripheral of an SVD file.
    Extract {
        /// SVD file to read [default: MIMXRT1062.svd].
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Directory to write the JSON files into
        /// [default: MIMXRT1062_JSON_Peripherals_Complete].
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Merges a directory of JSON files into one script.
    Bundle {
        /// Directory holding the per-peripheral JSON files
        /// [default: MIMXRT1062_JSON_Peripherals_Complete].
        #[arg(short, long)]
        source_dir: Option<PathBuf>,
        /// Script file to write [default: mcu_data.js].
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Global variable the data is assigned to [default: window.MCU_DATA].
        #[arg(long)]
        variable: Option<String>,
    },
}

fn init_logging(level: u8) {
    let lf = match level {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(lf)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let mut style = buf.style();
            let level = match record.level() {
                log::Level::Error => style.set_color(Color::Red).set_intense(true).value("ERROR"),
                log::Level::Warn => style.set_color(Color::Yellow).set_intense(true).value("WARN "),
                log::Level::Info => style.set_color(Color::Green).set_intense(true).value("INFO "),
                log::Level::Debug => style.set_color(Color::Cyan).set_intense(true).value("DEBUG"),
                log::Level::Trace => style.set_color(Color::Blue).set_intense(true).value("TRACE"),
            };
            writeln!(buf, "{} {}", level, record.args())
        })
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract { input, output_dir } => {
            let mut extractor = Extractor::default();
            if let Some(input) = input {
                extractor.input(input);
            }
            if let Some(output_dir) = output_dir {
                extractor.output_dir(output_dir);
            }
            let extraction = extractor.run().wrap_err("Failed to extract peripherals")?;
            info!(
                "{} peripherals written, {} skipped, {} with unknown base",
                extraction.report.items.len(),
                extraction.report.skipped.len(),
                extraction.missing_bases.len()
            );
        }
        Command::Bundle { source_dir, output, variable } => {
            let mut bundler = Bundler::default();
            if let Some(source_dir) = source_dir {
                bundler.source_dir(source_dir);
            }
            if let Some(output) = output {
                bundler.output_file(output);
            }
            if let Some(variable) = variable {
                bundler.variable(variable);
            }
            let bundle = bundler.run().wrap_err("Failed to bundle peripherals")?;
            if !bundle.skipped.is_empty() {
                info!("{} files could not be loaded", bundle.skipped.len());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
