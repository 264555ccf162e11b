// SPDX-License-Identifier: MPL-2.0
use exif_report::batch;
use exif_report::config::{self, Config};
use exif_report::metadata::TimestampZone;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: exif_report [OPTIONS] <PATH>...

Options:
  --config <FILE>   Read settings from FILE instead of the default location
  --output <FILE>   Write the CSV report to FILE (default: stdout)
  --recursive       Descend into subdirectories
  --utc             Render filesystem timestamps in UTC
  --raw-size        Write the Size column as a byte count
  -h, --help        Print this help";

struct Flags {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    recursive: bool,
    utc: bool,
    raw_size: bool,
    inputs: Vec<PathBuf>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config: args.opt_value_from_str("--config")?,
        output: args.opt_value_from_str("--output")?,
        recursive: args.contains("--recursive"),
        utc: args.contains("--utc"),
        raw_size: args.contains("--raw-size"),
        inputs: args.finish().into_iter().map(PathBuf::from).collect(),
    };
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Result<Config, exif_report::Error> {
    let mut config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => {
            let (config, warning) = config::load();
            if let Some(warning) = warning {
                warn!("{warning}");
            }
            config
        }
    };

    if flags.output.is_some() {
        config.report.output.clone_from(&flags.output);
    }
    if flags.recursive {
        config.scan.recursive = true;
    }
    if flags.utc {
        config.decode.timestamp_zone = TimestampZone::Utc;
    }
    if flags.raw_size {
        config.report.human_readable_size = false;
    }
    Ok(config)
}

fn run(flags: &Flags) -> Result<(), exif_report::Error> {
    let config = load_config(flags)?;
    let out: Box<dyn Write> = match &config.report.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| exif_report::Error::Io {
                path: path.clone(),
                source: e,
            })?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    batch::run(&flags.inputs, &config, out)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if flags.inputs.is_empty() {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    match run(&flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
