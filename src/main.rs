#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate thiserror;

mod bit;
mod command;
mod config;
mod driver;
mod error;
mod store;
mod trace;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process;

use config::Config;
use error::DriverError;

/// Builds CLI app metadata, especially command line arguments format.
fn app<'a, 'b>() -> clap::App<'a, 'b> {
    let settings = {
        use clap::AppSettings::*;
        [GlobalVersion]
    };
    clap::App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .settings(&settings)
        .arg(
            clap::Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .number_of_values(1)
                .help("Path to the command script (defaults to stdin)"),
        )
        .arg(
            clap::Arg::with_name("window")
                .short("w")
                .long("window")
                .takes_value(true)
                .number_of_values(1)
                .help("Number of slots a single fill may use (defaults to 5)"),
        )
        .arg(
            clap::Arg::with_name("strict")
                .long("strict")
                .help("Fail when a fill does not fit in its window"),
        )
        .arg(
            clap::Arg::with_name("dump")
                .long("dump")
                .help("Print the prefix tree after all commands"),
        )
        .arg(
            clap::Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Raise log verbosity (repeatable)"),
        )
}

fn run(config: &Config) -> Result<(), DriverError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match config.input_path {
        Some(ref path) => {
            info!("reading {}", path);
            let file = File::open(path)?;
            driver::run(config, BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            driver::run(config, stdin.lock(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let matches = app().get_matches();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();
    debug!("{:?}", config);

    if let Err(err) = run(&config) {
        error!("{}", err);
        process::exit(1);
    }
}
