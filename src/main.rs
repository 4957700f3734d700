use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Parser;
use log::error;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

mod dict;
mod errors;
mod protect;
mod runner;
mod sequence;
mod source;
mod steps;
mod value;

use runner::Runner;

#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// Show debug output
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };

    // Diagnostics go to stderr so stdout only ever carries the tour itself
    match TermLogger::init(
        filter,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to init logger: {}", e),
    }
}

fn main() -> Result<()> {
    let opts = Opt::parse();
    init_logging(opts.debug)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let res = Runner::new(&mut out).run();

    // Output produced before a failure still has to make it out
    if let Err(e) = out.flush() {
        error!("Failed to flush stdout: {}", e);
    }

    res
}
