// src/cli.rs
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::{AppOptions, Mode};
use crate::error::{Error, Result};
use crate::progress::Progress;

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(AppOptions),
    Help,
}

/// Parse the process arguments and run the batch job.
pub fn run() -> Result<()> {
    crate::log::init();

    let opts = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{HELP}");
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    let mut progress = CliProgress::default();
    let summary = crate::runner::run(&opts, Some(&mut progress))?;
    println!(
        "Scraped {} draws, history {} draws, wrote {} files",
        summary.scraped,
        summary.history_len,
        summary.files_written.len()
    );
    Ok(())
}

/// Parse arguments (without the program name) into a command.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = AppOptions::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(a) = args.next() {
        match a.as_str() {
            "--mode" => {
                let v = value(&mut args, "--mode")?;
                opts.mode = Mode::parse(&v)
                    .ok_or_else(|| Error::config(format!("Unknown mode: {v}")))?;
            }
            "-o" | "--out" => opts.out_dir = PathBuf::from(value(&mut args, "--out")?),
            "--store" => opts.store_dir = PathBuf::from(value(&mut args, "--store")?),
            "--no-history" => opts.keep_history = false,
            "--years" => {
                let v = value(&mut args, "--years")?;
                opts.window_years = match v.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(Error::config(format!("--years must be a positive integer, got {v}"))),
                };
            }
            "--reference-date" => {
                let v = value(&mut args, "--reference-date")?;
                let date = NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                    .map_err(|_| Error::config(format!("Bad --reference-date (want YYYY-MM-DD): {v}")))?;
                opts.reference_date = Some(date);
            }
            "--input" => opts.input = Some(PathBuf::from(value(&mut args, "--input")?)),
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(Error::config(format!("Unknown arg: {a}"))),
        }
    }

    Ok(Command::Run(opts))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::config(format!("Missing value for {flag}")))
}

/// Prints one line per file to stdout.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, path: &Path) {
        self.done += 1;
        println!("[{}/{}] Saved: {}", self.done, self.total, path.display());
    }

    fn finish(&mut self) {
        println!("Done.");
    }
}
