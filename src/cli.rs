// ABOUTME: Command-line interface — argument parsing and command dispatch.
// ABOUTME: Each subcommand runs one calculator action against the stored session.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::calculator::{Calculator, export_file_name};
use crate::config::Config;
use crate::display::Formatter;
use crate::session::{FileStore, KeyValueStore, SessionStore};

#[derive(Debug, Parser)]
#[command(name = "triarea")]
#[command(about = "Triangle area calculator with labnah conversion and a saved history", long_about = None)]
pub struct Cli {
    /// Directory holding the saved session (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to an alternate config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate a triangle's area from its three sides
    Calc {
        #[arg(allow_negative_numbers = true)]
        side1: String,
        #[arg(allow_negative_numbers = true)]
        side2: String,
        #[arg(allow_negative_numbers = true)]
        hypotenuse: String,
        /// Add the result to the running total
        #[arg(long)]
        add: bool,
    },
    /// Show the running total
    Total,
    /// Show saved calculations, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the session log, newest first
    Log {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show statistics over the saved calculations
    Stats,
    /// Export the saved session as JSON
    Export {
        /// Output file or directory (defaults to a dated file in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete all saved calculations, totals, and log lines
    Clear,
}

impl Cli {
    /// Resolve the effective config: file first, then command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::load()?,
        };
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

/// Build a calculator over the file-backed store described by `config`.
pub fn open_calculator(config: &Config) -> Calculator<FileStore> {
    let kv = FileStore::new(config.data_dir());
    Calculator::new(SessionStore::with_key(kv, &config.storage.key))
}

/// Run one command and return the process exit code.
pub fn run<K: KeyValueStore>(
    command: Command,
    calculator: &mut Calculator<K>,
    formatter: &Formatter,
) -> anyhow::Result<i32> {
    match command {
        Command::Calc {
            side1,
            side2,
            hypotenuse,
            add,
        } => {
            let result = match calculator.calculate(&side1, &side2, &hypotenuse) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(1);
                }
            };
            println!(
                "{}",
                formatter.render_area("Area", result.area_m2, result.area_labnah)
            );
            if !result.persisted() {
                eprintln!("Warning: the result could not be saved");
            }
            if add {
                match calculator.add_to_total() {
                    Ok(totals) => println!("{}", formatter.render_totals(&totals)),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
        Command::Total => {
            println!("{}", formatter.render_totals(&calculator.totals()));
        }
        Command::History { limit } => {
            println!("{}", formatter.render_history(calculator.history(), limit));
        }
        Command::Log { limit } => {
            let logs = calculator.logs();
            let shown = limit.unwrap_or(logs.len()).min(logs.len());
            for line in &logs[..shown] {
                println!("{}", line);
            }
        }
        Command::Stats => {
            println!("{}", formatter.render_statistics(calculator.statistics()));
        }
        Command::Export { out } => {
            let snapshot = calculator.export()?;
            let file_name = export_file_name(Local::now().date_naive());
            let path = match out {
                Some(p) if p.is_dir() => p.join(file_name),
                Some(p) => p,
                None => PathBuf::from(file_name),
            };
            std::fs::write(&path, snapshot)
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        Command::Clear => match calculator.clear() {
            Ok(()) => println!("All saved data cleared"),
            Err(e) => eprintln!("Warning: saved data could not be cleared: {}", e),
        },
    }
    Ok(0)
}
