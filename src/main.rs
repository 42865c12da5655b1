// ABOUTME: Entry point for triarea — a triangle area calculator with a saved history.
// ABOUTME: Parses CLI args, loads config, sets up logging, and runs one command.

use clap::Parser;

use triarea::cli::{self, Cli};
use triarea::display::Formatter;
use triarea::logging;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    logging::init(&config.logging);

    let mut calculator = cli::open_calculator(&config);
    let formatter = Formatter::new(config.display);
    let code = cli::run(cli.command, &mut calculator, &formatter)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
