mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::Destination;

#[derive(Parser)]
#[command(name = "muster-export")]
#[command(about = "Export Muster events as iCalendar (.ics) files")]
struct Cli {
    /// Config file to use instead of ~/.config/muster/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one event (a JSON object) as a calendar file
    Event {
        /// JSON file with the event, or "-" for stdin
        input: PathBuf,

        /// Directory to write the .ics file to (default: output_dir from config)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the document to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
    /// Export several events (a JSON array) as one calendar file
    Batch {
        /// JSON file with the events, or "-" for stdin
        input: PathBuf,

        /// Base filename; ".ics" is appended if missing
        #[arg(short, long)]
        name: String,

        /// Directory to write the .ics file to (default: output_dir from config)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the document to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write a commented default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => commands::default_config_path()?,
    };

    match cli.command {
        Commands::Event {
            input,
            output,
            stdout,
        } => {
            let config = commands::load_config(&config_path)?;
            let destination = Destination::from_args(output, stdout, &config);
            commands::event::run(&config, &input, destination)
        }
        Commands::Batch {
            input,
            name,
            output,
            stdout,
        } => {
            let config = commands::load_config(&config_path)?;
            let destination = Destination::from_args(output, stdout, &config);
            commands::batch::run(&config, &input, &name, destination)
        }
        Commands::Config { init } => commands::config::run(&config_path, init),
    }
}
