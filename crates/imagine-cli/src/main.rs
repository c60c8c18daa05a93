//! imagine CLI - Explore release archives
//!
//! Commands:
//! - `imagine graph` - Render the package/job dependency graph as DOT
//! - `imagine inspect` - Summarize the contents of a release archive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod graph;
mod inspect;
mod logging;

#[derive(Parser)]
#[command(name = "imagine")]
#[command(author, version, about = "Explore BOSH-style release archives", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dependency graph of a release as Graphviz DOT
    Graph {
        /// Path to the release archive (.tgz)
        release: PathBuf,

        /// Write DOT to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a TOML graph configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the packages, jobs and dependencies of a release
    Inspect {
        /// Path to the release archive (.tgz)
        release: PathBuf,

        /// Print the full metadata as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Graph {
            release,
            output,
            config,
        } => {
            graph::run(&release, output.as_deref(), config.as_deref())?;
        }
        Commands::Inspect { release, json } => {
            inspect::run(&release, json)?;
        }
    }

    Ok(())
}
