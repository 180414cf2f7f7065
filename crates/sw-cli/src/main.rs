//! CLI frontend for the Spielwelt interactive-world engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sw",
    about = "Spielwelt — an interactive world simulation engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a demo world save file
    Init {
        /// Path of the save file to create
        #[arg(default_value = "world.json")]
        file: PathBuf,
    },

    /// Validate a save file without playing it
    Validate {
        /// Path of the save file
        file: PathBuf,
    },

    /// List every command an actor could execute right now
    Actions {
        /// Path of the save file
        file: PathBuf,

        /// Acting character (default: the first actor)
        #[arg(short, long)]
        actor: Option<String>,
    },

    /// Play a world interactively from the terminal
    Play {
        /// Path of the save file
        file: PathBuf,

        /// Character to play as (default: the first actor)
        #[arg(short, long)]
        actor: Option<String>,
    },

    /// Let scripted agents drive the world for a number of turn steps
    Run {
        /// Path of the save file
        file: PathBuf,

        /// Number of turn steps to run
        #[arg(short, long, default_value = "10")]
        steps: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { file } => commands::init::run(&file),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Actions { file, actor } => commands::actions::run(&file, actor.as_deref()),
        Commands::Play { file, actor } => commands::play::run(&file, actor.as_deref()),
        Commands::Run { file, steps } => commands::run::run(&file, steps),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
