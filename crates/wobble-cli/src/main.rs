//! Wobble CLI — simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "wobble")]
#[command(version, about = "Wobble — meshless shape-matching deformation kernel")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene from a config file.
    Simulate {
        /// Path to scene config (TOML).
        #[arg(short, long, default_value = "scene.toml")]
        config: String,

        /// Write final positions and metrics as JSON.
        #[arg(short, long)]
        output: Option<String>,

        /// Write a binary body snapshot after the last frame.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (rigid_shift, twisted_lattice, pinned_beam,
        /// scattered_points, dragged_sphere, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override the frame count of every scenario.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a body snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a scene (.toml) or mesh (.json).
    Validate {
        /// Path to scene or mesh file.
        path: String,
    },

    /// List the built-in material presets.
    Presets,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Simulate {
            config,
            output,
            snapshot,
        } => commands::simulate(&config, output.as_deref(), snapshot.as_deref()),
        Commands::Benchmark {
            scenario,
            frames,
            output,
        } => commands::benchmark(&scenario, frames, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Presets => commands::presets(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
