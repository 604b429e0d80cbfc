//! Hopfield CLI - store and recall patterns in a Hopfield network.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::capacity::CapacityParams;
use crate::config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "hopfield")]
#[command(author, version, about = "Hopfield - associative memory in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default hopfield.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Store one pattern and recover it from a one-bit-off cue
    Demo {
        /// Seed for the update order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Store patterns and recover a cue in one shot
    Recall {
        /// Pattern to store, row-major (# high, . low, / between rows); repeatable
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Cue to recover from
        #[arg(short, long)]
        cue: String,

        #[command(flatten)]
        network: NetworkArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive grid editor
    Shell {
        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Measure recall rate against the number of stored patterns
    Capacity {
        /// Network size
        #[arg(short, long, default_value = "64")]
        nodes: usize,

        /// Largest number of patterns to try
        #[arg(short, long, default_value = "16")]
        max_patterns: usize,

        /// Trials per pattern count
        #[arg(short, long, default_value = "20")]
        trials: usize,

        /// Fraction of cue bits flipped
        #[arg(long, default_value = "0.1")]
        noise: f64,

        /// Seed for patterns, noise and update order
        #[arg(long)]
        seed: Option<u64>,

        /// Sweep cap per recovery (0 = none)
        #[arg(long)]
        max_sweeps: Option<usize>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct NetworkArgs {
    /// Grid width (default from hopfield.toml)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (default from hopfield.toml)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for the update order
    #[arg(long)]
    seed: Option<u64>,

    /// Sweep cap per recovery (0 = none)
    #[arg(long)]
    max_sweeps: Option<usize>,
}

impl From<NetworkArgs> for Overrides {
    fn from(args: NetworkArgs) -> Self {
        Overrides {
            width: args.width,
            height: args.height,
            seed: args.seed,
            max_sweeps: args.max_sweeps,
        }
    }
}

fn init_tracing(verbose: bool, config: &Config) {
    let default = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(cli.verbose, &config);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Demo { seed } => commands::demo::run(&config, seed),
        Commands::Recall {
            patterns,
            cue,
            network,
            json,
        } => commands::recall::run(&config, &network.into(), &patterns, &cue, json),
        Commands::Shell { network } => commands::shell::run(&config, &network.into()),
        Commands::Capacity {
            nodes,
            max_patterns,
            trials,
            noise,
            seed,
            max_sweeps,
            json,
        } => {
            let overrides = Overrides {
                seed,
                max_sweeps,
                ..Default::default()
            };
            let params = CapacityParams {
                nodes,
                max_patterns,
                trials,
                noise,
            };
            commands::capacity::run(&config, &overrides, params, json)
        }
    }
}
