use anyhow::Result;
use clap::{Parser, Subcommand};
use commexp_cli::commands;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "commexp")]
#[command(about = "Commexp - Result analysis for noisy-channel communication experiments", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record every run of an experiment and print the result table
    Analyze {
        /// Input JSON file with setup and runs ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Analysis config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Output JSON file for the result table
        #[arg(short, long)]
        output: Option<String>,

        /// Repeat count (defaults to the file's value or the number of runs)
        #[arg(long)]
        repeat: Option<u32>,
    },

    /// Show the per-position classification of one run
    Trace {
        /// Input JSON file with setup and runs ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Index of the run to trace
        #[arg(long, default_value = "0")]
        run: usize,

        /// Analysis config JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            config,
            output,
            repeat,
        } => commands::analyze::execute(&input, config.as_deref(), output.as_deref(), repeat),

        Commands::Trace { input, run, config } => {
            commands::trace::execute(&input, run, config.as_deref())
        }
    }
}
