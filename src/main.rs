//! Umlify CLI entry point

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "umlify")]
#[command(about = "Class diagrams from resolved type declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./umlify.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InputArgs {
    /// Declaration set files or directories holding them
    #[arg(short, long = "input", num_args = 1.., default_value = ".")]
    inputs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the diagram document
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (overrides output.path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the compact encoding of the document
    Encode {
        #[command(flatten)]
        input: InputArgs,

        /// Use zlib framing instead of raw DEFLATE
        #[arg(long)]
        zlib: bool,
    },
    /// Print a diagram server link for the document
    Url {
        #[command(flatten)]
        input: InputArgs,

        /// Use zlib framing instead of raw DEFLATE
        #[arg(long)]
        zlib: bool,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("umlify={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = umlify_loader::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { input, output } => commands::render(&config, &input.inputs, output),
        Commands::Encode { input, zlib } => commands::encode(&config, &input.inputs, zlib),
        Commands::Url { input, zlib } => commands::url(&config, &input.inputs, zlib),
        Commands::Version => {
            println!("Umlify v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
