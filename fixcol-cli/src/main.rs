use anyhow::Result;
use clap::{Parser, Subcommand};
use fixcol_cli::{commands, OutputFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fixcol")]
#[command(about = "Fixcol - Decode fixed-width text records into JSON", long_about = None)]
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
    /// Decode every line of a fixed-width file
    Decode {
        /// Layout file (JSON)
        #[arg(short, long)]
        layout: String,

        /// Input file, `-` for stdin
        #[arg(short, long)]
        input: String,

        /// Output file for decoded records (stdout if absent)
        #[arg(short, long)]
        output: Option<String>,

        /// Write one JSON object per line instead of an array
        #[arg(long)]
        jsonl: bool,

        /// Range delimiter, overriding the layout file
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Skip lines that fail to decode instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// Validate a layout's range specs and formatter names
    Check {
        /// Layout file (JSON)
        #[arg(short, long)]
        layout: String,

        /// Range delimiter, overriding the layout file
        #[arg(short, long)]
        delimiter: Option<String>,
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

    // Records may go to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Decode {
            layout,
            input,
            output,
            jsonl,
            delimiter,
            keep_going,
        } => {
            let format = if jsonl {
                OutputFormat::Jsonl
            } else {
                OutputFormat::Json
            };
            commands::decode::execute(
                &layout,
                &input,
                output.as_deref(),
                format,
                delimiter.as_deref(),
                keep_going,
            )
            .map(|_| ())
        }

        Commands::Check { layout, delimiter } => {
            commands::check::execute(&layout, delimiter.as_deref())
        }
    }
}
