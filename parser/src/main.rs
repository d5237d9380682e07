//! @ai:module:intent CLI entry point for the fern parser
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on parser, application, output

use clap::{Parser, Subcommand, ValueEnum};
use fern_parser::{output, parse_application, parse_file, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fern-parse")]
#[command(author, version, about = "Fern - language-agnostic source and application parser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single source file
    File {
        /// Path to file
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Parse an application directory
    App {
        /// Path to the application root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::File { path, format } => match parse_file(&path) {
            Ok(Some(sample)) => {
                println!("{}", output::format_code_sample(&sample, format.into()));
                ExitCode::SUCCESS
            }
            Ok(None) => {
                eprintln!("Skipped empty file: {}", path.display());
                ExitCode::from(1)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::App { path, format } => match parse_application(&path) {
            Ok(app) => {
                println!("{}", output::format_application(&app, format.into()));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },
    }
}
