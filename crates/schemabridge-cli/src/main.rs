//! schemabridge CLI - PHP classes and reference docs from Pydantic schemas
//!
//! Commands:
//! - `schemabridge generate` - Write PHP classes and documentation pages
//! - `schemabridge check` - Validate a schemabridge.toml manifest and its source
//! - `schemabridge inspect` - Print extracted records as JSON
//! - `schemabridge docs-build` - Build and publish the Python reference docs

use clap::{Parser, Subcommand};
use schemabridge_cli::generate::GenerateOptions;
use schemabridge_cli::{docs_build, generate, manifest};
use schemabridge_logging::{LogLevel, init_logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schemabridge")]
#[command(author, version, about = "Generate PHP classes and docs from Pydantic schemas", long_about = None)]
struct Cli {
    /// Log level for stderr output (trace, debug, info, warn, error, off)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate PHP classes and documentation pages
    Generate {
        /// Path to schemabridge.toml (default: ./schemabridge.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Fail without writing if any warning is produced
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Validate a schemabridge.toml manifest and extract its source
    Check {
        /// Path to schemabridge.toml (default: ./schemabridge.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Print the extracted records as JSON
    Inspect {
        /// Path to schemabridge.toml (default: ./schemabridge.toml)
        #[arg(short, long, conflicts_with = "source")]
        manifest: Option<PathBuf>,

        /// Python source file to extract directly
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Base class that marks a record (default: BaseModel)
        #[arg(long)]
        base_class: Option<String>,
    },

    /// Build the Python reference docs and publish them
    DocsBuild {
        /// Path to schemabridge.toml (default: ./schemabridge.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level);

    match cli.command {
        Commands::Generate {
            manifest,
            dry_run,
            deny_warnings,
        } => {
            generate::run(
                manifest,
                GenerateOptions {
                    dry_run,
                    deny_warnings,
                },
            )?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
        Commands::Inspect {
            manifest,
            source,
            base_class,
        } => {
            generate::inspect(manifest, source, base_class)?;
        }
        Commands::DocsBuild { manifest } => {
            docs_build::run(manifest)?;
        }
    }

    Ok(())
}
