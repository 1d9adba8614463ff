//! Weight & balance configuration tool.
//!
//! # Architecture Overview
//!
//! ```text
//!   file ──▶ codec::deserialize ──▶ structure check ──▶ Root ──▶ validation rules ──▶ report
//!                                                   │
//!                                                   ▼
//!                                              EditSession ──▶ codec::serialize ──▶ file
//! ```
//!
//! # Commands
//! - `validate`: check a document, exit 0 when valid, 1 when invalid, 2 when unreadable
//! - `new`: write a baseline document
//! - `renumber`: make variation ids positional again
//! - `fmt`: canonical re-export
//! - `watch`: re-validate on every change until Ctrl-C
//!
//! `renumber` and `fmt` refuse to write a document whose import needed repairs
//! (exit 1) unless `--force` is given.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{builder::PossibleValuesParser, Parser, Subcommand, ValueEnum};

use wb_config::config::{load_or_default, ToolConfig};
use wb_config::document::renumber_in_place;
use wb_config::observability::logging::{init_logging, LOG_LEVELS};
use wb_config::session::{
    check_file, CheckOutcome, DocumentCheck, DocumentWatcher, EditSession, OpenError,
};

#[derive(Parser)]
#[command(name = "wb-config")]
#[command(about = "Author and validate weight & balance configuration documents", long_about = None)]
struct Cli {
    /// Tool configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(long, global = true, value_parser = PossibleValuesParser::new(LOG_LEVELS.iter().copied()))]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document
    Validate {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Create a baseline document
    New {
        #[arg(short, long)]
        registration: String,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        variations: u32,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Renumber variations by position
    Renumber {
        file: PathBuf,
        /// Defaults to rewriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write even if values had to be repaired on import
        #[arg(long)]
        force: bool,
    },
    /// Re-export a document in canonical form
    Fmt {
        file: PathBuf,
        /// Defaults to the suggested export file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write even if values had to be repaired on import
        #[arg(long)]
        force: bool,
    },
    /// Re-validate a document whenever it changes
    Watch { file: PathBuf },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level, config.observability.log_format);

    match cli.command {
        Commands::Validate { file, format } => {
            let check = check_file(&file, &config.validation);
            print_check(&check, format)?;
            Ok(match check.outcome {
                CheckOutcome::Valid { .. } => ExitCode::SUCCESS,
                CheckOutcome::Invalid { .. } => ExitCode::from(1),
                CheckOutcome::Unreadable { .. } => ExitCode::from(2),
            })
        }
        Commands::New {
            registration,
            variations,
            output,
        } => {
            let mut session = EditSession::new();
            session.set_registration(registration);
            for _ in 1..variations {
                session.add_variation();
            }
            write_export(&session, &config, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Renumber {
            file,
            output,
            force,
        } => {
            let Some(mut session) = open_for_rewrite(&file, force)? else {
                return Ok(ExitCode::from(1));
            };
            if let Some(variations) = session.root_mut().variations.as_mut() {
                renumber_in_place(variations);
            }
            write_export(&session, &config, Some(output.unwrap_or(file)))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fmt {
            file,
            output,
            force,
        } => {
            let Some(session) = open_for_rewrite(&file, force)? else {
                return Ok(ExitCode::from(1));
            };
            write_export(&session, &config, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch { file } => watch(&file, &config).await,
    }
}

/// `None` when the file needs repair and `force` is not set; findings are printed.
fn open_for_rewrite(path: &Path, force: bool) -> Result<Option<EditSession>, Box<dyn Error>> {
    match EditSession::open(path, force) {
        Ok(session) => Ok(Some(session)),
        Err(OpenError::NeedsRepair(findings)) => {
            eprintln!("{}: {} value(s) would be lost", path.display(), findings.len());
            for finding in &findings {
                eprintln!("  {}", finding);
            }
            eprintln!("Fix the document or pass --force to write the repaired values.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn write_export(
    session: &EditSession,
    config: &ToolConfig,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let artifact = session.export(&config.export);
    let target = output.unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    fs::write(&target, artifact.contents)?;
    tracing::info!(path = ?target, "Document written");
    println!("{}", target.display());
    Ok(())
}

fn print_check(check: &DocumentCheck, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(check)?);
        return Ok(());
    }

    let path = check.path.display();
    match &check.outcome {
        CheckOutcome::Valid { advisories } => {
            println!("{}: valid", path);
            for advisory in advisories {
                println!("  note: {}", advisory);
            }
        }
        CheckOutcome::Invalid { errors } => {
            println!("{}: {} error(s)", path, errors.len());
            for error in errors {
                println!("  {}", error);
            }
        }
        CheckOutcome::Unreadable { reason } => {
            eprintln!("{}: {}", path, reason);
        }
    }
    Ok(())
}

async fn watch(path: &Path, config: &ToolConfig) -> Result<ExitCode, Box<dyn Error>> {
    print_check(&check_file(path, &config.validation), OutputFormat::Human)?;

    let (watcher, mut rx) = DocumentWatcher::new(path, config.validation.clone());
    let _handle = watcher.run()?;

    loop {
        tokio::select! {
            Some(check) = rx.recv() => print_check(&check, OutputFormat::Human)?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, stopping watcher");
                break;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
