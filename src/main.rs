//! CLI entry point for the Javadoc extractor.
//!
//! Provides commands for initializing configuration, showing the effective
//! settings, and extracting member specifications from compiled classes and
//! their sources.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use docspec::{ExecutableMember, ExtractError, JavadocExtractor, Settings};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Extract constructor and method specifications from Java classes
#[derive(Parser)]
#[command(
    name = "docspec",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract constructor and method specifications from Java classes",
    long_about = "Reconcile compiled classes with their sources and print parameter types, names, nullability and Javadoc tags.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .docspec directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .docspec/settings.toml")]
    Config,

    /// Extract member specifications
    #[command(
        about = "Extract constructors and methods of top-level classes",
        after_help = "Examples:\n  docspec extract com.acme.Widget --source src/main/java --classpath target/classes\n  docspec extract --all --source src/main/java --classpath target/classes --json"
    )]
    Extract {
        /// Qualified class names (com.acme.Widget)
        #[arg(required_unless_present = "all")]
        classes: Vec<String>,

        /// Source root holding the package directories
        #[arg(short, long)]
        source: PathBuf,

        /// Compiled class directory (repeatable, adds to the configured classpath)
        #[arg(long)]
        classpath: Vec<PathBuf>,

        /// Extract every class found under the source root
        #[arg(long, conflicts_with = "classes")]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

#[derive(Serialize)]
struct ClassOutput<'a> {
    class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<&'a [ExecutableMember]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorOutput>,
}

#[derive(Serialize)]
struct ErrorOutput {
    status: &'static str,
    message: String,
    suggestions: Vec<&'static str>,
}

impl From<&ExtractError> for ErrorOutput {
    fn from(error: &ExtractError) -> Self {
        Self {
            status: error.status_code(),
            message: error.to_string(),
            suggestions: error.recovery_suggestions(),
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Init { .. }) && cli.config.is_none() {
        if let Err(warning) = Settings::check_init() {
            eprintln!("Warning: {warning}");
            eprintln!("Using default configuration for now.");
        }
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        Settings::load_from(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| {
                format!("Configuration error loading from {}", config_path.display())
            })?
    } else {
        Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        })
    };

    if cli.debug {
        config.debug = true;
    }
    init_tracing(config.debug);

    match cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(force)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("Failed to write configuration")?;
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(&config)?);
        }

        Commands::Extract {
            classes,
            source,
            classpath,
            all,
            json,
            threads,
        } => {
            config.introspection.classpath.extend(classpath);
            if let Some(threads) = threads {
                config.extraction.parallel_threads = threads;
            }

            let extractor = JavadocExtractor::from_settings(&config);
            let classes = if all {
                extractor.discover_classes(&source)
            } else {
                classes
            };
            if classes.is_empty() {
                anyhow::bail!("No classes found under {}", source.display());
            }

            let results = extractor.extract_all(&classes, &source);
            let mut failures = 0;
            for (class, result) in &results {
                if let Err(error) = result {
                    report_failure(class, error);
                    failures += 1;
                }
            }

            if json {
                let output: Vec<ClassOutput> = results
                    .iter()
                    .map(|(class, result)| match result {
                        Ok(members) => ClassOutput {
                            class,
                            members: Some(members.as_slice()),
                            error: None,
                        },
                        Err(error) => ClassOutput {
                            class,
                            members: None,
                            error: Some(error.into()),
                        },
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for (class, result) in &results {
                    // Failures were already reported on stderr
                    if let Ok(members) = result {
                        println!("{class}");
                        for member in members {
                            for line in member.to_string().lines() {
                                println!("  {line}");
                            }
                        }
                        println!();
                    }
                }
            }

            if failures > 0 {
                eprintln!("{failures} of {} classes failed", results.len());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn report_failure(class: &str, error: &ExtractError) {
    eprintln!("Error [{}] {class}: {error}", error.status_code());
    for suggestion in error.recovery_suggestions() {
        eprintln!("  - {suggestion}");
    }
}
