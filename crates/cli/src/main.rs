//! ARM Resource Projector CLI
//!
//! Reads resource records that were already fetched from the management API
//! and prints their presentation objects as JSON.

use anyhow::{Context, Result};
use arm_resource_projector_common::{GenericResource, ProjectionFormat, ProjectorError};
use arm_resource_projector_parser::parse_resource_id;
use arm_resource_projector_projector::to_presentation;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "arm-resource-projector")]
#[command(version, about = "Project Azure Resource Manager resources into presentation objects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level for diagnostics (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Commands {
    /// Project resource records read from a file or stdin
    #[command(after_help = "EXAMPLES:\n  \
        # Project a single resource in structured format\n  \
        arm-resource-projector project --input vm.json\n\n  \
        # Project a list response in legacy format\n  \
        arm-resource-projector project --input page.json --format legacy\n\n  \
        # Stop at the first malformed record\n  \
        cat page.json | arm-resource-projector project --strict")]
    Project {
        /// Path to a JSON file: one record, an array of records, or a page with `value`
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Projection format (legacy or structured)
        #[arg(short, long, default_value = "structured", value_parser = parse_format)]
        format: ProjectionFormat,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Abort on the first record that cannot be projected
        #[arg(long)]
        strict: bool,
    },

    /// Parse a resource identifier and display its components
    ParseId {
        /// Full resource identifier
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_format(s: &str) -> std::result::Result<ProjectionFormat, ProjectorError> {
    s.parse()
}

fn setup_logging(level: LogLevel) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match level.to_tracing_level() {
            Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
            None => return,
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Project {
            input,
            format,
            pretty,
            strict,
        } => {
            project_command(input.as_deref(), format, pretty, strict, cli.verbose)?;
        }
        Commands::ParseId { id } => {
            parse_id_command(&id)?;
        }
    }

    Ok(())
}

fn project_command(
    input: Option<&Path>,
    format: ProjectionFormat,
    pretty: bool,
    strict: bool,
    verbose: bool,
) -> Result<()> {
    let content = match input {
        Some(path) => {
            eprintln!("{} Reading resources from: {}", "→".cyan(), path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read resources from stdin")?;
            buf
        }
    };

    let document: Value = serde_json::from_str(&content).context("Input is not valid JSON")?;
    let records = extract_records(document);

    if verbose {
        eprintln!("  Format: {}", format);
        eprintln!("  Records: {}", records.len());
    }

    let mut projected = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (i, record) in records.into_iter().enumerate() {
        let result = GenericResource::from_value(record)
            .and_then(|resource| to_presentation(&resource, format));

        match result {
            Ok(obj) => {
                if verbose {
                    eprintln!(
                        "  {} {}",
                        "•".cyan(),
                        obj.type_name().unwrap_or_default()
                    );
                }
                projected.push(obj);
            }
            Err(e) if !strict => {
                eprintln!("{} Skipping record {}: {}", "⚠".yellow(), i, e);
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to project record {}", i));
            }
        }
    }

    let rendered = if pretty {
        serde_json::to_string_pretty(&projected)
    } else {
        serde_json::to_string(&projected)
    }
    .context("Failed to render output")?;
    println!("{}", rendered);

    eprintln!(
        "{} Projected {} resources ({} skipped)",
        "✓".green(),
        projected.len(),
        skipped
    );

    Ok(())
}

fn parse_id_command(id: &str) -> Result<()> {
    let parsed = parse_resource_id(id).context("Failed to parse resource identifier")?;

    let absent = || "(none)".dimmed().to_string();

    println!("{}", "Resource Identifier:".bold());
    println!("  SubscriptionId: {}", parsed.subscription_id().yellow());
    println!(
        "  ResourceGroupName: {}",
        parsed
            .resource_group_name()
            .map(|s| s.yellow().to_string())
            .unwrap_or_else(absent)
    );
    println!("  ResourceType: {}", parsed.resource_type().yellow());
    println!("  ResourceName: {}", parsed.resource_name().yellow());
    println!(
        "  ExtensionResourceType: {}",
        parsed
            .extension_resource_type()
            .map(|s| s.yellow().to_string())
            .unwrap_or_else(absent)
    );
    println!(
        "  ExtensionResourceName: {}",
        parsed
            .extension_resource_name()
            .map(|s| s.yellow().to_string())
            .unwrap_or_else(absent)
    );
    println!("  TypeName: {}", parsed.type_display_name().cyan());
    println!("  Canonical: {}", parsed);

    Ok(())
}

/// Split an input document into individual records
///
/// Accepts a list page (`{"value": [...]}`), a bare array, or a single record.
fn extract_records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) if !map.contains_key("id") && map.contains_key("value") => {
            match map.remove("value") {
                Some(Value::Array(items)) => items,
                Some(other) => vec![other],
                None => Vec::new(),
            }
        }
        other => vec![other],
    }
}
