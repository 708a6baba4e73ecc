//! CLI entry point for apexmsg-codegen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apexmsg_codegen::codegen::{build_field_table, CodeGenerator};
use apexmsg_codegen::config::CodegenConfig;
use apexmsg_codegen::pipeline::{load_force_config, offerable_object_types};
use apexmsg_codegen::provider::{ConfiguredProvider, SchemaProvider, SchemaSession};
use apexmsg_codegen::Outcome;

#[derive(Parser)]
#[command(name = "apexmsg-codegen")]
#[command(about = "Generate Apex Msg classes from sObject describe metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project directory (overrides config)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Path to force.json (overrides config; searched for in the project otherwise)
    #[arg(short, long)]
    force_config: Option<PathBuf>,

    /// Directory of saved describe documents, relative to the project (overrides config)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Read saved describe documents instead of logging in to the org
    #[arg(long)]
    offline: bool,

    /// Object type to generate without prompting
    #[arg(short, long)]
    object: Option<String>,

    /// Do not open the generated class in $VISUAL / $EDITOR
    #[arg(long)]
    no_open: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick an object type and generate its Msg class (default)
    Generate,
    /// List the object types that can be generated
    List,
    /// Show the field table for an object type (for debugging)
    Inspect {
        /// Object type API name
        object: String,
    },
    /// Print the generated class and metadata without writing files
    Preview {
        /// Object type API name
        object: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = if let Some(config_path) = &cli.config {
        CodegenConfig::from_file(config_path)?
    } else {
        CodegenConfig::load(None)?
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Apply CLI overrides
    if let Some(project) = cli.project {
        config.project_dir = project;
    }
    if let Some(force_config) = cli.force_config {
        config.force_config = Some(force_config);
    }
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_dir = snapshot;
    }
    if let Some(object) = cli.object {
        config.object = Some(object);
    }
    if cli.offline {
        config.offline = true;
    }
    if cli.no_open {
        config.open_in_editor = false;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    match &cli.command {
        Some(Commands::List) => return list_objects(&config),
        Some(Commands::Inspect { object }) => return inspect_object(&config, object),
        Some(Commands::Preview { object }) => return preview_object(&config, object),
        Some(Commands::Generate) | None => {}
    }

    if config.dry_run {
        println!("Dry run mode - would generate:");
    }

    match apexmsg_codegen::generate(&config)? {
        Outcome::Generated(artifacts) => {
            info!("Code generation completed successfully");
            println!("Generated {}", artifacts.class_path.display());
        }
        Outcome::Cancelled => {
            println!("Apex Message class generation canceled.");
        }
    }
    Ok(())
}

fn open_session(config: &CodegenConfig) -> Result<(Box<dyn SchemaSession>, String)> {
    let force = load_force_config(config)?;
    let session = ConfiguredProvider::from_config(config)?.connect(&force)?;
    Ok((session, force.api_version))
}

fn list_objects(config: &CodegenConfig) -> Result<()> {
    let (session, _) = open_session(config)?;
    let objects = session.list_object_types()?;
    let names = offerable_object_types(&objects);

    println!("{} object types can be generated:\n", names.len());
    for name in &names {
        println!("  {}", name);
    }
    Ok(())
}

fn inspect_object(config: &CodegenConfig, object: &str) -> Result<()> {
    let (session, _) = open_session(config)?;
    let describe = session.describe(object)?;
    let table = build_field_table(&describe.fields);

    println!("Object: {}", describe.name);
    if let Some(label) = &describe.label {
        println!("  Label: {}", label);
    }
    println!(
        "  Fields: {} described, {} kept\n",
        describe.fields.len(),
        table.len()
    );
    for row in &table {
        println!(
            "    - {:<32} {:<40} {}",
            row.pretty_name,
            row.raw_name,
            row.apex_type()
        );
    }

    let skipped: Vec<&str> = describe
        .fields
        .iter()
        .filter(|f| !table.iter().any(|row| row.raw_name == f.name))
        .map(|f| f.name.as_str())
        .collect();
    if !skipped.is_empty() {
        println!("\n  Skipped (not updateable): {}", skipped.join(", "));
    }
    Ok(())
}

fn preview_object(config: &CodegenConfig, object: &str) -> Result<()> {
    let (session, api_version) = open_session(config)?;
    let describe = session.describe(object)?;
    let rendered = CodeGenerator::new(&api_version).generate(&describe);

    println!("// {}.cls", rendered.class_name);
    print!("{}", rendered.class_body);
    println!();
    println!("<!-- {}.cls-meta.xml -->", rendered.class_name);
    print!("{}", rendered.metadata_document);
    Ok(())
}
