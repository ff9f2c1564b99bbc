//! `mutprotoc`: generates a proto3 schema and a Kotlin mutable object model
//! from a JSON schema IR.

use anyhow::{Context, Result};
use clap::Parser;
use mutproto_codegen::{Generator, GeneratorConfig};
use mutproto_schema::SchemaIr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mutprotoc")]
#[command(about = "Generate Kotlin mutable classes and a proto3 schema from a schema IR", long_about = None)]
struct Cli {
    /// Schema IR in JSON form
    schema: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Package of the generated Kotlin file
    #[arg(long)]
    kotlin_package: Option<String>,

    /// Package of the generated proto file (defaults to the schema package)
    #[arg(long)]
    proto_package: Option<String>,

    /// `java_package` option (defaults to the proto package)
    #[arg(long)]
    java_package: Option<String>,

    /// `java_outer_classname` option
    #[arg(long)]
    outer_class: Option<String>,

    /// Name of the generated proto file
    #[arg(long)]
    proto_file: Option<String>,

    /// Name of the generated Kotlin file
    #[arg(long)]
    kotlin_file: Option<String>,

    /// Use unboxed libGDX containers for repeated and map fields
    #[arg(long)]
    compact: bool,

    /// Reject duplicate, out of range and reserved field numbers
    #[arg(long)]
    validate_tags: bool,

    /// Build decoded containers without pre-sizing them
    #[arg(long)]
    no_count_hints: bool,

    /// Extra Kotlin import, may be repeated
    #[arg(long = "import", value_name = "IMPORT")]
    imports: Vec<String>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .compact_collection_mode(self.compact)
            .validate_tags(self.validate_tags)
            .wire_count_hints(!self.no_count_hints);
        if let Some(package) = &self.kotlin_package {
            config = config.kotlin_package(package);
        }
        if let Some(package) = &self.proto_package {
            config = config.proto_package(package);
        }
        if let Some(package) = &self.java_package {
            config = config.java_package(package);
        }
        if let Some(name) = &self.outer_class {
            config = config.proto_outer_class_name(name);
        }
        if let Some(name) = &self.proto_file {
            config = config.proto_file_name(name);
        }
        if let Some(name) = &self.kotlin_file {
            config = config.kotlin_file_name(name);
        }
        for import in &self.imports {
            config = config.import(import);
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ir = SchemaIr::from_file(&cli.schema)
        .with_context(|| format!("failed to load schema {}", cli.schema.display()))?;
    let config = cli.config();
    let files = Generator::new(&ir, &config)
        .and_then(|generator| generator.generate())
        .with_context(|| format!("failed to generate code for {}", cli.schema.display()))?;
    let written = files
        .write_to(&cli.out)
        .with_context(|| format!("failed to write output to {}", cli.out.display()))?;

    tracing::info!("Generated {} files from {}", written.len(), cli.schema.display());
    Ok(())
}
