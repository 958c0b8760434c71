//! Command-line front end for docpack.
//!
//! Usage:
//!   docpack build                 - Build the package into the target dir
//!   docpack extract [`<file>`]    - Print the composed example script
//!   docpack init                  - Write a default docpack.toml
mod plan;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use docpack_config::Config;
use docpack_engine::{Builder, Document, ProcessRunner};
use std::{
    path::{Path, PathBuf},
    process,
};

use plan::Plan;

#[derive(Debug, Parser)]
#[command(name = "docpack", version, about = "Package a Typst library for publishing")]
struct Cli {
    /// Project root; relative config paths are resolved against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/docpack.toml`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clean the target dir, copy the library, build the plugin and the README
    Build,
    /// Print the example script composed from a README, without rendering it
    Extract {
        /// README to scan (defaults to the library README)
        file: Option<PathBuf>,
    },
    /// Write a config file with the default settings
    Init,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        log::debug!("{e:?}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Config::config_path(&cli.root));

    match &cli.command {
        Command::Init => init(&config_path),
        Command::Build => {
            let plan = load_plan(&config_path, &cli.root)?;
            build(plan)
        }
        Command::Extract { file } => {
            let plan = load_plan(&config_path, &cli.root)?;
            let path = file.clone().unwrap_or_else(|| plan.layout.source_readme());
            extract(&plan, &path)
        }
    }
}

fn load_plan(config_path: &Path, root: &Path) -> Result<Plan> {
    let config = match Config::load_from_path(config_path)? {
        Some(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            config
        }
        None => {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    };
    Plan::from_config(&config, root)
}

fn build(plan: Plan) -> Result<()> {
    let runner = ProcessRunner;
    let builder = Builder::new(plan.layout, plan.plugin, plan.docs, &runner);

    let report = builder.run().context("Build failed")?;

    log::info!(
        "Built {} ({} library files, {} examples)",
        builder.layout().target_dir.display(),
        report.copied_files.len(),
        report.examples
    );
    Ok(())
}

fn extract(plan: &Plan, path: &Path) -> Result<()> {
    let readme = Document::read(path)?;
    let prepared = plan
        .docs
        .prepare(&readme)
        .with_context(|| format!("Failed to extract examples from {}", path.display()))?;

    log::info!("Found {} examples", prepared.extraction.examples.len());
    println!("{}", prepared.script);
    Ok(())
}

fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    Config::default().save_to_path(config_path)?;
    log::info!("Wrote {}", config_path.display());
    Ok(())
}
