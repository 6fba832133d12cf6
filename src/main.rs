extern crate log;
pub mod config;
pub mod geofile;
pub mod schema;
use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// List the property keys used by the features of every GeoJSON file in a directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an optional YAML config file with `source_dir` and `output_filepath`.
    #[arg(short, long)]
    config_filepath: Option<PathBuf>,

    /// Directory to scan for .geojson files. Overrides the config file.
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Path of the Markdown report to write. Overrides the config file.
    #[arg(short, long)]
    output_filepath: Option<PathBuf>,
}

fn resolve_config(args: Args) -> anyhow::Result<Config> {
    let config = match &args.config_filepath {
        Some(config_filepath) => Config::from_yaml_file(config_filepath)?,
        None => Config::default(),
    };
    Ok(config.with_overrides(args.source_dir, args.output_filepath))
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = resolve_config(args)?;
    log::debug!("{:?}", config);

    let summary = schema::run(&config)?;
    log::info!(
        "Wrote {} file schemas with {} distinct property keys to {:?}",
        summary.num_files,
        summary.num_distinct_keys,
        config.output_filepath
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
