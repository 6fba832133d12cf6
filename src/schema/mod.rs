pub mod report;

use anyhow::anyhow;
use indicatif::ProgressBar;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::geofile::{discovery::find_geojson_files, geojson::extract_schema};

/// Distinct property keys seen across all features of one file, in codepoint order.
pub type Schema = BTreeSet<String>;

/// Schema per input file name, in file name order.
pub type SchemaReport = BTreeMap<String, Schema>;

#[derive(Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub num_files: usize,
    pub num_distinct_keys: usize,
}

/// Extract the schema of every GeoJSON file in the configured source directory.
///
/// Stops at the first file that cannot be read or parsed; schemas of files processed before it
/// are discarded.
pub fn extract_schemas(config: &Config) -> anyhow::Result<SchemaReport> {
    let filepaths = find_geojson_files(&config.source_dir)?;
    log::info!(
        "Found {} GeoJSON files in {:?}",
        filepaths.len(),
        config.source_dir
    );

    let mut schemas = SchemaReport::new();
    let bar = ProgressBar::new(filepaths.len() as u64);
    for filepath in filepaths {
        let file_name = filepath
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Could not get a file name for {:?}", filepath))?
            .to_string();
        let schema = extract_schema(&filepath)?;
        schemas.insert(file_name, schema);
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(schemas)
}

/// Extract all schemas and write the report. Nothing is written if any file fails.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let schemas = extract_schemas(config)?;
    log::info!(
        "Writing property schemas of {} files to {:?}",
        schemas.len(),
        config.output_filepath
    );
    report::write_report(&schemas, &config.output_filepath)?;
    let distinct_keys: BTreeSet<&String> = schemas.values().flatten().collect();
    Ok(RunSummary {
        num_files: schemas.len(),
        num_distinct_keys: distinct_keys.len(),
    })
}
