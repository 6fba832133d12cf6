use anyhow::Context;
use std::{fs, path::Path};

use super::SchemaReport;

pub const REPORT_TITLE: &str = "GeoJSON Property Schemas";
const NO_PROPERTIES_PLACEHOLDER: &str = "_No properties found._";

/// Render the report as Markdown: one section per file, one bullet per property key.
pub fn render_report(schemas: &SchemaReport) -> String {
    let mut report = format!("# {REPORT_TITLE}\n\n");
    for (file_name, schema) in schemas {
        report.push_str(&format!("## {file_name}\n\n"));
        if schema.is_empty() {
            report.push_str(NO_PROPERTIES_PLACEHOLDER);
            report.push('\n');
        }
        for key in schema {
            report.push_str(&format!("- `{key}`\n"));
        }
        report.push('\n');
    }
    report
}

/// Write the rendered report to `output_filepath`, replacing any existing file.
pub fn write_report(schemas: &SchemaReport, output_filepath: &Path) -> anyhow::Result<()> {
    fs::write(output_filepath, render_report(schemas))
        .with_context(|| format!("Writing report to {:?}", output_filepath))
}
