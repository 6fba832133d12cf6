use anyhow::Context;
use serde::{de::IgnoredAny, Deserialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::schema::Schema;

/// The part of a feature collection that carries property keys. Other members are ignored.
#[derive(Deserialize, Debug)]
struct FeatureCollectionKeys {
    features: Option<Vec<FeatureKeys>>,
}

#[derive(Deserialize, Debug)]
struct FeatureKeys {
    properties: Option<BTreeMap<String, IgnoredAny>>,
}

/// Collect the property keys used by any feature of the GeoJSON feature collection in `filepath`.
pub fn extract_schema(filepath: &Path) -> anyhow::Result<Schema> {
    let file = File::open(filepath)
        .with_context(|| format!("Opening GeoJSON file {:?}", filepath))?;
    let schema = extract_schema_from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing GeoJSON file {:?}", filepath))?;
    log::debug!(
        "Found {} distinct property keys in {:?}",
        schema.len(),
        filepath
    );
    Ok(schema)
}

/// Like `extract_schema`, reading the feature collection from any reader.
///
/// The document must be a JSON object; "features", when present and not null, must be an array
/// of objects, and each feature's "properties", when present and not null, must be an object. A
/// missing "features" member is an empty collection and a missing "properties" member is an
/// empty mapping. The "type" member, geometries and property values are skipped unread.
///
/// Nesting depth is not limited.
pub fn extract_schema_from_reader<R: Read>(reader: R) -> anyhow::Result<Schema> {
    let mut json_deserializer = serde_json::Deserializer::from_reader(reader);
    json_deserializer.disable_recursion_limit();
    let collection = FeatureCollectionKeys::deserialize(serde_stacker::Deserializer::new(
        &mut json_deserializer,
    ))?;
    json_deserializer.end()?;

    let mut schema = Schema::new();
    for feature in collection.features.unwrap_or_default() {
        let properties = feature.properties.unwrap_or_default();
        schema.extend(properties.into_keys());
    }
    Ok(schema)
}
