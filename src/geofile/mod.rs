pub mod discovery;
pub mod geojson;
