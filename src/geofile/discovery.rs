use anyhow::{anyhow, Context};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const GEOJSON_EXTENSION: &str = ".geojson";

/// List the GeoJSON files directly inside `source_dir`. Subdirectories are not descended into.
///
/// Symlinks are followed. A matching entry whose metadata cannot be read, e.g. a dangling
/// symlink, is an error rather than being left out of the listing.
///
/// The returned paths are in directory listing order, which is unspecified.
pub fn find_geojson_files(source_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(anyhow!(
            "Source directory {:?} does not exist or is not a directory",
            source_dir
        ));
    }
    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("Listing source directory {:?}", source_dir))?;

    let mut filepaths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Listing source directory {:?}", source_dir))?;
        let path = entry.path();
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            log::warn!("Skipping {:?}, file name is not valid UTF-8", path);
            continue;
        };
        if !file_name.ends_with(GEOJSON_EXTENSION) {
            continue;
        }
        let metadata =
            fs::metadata(&path).with_context(|| format!("Reading metadata of {:?}", path))?;
        if metadata.is_dir() {
            log::debug!("Skipping directory {:?}", path);
            continue;
        }
        filepaths.push(path);
    }
    Ok(filepaths)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, fs, path::PathBuf};

    use rstest::rstest;
    use testdir::testdir;

    use super::find_geojson_files;

    fn file_names(filepaths: Vec<PathBuf>) -> HashSet<String> {
        filepaths
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
            .collect()
    }

    #[rstest]
    fn test_find_geojson_files_filters_by_extension() {
        let test_dir = testdir!();
        let contents = r#"{"features": [{"properties": {"name": "X"}}]}"#;
        for name in [
            "roads.geojson",
            "schools.geojson",
            "roads.json",
            "notes.txt",
            "roads.geojson.bak",
            "ROADS.GEOJSON",
        ] {
            fs::write(test_dir.join(name), contents).unwrap();
        }

        let found = file_names(find_geojson_files(&test_dir).unwrap());
        assert_eq!(
            found,
            HashSet::from(["roads.geojson".to_string(), "schools.geojson".to_string()])
        );
    }

    #[rstest]
    fn test_find_geojson_files_skips_subdirectories() {
        let test_dir = testdir!();
        fs::create_dir(test_dir.join("nested.geojson")).unwrap();
        fs::create_dir(test_dir.join("nested")).unwrap();
        fs::write(test_dir.join("nested").join("inner.geojson"), "{}").unwrap();
        fs::write(test_dir.join("top.geojson"), "{}").unwrap();

        let found = file_names(find_geojson_files(&test_dir).unwrap());
        assert_eq!(found, HashSet::from(["top.geojson".to_string()]));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_find_geojson_files_follows_symlinks() {
        let test_dir = testdir!();
        let target_dir = test_dir.join("target");
        fs::create_dir(&target_dir).unwrap();
        fs::write(target_dir.join("real.json"), r#"{"features": []}"#).unwrap();
        let source_dir = test_dir.join("source");
        fs::create_dir(&source_dir).unwrap();
        std::os::unix::fs::symlink(target_dir.join("real.json"), source_dir.join("link.geojson"))
            .unwrap();
        std::os::unix::fs::symlink(&target_dir, source_dir.join("dir_link.geojson")).unwrap();

        let found = file_names(find_geojson_files(&source_dir).unwrap());
        assert_eq!(found, HashSet::from(["link.geojson".to_string()]));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_find_geojson_files_dangling_symlink_is_an_error() {
        let test_dir = testdir!();
        fs::write(test_dir.join("good.geojson"), r#"{"features": []}"#).unwrap();
        std::os::unix::fs::symlink(test_dir.join("missing.json"), test_dir.join("broken.geojson"))
            .unwrap();

        let err = find_geojson_files(&test_dir).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.geojson"));
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<std::io::Error>().is_some()));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_find_geojson_files_skips_non_utf8_names() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let test_dir = testdir!();
        let non_utf8_name = OsStr::from_bytes(b"bad\xff.geojson");
        fs::write(test_dir.join(non_utf8_name), r#"{"features": []}"#).unwrap();
        fs::write(test_dir.join("good.geojson"), r#"{"features": []}"#).unwrap();

        let found = find_geojson_files(&test_dir).unwrap();
        assert_eq!(found, vec![test_dir.join("good.geojson")]);
    }

    #[rstest]
    fn test_find_geojson_files_empty_directory() {
        let test_dir = testdir!();
        assert!(find_geojson_files(&test_dir).unwrap().is_empty());
    }

    #[rstest]
    fn test_find_geojson_files_missing_directory() {
        let test_dir = testdir!();
        let missing_dir = test_dir.join("does_not_exist");
        let err = find_geojson_files(&missing_dir).unwrap_err();
        assert!(err.to_string().contains("does_not_exist"));
    }

    #[rstest]
    fn test_find_geojson_files_source_is_a_file() {
        let test_dir = testdir!();
        let filepath = test_dir.join("single.geojson");
        fs::write(&filepath, "{}").unwrap();
        assert!(find_geojson_files(&filepath).is_err());
    }
}
