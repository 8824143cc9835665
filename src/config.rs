use crate::error::{DatasetError, Result};
use crate::layout::FeatureLayout;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASETS_ROOT: &str = "./datasets";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    pub root: PathBuf,         // Directory holding one sub-directory per dataset
    pub layout: FeatureLayout, // How features are laid out for the conv2d model
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            root: PathBuf::from(DEFAULT_DATASETS_ROOT),
            layout: FeatureLayout::default(),
        }
    }
}

impl LoaderConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        LoaderConfig {
            root: root.into(),
            ..LoaderConfig::default()
        }
    }

    /// Save the config as pretty JSON
    pub fn to_json_file(&self, filepath: impl AsRef<Path>) -> Result<()> {
        let filepath = filepath.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(filepath).map_err(|source| io_error(filepath, source))?;
        file.write_all(json.as_bytes())
            .map_err(|source| io_error(filepath, source))?;
        Ok(())
    }

    /// Load a config from a JSON file. Missing fields take their default value.
    pub fn from_json_file(filepath: impl AsRef<Path>) -> Result<Self> {
        let filepath = filepath.as_ref();
        let mut file = File::open(filepath).map_err(|source| io_error(filepath, source))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| io_error(filepath, source))?;
        let config: LoaderConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> DatasetError {
    DatasetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loader.json");
        let config = LoaderConfig {
            root: PathBuf::from("/data/ucr"),
            layout: FeatureLayout::Reinterpret,
        };
        config.to_json_file(&path).unwrap();
        assert_eq!(LoaderConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loader.json");
        std::fs::write(&path, r#"{ "root": "somewhere" }"#).unwrap();
        let config = LoaderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.root, PathBuf::from("somewhere"));
        assert_eq!(config.layout, FeatureLayout::SwapAxes);

        std::fs::write(&path, r#"{ "layout": "reinterpret" }"#).unwrap();
        let config = LoaderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.root, PathBuf::from(DEFAULT_DATASETS_ROOT));
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loader.json");
        std::fs::write(&path, "{ root: ").unwrap();
        assert!(matches!(
            LoaderConfig::from_json_file(&path),
            Err(DatasetError::Config(_))
        ));
    }
}
