//! Bake configuration, loadable from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::Error;
use super::types::Result;

/// Number of entries a leaf may hold before it splits.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 24;

/// Growth applied to the tracked extent so boundary vertices stay inside the root.
pub const DEFAULT_EXTENT_MARGIN: f32 = 1.05;

/// Suffix appended to the output stem. The runtime loader opens scenes by this name.
pub const DEFAULT_FILE_SUFFIX: &str = "Octree.txt";

/// Directory baked octrees are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "data/scenes";

/// Configuration for one baker instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Directory the baked file is written into.
    pub output_dir: PathBuf,
    /// Appended to the stem passed to `build`.
    pub file_suffix: String,
    /// Per-axis multiplier applied to the tracked extent.
    pub extent_margin: f32,
    /// Local list length a leaf may reach before splitting.
    pub split_threshold: usize,
    /// Also write a human-readable dump beside the binary file.
    pub write_text_dump: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            extent_margin: DEFAULT_EXTENT_MARGIN,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            write_text_dump: false,
        }
    }
}

impl BakeConfig {
    /// Default configuration writing into `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Full output path for a given stem.
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", stem, self.file_suffix))
    }

    /// Reject values the builder cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.extent_margin.is_finite() || self.extent_margin < 1.0 {
            return Err(Error::Config(format!(
                "extent_margin must be finite and >= 1.0, got {}",
                self.extent_margin
            )));
        }
        if self.split_threshold == 0 {
            return Err(Error::Config("split_threshold must be at least 1".to_string()));
        }
        if self.file_suffix.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "file_suffix must not contain path separators: {:?}",
                self.file_suffix
            )));
        }
        Ok(())
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty-printed JSON.
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = BakeConfig::default();
        assert_eq!(config.split_threshold, 24);
        assert_eq!(config.extent_margin, 1.05);
        assert!(!config.write_text_dump);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path_appends_suffix() {
        let config = BakeConfig::with_output_dir("out");
        assert_eq!(config.output_path("level1"), PathBuf::from("out").join("level1Octree.txt"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("bake.json");

        let mut config = BakeConfig::with_output_dir(temp_dir.path());
        config.split_threshold = 8;
        config.write_text_dump = true;
        config.save_sync(&path).expect("save failed");

        let loaded = BakeConfig::load_sync(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("bake.json");
        std::fs::write(&path, r#"{ "split_threshold": 4 }"#).expect("write failed");

        let loaded = BakeConfig::load_sync(&path).expect("load failed");
        assert_eq!(loaded.split_threshold, 4);
        assert_eq!(loaded.file_suffix, DEFAULT_FILE_SUFFIX);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = BakeConfig::default();
        config.extent_margin = 0.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = BakeConfig::default();
        config.split_threshold = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = BakeConfig::default();
        config.file_suffix = "../escape".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("bake.json");
        std::fs::write(&path, "{ not json").expect("write failed");
        assert!(matches!(BakeConfig::load_sync(&path), Err(Error::Config(_))));
    }
}
