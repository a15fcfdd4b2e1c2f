use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::services::matcher::overrides::DEFAULT_VARIANT_SHIPS;

/// Top-level categories every override file must define.
pub const REQUIRED_CATEGORIES: &[&str] = &["ship", "upgrade_type", "name"];

/// On-disk shape of `overrides.json`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OverrideFile {
    pub ship: BTreeMap<String, String>,
    pub upgrade_type: BTreeMap<String, String>,
    pub name: BTreeMap<String, String>,
    #[serde(default = "default_variant_ships")]
    pub variant_ships: Vec<String>,
}

fn default_variant_ships() -> Vec<String> {
    DEFAULT_VARIANT_SHIPS.iter().map(|s| s.to_string()).collect()
}

/// Where the canonical image archive comes from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// GitHub `owner/name`.
    pub repo: String,
    pub branch: String,
}

impl Default for ImageSource {
    fn default() -> Self {
        Self {
            repo: "ajmath/xwing-card-images".into(),
            branch: "master".into(),
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub module_path: PathBuf,
    pub image_db: PathBuf,
    pub overrides_path: PathBuf,
    /// Defaults to `<stem>.imagefix.vmod` beside the module.
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub offline: bool,
    pub assume_yes: bool,
    pub source: ImageSource,
}

impl RunConfig {
    pub fn new(module_path: PathBuf) -> Self {
        Self {
            module_path,
            image_db: PathBuf::from("image-db"),
            overrides_path: PathBuf::from("overrides.json"),
            output: None,
            report_path: None,
            offline: false,
            assume_yes: false,
            source: ImageSource::default(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let stem = self
                    .module_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "module".to_string());
                self.module_path
                    .with_file_name(format!("{stem}.imagefix.vmod"))
            }
        }
    }
}
