use std::path::PathBuf;
use thiserror::Error;

/// Problems with the override file. Always fatal: matching never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read override file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid override JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Override file is missing required category '{0}'")]
    MissingCategory(String),
    #[error("Override category '{0}' must be an object of name -> name")]
    InvalidCategory(String),
}

/// Per-card resolution failure. Reported and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Unrecognised faction '{label}'")]
    UnknownFaction { label: String },
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid or corrupt ZIP: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Image database not found: {0}")]
    Missing(PathBuf),
    #[error("Failed to walk image database: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module not found: {0}")]
    Missing(PathBuf),
    #[error("Module has no buildFile: {0}")]
    MissingBuildFile(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error("Malformed buildFile at byte {position}: {message}")]
    Xml { position: u64, message: String },
}

/// Copying an accepted image into the module failed. Reported per card.
#[derive(Debug, Error)]
#[error("Failed to copy {source_path} -> {target_path}: {cause}")]
pub struct ApplyError {
    pub source_path: String,
    pub target_path: String,
    #[source]
    pub cause: std::io::Error,
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
