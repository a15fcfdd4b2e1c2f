//! VASSAL module (`.vmod`) handling: unpack, parse, repack.

pub mod build_file;

pub use build_file::{is_excluded, load_module_cards, parse_build_file};

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::services::archive;
use crate::services::matcher::ModuleCard;
use crate::types::errors::ModuleError;

/// An extracted working copy of a module. Removed on drop.
pub struct ModuleWorkspace {
    dir: TempDir,
    source: PathBuf,
}

impl ModuleWorkspace {
    pub fn extract(vmod: &Path) -> Result<Self, ModuleError> {
        if !vmod.is_file() {
            return Err(ModuleError::Missing(vmod.to_path_buf()));
        }
        let prefix = vmod
            .file_name()
            .map(|n| format!("{}.dir", n.to_string_lossy()))
            .unwrap_or_else(|| "module.dir".to_string());
        let dir = tempfile::Builder::new().prefix(&prefix).tempdir()?;

        let count = archive::extract_zip(vmod, dir.path(), false)?;
        log::info!(
            "Extracted {} ({count} files) into {}",
            vmod.display(),
            dir.path().display()
        );

        Ok(Self {
            dir,
            source: vmod.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn cards(&self) -> Result<Vec<ModuleCard>, ModuleError> {
        load_module_cards(self.path())
    }

    /// Zip the working copy into `out_file`.
    ///
    /// Written beside the destination first and renamed into place, so a
    /// failed repack never leaves a truncated module behind.
    pub fn repack(&self, out_file: &Path) -> Result<usize, ModuleError> {
        let staging = staging_path(out_file);
        let count = match archive::pack_dir(self.path(), &staging) {
            Ok(count) => count,
            Err(e) => {
                let _ = fs::remove_file(&staging);
                return Err(e.into());
            }
        };
        if let Err(e) = fs::rename(&staging, out_file) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        log::info!("Wrote {count} files to {}", out_file.display());
        Ok(count)
    }
}

fn staging_path(out_file: &Path) -> PathBuf {
    let name = out_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "module.vmod".to_string());
    out_file.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod tests;
