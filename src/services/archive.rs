//! Zip extraction and repacking for the image archive and `.vmod` modules.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::types::errors::ArchiveError;

/// Extract a zip archive into `dest_path`.
///
/// With `strip_wrapper`, the first path component of every entry is dropped
/// (GitHub archives wrap everything in `<repo>-<branch>/`). Entries with
/// unsafe paths are skipped. Returns the number of files written.
pub fn extract_zip(
    archive_path: &Path,
    dest_path: &Path,
    strip_wrapper: bool,
) -> Result<usize, ArchiveError> {
    let file = fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    fs::create_dir_all(dest_path)?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let entry_path = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                log::warn!("Skipping unsafe archive entry: {}", entry.name());
                continue;
            }
        };

        let relative = if strip_wrapper {
            let stripped: PathBuf = entry_path.components().skip(1).collect();
            if stripped.as_os_str().is_empty() {
                continue;
            }
            stripped
        } else {
            entry_path
        };

        let output_path = dest_path.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
            count += 1;
        }
    }

    log::debug!(
        "Extracted {count} files from {} into {}",
        archive_path.display(),
        dest_path.display()
    );
    Ok(count)
}

/// Write every file under `src_dir` into a new deflated zip at `out_file`.
///
/// Entry names are relative to `src_dir` with `/` separators, in sorted
/// order. Returns the number of files written.
pub fn pack_dir(src_dir: &Path, out_file: &Path) -> Result<usize, ArchiveError> {
    let file = fs::File::create(out_file)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count: usize = 0;
    for entry in WalkDir::new(src_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ArchiveError::Walk {
            path: src_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let Some(name) = entry_name(src_dir, entry.path()) else {
            continue;
        };

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else {
            writer.start_file(name, options)?;
            let mut source = fs::File::open(entry.path())?;
            io::copy(&mut source, &mut writer)?;
            count += 1;
        }
    }

    writer.finish()?;
    log::debug!("Packed {count} files into {}", out_file.display());
    Ok(count)
}

fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
