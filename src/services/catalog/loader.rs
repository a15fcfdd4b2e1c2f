//! Loads the canonical image catalog from an on-disk image database.
//!
//! Expected layout under `<image_db>/images/`:
//! - `pilots/<faction>/<ship>/<name>.{png,jpg}`
//! - `upgrades/<category>/<name>.{png,jpg}`

use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::services::matcher::CanonicalCard;
use crate::types::errors::CatalogError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Walk the image database and return every recognised card image.
///
/// Entries are visited in file-name order, which fixes catalog order and so
/// the matcher's tie-break.
pub fn load_card_images(image_db: &Path) -> Result<Vec<CanonicalCard>, CatalogError> {
    let images_root = image_db.join("images");
    if !images_root.is_dir() {
        return Err(CatalogError::Missing(images_root));
    }

    let mut cards = Vec::new();
    for entry in WalkDir::new(&images_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_image_extension(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(image_db) else {
            continue;
        };
        match card_from_relative(relative) {
            Some(card) => cards.push(card),
            None => log::debug!("Skipping unrecognised image path: {}", relative.display()),
        }
    }

    log::info!(
        "Loaded {} card images from {}",
        cards.len(),
        image_db.display()
    );
    Ok(cards)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Build a card from a path relative to the image database root
/// (`images/...`).
pub(crate) fn card_from_relative(relative: &Path) -> Option<CanonicalCard> {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    let image_path = parts.join("/");
    let name = relative.file_stem()?.to_string_lossy().to_string();

    match parts.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["images", "pilots", faction, ship, _file] => {
            Some(CanonicalCard::pilot(faction, ship, &name, &image_path))
        }
        ["images", "upgrades", category, _file] => {
            Some(CanonicalCard::upgrade(category, &name, &image_path))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
