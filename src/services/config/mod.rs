pub mod models;

pub use models::*;

use crate::services::matcher::OverrideTable;
use crate::types::errors::ConfigError;
use std::path::Path;

/// Load the override table from a JSON file.
pub fn load_overrides(path: &Path) -> Result<OverrideTable, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_overrides(&json)?;
    log::info!(
        "Loaded {} overrides from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse override JSON.
///
/// All of `ship`, `upgrade_type` and `name` must be present as objects, even
/// if empty. Keys are normalized; values are kept verbatim.
pub fn parse_overrides(json: &str) -> Result<OverrideTable, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    for category in REQUIRED_CATEGORIES {
        match value.get(category) {
            None | Some(serde_json::Value::Null) => {
                return Err(ConfigError::MissingCategory(category.to_string()))
            }
            Some(serde_json::Value::Object(_)) => {}
            Some(_) => return Err(ConfigError::InvalidCategory(category.to_string())),
        }
    }

    let file: OverrideFile = serde_json::from_value(value)?;
    Ok(OverrideTable::new(file.ship, file.upgrade_type, file.name)
        .with_variant_ships(file.variant_ships))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
