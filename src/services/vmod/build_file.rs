//! Parses a VASSAL `buildFile` into flat module card records.
//!
//! Each `VASSAL.build.widget.PieceSlot` carries a `;`-separated piece
//! definition. Pilot pieces sit under `<faction>/<ship>` list widgets,
//! upgrade pieces under `<category>`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use crate::services::matcher::{normalize_name, ModuleCard};
use crate::types::errors::ModuleError;

pub const BUILD_FILE: &str = "buildFile";

const PIECE_SLOT: &[u8] = b"VASSAL.build.widget.PieceSlot";
const ENTRY_NAME: &[u8] = b"entryName";
const CARD_IMAGES_FOLDER: &str = "Images for Cards";
const PILOT_MARKER: &str = "Pilot Card";
const UPGRADE_MARKER: &str = "Upgrades";
const PILOT_IMAGE_FIELD: usize = 12;
const UPGRADE_IMAGE_FIELD: usize = 16;

/// Card backs never have a canonical image of their own.
const EXCLUDED_NAMES: &[&str] = &[
    "firstorderback",
    "resistanceback",
    "back",
    "imperialback",
    "rebelback",
    "scumback",
];

/// Whether a module card should be left alone (card backs, crippled sides).
pub fn is_excluded(name: &str) -> bool {
    let key = normalize_name(name);
    EXCLUDED_NAMES.contains(&key.as_str()) || key.ends_with("crippled")
}

/// Read `<module_dir>/buildFile` and parse it.
pub fn load_module_cards(module_dir: &Path) -> Result<Vec<ModuleCard>, ModuleError> {
    let path = module_dir.join(BUILD_FILE);
    if !path.is_file() {
        return Err(ModuleError::MissingBuildFile(path));
    }
    let xml = fs::read_to_string(&path)?;
    let cards = parse_build_file(&xml)?;
    log::info!("Found {} card slots in {}", cards.len(), path.display());
    Ok(cards)
}

/// A piece slot whose closing tag has not been seen yet.
struct OpenPiece {
    name: String,
    parent: Option<String>,
    grandparent: Option<String>,
    definition: String,
}

impl OpenPiece {
    fn into_card(self) -> Option<ModuleCard> {
        if self.parent.as_deref() == Some(CARD_IMAGES_FOLDER) {
            return None;
        }

        if self.definition.contains(PILOT_MARKER) {
            let (Some(faction), Some(ship)) = (&self.grandparent, &self.parent) else {
                log::warn!("Pilot '{}' is not nested under faction/ship", self.name);
                return None;
            };
            let target = self.image_field(PILOT_IMAGE_FIELD)?;
            Some(ModuleCard::pilot(faction, ship, &self.name, &target))
        } else if self.definition.contains(UPGRADE_MARKER) {
            let Some(category) = &self.parent else {
                log::warn!("Upgrade '{}' is not nested under a category", self.name);
                return None;
            };
            let target = self.image_field(UPGRADE_IMAGE_FIELD)?;
            Some(ModuleCard::upgrade(category, &self.name, &target))
        } else {
            None
        }
    }

    fn image_field(&self, index: usize) -> Option<String> {
        let field = self
            .definition
            .split(';')
            .nth(index)
            .map(str::trim)
            .filter(|field| !field.is_empty());
        if field.is_none() {
            log::warn!("Piece '{}' has no image at field {index}", self.name);
        }
        field.map(str::to_string)
    }
}

/// Parse buildFile XML into module cards, in document order.
pub fn parse_build_file(xml: &str) -> Result<Vec<ModuleCard>, ModuleError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    // entryName of every open element, outermost first
    let mut ancestors: Vec<Option<String>> = Vec::new();
    let mut piece: Option<OpenPiece> = None;
    let mut cards = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let entry_name = entry_name(e);
                if e.name().as_ref() == PIECE_SLOT {
                    piece = Some(OpenPiece {
                        name: entry_name.clone().unwrap_or_default(),
                        parent: ancestors.last().cloned().flatten(),
                        grandparent: ancestors.iter().rev().nth(1).cloned().flatten(),
                        definition: String::new(),
                    });
                }
                ancestors.push(entry_name);
            }
            Ok(Event::Text(ref e)) => {
                if let Some(open) = piece.as_mut() {
                    open.definition
                        .push_str(&unescape_xml(&String::from_utf8_lossy(e)));
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(open) = piece.as_mut() {
                    open.definition.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(open) = piece.as_mut() {
                    open.definition
                        .push_str(&resolve_entity(&String::from_utf8_lossy(e)));
                }
            }
            Ok(Event::End(ref e)) => {
                ancestors.pop();
                if e.name().as_ref() == PIECE_SLOT {
                    if let Some(card) = piece.take().and_then(OpenPiece::into_card) {
                        cards.push(card);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ModuleError::Xml {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(cards)
}

fn entry_name(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == ENTRY_NAME)
        .map(|attr| unescape_xml(&String::from_utf8_lossy(&attr.value)))
}

/// Unescape the 5 predefined XML entities and numeric character references.
fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find(';') {
            Some(end) => {
                out.push_str(&resolve_entity(&after[..end]));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve an entity name (without `&` and `;`).
fn resolve_entity(name: &str) -> String {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    };
    match decoded {
        Some(c) => c.to_string(),
        None => format!("&{name};"),
    }
}

#[cfg(test)]
#[path = "tests/build_file_tests.rs"]
mod tests;
