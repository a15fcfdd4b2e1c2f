//! Canonical image archive: remote sync and on-disk catalog loading.

pub mod fetch;
pub mod loader;

pub use fetch::{local_sha, sync_image_db};
pub use loader::load_card_images;
