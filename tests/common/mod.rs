use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

static INIT: Once = Once::new();

pub struct Fixture {
    pub root: TempDir,
}

/// A scratch directory holding an image database, an override file and a
/// module, laid out the way a real run finds them.
pub fn init_fixture() -> Fixture {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    Fixture {
        root: TempDir::new().expect("Failed to create fixture dir"),
    }
}

impl Fixture {
    pub fn image_db(&self) -> PathBuf {
        self.root.path().join("image-db")
    }

    /// Write a catalog image at `images/<relative>` whose bytes are its own
    /// path, so copies can be traced.
    pub fn add_image(&self, relative: &str) {
        let path = self.image_db().join("images").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, relative.as_bytes()).unwrap();
    }

    pub fn write_overrides(&self, json: &str) -> PathBuf {
        let path = self.root.path().join("overrides.json");
        fs::write(&path, json).unwrap();
        path
    }

    /// Zip a module from a buildFile body and `(name, bytes)` images.
    pub fn write_module(&self, name: &str, build_file: &str, images: &[(&str, &str)]) -> PathBuf {
        let path = self.root.path().join(name);
        let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        zip.start_file("buildFile", options).unwrap();
        zip.write_all(build_file.as_bytes()).unwrap();
        zip.start_file("moduledata", options).unwrap();
        zip.write_all(b"<data><version>6.0</version></data>").unwrap();
        for (image, bytes) in images {
            zip.start_file(format!("images/{image}"), options).unwrap();
            zip.write_all(bytes.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        path
    }
}

/// Read one entry of a zip as text.
pub fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(fs::File::open(archive).unwrap()).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut text = String::new();
    std::io::Read::read_to_string(&mut entry, &mut text).unwrap();
    text
}

/// Pilot piece slot with its image at field 12.
pub fn pilot_slot(name: &str, image: &str) -> String {
    format!(
        r#"<VASSAL.build.widget.PieceSlot entryName="{name}" gpid="1">+/null/prototype;Pilot Card;;;;;;;;;;;{image};piece;0;0</VASSAL.build.widget.PieceSlot>"#
    )
}

/// Upgrade piece slot with its image at field 16.
pub fn upgrade_slot(name: &str, image: &str) -> String {
    format!(
        r#"<VASSAL.build.widget.PieceSlot entryName="{name}" gpid="2">+/null/prototype;Upgrades;;;;;;;;;;;;;;;{image};piece;0;0</VASSAL.build.widget.PieceSlot>"#
    )
}

pub fn list(name: &str, children: &str) -> String {
    format!(
        r#"<VASSAL.build.widget.ListWidget entryName="{name}">{children}</VASSAL.build.widget.ListWidget>"#
    )
}

pub fn build_file(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<VASSAL.build.GameModule name="Star Wars X-Wing Miniatures Game" version="6.0">
  <VASSAL.build.module.PieceWindow name="Game Piece Palette">{body}</VASSAL.build.module.PieceWindow>
</VASSAL.build.GameModule>"#
    )
}
