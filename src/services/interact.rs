//! Side-effecting collaborators: asking a human and copying image bytes.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Component, Path, PathBuf};

/// Asks a yes/no question. One prompt is pending at a time.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Line-oriented confirmer: prints the prompt and reads one answer line.
///
/// Only `y` / `yes` (any case) count as acceptance; EOF or a read error
/// counts as a refusal.
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirmer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if let Err(e) = writeln!(self.output, "{prompt}\nAccept ? (y/n)") {
            log::warn!("Failed to write prompt: {e}");
        }
        if let Err(e) = self.output.flush() {
            log::warn!("Failed to flush prompt: {e}");
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Failed to read answer: {e}");
                false
            }
        }
    }
}

/// Accepts everything without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> bool {
        log::info!("Auto-accepting: {prompt}");
        true
    }
}

/// Copies a catalog image over a module image.
pub trait ImageCopier {
    /// `source` is relative to the image database, `target` relative to the
    /// module's `images/` folder.
    fn copy(&self, source: &str, target: &str) -> io::Result<()>;
}

/// Filesystem copier between an image database and an extracted module.
#[derive(Debug, Clone)]
pub struct FsImageCopier {
    image_db: PathBuf,
    module_dir: PathBuf,
}

impl FsImageCopier {
    pub fn new(image_db: &Path, module_dir: &Path) -> Self {
        Self {
            image_db: image_db.to_path_buf(),
            module_dir: module_dir.to_path_buf(),
        }
    }

    pub fn target_path(&self, target: &str) -> PathBuf {
        self.module_dir.join("images").join(target)
    }
}

impl ImageCopier for FsImageCopier {
    fn copy(&self, source: &str, target: &str) -> io::Result<()> {
        if !is_enclosed(target) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("target '{target}' escapes the module images folder"),
            ));
        }
        let from = self.image_db.join(source);
        let to = self.target_path(target);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&from, &to)?;
        log::debug!("Copied {} -> {}", from.display(), to.display());
        Ok(())
    }
}

/// Whether `target` stays inside the folder it is joined onto: relative,
/// non-empty, and made only of plain names.
fn is_enclosed(target: &str) -> bool {
    let path = Path::new(target);
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
#[path = "tests/interact_tests.rs"]
mod tests;
