//! Writing icon files to disk.
//!
//! Each size is rendered, encoded and written on its own. A failure for one
//! size is recorded in its [`FileOutcome`] and the remaining sizes are still
//! attempted.

use std::path::{Path, PathBuf};

use crate::error::{Error, RenderWarning};
use crate::icon::IconSize;
use crate::renderer::IconRenderer;

/// The result of generating one icon file.
#[derive(Debug)]
pub struct FileOutcome {
    pub size: IconSize,
    pub path: PathBuf,
    /// Bytes written on success.
    pub result: Result<u64, Error>,
    /// Steps skipped while rendering; present even when writing failed.
    pub warnings: Vec<RenderWarning>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes for every requested size, in request order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<FileOutcome>,
}

impl GenerationReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// Paths of the files that were written.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|o| o.is_ok())
            .map(|o| o.path.as_path())
    }
}

/// Renders `size` and writes it to `out_dir/icon{size}.png`.
pub fn write_icon(renderer: &IconRenderer, size: IconSize, out_dir: &Path) -> FileOutcome {
    let path = out_dir.join(size.file_name());
    let icon = renderer.render(size);

    let result = icon.encode_png().and_then(|bytes| {
        std::fs::write(&path, &bytes).map_err(|e| Error::io(&path, e))?;
        Ok(bytes.len() as u64)
    });

    match &result {
        Ok(len) => log::info!("wrote {} ({len} bytes)", path.display()),
        Err(err) => log::error!("failed to write {}: {err}", path.display()),
    }

    FileOutcome {
        size,
        path,
        result,
        warnings: icon.warnings,
    }
}

/// Writes one file per size into `out_dir`, which must already exist.
pub fn generate_icons(
    renderer: &IconRenderer,
    sizes: &[IconSize],
    out_dir: &Path,
) -> GenerationReport {
    let outcomes = sizes
        .iter()
        .map(|&size| write_icon(renderer, size, out_dir))
        .collect();
    GenerationReport { outcomes }
}
