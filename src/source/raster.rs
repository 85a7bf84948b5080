//! Single-page rasterization with poppler's `pdftoppm`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::model::{ImageFormat, RasterImage};

use super::Rasterizer;

/// Scratch directory for rendered pages.
///
/// Removed when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct RasterWorkspace {
    dir: TempDir,
}

impl RasterWorkspace {
    /// Create a fresh scratch directory under the system temp dir.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("docsift-").tempdir()?;
        log::trace!("Created raster workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Output prefix for a page; pdftoppm appends the extension.
    fn page_prefix(&self, page: u32) -> PathBuf {
        self.dir.path().join(format!("page-{}", page))
    }
}

/// Renders pages by invoking `pdftoppm -f N -l N -singlefile`.
#[derive(Debug)]
pub struct PdftoppmRasterizer {
    binary: PathBuf,
    dpi: u32,
    format: ImageFormat,
    workspace: RasterWorkspace,
}

impl PdftoppmRasterizer {
    /// Create a rasterizer with its own scratch workspace.
    pub fn new(binary: impl Into<PathBuf>, dpi: u32, format: ImageFormat) -> Result<Self> {
        Ok(Self {
            binary: binary.into(),
            dpi,
            format,
            workspace: RasterWorkspace::new()?,
        })
    }

    /// Output format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Scratch workspace.
    pub fn workspace(&self) -> &RasterWorkspace {
        &self.workspace
    }

    /// Check whether the binary can be spawned.
    pub fn is_available(&self) -> bool {
        let available = Command::new(&self.binary).arg("-v").output().is_ok();
        if !available {
            log::debug!(
                "{} not found - install poppler-utils for rasterization",
                self.binary.display()
            );
        }
        available
    }

    fn format_flag(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "-png",
            ImageFormat::Jpeg => "-jpeg",
        }
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, file: &Path, page: u32) -> Result<RasterImage> {
        let raster_error = |reason: String| Error::Raster { page, reason };
        let prefix = self.workspace.page_prefix(page);
        let page_arg = page.to_string();

        let output = Command::new(&self.binary)
            .arg("-f")
            .arg(&page_arg)
            .arg("-l")
            .arg(&page_arg)
            .arg("-singlefile")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(self.format_flag())
            .arg(file)
            .arg(&prefix)
            .output()
            .map_err(|e| raster_error(spawn_failure(&self.binary, &e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(raster_error(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let image_path = prefix.with_extension(self.format.extension());
        let data = fs::read(&image_path).map_err(|e| {
            raster_error(format!(
                "no image produced at {}: {}",
                image_path.display(),
                e
            ))
        })?;
        if let Err(e) = fs::remove_file(&image_path) {
            log::trace!("Could not remove {}: {}", image_path.display(), e);
        }

        log::debug!("Rasterized page {} ({} bytes, {})", page, data.len(), self.format);
        Ok(RasterImage::new(page, self.format, data))
    }
}

pub(super) fn spawn_failure(binary: &Path, err: &io::Error) -> String {
    if err.kind() == io::ErrorKind::NotFound {
        format!("{} not found on PATH", binary.display())
    } else {
        format!("failed to run {}: {}", binary.display(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_is_removed_on_drop() {
        let workspace = RasterWorkspace::new().unwrap();
        let path = workspace.path().to_path_buf();
        assert!(path.is_dir());
        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_page_prefix() {
        let workspace = RasterWorkspace::new().unwrap();
        let prefix = workspace.page_prefix(7);
        assert_eq!(prefix.file_name().unwrap(), "page-7");
        assert_eq!(
            prefix.with_extension(ImageFormat::Jpeg.extension()).file_name().unwrap(),
            "page-7.jpg"
        );
    }

    #[test]
    fn test_missing_binary_is_raster_error() {
        let rasterizer =
            PdftoppmRasterizer::new("docsift-no-such-pdftoppm", 72, ImageFormat::Png).unwrap();
        assert!(!rasterizer.is_available());

        let err = rasterizer
            .rasterize(Path::new("whatever.pdf"), 2)
            .unwrap_err();
        match err {
            Error::Raster { page, reason } => {
                assert_eq!(page, 2);
                assert!(reason.contains("not found"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
