//! Text recognition with the `tesseract` command-line engine.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::model::RasterImage;

use super::raster::spawn_failure;
use super::OcrEngine;

/// Runs `tesseract stdin stdout -l <lang>`, piping the image bytes in.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    /// Create an engine that invokes `binary`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Check whether the binary can be spawned.
    pub fn is_available(&self) -> bool {
        let available = Command::new(&self.binary).arg("--version").output().is_ok();
        if !available {
            log::debug!(
                "{} not found - install tesseract-ocr for OCR support",
                self.binary.display()
            );
        }
        available
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &RasterImage, language: &str) -> Result<String> {
        let page = image.page;
        let ocr_error = |reason: String| Error::Ocr { page, reason };

        let mut child = Command::new(&self.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ocr_error(spawn_failure(&self.binary, &e)))?;

        // A broken pipe here usually means tesseract already exited; its
        // status and stderr below carry the real reason.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&image.data),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| ocr_error(format!("failed to collect output: {}", e)))?;

        if let Err(e) = write_result {
            if output.status.success() {
                return Err(ocr_error(format!("failed to send image: {}", e)));
            }
            log::debug!("Page {}: writing image to {} failed: {}", page, self.binary.display(), e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ocr_error(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        log::debug!(
            "Recognized {} chars on page {} (lang={})",
            text.chars().count(),
            page,
            language
        );
        Ok(text)
    }
}
