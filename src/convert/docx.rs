//! DOCX paragraph text extraction using `zip` and `quick-xml`.
//!
//! Only body-level paragraphs of `word/document.xml` are read; paragraphs
//! inside tables, text boxes, headers, and footers are skipped. Within a run, `w:t`
//! contributes its text, `w:tab` a tab, and `w:br`/`w:cr` a newline.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{DocumentKind, ExtractionResult, Fragment};
use crate::options::ExtractOptions;

use super::DocumentExtractor;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads `.docx` files paragraph by paragraph.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor {
    _private: (),
}

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentExtractor for DocxExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, path: &Path, _options: &ExtractOptions) -> Result<ExtractionResult> {
        let fragment = match fs::read(path)
            .map_err(Error::from)
            .and_then(|bytes| read_paragraphs(&bytes))
        {
            Ok(paragraphs) => Fragment::text_layer(None, paragraphs.join("\n")),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                let reason = match &e {
                    Error::Docx(reason) => reason.clone(),
                    other => other.to_string(),
                };
                Fragment::error(None, format!("Error reading DOCX file: {}", reason))
            }
        };
        Ok(ExtractionResult::single(DocumentKind::Docx, fragment))
    }
}

/// Read the body paragraphs of a DOCX package.
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(Error::Docx(format!("package has no {}", DOCUMENT_PART)));
        }
        Err(e) => return Err(e.into()),
    }
    parse_document_xml(&xml)
}

/// Collect body paragraph texts from `document.xml` content.
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut textbox_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;

        // Text box content nests whole paragraphs inside a run of the host paragraph.
        if textbox_depth > 0 {
            match &event {
                Event::Start(e) if e.local_name().as_ref() == b"txbxContent" => textbox_depth += 1,
                Event::End(e) if e.local_name().as_ref() == b"txbxContent" => textbox_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"txbxContent" => textbox_depth += 1,
                b"p" if table_depth == 0 => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" if in_run => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                b"tab" if in_run => push_to(&mut current, "\t"),
                b"br" | b"cr" if in_run => push_to(&mut current, "\n"),
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.unescape()?;
                push_to(&mut current, &text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" if table_depth == 0 => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_to(paragraph: &mut Option<String>, text: &str) {
    if let Some(p) = paragraph.as_mut() {
        p.push_str(text);
    }
}
