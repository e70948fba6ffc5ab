/*!
 * PDF writer implementation for codepdf
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::info;

use crate::error::{ResultExt, Result};
use crate::layout::{DrawOp, Page};
use crate::style::{Font, Style};

/// Serializes buffered pages into a PDF file
pub struct PdfWriter {
    /// Page geometry shared by every page
    style: Style,
}

impl PdfWriter {
    /// Create a new PDF writer
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Write `pages` to `output`.
    ///
    /// Returns only once the file has been flushed and synced; any
    /// failure to create, write or finalize the file is returned.
    pub fn write(&self, pages: &[Page], output: &Path) -> Result<()> {
        let mut document = self.build_document(pages)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .sink_context(|| format!("cannot create {}", parent.display()))?;
            }
        }

        let file = File::create(output)
            .sink_context(|| format!("cannot create {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        document
            .save_to(&mut writer)
            .sink_context(|| format!("cannot write {}", output.display()))?;
        writer
            .flush()
            .sink_context(|| format!("cannot flush {}", output.display()))?;
        let file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .sink_context(|| format!("cannot flush {}", output.display()))?;
        file.sync_all()
            .sink_context(|| format!("cannot sync {}", output.display()))?;

        info!(path = %output.display(), pages = pages.len(), "document written");
        Ok(())
    }

    /// Build the in-memory PDF object graph for `pages`
    pub fn build_document(&self, pages: &[Page]) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::all() {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in pages {
            let content = Content {
                operations: self.page_operations(page),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.style.page_width.into(),
                self.style.page_height.into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        Ok(doc)
    }

    /// Content stream operations for one page
    fn page_operations(&self, page: &Page) -> Vec<Operation> {
        let height = self.style.page_height;
        let mut operations = Vec::new();

        for op in page.ops() {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    font,
                    size,
                    color,
                    text,
                } => {
                    let [r, g, b] = color.components();
                    let baseline = height - (y + size * font.ascent());
                    operations.extend([
                        Operation::new("BT", vec![]),
                        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
                        Operation::new("Tf", vec![font.resource_name().into(), (*size).into()]),
                        Operation::new("Td", vec![(*x).into(), baseline.into()]),
                        Operation::new("Tj", vec![Object::string_literal(encode_text(text))]),
                        Operation::new("ET", vec![]),
                    ]);
                }
                DrawOp::Rule {
                    x1,
                    x2,
                    y,
                    width,
                    color,
                } => {
                    let [r, g, b] = color.components();
                    let pdf_y = height - y;
                    operations.extend([
                        Operation::new("RG", vec![r.into(), g.into(), b.into()]),
                        Operation::new("w", vec![(*width).into()]),
                        Operation::new("m", vec![(*x1).into(), pdf_y.into()]),
                        Operation::new("l", vec![(*x2).into(), pdf_y.into()]),
                        Operation::new("S", vec![]),
                    ]);
                }
            }
        }

        operations
    }
}

/// Encode text for the standard fonts' WinAnsi encoding; characters it
/// cannot represent become `?`
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_ascii() {
            bytes.push(c as u8);
            continue;
        }
        let (encoded, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if unmappable {
            bytes.push(b'?');
        } else {
            bytes.extend_from_slice(&encoded);
        }
    }
    bytes
}
