//! Concrete [`PageRenderer`] backed by the pdfium engine.
//!
//! Documents are kept as raw bytes and reopened per operation; pdfium parses
//! lazily, and reopening sidesteps the self-referential borrow between the
//! library handle and a loaded document.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use log::debug;
use pdfium_render::prelude::*;

use super::{PageRenderer, RenderedPage, TextItem};
use crate::error::{Error, Result};
use crate::settings::ImageFormat;

/// JPEG encoding quality for rendered pages.
const JPEG_QUALITY: u8 = 95;

/// Renders pages of a loaded PDF document via pdfium.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
    data: Vec<u8>,
    page_count: u32,
}

impl PdfiumRenderer {
    /// Load a PDF from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(data)
    }

    /// Load a PDF from in-memory bytes.
    pub fn load_bytes(data: Vec<u8>) -> Result<Self> {
        let pdfium = bind_pdfium()?;
        let page_count = {
            let document = pdfium
                .load_pdf_from_byte_slice(&data, None)
                .map_err(|e| Error::Load(e.to_string()))?;
            document.pages().len() as u32
        };
        debug!("loaded PDF document with {} pages", page_count);
        Ok(Self {
            pdfium,
            data,
            page_count,
        })
    }

    /// Width and height of a page in points.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32)> {
        if page_number < 1 || page_number > self.page_count {
            return Err(Error::PageOutOfRange(page_number, self.page_count));
        }
        let document = self.document()?;
        let page = document
            .pages()
            .get((page_number - 1) as u16)
            .map_err(|e| Error::Load(e.to_string()))?;
        Ok((page.width().value, page.height().value))
    }

    fn document(&self) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_byte_slice(&self.data, None)
            .map_err(|e| Error::Load(e.to_string()))
    }
}

impl PageRenderer for PdfiumRenderer {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn render_page(
        &self,
        page_number: u32,
        scale: f32,
        format: ImageFormat,
        extract_text: bool,
    ) -> Result<RenderedPage> {
        if page_number < 1 || page_number > self.page_count {
            return Err(Error::PageOutOfRange(page_number, self.page_count));
        }

        let document = self.document()?;
        let page = document
            .pages()
            .get((page_number - 1) as u16)
            .map_err(|e| Error::render(page_number, e))?;

        let point_width = page.width().value;
        let point_height = page.height().value;

        // Scale 1.0 renders one pixel per point (72 dpi baseline).
        let target_width = ((point_width * scale).round() as i32).max(1);
        let target_height = ((point_height * scale).round() as i32).max(1);

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(target_width)
                    .set_target_height(target_height),
            )
            .map_err(|e| Error::render(page_number, e))?;

        let raster = bitmap.as_image();
        let pixel_width = raster.width();
        let pixel_height = raster.height();
        if pixel_width == 0 || pixel_height == 0 {
            return Err(Error::render(page_number, "engine returned an empty raster"));
        }

        let image = encode_raster(&raster, format)?;

        let text_items = if extract_text {
            extract_text_items(&page, page_number, point_height)?
        } else {
            Vec::new()
        };

        debug!(
            "rendered page {} at {}x{} px ({} text items, {} bytes)",
            page_number,
            pixel_width,
            pixel_height,
            text_items.len(),
            image.len()
        );

        Ok(RenderedPage {
            page_number,
            pixel_width,
            pixel_height,
            point_width,
            point_height,
            image,
            image_format: format,
            text_items,
        })
    }
}

fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Engine(e.to_string()))?;
    Ok(Pdfium::new(bindings))
}

fn encode_raster(raster: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            raster.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        }
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            raster.to_rgb8().write_with_encoder(encoder)?;
        }
    }
    Ok(bytes)
}

/// Collect text runs with their bounds and font info.
///
/// Pdfium reports bounds with a bottom-left origin; items are flipped to the
/// top-left origin the assembler's linear transform expects. Font info comes
/// from the first character of each segment; segments and characters are
/// enumerated in the same order, so segment text lengths index the character
/// list.
fn extract_text_items(
    page: &PdfPage,
    page_number: u32,
    page_height: f32,
) -> Result<Vec<TextItem>> {
    let text = page.text().map_err(|e| Error::render(page_number, e))?;

    let char_fonts: Vec<(f32, String)> = text
        .chars()
        .iter()
        .map(|c| (c.scaled_font_size().value, c.font_name()))
        .collect();

    let mut items = Vec::new();
    let mut consumed = 0usize;
    for segment in text.segments().iter() {
        let run = segment.text();
        let char_count = run.chars().count();
        let bounds = segment.bounds();
        let (font_size, font_name) = char_fonts
            .get(consumed)
            .cloned()
            .unwrap_or((bounds.height().value, String::new()));
        consumed += char_count;

        if run.trim().is_empty() {
            continue;
        }

        items.push(TextItem {
            text: run,
            x: bounds.left.value,
            y: page_height - bounds.top.value,
            width: bounds.width().value,
            height: bounds.height().value,
            font_size,
            font_name,
        });
    }
    Ok(items)
}
