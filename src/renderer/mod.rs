//! Page rendering abstraction layer.
//!
//! Provides a trait-based interface for the rendering engine, isolating the
//! concrete PDF library (pdfium) from the conversion pipeline. Tests drive
//! the pipeline with fake renderers implementing [`PageRenderer`].

pub mod pdfium;

pub use pdfium::PdfiumRenderer;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::ImageFormat;

/// A positioned run of text on a source page.
///
/// Coordinates are in source-page space: PDF points with a top-left origin,
/// so that a linear transform maps them onto the placed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub font_name: String,
}

/// One rasterized page, produced by a [`PageRenderer`] at a given scale.
///
/// Immutable once produced; held in memory only between the pipeline and the
/// presentation assembler.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Raster width in pixels
    pub pixel_width: u32,

    /// Raster height in pixels
    pub pixel_height: u32,

    /// Source page width in points (1 point = 1/72 inch)
    pub point_width: f32,

    /// Source page height in points
    pub point_height: f32,

    /// Encoded image bytes (PNG or JPEG)
    pub image: Vec<u8>,

    /// Format the image bytes are encoded in
    pub image_format: ImageFormat,

    /// Extracted text runs, empty when text extraction is disabled
    pub text_items: Vec<TextItem>,
}

/// Abstract interface for rendering pages of a loaded document.
///
/// Implementations are not assumed safe for concurrent use on the same
/// document; the pipeline renders strictly one page at a time.
pub trait PageRenderer {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Rasterize one page at the given scale factor (1.0 = 72 dpi).
    ///
    /// `page_number` is 1-indexed. Text items are extracted only when
    /// `extract_text` is set.
    fn render_page(
        &self,
        page_number: u32,
        scale: f32,
        format: ImageFormat,
        extract_text: bool,
    ) -> Result<RenderedPage>;
}
