//! # pdfslides
//!
//! Convert PDF documents to PowerPoint presentations.
//!
//! Each PDF page is rasterized to an image and placed on one slide,
//! optionally overlaying the page's extracted text as transparent text
//! boxes. Rasterization is delegated to the pdfium engine; the presentation
//! is packaged as a standard .pptx archive.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfslides::{convert_file, ConversionSettings};
//!
//! fn main() -> pdfslides::Result<()> {
//!     let settings = ConversionSettings::default();
//!     let result = convert_file("document.pdf", &settings)?;
//!     std::fs::write("document.pptx", &result.pptx)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Slide size presets**: 16:9, 4:3, A4, Letter
//! - **Fit modes**: contain, cover, or original size at 96 dpi
//! - **Quality tiers**: 1x/2x/3x render scale
//! - **Page ranges**: whole document or a clamped 1-indexed range
//! - **Text overlays**: extracted text placed over the page image
//! - **Progress reporting**: one callback per completed page

pub mod error;
pub mod fonts;
pub mod geometry;
pub mod pipeline;
pub mod pptx;
pub mod renderer;
pub mod settings;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{resolve_placement, PlacementRect};
pub use pipeline::{resolve_page_range, Progress};
pub use pptx::{estimate_file_size, format_file_size, PPTX_MIME};
pub use renderer::{PageRenderer, PdfiumRenderer, RenderedPage, TextItem};
pub use settings::{
    ConversionSettings, FitMode, ImageFormat, PageRange, Quality, SlideSize,
};

use std::path::Path;

/// A finished conversion.
pub struct ConversionResult {
    /// The serialized .pptx artifact
    pub pptx: Vec<u8>,

    /// Estimated size computed before serialization (image bytes plus
    /// structural overhead)
    pub estimated_size: u64,

    /// Number of slides produced
    pub slide_count: u32,
}

impl ConversionResult {
    /// Actual artifact size in bytes.
    pub fn actual_size(&self) -> u64 {
        self.pptx.len() as u64
    }
}

/// Convert a PDF file with the given settings.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    settings: &ConversionSettings,
) -> Result<ConversionResult> {
    let renderer = PdfiumRenderer::load_file(path)?;
    convert_with(&renderer, settings, |_| {})
}

/// Convert an in-memory PDF with the given settings.
pub fn convert_bytes(data: Vec<u8>, settings: &ConversionSettings) -> Result<ConversionResult> {
    let renderer = PdfiumRenderer::load_bytes(data)?;
    convert_with(&renderer, settings, |_| {})
}

/// Convert using any [`PageRenderer`], reporting progress per page.
///
/// Runs the sequential page pipeline, then assembles one slide per rendered
/// page. The renderer results are dropped once the presentation is built.
pub fn convert_with<R, F>(
    renderer: &R,
    settings: &ConversionSettings,
    on_progress: F,
) -> Result<ConversionResult>
where
    R: PageRenderer + ?Sized,
    F: FnMut(&Progress),
{
    let pages = pipeline::run(renderer, settings, on_progress)?;
    let estimated_size = pptx::estimate_file_size(&pages);
    let bytes = pptx::assemble(&pages, settings)?;
    Ok(ConversionResult {
        pptx: bytes,
        estimated_size,
        slide_count: pages.len() as u32,
    })
}

/// Builder for configuring and running conversions.
///
/// # Example
///
/// ```no_run
/// use pdfslides::{PdfSlides, FitMode, Quality, SlideSize};
///
/// let result = PdfSlides::new()
///     .slide_size(SlideSize::Standard)
///     .quality(Quality::High)
///     .fit_mode(FitMode::Fill)
///     .pages(2, Some(9))
///     .with_text()
///     .convert_file("document.pdf")?;
/// # Ok::<(), pdfslides::Error>(())
/// ```
pub struct PdfSlides {
    settings: ConversionSettings,
}

impl PdfSlides {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: ConversionSettings::default(),
        }
    }

    /// Set the slide size preset.
    pub fn slide_size(mut self, size: SlideSize) -> Self {
        self.settings = self.settings.with_slide_size(size);
        self
    }

    /// Set the render quality tier.
    pub fn quality(mut self, quality: Quality) -> Self {
        self.settings = self.settings.with_quality(quality);
        self
    }

    /// Set the fit mode.
    pub fn fit_mode(mut self, mode: FitMode) -> Self {
        self.settings = self.settings.with_fit_mode(mode);
        self
    }

    /// Convert an inclusive 1-indexed page range.
    pub fn pages(mut self, start: u32, end: Option<u32>) -> Self {
        self.settings = self.settings.with_page_range(start, end);
        self
    }

    /// Overlay extracted text on each slide.
    pub fn with_text(mut self) -> Self {
        self.settings = self.settings.with_text(true);
        self
    }

    /// Encode page images as JPEG instead of PNG.
    pub fn jpeg(mut self) -> Self {
        self.settings = self.settings.with_image_format(ImageFormat::Jpeg);
        self
    }

    /// The settings accumulated so far.
    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Convert a PDF file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult> {
        convert_file(path, &self.settings)
    }

    /// Convert an in-memory PDF.
    pub fn convert_bytes(&self, data: Vec<u8>) -> Result<ConversionResult> {
        convert_bytes(data, &self.settings)
    }

    /// Convert a PDF file, reporting progress per page.
    pub fn convert_file_with_progress<P, F>(&self, path: P, on_progress: F) -> Result<ConversionResult>
    where
        P: AsRef<Path>,
        F: FnMut(&Progress),
    {
        let renderer = PdfiumRenderer::load_file(path)?;
        convert_with(&renderer, &self.settings, on_progress)
    }
}

impl Default for PdfSlides {
    fn default() -> Self {
        Self::new()
    }
}
