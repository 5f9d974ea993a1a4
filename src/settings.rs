//! Conversion settings and configuration.

use serde::{Deserialize, Serialize};

/// Settings controlling a PDF-to-PPTX conversion.
///
/// Settings are validated and clamped once at pipeline entry; they are not
/// re-validated per page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Output slide size preset
    pub slide_size: SlideSize,

    /// Render quality tier; doubles as the rasterization scale factor
    /// (1x/2x/3x of the 72-dpi page baseline)
    pub quality: Quality,

    /// How the page image is scaled and positioned on the slide
    pub fit_mode: FitMode,

    /// Which pages to convert
    pub page_range: PageRange,

    /// First page of the range (1-indexed, clamped to the document)
    pub start_page: u32,

    /// Last page of the range; `None` means through the last page
    pub end_page: Option<u32>,

    /// Overlay extracted text items as transparent text boxes
    pub extract_text: bool,

    /// Encoding used for rendered page images
    pub image_format: ImageFormat,
}

impl ConversionSettings {
    /// Create settings with defaults (16:9, medium quality, fit, all pages).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide size preset.
    pub fn with_slide_size(mut self, size: SlideSize) -> Self {
        self.slide_size = size;
        self
    }

    /// Set the render quality tier.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the fit mode.
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Convert all pages.
    pub fn all_pages(mut self) -> Self {
        self.page_range = PageRange::All;
        self
    }

    /// Convert an inclusive 1-indexed page range.
    ///
    /// The range is clamped to the document at pipeline entry; an inverted
    /// range (start past end after clamping) yields zero pages, not an error.
    pub fn with_page_range(mut self, start: u32, end: Option<u32>) -> Self {
        self.page_range = PageRange::Range;
        self.start_page = start;
        self.end_page = end;
        self
    }

    /// Enable or disable text overlay extraction.
    pub fn with_text(mut self, extract: bool) -> Self {
        self.extract_text = extract;
        self
    }

    /// Set the page image encoding.
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            slide_size: SlideSize::Widescreen,
            quality: Quality::Medium,
            fit_mode: FitMode::Fit,
            page_range: PageRange::All,
            start_page: 1,
            end_page: None,
            extract_text: false,
            image_format: ImageFormat::Png,
        }
    }
}

/// Output slide size presets, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideSize {
    /// 16:9 widescreen (10" x 5.625")
    #[default]
    Widescreen,
    /// 4:3 standard (10" x 7.5")
    Standard,
    /// A4 paper (11.69" x 8.27")
    A4,
    /// US Letter (11" x 8.5")
    Letter,
}

impl SlideSize {
    /// Slide dimensions as (width, height) in inches.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            SlideSize::Widescreen => (10.0, 5.625),
            SlideSize::Standard => (10.0, 7.5),
            SlideSize::A4 => (11.69, 8.27),
            SlideSize::Letter => (11.0, 8.5),
        }
    }

    /// Preset label as shown to users (e.g. "16:9").
    pub fn label(self) -> &'static str {
        match self {
            SlideSize::Widescreen => "16:9",
            SlideSize::Standard => "4:3",
            SlideSize::A4 => "A4",
            SlideSize::Letter => "Letter",
        }
    }
}

/// Render quality tier.
///
/// The tier maps directly to the rasterization scale factor applied to the
/// 72-dpi page baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 72 dpi (1x)
    Low,
    /// 144 dpi (2x)
    #[default]
    Medium,
    /// 216 dpi (3x)
    High,
}

impl Quality {
    /// Scale factor applied when rasterizing a page.
    pub fn scale_factor(self) -> f32 {
        match self {
            Quality::Low => 1.0,
            Quality::Medium => 2.0,
            Quality::High => 3.0,
        }
    }
}

/// How a rendered page image is scaled and positioned on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Contain: largest size with both dimensions inside the slide
    #[default]
    Fit,
    /// Cover: smallest size with both dimensions covering the slide
    Fill,
    /// Unscaled: pixels converted to inches at 96 dpi
    Original,
}

/// Which pages of the document to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRange {
    /// Convert every page
    #[default]
    All,
    /// Convert the inclusive range given by `start_page`..=`end_page`
    Range,
}

/// Encoding for rendered page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Lossless PNG
    #[default]
    Png,
    /// JPEG at 0.95 quality
    Jpeg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// Content type for the media part.
    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}
