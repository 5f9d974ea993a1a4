//! Presentation assembly.
//!
//! Consumes the ordered page render results and builds one slide per page:
//! the page image placed per the geometry resolver, optional transparent
//! text overlays scaled from source-page space, and a bottom-right
//! page-number label. Part emission and ZIP packaging live in [`writer`].

mod writer;

use log::debug;

use crate::error::Result;
use crate::fonts::map_font_name;
use crate::geometry::{resolve_placement, PlacementRect};
use crate::renderer::RenderedPage;
use crate::settings::ConversionSettings;

/// MIME type declared for the produced artifact.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Fixed overhead added to the image byte total when estimating output size
/// (presentation structure, masters, theme).
pub const STRUCTURAL_OVERHEAD_BYTES: u64 = 50_000;

/// Font size bounds for text overlays, in points.
const MIN_OVERLAY_FONT_SIZE: f64 = 6.0;
const MAX_OVERLAY_FONT_SIZE: f64 = 72.0;

/// Pixel-to-point factor applied to overlay font sizes (96 dpi to 72 dpi).
const FONT_SCALE: f64 = 0.75;

// Page-number label geometry, anchored to the bottom-right slide corner.
const LABEL_WIDTH: f64 = 0.4;
const LABEL_HEIGHT: f64 = 0.2;
const LABEL_RIGHT_INSET: f64 = 0.5;
const LABEL_BOTTOM_INSET: f64 = 0.3;
const LABEL_FONT_SIZE: f64 = 10.0;
const LABEL_COLOR: &str = "666666";

/// A fully laid-out slide, ready for part emission.
pub(crate) struct Slide<'a> {
    pub page_number: u32,
    pub image: &'a [u8],
    pub image_extension: &'static str,
    pub image_content_type: &'static str,
    pub image_rect: PlacementRect,
    pub text_boxes: Vec<TextBox>,
    pub label: Label,
}

/// A transparent, borderless text overlay in slide-space inches.
pub(crate) struct TextBox {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Font size in points, already clamped
    pub font_size: f64,
    pub font_family: &'static str,
}

/// The page-number label in slide-space inches.
pub(crate) struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: &'static str,
}

/// Build and serialize the presentation.
///
/// One slide per rendered page, in input order. An empty page list produces
/// a valid presentation with no slides.
pub fn assemble(pages: &[RenderedPage], settings: &ConversionSettings) -> Result<Vec<u8>> {
    let (slide_width, slide_height) = settings.slide_size.dimensions();

    let slides: Vec<Slide> = pages
        .iter()
        .map(|page| layout_slide(page, slide_width, slide_height, settings))
        .collect();

    debug!(
        "assembling {} slides at {}x{} in",
        slides.len(),
        slide_width,
        slide_height
    );

    writer::write_package(&slides, slide_width, slide_height)
}

/// Estimated artifact size: sum of per-page image bytes plus the fixed
/// structural overhead. Computed before serialization for immediate display.
pub fn estimate_file_size(pages: &[RenderedPage]) -> u64 {
    pages.iter().map(|p| p.image.len() as u64).sum::<u64>() + STRUCTURAL_OVERHEAD_BYTES
}

/// Human-readable file size (e.g. "1.25 MB").
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{} {}", (value * 100.0).round() / 100.0, UNITS[exponent])
}

fn layout_slide<'a>(
    page: &'a RenderedPage,
    slide_width: f64,
    slide_height: f64,
    settings: &ConversionSettings,
) -> Slide<'a> {
    let image_rect = resolve_placement(
        page.pixel_width,
        page.pixel_height,
        slide_width,
        slide_height,
        settings.fit_mode,
    );

    let text_boxes = if page.point_width > 0.0 && page.point_height > 0.0 {
        layout_text_boxes(page, &image_rect)
    } else {
        Vec::new()
    };

    Slide {
        page_number: page.page_number,
        image: &page.image,
        image_extension: page.image_format.extension(),
        image_content_type: page.image_format.content_type(),
        image_rect,
        text_boxes,
        label: Label {
            text: page.page_number.to_string(),
            x: slide_width - LABEL_RIGHT_INSET,
            y: slide_height - LABEL_BOTTOM_INSET,
            width: LABEL_WIDTH,
            height: LABEL_HEIGHT,
            font_size: LABEL_FONT_SIZE,
            color: LABEL_COLOR,
        },
    }
}

/// Map each non-empty text item from source-page space onto the placed
/// image rectangle with a per-axis linear scale.
fn layout_text_boxes(page: &RenderedPage, image_rect: &PlacementRect) -> Vec<TextBox> {
    let scale_x = image_rect.width / page.point_width as f64;
    let scale_y = image_rect.height / page.point_height as f64;

    page.text_items
        .iter()
        .filter(|item| !item.text.trim().is_empty())
        .map(|item| TextBox {
            text: item.text.clone(),
            x: image_rect.x + item.x as f64 * scale_x,
            y: image_rect.y + item.y as f64 * scale_y,
            width: item.width as f64 * scale_x,
            height: item.height as f64 * scale_y,
            font_size: (item.font_size as f64 * scale_y * FONT_SCALE)
                .clamp(MIN_OVERLAY_FONT_SIZE, MAX_OVERLAY_FONT_SIZE),
            font_family: map_font_name(&item.font_name),
        })
        .collect()
}
