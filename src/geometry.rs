//! Placement geometry for page images on slides.
//!
//! Maps a rendered pixel image into slide-space inches under the three fit
//! policies. Pure arithmetic; no I/O.

use crate::settings::FitMode;

/// Pixels per inch assumed when placing images at their original size.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// A placement rectangle in slide-space inches.
///
/// For [`FitMode::Fit`] the rectangle lies fully inside the slide; for
/// [`FitMode::Fill`] and [`FitMode::Original`] it may extend beyond the
/// slide bounds (negative offsets are valid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute where a rendered page image lands on a slide.
///
/// `pixel_width`/`pixel_height` are the source image dimensions (both > 0;
/// render output is validated upstream), `slide_width`/`slide_height` the
/// slide dimensions in inches. The result is centered on both axes in every
/// mode: `x = (slide_width - width) / 2`, `y = (slide_height - height) / 2`,
/// regardless of sign.
pub fn resolve_placement(
    pixel_width: u32,
    pixel_height: u32,
    slide_width: f64,
    slide_height: f64,
    fit_mode: FitMode,
) -> PlacementRect {
    let img_aspect = pixel_width as f64 / pixel_height as f64;
    let slide_aspect = slide_width / slide_height;

    let (width, height) = match fit_mode {
        FitMode::Fit => {
            if img_aspect > slide_aspect {
                (slide_width, slide_width / img_aspect)
            } else {
                (slide_height * img_aspect, slide_height)
            }
        }
        FitMode::Fill => {
            if img_aspect > slide_aspect {
                (slide_height * img_aspect, slide_height)
            } else {
                (slide_width, slide_width / img_aspect)
            }
        }
        FitMode::Original => (
            pixel_width as f64 / PIXELS_PER_INCH,
            pixel_height as f64 / PIXELS_PER_INCH,
        ),
    };

    PlacementRect {
        x: (slide_width - width) / 2.0,
        y: (slide_height - height) / 2.0,
        width,
        height,
    }
}
