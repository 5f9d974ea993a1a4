//! Sequential page-processing pipeline.
//!
//! Resolves the page range from the settings, then renders the resolved
//! pages strictly one at a time, reporting progress after each page. Any
//! page failure aborts the whole run; there are no partial results and no
//! per-page retries.

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::renderer::{PageRenderer, RenderedPage};
use crate::settings::{ConversionSettings, PageRange};

/// Progress report emitted after each completed page.
///
/// `percentage` is monotonically non-decreasing across a run and reaches
/// exactly 100 on the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Pages completed so far
    pub current: u32,
    /// Total pages in the resolved range
    pub total: u32,
    /// `round(current / total * 100)`
    pub percentage: u32,
    /// Page number that just completed
    pub current_page: u32,
}

/// Resolve which pages to process.
///
/// `PageRange::All` yields `1..=total_pages`. `PageRange::Range` clamps
/// `start` to at least 1 and `end` to at most `total_pages` (defaulting to
/// `total_pages` when unset); an inverted range after clamping yields an
/// empty list, which is specified behavior rather than an error.
pub fn resolve_page_range(total_pages: u32, settings: &ConversionSettings) -> Vec<u32> {
    match settings.page_range {
        PageRange::All => (1..=total_pages).collect(),
        PageRange::Range => {
            let start = settings.start_page.max(1);
            let end = settings.end_page.unwrap_or(total_pages).min(total_pages);
            if end < start {
                Vec::new()
            } else {
                (start..=end).collect()
            }
        }
    }
}

/// Render every page in the resolved range, in ascending order.
///
/// One render is in flight at a time: the renderer is not assumed safe for
/// concurrent use on one document, and a single decoded raster bounds peak
/// memory. `on_progress` is invoked once per completed page.
pub fn run<R, F>(
    renderer: &R,
    settings: &ConversionSettings,
    mut on_progress: F,
) -> Result<Vec<RenderedPage>>
where
    R: PageRenderer + ?Sized,
    F: FnMut(&Progress),
{
    let total_pages = renderer.page_count();
    let pages = resolve_page_range(total_pages, settings);
    let total = pages.len() as u32;
    let scale = settings.quality.scale_factor();

    debug!(
        "pipeline: {} of {} pages at scale {}",
        total, total_pages, scale
    );

    let mut results = Vec::with_capacity(pages.len());
    for (index, &page_number) in pages.iter().enumerate() {
        let page = renderer.render_page(
            page_number,
            scale,
            settings.image_format,
            settings.extract_text,
        )?;

        if page.pixel_width == 0 || page.pixel_height == 0 {
            return Err(Error::render(page_number, "renderer returned an empty raster"));
        }

        results.push(page);

        let current = index as u32 + 1;
        on_progress(&Progress {
            current,
            total,
            percentage: percentage(current, total),
            current_page: page_number,
        });
    }

    Ok(results)
}

fn percentage(current: u32, total: u32) -> u32 {
    ((current as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_settings(start: u32, end: Option<u32>) -> ConversionSettings {
        ConversionSettings::new().with_page_range(start, end)
    }

    #[test]
    fn test_all_pages() {
        let settings = ConversionSettings::default();
        assert_eq!(resolve_page_range(3, &settings), vec![1, 2, 3]);
        assert_eq!(resolve_page_range(1, &settings), vec![1]);
    }

    #[test]
    fn test_all_pages_empty_document() {
        let settings = ConversionSettings::default();
        assert!(resolve_page_range(0, &settings).is_empty());
    }

    #[test]
    fn test_range_clamped() {
        assert_eq!(resolve_page_range(10, &range_settings(0, Some(3))), vec![1, 2, 3]);
        assert_eq!(resolve_page_range(5, &range_settings(4, Some(99))), vec![4, 5]);
    }

    #[test]
    fn test_range_end_defaults_to_total() {
        assert_eq!(resolve_page_range(4, &range_settings(2, None)), vec![2, 3, 4]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert!(resolve_page_range(10, &range_settings(4, Some(2))).is_empty());
    }

    #[test]
    fn test_range_consecutive() {
        let pages = resolve_page_range(100, &range_settings(17, Some(23)));
        assert_eq!(pages.len(), 23 - 17 + 1);
        for (i, p) in pages.iter().enumerate() {
            assert_eq!(*p, 17 + i as u32);
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(1, 7), 14);
        assert_eq!(percentage(7, 7), 100);
    }
}
