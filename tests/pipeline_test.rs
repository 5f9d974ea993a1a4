//! Integration tests for the sequential page pipeline.

use std::cell::RefCell;

use pdfslides::error::{Error, Result};
use pdfslides::pipeline::{self, Progress};
use pdfslides::renderer::{PageRenderer, RenderedPage, TextItem};
use pdfslides::settings::{ConversionSettings, ImageFormat, Quality};

/// Fake renderer for driving the pipeline without a PDF engine.
struct FakeRenderer {
    pages: u32,
    fail_on: Option<u32>,
    rendered: RefCell<Vec<(u32, f32)>>,
}

impl FakeRenderer {
    fn new(pages: u32) -> Self {
        Self {
            pages,
            fail_on: None,
            rendered: RefCell::new(Vec::new()),
        }
    }

    fn failing_on(pages: u32, fail_on: u32) -> Self {
        Self {
            fail_on: Some(fail_on),
            ..Self::new(pages)
        }
    }
}

impl PageRenderer for FakeRenderer {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn render_page(
        &self,
        page_number: u32,
        scale: f32,
        format: ImageFormat,
        extract_text: bool,
    ) -> Result<RenderedPage> {
        if self.fail_on == Some(page_number) {
            return Err(Error::Render {
                page: page_number,
                reason: "synthetic failure".to_string(),
            });
        }
        self.rendered.borrow_mut().push((page_number, scale));

        let text_items = if extract_text {
            vec![TextItem {
                text: format!("Page {}", page_number),
                x: 40.0,
                y: 30.0,
                width: 100.0,
                height: 20.0,
                font_size: 24.0,
                font_name: "Helvetica-Bold".to_string(),
            }]
        } else {
            Vec::new()
        };

        Ok(RenderedPage {
            page_number,
            pixel_width: 800,
            pixel_height: 600,
            point_width: 400.0,
            point_height: 300.0,
            image: vec![0xAB; 1000],
            image_format: format,
            text_items,
        })
    }
}

#[test]
fn test_three_page_progress_sequence() {
    let renderer = FakeRenderer::new(3);
    let settings = ConversionSettings::default();
    let mut reports: Vec<Progress> = Vec::new();

    let pages = pipeline::run(&renderer, &settings, |p| reports.push(*p)).unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports.iter().map(|p| p.percentage).collect::<Vec<_>>(),
        vec![33, 67, 100]
    );
    assert_eq!(reports[0].current, 1);
    assert_eq!(reports[0].total, 3);
    assert_eq!(reports[2].current_page, 3);
}

#[test]
fn test_percentage_monotonic_and_ends_at_100() {
    let renderer = FakeRenderer::new(7);
    let settings = ConversionSettings::default();
    let mut percentages = Vec::new();

    pipeline::run(&renderer, &settings, |p| percentages.push(p.percentage)).unwrap();

    assert!(percentages.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*percentages.last().unwrap(), 100);
}

#[test]
fn test_inverted_range_processes_nothing() {
    let renderer = FakeRenderer::new(10);
    let settings = ConversionSettings::new().with_page_range(4, Some(2));
    let mut calls = 0;

    let pages = pipeline::run(&renderer, &settings, |_| calls += 1).unwrap();

    assert!(pages.is_empty());
    assert_eq!(calls, 0);
    assert!(renderer.rendered.borrow().is_empty());
}

#[test]
fn test_range_subset_in_order() {
    let renderer = FakeRenderer::new(10);
    let settings = ConversionSettings::new().with_page_range(4, Some(6));

    let pages = pipeline::run(&renderer, &settings, |_| {}).unwrap();

    assert_eq!(
        pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
        vec![4, 5, 6]
    );
    assert_eq!(
        renderer
            .rendered
            .borrow()
            .iter()
            .map(|(n, _)| *n)
            .collect::<Vec<_>>(),
        vec![4, 5, 6]
    );
}

#[test]
fn test_range_end_clamped_to_document() {
    let renderer = FakeRenderer::new(5);
    let settings = ConversionSettings::new().with_page_range(3, Some(99));

    let pages = pipeline::run(&renderer, &settings, |_| {}).unwrap();
    assert_eq!(
        pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
}

#[test]
fn test_failure_aborts_without_partial_results() {
    let renderer = FakeRenderer::failing_on(3, 2);
    let settings = ConversionSettings::default();
    let mut reports = 0;

    let result = pipeline::run(&renderer, &settings, |_| reports += 1);

    match result {
        Err(Error::Render { page, .. }) => assert_eq!(page, 2),
        other => panic!("expected render error, got {:?}", other.map(|p| p.len())),
    }
    // Page 3 was never attempted
    assert_eq!(
        renderer
            .rendered
            .borrow()
            .iter()
            .map(|(n, _)| *n)
            .collect::<Vec<_>>(),
        vec![1]
    );
    assert_eq!(reports, 1);
}

#[test]
fn test_quality_maps_to_scale_factor() {
    let renderer = FakeRenderer::new(2);
    let settings = ConversionSettings::new().with_quality(Quality::High);

    pipeline::run(&renderer, &settings, |_| {}).unwrap();

    assert!(renderer
        .rendered
        .borrow()
        .iter()
        .all(|(_, scale)| *scale == 3.0));
}

#[test]
fn test_text_extraction_flag_plumbed() {
    let renderer = FakeRenderer::new(1);

    let without = pipeline::run(&renderer, &ConversionSettings::default(), |_| {}).unwrap();
    assert!(without[0].text_items.is_empty());

    let with = pipeline::run(
        &renderer,
        &ConversionSettings::new().with_text(true),
        |_| {},
    )
    .unwrap();
    assert_eq!(with[0].text_items.len(), 1);
}

#[test]
fn test_empty_document() {
    let renderer = FakeRenderer::new(0);
    let pages = pipeline::run(&renderer, &ConversionSettings::default(), |_| {}).unwrap();
    assert!(pages.is_empty());
}
