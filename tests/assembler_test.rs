//! End-to-end tests: fake renderer through the pipeline into a .pptx
//! archive, verified by reopening the ZIP and inspecting its parts.

use std::io::{Cursor, Read};

use pdfslides::error::Result;
use pdfslides::renderer::{PageRenderer, RenderedPage, TextItem};
use pdfslides::settings::{ConversionSettings, ImageFormat};
use pdfslides::{convert_with, estimate_file_size, pptx};

struct FakeRenderer {
    pages: u32,
    with_text: bool,
}

impl PageRenderer for FakeRenderer {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn render_page(
        &self,
        page_number: u32,
        _scale: f32,
        format: ImageFormat,
        extract_text: bool,
    ) -> Result<RenderedPage> {
        let text_items = if extract_text && self.with_text {
            vec![TextItem {
                text: format!("Heading <{}> & more", page_number),
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

fn archive_of(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("output is a valid ZIP archive")
}

fn read_part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {}", name))
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_three_slides_in_page_order() {
    let renderer = FakeRenderer {
        pages: 3,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    assert_eq!(result.slide_count, 3);

    let mut archive = archive_of(result.pptx);
    for n in 1..=3 {
        assert!(archive.by_name(&format!("ppt/slides/slide{}.xml", n)).is_ok());
        assert!(archive.by_name(&format!("ppt/media/image{}.png", n)).is_ok());
    }

    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldId id=\"256\""));
    assert!(presentation.contains("<p:sldId id=\"258\""));

    let app = read_part(&mut archive, "docProps/app.xml");
    assert!(app.contains("<Slides>3</Slides>"));

    // Slides carry their own page-number labels in order
    let slide2 = read_part(&mut archive, "ppt/slides/slide2.xml");
    assert!(slide2.contains("<a:t>2</a:t>"));
}

#[test]
fn test_empty_range_produces_empty_presentation() {
    let renderer = FakeRenderer {
        pages: 10,
        with_text: false,
    };
    let settings = ConversionSettings::new().with_page_range(4, Some(2));
    let result = convert_with(&renderer, &settings, |_| {}).unwrap();

    assert_eq!(result.slide_count, 0);

    let mut archive = archive_of(result.pptx);
    assert!(archive.by_name("ppt/presentation.xml").is_ok());
    assert!(archive.by_name("ppt/slides/slide1.xml").is_err());
    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldIdLst></p:sldIdLst>"));
}

#[test]
fn test_fit_placement_in_slide_xml() {
    // 800x600 on 10x5.625: image 7.5x5.625 centered at x=1.25, y=0
    let renderer = FakeRenderer {
        pages: 1,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    let mut archive = archive_of(result.pptx);
    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:off x=\"1143000\" y=\"0\"/>"));
    assert!(slide.contains("<a:ext cx=\"6858000\" cy=\"5143500\"/>"));

    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldSz cx=\"9144000\" cy=\"5143500\"/>"));
}

#[test]
fn test_text_overlay_shape() {
    let renderer = FakeRenderer {
        pages: 1,
        with_text: true,
    };
    let settings = ConversionSettings::new().with_text(true);
    let result = convert_with(&renderer, &settings, |_| {}).unwrap();

    let mut archive = archive_of(result.pptx);
    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");

    // Mapped font family, escaped text, transparent borderless box
    assert!(slide.contains("<a:latin typeface=\"Arial\"/>"));
    assert!(slide.contains("Heading &lt;1&gt; &amp; more"));
    assert!(slide.contains("<a:noFill/><a:ln><a:noFill/></a:ln>"));
    assert!(slide.contains("<a:srgbClr val=\"000000\"/>"));
}

#[test]
fn test_page_number_label() {
    let renderer = FakeRenderer {
        pages: 1,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    let mut archive = archive_of(result.pptx);
    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");

    // 10pt gray text at x = 10-0.5 = 9.5in, y = 5.625-0.3 = 5.325in
    assert!(slide.contains("name=\"Page Number\""));
    assert!(slide.contains("sz=\"1000\""));
    assert!(slide.contains("<a:srgbClr val=\"666666\"/>"));
    assert!(slide.contains(&format!("<a:off x=\"{}\" y=\"{}\"/>", 8_686_800i64, 4_869_180i64)));
}

#[test]
fn test_jpeg_media_parts() {
    let renderer = FakeRenderer {
        pages: 1,
        with_text: false,
    };
    let settings = ConversionSettings::new().with_image_format(ImageFormat::Jpeg);
    let result = convert_with(&renderer, &settings, |_| {}).unwrap();

    let mut archive = archive_of(result.pptx);
    assert!(archive.by_name("ppt/media/image1.jpeg").is_ok());
    let rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels.contains("../media/image1.jpeg"));
}

#[test]
fn test_estimated_size() {
    let renderer = FakeRenderer {
        pages: 2,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    // Two fake pages of 1000 bytes each plus the fixed overhead
    assert_eq!(
        result.estimated_size,
        2 * 1000 + pptx::STRUCTURAL_OVERHEAD_BYTES
    );
}

#[test]
fn test_estimate_matches_direct_computation() {
    let pages: Vec<RenderedPage> = (1..=4)
        .map(|n| {
            FakeRenderer {
                pages: 4,
                with_text: false,
            }
            .render_page(n, 2.0, ImageFormat::Png, false)
            .unwrap()
        })
        .collect();
    assert_eq!(
        estimate_file_size(&pages),
        4 * 1000 + pptx::STRUCTURAL_OVERHEAD_BYTES
    );
}

#[test]
fn test_written_file_reopens_as_archive() {
    let renderer = FakeRenderer {
        pages: 2,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pptx");
    std::fs::write(&path, &result.pptx).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, result.actual_size());

    let mut archive = archive_of(bytes);
    assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());
    assert!(archive.by_name("ppt/media/image2.png").is_ok());
}

#[test]
fn test_required_package_parts_present() {
    let renderer = FakeRenderer {
        pages: 1,
        with_text: false,
    };
    let result = convert_with(&renderer, &ConversionSettings::default(), |_| {}).unwrap();

    let mut archive = archive_of(result.pptx);
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "docProps/app.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/_rels/slide1.xml.rels",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing {}", name);
    }
}
