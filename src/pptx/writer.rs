//! OOXML part emission and ZIP packaging.
//!
//! A .pptx is a ZIP archive of XML parts. The presentation structure here is
//! the fixed minimal set: one slide master, one blank layout, one theme, and
//! one slide per page. Slide content is emitted directly; archive
//! serialization is delegated to the `zip` crate.

use std::io::{Cursor, Write};

use chrono::Utc;
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{Label, Slide, TextBox};
use crate::error::Result;

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Font sizes are serialized in hundredths of a point.
fn sz(points: f64) -> i64 {
    (points * 100.0).round() as i64
}

/// Serialize the whole package.
pub(crate) fn write_package(
    slides: &[Slide],
    slide_width: f64,
    slide_height: f64,
) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    // Image bytes are already compressed; recompressing wastes time.
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut part = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, content: &str| -> Result<()> {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    };

    part(&mut zip, "[Content_Types].xml", &content_types(slides))?;
    part(&mut zip, "_rels/.rels", &package_rels())?;
    part(&mut zip, "docProps/core.xml", &core_props())?;
    part(&mut zip, "docProps/app.xml", &app_props(slides.len()))?;
    part(
        &mut zip,
        "ppt/presentation.xml",
        &presentation(slides.len(), slide_width, slide_height),
    )?;
    part(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        &presentation_rels(slides.len()),
    )?;
    part(&mut zip, "ppt/slideMasters/slideMaster1.xml", &slide_master())?;
    part(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        &slide_master_rels(),
    )?;
    part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &slide_layout())?;
    part(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        &slide_layout_rels(),
    )?;
    part(&mut zip, "ppt/theme/theme1.xml", &theme())?;

    for (index, slide) in slides.iter().enumerate() {
        let n = index + 1;
        part(&mut zip, &format!("ppt/slides/slide{}.xml", n), &slide_xml(slide))?;
        part(
            &mut zip,
            &format!("ppt/slides/_rels/slide{}.xml.rels", n),
            &slide_rels(n, slide.image_extension),
        )?;
        zip.start_file(
            format!("ppt/media/image{}.{}", n, slide.image_extension),
            stored,
        )?;
        zip.write_all(slide.image)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn content_types(slides: &[Slide]) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    );
    xml.push_str("<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>");
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>");
    xml.push_str("<Default Extension=\"png\" ContentType=\"image/png\"/>");
    xml.push_str("<Default Extension=\"jpeg\" ContentType=\"image/jpeg\"/>");
    xml.push_str("<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>");
    xml.push_str("<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>");
    xml.push_str("<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>");
    xml.push_str("<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>");
    for n in 1..=slides.len() {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            n
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>\
</Relationships>",
        XML_DECL
    )
}

fn core_props() -> String {
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    format!(
        "{}<cp:coreProperties \
xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
<dc:title>PDF to PowerPoint</dc:title>\
<dc:subject>Converted from PDF</dc:subject>\
<dc:creator>pdfslides</dc:creator>\
<cp:lastModifiedBy>pdfslides</cp:lastModifiedBy>\
<dcterms:created xsi:type=\"dcterms:W3CDTF\">{now}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{now}</dcterms:modified>\
</cp:coreProperties>",
        XML_DECL
    )
}

fn app_props(slide_count: usize) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
<Application>pdfslides</Application>\
<Company>pdfslides</Company>\
<Slides>{}</Slides>\
</Properties>",
        XML_DECL, slide_count
    )
}

fn presentation(slide_count: usize, slide_width: f64, slide_height: f64) -> String {
    let mut xml = format!(
        "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">",
        XML_DECL, NS_A, NS_R, NS_P
    );
    xml.push_str(
        "<p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>",
    );
    xml.push_str("<p:sldIdLst>");
    for n in 0..slide_count {
        xml.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + n,
            n + 2
        ));
    }
    xml.push_str("</p:sldIdLst>");
    xml.push_str(&format!(
        "<p:sldSz cx=\"{}\" cy=\"{}\"/>",
        emu(slide_width),
        emu(slide_height)
    ));
    xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
    xml.push_str("</p:presentation>");
    xml
}

fn presentation_rels(slide_count: usize) -> String {
    let mut xml = format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        XML_DECL
    );
    xml.push_str("<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>");
    for n in 0..slide_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{}.xml\"/>",
            n + 2,
            n + 1
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"theme/theme1.xml\"/>",
        slide_count + 2
    ));
    xml.push_str("</Relationships>");
    xml
}

/// Empty shape-tree group required at the top of every cSld.
fn empty_sp_tree_header() -> &'static str {
    "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
<a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>"
}

fn slide_master() -> String {
    format!(
        "{}<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
<p:cSld><p:spTree>{}</p:spTree></p:cSld>\
<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
<p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
</p:sldMaster>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree_header()
    )
}

fn slide_master_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
</Relationships>",
        XML_DECL
    )
}

fn slide_layout() -> String {
    format!(
        "{}<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" type=\"blank\" preserve=\"1\">\
<p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sldLayout>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree_header()
    )
}

fn slide_layout_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
</Relationships>",
        XML_DECL
    )
}

fn theme() -> String {
    format!(
        "{}<a:theme xmlns:a=\"{}\" name=\"Office\"><a:themeElements>\
<a:clrScheme name=\"Office\">\
<a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
<a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
<a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
<a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
<a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
<a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
<a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
<a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
<a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
<a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
<a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
<a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
</a:clrScheme>\
<a:fontScheme name=\"Office\">\
<a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
<a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
</a:fontScheme>\
<a:fmtScheme name=\"Office\">\
<a:fillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:fillStyleLst>\
<a:lnStyleLst>\
<a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
<a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
</a:lnStyleLst>\
<a:effectStyleLst>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
<a:effectStyle><a:effectLst/></a:effectStyle>\
</a:effectStyleLst>\
<a:bgFillStyleLst>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
</a:bgFillStyleLst>\
</a:fmtScheme>\
</a:themeElements></a:theme>",
        XML_DECL, NS_A
    )
}

fn slide_xml(slide: &Slide) -> String {
    let mut xml = format!(
        "{}<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"><p:cSld><p:spTree>",
        XML_DECL, NS_A, NS_R, NS_P
    );
    xml.push_str(empty_sp_tree_header());

    xml.push_str(&picture_xml(slide));

    // Shape ids: 1 is the group, 2 the picture, overlays and label follow.
    let mut shape_id = 3u32;
    for text_box in &slide.text_boxes {
        xml.push_str(&text_box_xml(text_box, shape_id));
        shape_id += 1;
    }
    xml.push_str(&label_xml(&slide.label, shape_id));

    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    xml
}

fn picture_xml(slide: &Slide) -> String {
    let rect = &slide.image_rect;
    format!(
        "<p:pic>\
<p:nvPicPr><p:cNvPr id=\"2\" name=\"Page {}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
<p:blipFill><a:blip r:embed=\"rId2\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
</p:pic>",
        slide.page_number,
        emu(rect.x),
        emu(rect.y),
        emu(rect.width),
        emu(rect.height)
    )
}

fn text_box_xml(text_box: &TextBox, shape_id: u32) -> String {
    format!(
        "<p:sp>\
<p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Text {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
<a:noFill/><a:ln><a:noFill/></a:ln></p:spPr>\
<p:txBody>\
<a:bodyPr wrap=\"none\" lIns=\"0\" tIns=\"0\" rIns=\"0\" bIns=\"0\" anchor=\"t\"/>\
<a:lstStyle/>\
<a:p><a:pPr algn=\"l\"/><a:r>\
<a:rPr lang=\"en-US\" sz=\"{sz}\" dirty=\"0\">\
<a:solidFill><a:srgbClr val=\"000000\"/></a:solidFill>\
<a:latin typeface=\"{font}\"/>\
</a:rPr>\
<a:t>{text}</a:t>\
</a:r></a:p>\
</p:txBody>\
</p:sp>",
        id = shape_id,
        x = emu(text_box.x),
        y = emu(text_box.y),
        cx = emu(text_box.width).max(1),
        cy = emu(text_box.height).max(1),
        sz = sz(text_box.font_size),
        font = text_box.font_family,
        text = escape(text_box.text.as_str())
    )
}

fn label_xml(label: &Label, shape_id: u32) -> String {
    format!(
        "<p:sp>\
<p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Page Number\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
<a:noFill/><a:ln><a:noFill/></a:ln></p:spPr>\
<p:txBody>\
<a:bodyPr lIns=\"0\" tIns=\"0\" rIns=\"0\" bIns=\"0\" anchor=\"b\"/>\
<a:lstStyle/>\
<a:p><a:pPr algn=\"r\"/><a:r>\
<a:rPr lang=\"en-US\" sz=\"{sz}\" dirty=\"0\">\
<a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>\
</a:rPr>\
<a:t>{text}</a:t>\
</a:r></a:p>\
</p:txBody>\
</p:sp>",
        id = shape_id,
        x = emu(label.x),
        y = emu(label.y),
        cx = emu(label.width),
        cy = emu(label.height),
        sz = sz(label.font_size),
        color = label.color,
        text = escape(label.text.as_str())
    )
}

fn slide_rels(n: usize, image_extension: &str) -> String {
    format!(
        "{}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"../media/image{}.{}\"/>\
</Relationships>",
        XML_DECL, n, image_extension
    )
}
