/// Slide and notes-slide XML generation.
use crate::deck::{RenderedSlide, SlideLayout};
use crate::error::Result;
use crate::xml::escape_xml;
use std::fmt::Write as FmtWrite;

// Font sizes in hundredths of a point, fixed per placeholder role.
pub(crate) const SZ_TITLE_SLIDE_TITLE: u32 = 5200;
pub(crate) const SZ_TITLE_SLIDE_SUBTITLE: u32 = 1800;
pub(crate) const SZ_BODY_SLIDE_TITLE: u32 = 4000;
pub(crate) const SZ_BULLET: u32 = 2000;

/// Generate the slide part XML for a rendered slide.
pub(crate) fn slide_xml(slide: &RenderedSlide) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
    );
    xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    write_group_props(&mut xml);

    match slide.layout() {
        SlideLayout::Title => {
            write_title_shape(&mut xml, "ctrTitle", slide.title(), SZ_TITLE_SLIDE_TITLE)?;
            write_subtitle_shape(&mut xml, slide.subtitle())?;
        },
        SlideLayout::Body => {
            write_title_shape(&mut xml, "title", slide.title(), SZ_BODY_SLIDE_TITLE)?;
            write_body_shape(&mut xml, slide.bullets())?;
        },
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sld>");

    Ok(xml)
}

/// Generate the notes-slide part XML, or `None` if the slide has no notes.
pub(crate) fn notes_xml(slide: &RenderedSlide) -> Option<Result<String>> {
    let notes_text = slide.notes()?;

    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<p:notes xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
    );
    xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    write_group_props(&mut xml);

    // Notes text shape
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="Notes Placeholder 1"/>"#);
    xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
    xml.push_str("<p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr>");
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    if let Err(e) = write_text_paragraphs(&mut xml, notes_text, None, false) {
        return Some(Err(e));
    }
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:notes>");

    Some(Ok(xml))
}

// Group shape properties opening every spTree (required by the schema).
fn write_group_props(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str("<a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/>"#);
    xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
    xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm>");
    xml.push_str("</p:grpSpPr>");
}

/// Write the title placeholder shape.
///
/// `ph_type` is "ctrTitle" on the title layout and "title" on the body layout.
fn write_title_shape(xml: &mut String, ph_type: &str, title: &str, sz: u32) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    // ID must be unique within the slide. The group shape uses id=1.
    xml.push_str(r#"<p:cNvPr id="2" name="Title 1"/>"#);
    xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
    write!(xml, r#"<p:nvPr><p:ph type="{ph_type}"/></p:nvPr>"#)?;
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    write_text_paragraphs(xml, title, Some(sz), false)?;
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    Ok(())
}

/// Write the subtitle placeholder shape (title layout only).
fn write_subtitle_shape(xml: &mut String, subtitle: &str) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="3" name="Subtitle 2"/>"#);
    xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
    xml.push_str(r#"<p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    write_text_paragraphs(xml, subtitle, Some(SZ_TITLE_SLIDE_SUBTITLE), false)?;
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    Ok(())
}

/// Write the body content placeholder with one paragraph per bullet.
///
/// Bullets render left-aligned at outline level 0. An empty bullet list
/// produces the placeholder with a single empty paragraph, mirroring what a
/// cleared text frame looks like.
fn write_body_shape(xml: &mut String, bullets: &[String]) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="3" name="Content Placeholder 2"/>"#);
    xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
    xml.push_str(r#"<p:nvPr><p:ph idx="1"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    if bullets.is_empty() {
        xml.push_str("<a:p/>");
    } else {
        for bullet in bullets {
            write_paragraph(xml, bullet, Some(SZ_BULLET), true)?;
        }
    }
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    Ok(())
}

// Splits on '\n' so multi-line subtitle and notes text becomes successive
// paragraphs rather than a literal newline inside one run.
fn write_text_paragraphs(
    xml: &mut String,
    text: &str,
    sz: Option<u32>,
    left_align: bool,
) -> Result<()> {
    for line in text.split('\n') {
        write_paragraph(xml, line, sz, left_align)?;
    }
    Ok(())
}

fn write_paragraph(xml: &mut String, text: &str, sz: Option<u32>, left_align: bool) -> Result<()> {
    if text.is_empty() {
        xml.push_str("<a:p/>");
        return Ok(());
    }

    xml.push_str("<a:p>");
    if left_align {
        xml.push_str(r#"<a:pPr algn="l"/>"#);
    }
    xml.push_str("<a:r>");
    match sz {
        Some(sz) => write!(xml, r#"<a:rPr lang="en-US" sz="{sz}" dirty="0"/>"#)?,
        None => xml.push_str(r#"<a:rPr lang="en-US" dirty="0"/>"#),
    }
    write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
    xml.push_str("</a:r>");
    xml.push_str("</a:p>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckBuilder;

    #[test]
    fn test_title_slide_xml() {
        let mut builder = DeckBuilder::new();
        builder.add_title_slide("Launch", "Spring release").unwrap();
        let deck = builder.finish();

        let xml = slide_xml(&deck.slides()[0]).unwrap();
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains(r#"sz="5200""#));
        assert!(xml.contains(r#"sz="1800""#));
        assert!(xml.contains("<a:t>Launch</a:t>"));
        assert!(xml.contains("<a:t>Spring release</a:t>"));
    }

    #[test]
    fn test_body_slide_xml_has_one_paragraph_per_bullet() {
        let mut builder = DeckBuilder::new();
        builder
            .add_body_slide("Plan", &["alpha".into(), "beta".into()])
            .unwrap();
        let deck = builder.finish();

        let xml = slide_xml(&deck.slides()[0]).unwrap();
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"sz="4000""#));
        assert_eq!(xml.matches(r#"<a:pPr algn="l"/>"#).count(), 2);
        assert!(xml.contains("<a:t>alpha</a:t>"));
        assert!(xml.contains("<a:t>beta</a:t>"));
    }

    #[test]
    fn test_empty_bullets_render_empty_placeholder() {
        let mut builder = DeckBuilder::new();
        builder.add_body_slide("Bare", &[]).unwrap();
        let deck = builder.finish();

        let xml = slide_xml(&deck.slides()[0]).unwrap();
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(!xml.contains(r#"sz="2000""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut builder = DeckBuilder::new();
        builder.add_body_slide("Q & A", &["<tag>".into()]).unwrap();
        let deck = builder.finish();

        let xml = slide_xml(&deck.slides()[0]).unwrap();
        assert!(xml.contains("<a:t>Q &amp; A</a:t>"));
        assert!(xml.contains("<a:t>&lt;tag&gt;</a:t>"));
    }

    #[test]
    fn test_multiline_subtitle_becomes_paragraphs() {
        let mut builder = DeckBuilder::new();
        builder
            .add_title_slide("Intro", "Line one\nLine two")
            .unwrap();
        let deck = builder.finish();

        let xml = slide_xml(&deck.slides()[0]).unwrap();
        assert!(xml.contains("<a:t>Line one</a:t>"));
        assert!(xml.contains("<a:t>Line two</a:t>"));
        assert!(!xml.contains("Line one\nLine two"));
    }

    #[test]
    fn test_notes_xml_only_when_present() {
        let mut builder = DeckBuilder::new();
        builder.add_body_slide("First", &[]).unwrap();
        builder
            .add_body_slide("Second", &[])
            .unwrap()
            .set_notes("Keep it short.");
        let deck = builder.finish();

        assert!(notes_xml(&deck.slides()[0]).is_none());
        let xml = notes_xml(&deck.slides()[1]).unwrap().unwrap();
        assert!(xml.contains("<p:notes "));
        assert!(xml.contains("<a:t>Keep it short.</a:t>"));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
    }
}
