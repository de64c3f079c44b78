//! OPC package assembly for .pptx output.
//!
//! Builds the whole zip container in memory: content types, relationship
//! parts, the presentation part, static scaffolding (master, layouts, themes,
//! notes master), one slide part per rendered slide, and one notes-slide part
//! per slide that carries speaker notes.

use crate::deck::{Deck, DeckRenderer, SlideLayout};
use crate::error::Result;
use crate::pptx::{pres, slide, template};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Content types for the parts this package writes.
pub(crate) mod content_type {
    pub const PRESENTATION_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const NOTES_SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
    pub const NOTES_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// Relationship types for the parts this package writes.
pub(crate) mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const NOTES_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";
    pub const NOTES_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}

/// Renders a [`Deck`] into a PresentationML package.
///
/// # Examples
///
/// ```
/// use pitaya::{DeckBuilder, DeckRenderer, PptxRenderer, SlideSpec};
///
/// # fn main() -> pitaya::Result<()> {
/// let deck = DeckBuilder::build(&[SlideSpec::titled("Hello")])?;
/// let bytes = PptxRenderer::default().render(&deck)?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PptxRenderer;

impl DeckRenderer for PptxRenderer {
    fn render(&self, deck: &Deck) -> Result<Vec<u8>> {
        let mut writer = PackageWriter::new();

        // Notes parts are numbered sequentially over the slides that have notes.
        let notes_part_index = assign_notes_parts(deck);

        // Relationship IDs in the presentation part: master first, then the
        // slides in order, then the notes master.
        let slide_rel_ids: Vec<String> = (0..deck.slide_count())
            .map(|i| format!("rId{}", i + 2))
            .collect();
        let notes_master_rel_id = format!("rId{}", deck.slide_count() + 2);

        writer.add_part(
            "[Content_Types].xml",
            content_types_xml(deck, &notes_part_index)?.as_bytes(),
        )?;
        writer.add_part("_rels/.rels", root_rels_xml()?.as_bytes())?;

        writer.add_part(
            "ppt/presentation.xml",
            pres::presentation_xml(deck, &slide_rel_ids, &notes_master_rel_id)?.as_bytes(),
        )?;
        writer.add_part(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels_xml(deck, &slide_rel_ids, &notes_master_rel_id)?.as_bytes(),
        )?;

        // Static scaffolding
        writer.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            template::slide_master_xml().as_bytes(),
        )?;
        writer.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            relationships_xml(&[
                ("rId1", rel_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", rel_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
                ("rId3", rel_type::THEME, "../theme/theme1.xml"),
            ])?
            .as_bytes(),
        )?;
        writer.add_part(
            "ppt/slideLayouts/slideLayout1.xml",
            template::title_layout_xml().as_bytes(),
        )?;
        writer.add_part(
            "ppt/slideLayouts/slideLayout2.xml",
            template::body_layout_xml().as_bytes(),
        )?;
        for layout in 1..=2 {
            writer.add_part(
                &format!("ppt/slideLayouts/_rels/slideLayout{layout}.xml.rels"),
                relationships_xml(&[(
                    "rId1",
                    rel_type::SLIDE_MASTER,
                    "../slideMasters/slideMaster1.xml",
                )])?
                .as_bytes(),
            )?;
        }
        writer.add_part("ppt/theme/theme1.xml", template::theme_xml().as_bytes())?;
        writer.add_part("ppt/theme/theme2.xml", template::theme_xml().as_bytes())?;
        writer.add_part(
            "ppt/notesMasters/notesMaster1.xml",
            template::notes_master_xml().as_bytes(),
        )?;
        writer.add_part(
            "ppt/notesMasters/_rels/notesMaster1.xml.rels",
            relationships_xml(&[("rId1", rel_type::THEME, "../theme/theme2.xml")])?.as_bytes(),
        )?;

        // Slides and their notes
        for (index, rendered) in deck.slides().iter().enumerate() {
            writer.add_part(
                &format!("ppt/slides/slide{}.xml", index + 1),
                slide::slide_xml(rendered)?.as_bytes(),
            )?;
            writer.add_part(
                &format!("ppt/slides/_rels/slide{}.xml.rels", index + 1),
                slide_rels_xml(rendered.layout(), notes_part_index[index])?.as_bytes(),
            )?;

            if let Some(notes_number) = notes_part_index[index]
                && let Some(notes) = slide::notes_xml(rendered)
            {
                writer.add_part(
                    &format!("ppt/notesSlides/notesSlide{notes_number}.xml"),
                    notes?.as_bytes(),
                )?;
                writer.add_part(
                    &format!("ppt/notesSlides/_rels/notesSlide{notes_number}.xml.rels"),
                    relationships_xml(&[
                        ("rId1", rel_type::NOTES_MASTER, "../notesMasters/notesMaster1.xml"),
                        (
                            "rId2",
                            rel_type::SLIDE,
                            &format!("../slides/slide{}.xml", index + 1),
                        ),
                    ])?
                    .as_bytes(),
                )?;
            }
        }

        // Document properties
        writer.add_part("docProps/core.xml", core_props_xml(deck)?.as_bytes())?;
        writer.add_part("docProps/app.xml", app_props_xml(deck)?.as_bytes())?;

        writer.finish_to_bytes()
    }
}

// For each slide, the 1-based number of its notes part, if it has notes.
fn assign_notes_parts(deck: &Deck) -> Vec<Option<usize>> {
    let mut next = 0usize;
    deck.slides()
        .iter()
        .map(|s| {
            s.has_notes().then(|| {
                next += 1;
                next
            })
        })
        .collect()
}

fn content_types_xml(deck: &Deck, notes_part_index: &[Option<usize>]) -> Result<String> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut write_override = |part_name: &str, content_type: &str| -> Result<()> {
        write!(
            xml,
            r#"<Override PartName="{part_name}" ContentType="{content_type}"/>"#
        )?;
        Ok(())
    };

    write_override("/ppt/presentation.xml", content_type::PRESENTATION_MAIN)?;
    write_override("/ppt/slideMasters/slideMaster1.xml", content_type::SLIDE_MASTER)?;
    write_override("/ppt/slideLayouts/slideLayout1.xml", content_type::SLIDE_LAYOUT)?;
    write_override("/ppt/slideLayouts/slideLayout2.xml", content_type::SLIDE_LAYOUT)?;
    write_override("/ppt/theme/theme1.xml", content_type::THEME)?;
    write_override("/ppt/theme/theme2.xml", content_type::THEME)?;
    write_override("/ppt/notesMasters/notesMaster1.xml", content_type::NOTES_MASTER)?;
    for index in 0..deck.slide_count() {
        write_override(&format!("/ppt/slides/slide{}.xml", index + 1), content_type::SLIDE)?;
    }
    for notes_number in notes_part_index.iter().flatten() {
        write_override(
            &format!("/ppt/notesSlides/notesSlide{notes_number}.xml"),
            content_type::NOTES_SLIDE,
        )?;
    }
    write_override("/docProps/core.xml", content_type::CORE_PROPERTIES)?;
    write_override("/docProps/app.xml", content_type::EXTENDED_PROPERTIES)?;

    xml.push_str("</Types>");
    Ok(xml)
}

fn root_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1", rel_type::OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", rel_type::CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", rel_type::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn presentation_rels_xml(
    deck: &Deck,
    slide_rel_ids: &[String],
    notes_master_rel_id: &str,
) -> Result<String> {
    let mut rels: Vec<(&str, &str, String)> = Vec::with_capacity(deck.slide_count() + 2);

    rels.push((
        "rId1",
        rel_type::SLIDE_MASTER,
        "slideMasters/slideMaster1.xml".to_string(),
    ));
    for (index, rel_id) in slide_rel_ids.iter().enumerate() {
        rels.push((
            rel_id.as_str(),
            rel_type::SLIDE,
            format!("slides/slide{}.xml", index + 1),
        ));
    }
    rels.push((
        notes_master_rel_id,
        rel_type::NOTES_MASTER,
        "notesMasters/notesMaster1.xml".to_string(),
    ));

    let borrowed: Vec<(&str, &str, &str)> = rels
        .iter()
        .map(|(id, ty, target)| (*id, *ty, target.as_str()))
        .collect();
    relationships_xml(&borrowed)
}

// The slide's layout relationship is always rId1; a notes relationship,
// when present, is rId2.
fn slide_rels_xml(layout: SlideLayout, notes_number: Option<usize>) -> Result<String> {
    let layout_target = match layout {
        SlideLayout::Title => "../slideLayouts/slideLayout1.xml",
        SlideLayout::Body => "../slideLayouts/slideLayout2.xml",
    };

    match notes_number {
        Some(n) => relationships_xml(&[
            ("rId1", rel_type::SLIDE_LAYOUT, layout_target),
            (
                "rId2",
                rel_type::NOTES_SLIDE,
                &format!("../notesSlides/notesSlide{n}.xml"),
            ),
        ]),
        None => relationships_xml(&[("rId1", rel_type::SLIDE_LAYOUT, layout_target)]),
    }
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"/>"#
        )?;
    }
    xml.push_str("</Relationships>");

    Ok(xml)
}

fn core_props_xml(deck: &Deck) -> Result<String> {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let title = deck
        .slides()
        .first()
        .map(|s| crate::xml::escape_xml(s.title()))
        .unwrap_or_default();

    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    write!(xml, "<dc:title>{title}</dc:title>")?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>"#
    )?;
    write!(
        xml,
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>"#
    )?;
    xml.push_str("</cp:coreProperties>");

    Ok(xml)
}

fn app_props_xml(deck: &Deck) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    xml.push_str("<Application>pitaya</Application>");
    write!(xml, "<Slides>{}</Slides>", deck.slide_count())?;
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    xml.push_str("</Properties>");

    Ok(xml)
}

/// ZIP writer for OPC packages, assembling in memory.
struct PackageWriter<W: Write + std::io::Seek> {
    zip_writer: ZipWriter<W>,
}

impl PackageWriter<Cursor<Vec<u8>>> {
    /// Create a new package writer that writes to memory.
    fn new() -> Self {
        Self {
            zip_writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Finish the archive and return the bytes.
    fn finish_to_bytes(self) -> Result<Vec<u8>> {
        let cursor = self.zip_writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl<W: Write + std::io::Seek> PackageWriter<W> {
    /// Add a part to the package.
    fn add_part(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(path, options)?;
        self.zip_writer.write_all(content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckBuilder;
    use crate::spec::SlideSpec;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_deck() -> Deck {
        DeckBuilder::build(&[
            SlideSpec::titled("Cover")
                .with_subtitle("sub")
                .with_notes("hello"),
            SlideSpec::titled("Content").with_bullet("a"),
        ])
        .unwrap()
    }

    fn part_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_render_produces_zip() {
        let bytes = PptxRenderer::default().render(&sample_deck()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_expected_parts_present() {
        let bytes = PptxRenderer::default().render(&sample_deck()).unwrap();
        let names = part_names(&bytes);
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/theme/theme1.xml",
            "ppt/notesMasters/notesMaster1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/notesSlides/notesSlide1.xml",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        // Only the first slide has notes.
        assert!(!names.iter().any(|n| n == "ppt/notesSlides/notesSlide2.xml"));
    }

    #[test]
    fn test_content_types_cover_every_slide() {
        let deck = sample_deck();
        let bytes = PptxRenderer::default().render(&deck).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();

        assert!(content.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(content.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(content.contains(r#"PartName="/ppt/notesSlides/notesSlide1.xml""#));
    }

    #[test]
    fn test_slide_rels_point_at_layout_by_position() {
        let deck = sample_deck();
        let bytes = PptxRenderer::default().render(&deck).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut first = String::new();
        archive
            .by_name("ppt/slides/_rels/slide1.xml.rels")
            .unwrap()
            .read_to_string(&mut first)
            .unwrap();
        assert!(first.contains("slideLayout1.xml"));
        assert!(first.contains("notesSlide1.xml"));

        let mut second = String::new();
        archive
            .by_name("ppt/slides/_rels/slide2.xml.rels")
            .unwrap()
            .read_to_string(&mut second)
            .unwrap();
        assert!(second.contains("slideLayout2.xml"));
        assert!(!second.contains("notesSlide"));
    }
}
