//! Read-back support for generated decks.
//!
//! [`DeckSummary`] re-opens a .pptx package and exposes the observable
//! content of each slide: layout kind, title, subtitle, bullet paragraphs,
//! and speaker notes, in presentation order. This is the surface the
//! round-trip tests (and any caller verifying a generated file) work
//! against; it is a content view, not a full document model.

use crate::deck::SlideLayout;
use crate::error::{DeckError, Result};
use crate::xml::unescape_xml;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// The observable content of one slide in a generated deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSummary {
    /// Layout the slide is based on, per its layout relationship
    pub layout: SlideLayout,
    /// Title text (empty if the slide has no title placeholder)
    pub title: String,
    /// Subtitle text, if present and non-empty
    pub subtitle: Option<String>,
    /// Bullet paragraphs with text, in order
    pub bullets: Vec<String>,
    /// Speaker notes, if the slide has a notes part with text
    pub notes: Option<String>,
}

/// The observable content of a generated deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    slides: Vec<SlideSummary>,
}

impl DeckSummary {
    /// Open a .pptx file and summarize its slides.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Summarize a .pptx package from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let pres_rels =
            parse_relationships(&read_part(&mut archive, "ppt/_rels/presentation.xml.rels")?)?;
        let slide_rel_ids = parse_slide_id_list(&read_part(&mut archive, "ppt/presentation.xml")?)?;

        let mut slides = Vec::with_capacity(slide_rel_ids.len());
        for rel_id in &slide_rel_ids {
            let target = pres_rels
                .iter()
                .find(|rel| &rel.id == rel_id && rel.rel_type.ends_with("/slide"))
                .map(|rel| rel.target.as_str())
                .ok_or_else(|| {
                    DeckError::InvalidPackage(format!(
                        "presentation references unknown slide relationship {rel_id}"
                    ))
                })?;
            let part_name = resolve_target("ppt", target);
            slides.push(read_slide(&mut archive, &part_name)?);
        }

        Ok(Self { slides })
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get the slide summaries in presentation order.
    pub fn slides(&self) -> &[SlideSummary] {
        &self.slides
    }
}

/// One entry of a relationships part.
#[derive(Debug)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(name)?;
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn read_slide(archive: &mut ZipArchive<Cursor<&[u8]>>, part_name: &str) -> Result<SlideSummary> {
    let slide_xml = read_part(archive, part_name)?;
    let rels = parse_relationships(&read_part(archive, &rels_part_name(part_name))?)?;

    let base_dir = part_dir(part_name);

    // The layout relationship tells us which template the slide is based on.
    let layout_rel = rels
        .iter()
        .find(|rel| rel.rel_type.ends_with("/slideLayout"))
        .ok_or_else(|| {
            DeckError::InvalidPackage(format!("{part_name} has no slide layout relationship"))
        })?;
    let layout = if layout_rel.target.ends_with("slideLayout1.xml") {
        SlideLayout::Title
    } else {
        SlideLayout::Body
    };

    let shapes = parse_shape_texts(&slide_xml)?;
    let mut title = String::new();
    let mut subtitle = None;
    let mut bullets = Vec::new();
    for shape in &shapes {
        match shape.ph_type.as_deref() {
            Some("ctrTitle") | Some("title") => title = shape.joined_text(),
            Some("subTitle") => {
                let text = shape.joined_text();
                if !text.is_empty() {
                    subtitle = Some(text);
                }
            },
            _ if shape.ph_idx.is_some() => {
                bullets.extend(shape.paragraphs.iter().filter(|p| !p.is_empty()).cloned());
            },
            _ => {},
        }
    }

    let notes = match rels.iter().find(|rel| rel.rel_type.ends_with("/notesSlide")) {
        Some(rel) => {
            let notes_xml = read_part(archive, &resolve_target(&base_dir, &rel.target))?;
            let text = parse_shape_texts(&notes_xml)?
                .iter()
                .find(|shape| shape.ph_idx.is_some() || shape.ph_type.as_deref() == Some("body"))
                .map(|shape| shape.joined_text())
                .unwrap_or_default();
            (!text.is_empty()).then_some(text)
        },
        None => None,
    };

    Ok(SlideSummary {
        layout,
        title,
        subtitle,
        bullets,
        notes,
    })
}

// "ppt/slides/slide1.xml" -> "ppt/slides/_rels/slide1.xml.rels"
fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part_name}.rels"),
    }
}

fn part_dir(part_name: &str) -> String {
    part_name
        .rsplit_once('/')
        .map(|(dir, _)| dir.to_string())
        .unwrap_or_default()
}

// Resolve a relationship target against the directory of its source part.
// Targets in OPC are relative, e.g. "../notesSlides/notesSlide1.xml".
fn resolve_target(base_dir: &str, target: &str) -> String {
    let mut dir = base_dir.to_string();
    let mut rest = target;
    while let Some(stripped) = rest.strip_prefix("../") {
        dir = part_dir(&dir);
        rest = stripped;
    }
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut rels = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| DeckError::Xml(e.to_string()))?;
                        let value = String::from_utf8_lossy(&attr.value).into_owned();
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            _ => {},
                        }
                    }
                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(rels)
}

// Relationship IDs of the slides, in p:sldIdLst order.
fn parse_slide_id_list(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"sldId" {
                    for attr in e.attributes() {
                        let attr = attr.map_err(|e| DeckError::Xml(e.to_string()))?;
                        if attr.key.as_ref() == b"r:id" {
                            ids.push(String::from_utf8_lossy(&attr.value).into_owned());
                        }
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

/// Text content of one shape, as parsed from a slide or notes part.
#[derive(Debug, Default)]
struct ShapeText {
    ph_type: Option<String>,
    ph_idx: Option<String>,
    paragraphs: Vec<String>,
}

impl ShapeText {
    // Paragraphs with text, joined the way multi-line text was split on write.
    fn joined_text(&self) -> String {
        self.paragraphs
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_shape_texts(xml: &[u8]) -> Result<Vec<ShapeText>> {
    let mut reader = Reader::from_reader(xml);

    let mut shapes = Vec::new();
    let mut current: Option<ShapeText> = None;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sp" => current = Some(ShapeText::default()),
                b"p" => {
                    if current.is_some() {
                        paragraph = Some(String::new());
                    }
                },
                b"t" => in_text = true,
                b"ph" => read_ph_attributes(&e, current.as_mut())?,
                _ => {},
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"ph" => read_ph_attributes(&e, current.as_mut())?,
                b"p" => {
                    if let Some(shape) = current.as_mut() {
                        shape.paragraphs.push(String::new());
                    }
                },
                _ => {},
            },
            Ok(Event::Text(e)) if in_text => {
                let text = std::str::from_utf8(e.as_ref())
                    .map_err(|e| DeckError::Xml(e.to_string()))?;
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&unescape_xml(text));
                }
            },
            // Entity references inside <a:t> arrive as their own event; put the
            // `&name;` form back through the same unescaper as plain text.
            Ok(Event::GeneralRef(e)) if in_text => {
                let name = e.decode().map_err(|e| DeckError::Xml(e.to_string()))?;
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&unescape_xml(&format!("&{name};")));
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(shape), Some(p)) = (current.as_mut(), paragraph.take()) {
                        shape.paragraphs.push(p);
                    }
                },
                b"sp" => {
                    if let Some(shape) = current.take() {
                        shapes.push(shape);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    Ok(shapes)
}

fn read_ph_attributes(
    e: &quick_xml::events::BytesStart<'_>,
    current: Option<&mut ShapeText>,
) -> Result<()> {
    let Some(shape) = current else {
        return Ok(());
    };
    for attr in e.attributes() {
        let attr = attr.map_err(|e| DeckError::Xml(e.to_string()))?;
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.as_ref() {
            b"type" => shape.ph_type = Some(value),
            b"idx" => shape.ph_idx = Some(value),
            _ => {},
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckBuilder;
    use crate::spec::SlideSpec;
    use proptest::prelude::*;

    fn summarize(specs: &[SlideSpec]) -> DeckSummary {
        let deck = DeckBuilder::build(specs).unwrap();
        DeckSummary::from_bytes(&deck.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_round_trip_content() {
        let specs = [
            SlideSpec::titled("MagdyDiner - Android App")
                .with_subtitle("Final Project Presentation\nPresenter: Magdy")
                .with_notes("Introduce yourself."),
            SlideSpec::titled("Problem & Goals")
                .with_bullet("Problem statement: the user pain the app solves")
                .with_bullet("Success criteria: stable build"),
            SlideSpec::titled("Known Issues & Fixes"),
        ];
        let summary = summarize(&specs);

        assert_eq!(summary.slide_count(), 3);

        let first = &summary.slides()[0];
        assert_eq!(first.layout, SlideLayout::Title);
        assert_eq!(first.title, "MagdyDiner - Android App");
        assert_eq!(
            first.subtitle.as_deref(),
            Some("Final Project Presentation\nPresenter: Magdy")
        );
        assert_eq!(first.notes.as_deref(), Some("Introduce yourself."));

        let second = &summary.slides()[1];
        assert_eq!(second.layout, SlideLayout::Body);
        assert_eq!(second.title, "Problem & Goals");
        assert_eq!(second.bullets.len(), 2);
        assert_eq!(
            second.bullets[0],
            "Problem statement: the user pain the app solves"
        );
        assert!(second.notes.is_none());

        let third = &summary.slides()[2];
        assert_eq!(third.title, "Known Issues & Fixes");
        assert!(third.bullets.is_empty());
    }

    #[test]
    fn test_single_slide_qa_scenario() {
        // First spec always renders on the title layout, even with bullets.
        let specs = [SlideSpec::titled("Q & A")
            .with_bullet("Thank you — questions welcome")
            .with_notes("Invite questions.")];
        let summary = summarize(&specs);

        assert_eq!(summary.slide_count(), 1);
        let slide = &summary.slides()[0];
        assert_eq!(slide.layout, SlideLayout::Title);
        assert_eq!(slide.title, "Q & A");
        assert_eq!(slide.notes.as_deref(), Some("Invite questions."));
    }

    #[test]
    fn test_thirteen_specs_produce_thirteen_slides() {
        let specs: Vec<SlideSpec> = (1..=13)
            .map(|i| SlideSpec::titled(format!("Slide {i}")))
            .collect();
        let summary = summarize(&specs);
        assert_eq!(summary.slide_count(), 13);
        assert_eq!(summary.slides()[12].title, "Slide 13");
    }

    #[test]
    fn test_rebuild_is_content_idempotent() {
        let specs = [
            SlideSpec::titled("Deploy").with_subtitle("v2"),
            SlideSpec::titled("Steps").with_bullets(["tag", "push"]),
        ];

        let first = summarize(&specs);
        let second = summarize(&specs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_and_reopen_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");

        let specs = [SlideSpec::titled("Persisted").with_notes("on disk")];
        let deck = DeckBuilder::build(&specs).unwrap();
        deck.save(&path).unwrap();
        // Saving again overwrites in place.
        deck.save(&path).unwrap();

        let summary = DeckSummary::from_path(&path).unwrap();
        assert_eq!(summary.slide_count(), 1);
        assert_eq!(summary.slides()[0].notes.as_deref(), Some("on disk"));
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9&<>'][A-Za-z0-9 &<>'.,:-]{0,14}[A-Za-z0-9!?.]"
    }

    fn arb_spec() -> impl Strategy<Value = SlideSpec> {
        (
            text_strategy(),
            prop::collection::vec(text_strategy(), 0..4),
            prop::option::of(text_strategy()),
        )
            .prop_map(|(title, bullets, notes)| {
                let mut spec = SlideSpec::titled(title).with_bullets(bullets);
                if let Some(notes) = notes {
                    spec = spec.with_notes(notes);
                }
                spec
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_round_trip_preserves_order_and_content(
            specs in prop::collection::vec(arb_spec(), 1..8)
        ) {
            let summary = summarize(&specs);
            prop_assert_eq!(summary.slide_count(), specs.len());

            for (index, (spec, slide)) in specs.iter().zip(summary.slides()).enumerate() {
                prop_assert_eq!(&slide.title, &spec.title);
                let expected_layout = if index == 0 {
                    SlideLayout::Title
                } else {
                    SlideLayout::Body
                };
                prop_assert_eq!(slide.layout, expected_layout);
                if index > 0 {
                    prop_assert_eq!(&slide.bullets, &spec.bullets);
                }
                prop_assert_eq!(slide.notes.as_deref(), spec.notes.as_deref());
            }
        }
    }
}
