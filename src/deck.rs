//! Deck model and builder.
//!
//! A [`Deck`] is the ordered collection of rendered slides produced from a
//! sequence of [`SlideSpec`] records. The deck owns its slides exclusively
//! for the duration of a run and is discarded after serialization.

use crate::error::{DeckError, Result};
use crate::pptx::PptxRenderer;
use crate::spec::SlideSpec;
use std::path::Path;

/// The slide template a rendered slide is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// Large title plus optional subtitle. Used only for the first slide.
    Title,
    /// Title plus bulleted content area. Used for every other slide.
    Body,
}

/// A slide that has been rendered from a [`SlideSpec`].
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    /// Slide ID (unique identifier within the presentation)
    pub(crate) slide_id: u32,
    /// Layout this slide is based on
    pub(crate) layout: SlideLayout,
    /// Title text
    pub(crate) title: String,
    /// Subtitle text (title layout only; empty string when absent)
    pub(crate) subtitle: String,
    /// Bullet paragraphs (body layout only)
    pub(crate) bullets: Vec<String>,
    /// Speaker notes for the slide
    pub(crate) notes: Option<String>,
}

impl RenderedSlide {
    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Get the layout this slide is based on.
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Get the slide title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the subtitle text. Empty for body slides and title slides
    /// without a subtitle.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Get the bullet paragraphs.
    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }

    /// Set speaker notes for the slide.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = Some(notes.to_string());
    }

    /// Get the speaker notes for the slide.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Check if the slide has speaker notes.
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }
}

/// Serialization seam between the deck model and a concrete file format.
///
/// [`Deck::to_bytes`] and [`Deck::save`] go through the default
/// [`PptxRenderer`]; alternative backends implement this trait.
pub trait DeckRenderer {
    /// Render the deck into a complete document, as bytes.
    fn render(&self, deck: &Deck) -> Result<Vec<u8>>;
}

/// An ordered, finalized collection of rendered slides.
#[derive(Debug)]
pub struct Deck {
    /// Slides in presentation order
    pub(crate) slides: Vec<RenderedSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    pub(crate) slide_width: i64,
    /// Slide height in EMUs
    pub(crate) slide_height: i64,
}

impl Deck {
    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get the slides in presentation order.
    pub fn slides(&self) -> &[RenderedSlide] {
        &self.slides
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Render the deck to .pptx bytes using the default renderer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PptxRenderer::default().render(self)
    }

    /// Render the deck and write it to `path`, overwriting any existing file.
    ///
    /// The package is fully assembled in memory before anything touches the
    /// filesystem, so a rendering failure never leaves a partial file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Builder for assembling a [`Deck`] slide by slide.
///
/// Most callers use [`DeckBuilder::build`], which maps a spec sequence onto
/// the two layouts by position. The incremental methods are available for
/// decks that do not follow the first-slide-is-title convention.
///
/// # Examples
///
/// ```
/// use pitaya::{DeckBuilder, SlideSpec};
///
/// # fn main() -> pitaya::Result<()> {
/// let specs = [
///     SlideSpec::titled("Kickoff").with_subtitle("Team sync"),
///     SlideSpec::titled("Agenda").with_bullet("Status").with_bullet("Risks"),
/// ];
/// let deck = DeckBuilder::build(&specs)?;
/// assert_eq!(deck.slide_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DeckBuilder {
    slides: Vec<RenderedSlide>,
}

impl DeckBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from a spec sequence.
    ///
    /// The spec at position 0 renders on the title layout; every later spec
    /// renders on the body layout. Output order is input order. A spec with
    /// a blank title is rejected with [`DeckError::MissingTitle`]; an empty
    /// sequence yields a valid zero-slide deck.
    pub fn build(specs: &[SlideSpec]) -> Result<Deck> {
        let mut builder = Self::new();

        for (index, spec) in specs.iter().enumerate() {
            let slide = if index == 0 {
                builder.add_title_slide(&spec.title, spec.subtitle.as_deref().unwrap_or(""))?
            } else {
                // `subtitle` has no home on the body layout and is ignored here.
                builder.add_body_slide(&spec.title, &spec.bullets)?
            };

            if let Some(notes) = spec.notes.as_deref()
                && !notes.is_empty()
            {
                slide.set_notes(notes);
            }
        }

        Ok(builder.finish())
    }

    /// Append a title-layout slide.
    pub fn add_title_slide(
        &mut self,
        title: &str,
        subtitle: &str,
    ) -> Result<&mut RenderedSlide> {
        let slide_id = self.next_slide_id();
        let slide = RenderedSlide {
            slide_id,
            layout: SlideLayout::Title,
            title: self.checked_title(title)?,
            subtitle: subtitle.to_string(),
            bullets: Vec::new(),
            notes: None,
        };
        self.slides.push(slide);
        Ok(self.slides.last_mut().unwrap())
    }

    /// Append a body-layout slide with the given bullets, in order.
    pub fn add_body_slide(
        &mut self,
        title: &str,
        bullets: &[String],
    ) -> Result<&mut RenderedSlide> {
        let slide_id = self.next_slide_id();
        let slide = RenderedSlide {
            slide_id,
            layout: SlideLayout::Body,
            title: self.checked_title(title)?,
            subtitle: String::new(),
            bullets: bullets.to_vec(),
            notes: None,
        };
        self.slides.push(slide);
        Ok(self.slides.last_mut().unwrap())
    }

    /// Finalize the builder into a deck with default 4:3 geometry.
    pub fn finish(self) -> Deck {
        Deck {
            slides: self.slides,
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
        }
    }

    // Slide IDs in presentation.xml must be >= 256.
    fn next_slide_id(&self) -> u32 {
        (self.slides.len() + 256) as u32
    }

    fn checked_title(&self, title: &str) -> Result<String> {
        if title.trim().is_empty() {
            return Err(DeckError::MissingTitle {
                index: self.slides.len(),
            });
        }
        Ok(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty_sequence() {
        let deck = DeckBuilder::build(&[]).unwrap();
        assert_eq!(deck.slide_count(), 0);
    }

    #[test]
    fn test_first_slide_gets_title_layout() {
        let specs = [
            SlideSpec::titled("Opening").with_subtitle("v1.0"),
            SlideSpec::titled("Details").with_bullet("one"),
            SlideSpec::titled("Closing"),
        ];
        let deck = DeckBuilder::build(&specs).unwrap();
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slides()[0].layout(), SlideLayout::Title);
        assert_eq!(deck.slides()[1].layout(), SlideLayout::Body);
        assert_eq!(deck.slides()[2].layout(), SlideLayout::Body);
    }

    #[test]
    fn test_order_and_content_preserved() {
        let specs = [
            SlideSpec::titled("A"),
            SlideSpec::titled("B").with_bullets(["b1", "b2"]),
            SlideSpec::titled("C").with_notes("remember C"),
        ];
        let deck = DeckBuilder::build(&specs).unwrap();
        let titles: Vec<_> = deck.slides().iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(deck.slides()[1].bullets(), ["b1", "b2"]);
        assert_eq!(deck.slides()[2].notes(), Some("remember C"));
        assert!(!deck.slides()[1].has_notes());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let specs = [SlideSpec::titled("ok"), SlideSpec::titled("   ")];
        let err = DeckBuilder::build(&specs).unwrap_err();
        match err {
            DeckError::MissingTitle { index } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_notes_treated_as_absent() {
        let specs = [SlideSpec::titled("t").with_notes("")];
        let deck = DeckBuilder::build(&specs).unwrap();
        assert!(!deck.slides()[0].has_notes());
    }

    #[test]
    fn test_subtitle_ignored_on_body_slides() {
        let specs = [
            SlideSpec::titled("first"),
            SlideSpec::titled("second").with_subtitle("stray"),
        ];
        let deck = DeckBuilder::build(&specs).unwrap();
        assert_eq!(deck.slides()[1].subtitle(), "");
    }

    #[test]
    fn test_slide_ids_are_unique_and_offset() {
        let specs = [SlideSpec::titled("a"), SlideSpec::titled("b")];
        let deck = DeckBuilder::build(&specs).unwrap();
        assert_eq!(deck.slides()[0].slide_id(), 256);
        assert_eq!(deck.slides()[1].slide_id(), 257);
    }
}
