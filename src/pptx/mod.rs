//! PresentationML (.pptx) package rendering and read-back.
//!
//! A .pptx file is an OPC zip container: `[Content_Types].xml` declares
//! part types, `_rels` parts wire the relationship graph, and the
//! presentation, master, layout, slide, and notes parts carry the XML
//! payloads. [`PptxRenderer`] assembles that container from a
//! [`Deck`](crate::deck::Deck); [`DeckSummary`] opens one back up.

mod extract;
mod package;
mod pres;
mod slide;
mod template;

pub use extract::{DeckSummary, SlideSummary};
pub use package::PptxRenderer;
