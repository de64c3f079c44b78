//! Pitaya - programmatic PowerPoint (.pptx) deck generation
//!
//! This library turns an ordered sequence of [`SlideSpec`] records into a
//! PowerPoint presentation. The first record always renders on the title
//! layout (large title plus optional subtitle); every subsequent record
//! renders on the body layout (title plus bulleted content). Optional
//! speaker notes attach per slide.
//!
//! The output is a self-contained OPC package (the zip-based OOXML container
//! used by modern Office) with a minimal slide master, two layouts, a theme,
//! and a notes master, so the file opens directly in PowerPoint, Keynote, or
//! LibreOffice Impress.
//!
//! # Example - Building a deck
//!
//! ```no_run
//! use pitaya::{DeckBuilder, SlideSpec};
//!
//! # fn main() -> pitaya::Result<()> {
//! let specs = vec![
//!     SlideSpec::titled("Quarterly Review")
//!         .with_subtitle("FY26 Q2")
//!         .with_notes("Introduce yourself before diving in."),
//!     SlideSpec::titled("Highlights")
//!         .with_bullet("Revenue up 12%")
//!         .with_bullet("Churn down 3%"),
//! ];
//!
//! let deck = DeckBuilder::build(&specs)?;
//! deck.save("review.pptx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a generated deck back
//!
//! ```no_run
//! use pitaya::DeckSummary;
//!
//! # fn main() -> pitaya::Result<()> {
//! let summary = DeckSummary::from_path("review.pptx")?;
//! println!("Slides: {}", summary.slide_count());
//! for slide in summary.slides() {
//!     println!("  {}", slide.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod deck;
pub mod error;
pub mod pptx;
pub mod spec;
pub mod xml;

// Re-exports
pub use deck::{Deck, DeckBuilder, DeckRenderer, RenderedSlide, SlideLayout};
pub use error::{DeckError, Result};
pub use pptx::{DeckSummary, PptxRenderer, SlideSummary};
pub use spec::SlideSpec;
