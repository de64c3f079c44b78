//! Slide specification records.

/// The input record describing one slide's intended content.
///
/// A `SlideSpec` is plain data. How it renders is decided by its position in
/// the sequence handed to [`DeckBuilder::build`](crate::DeckBuilder::build):
/// the first record renders on the title layout, all others on the body
/// layout. Fields that do not apply to the chosen layout (`subtitle` on a
/// body slide, `bullets` on the title slide) are ignored.
///
/// # Examples
///
/// ```
/// use pitaya::SlideSpec;
///
/// let spec = SlideSpec::titled("Tests & CI")
///     .with_bullet("Unit tests: cargo test")
///     .with_bullet("Coverage in CI")
///     .with_notes("Mention how long the suite takes.");
/// assert_eq!(spec.bullets.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSpec {
    /// Slide title. The builder rejects blank titles.
    pub title: String,
    /// Subtitle text, used only when the spec renders on the title layout.
    /// A `\n` starts a new subtitle line.
    pub subtitle: Option<String>,
    /// Bullet paragraphs for the body placeholder, in display order.
    pub bullets: Vec<String>,
    /// Speaker notes. Absent (or empty) means the slide gets no notes part.
    pub notes: Option<String>,
}

impl SlideSpec {
    /// Create a spec with a title and no other content.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a single bullet.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullets.push(bullet.into());
        self
    }

    /// Append bullets from an iterator, preserving order.
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets.extend(bullets.into_iter().map(Into::into));
        self
    }

    /// Set the speaker notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titled_defaults() {
        let spec = SlideSpec::titled("Overview");
        assert_eq!(spec.title, "Overview");
        assert!(spec.subtitle.is_none());
        assert!(spec.bullets.is_empty());
        assert!(spec.notes.is_none());
    }

    #[test]
    fn test_with_bullets_preserves_order() {
        let spec = SlideSpec::titled("Agenda")
            .with_bullets(["first", "second"])
            .with_bullet("third");
        assert_eq!(spec.bullets, ["first", "second", "third"]);
    }
}
