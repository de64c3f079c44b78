/// Presentation part XML generation.
use crate::deck::Deck;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

/// Generate presentation.xml content with actual relationship IDs.
///
/// # Arguments
/// * `slide_rel_ids` - Relationship IDs for the slides, in presentation order
/// * `notes_master_rel_id` - Relationship ID of the notes master
pub(crate) fn presentation_xml(
    deck: &Deck,
    slide_rel_ids: &[String],
    notes_master_rel_id: &str,
) -> Result<String> {
    debug_assert_eq!(slide_rel_ids.len(), deck.slide_count());

    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

    // Slide master ID list
    xml.push_str("<p:sldMasterIdLst>");
    xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
    xml.push_str("</p:sldMasterIdLst>");

    // Notes master ID list
    xml.push_str("<p:notesMasterIdLst>");
    write!(xml, r#"<p:notesMasterId r:id="{notes_master_rel_id}"/>"#)?;
    xml.push_str("</p:notesMasterIdLst>");

    // Slide ID list, in deck order
    if deck.slide_count() > 0 {
        xml.push_str("<p:sldIdLst>");
        for (slide, rel_id) in deck.slides().iter().zip(slide_rel_ids) {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                slide.slide_id(),
                rel_id
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    // Slide and notes page sizes
    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        deck.slide_width(),
        deck.slide_height()
    )?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);

    xml.push_str("</p:presentation>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckBuilder;
    use crate::spec::SlideSpec;

    #[test]
    fn test_slide_ids_in_order() {
        let specs = [
            SlideSpec::titled("one"),
            SlideSpec::titled("two"),
            SlideSpec::titled("three"),
        ];
        let deck = DeckBuilder::build(&specs).unwrap();
        let rel_ids: Vec<String> = (0..3).map(|i| format!("rId{}", i + 2)).collect();

        let xml = presentation_xml(&deck, &rel_ids, "rId5").unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:notesMasterId r:id="rId5"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_empty_deck_omits_slide_list() {
        let deck = DeckBuilder::build(&[]).unwrap();
        let xml = presentation_xml(&deck, &[], "rId2").unwrap();
        assert!(!xml.contains("<p:sldIdLst>"));
        assert!(xml.contains("<p:sldMasterIdLst>"));
    }
}
