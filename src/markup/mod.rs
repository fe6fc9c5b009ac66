//! Resume to markup conversion.
//!
//! The exporter never draws a resume directly; it asks a [`MarkupGenerator`] for a
//! self-contained document (markup plus its embedded stylesheet) and rasterizes
//! whatever comes back. The document is sized to its content: the width is fixed
//! and the height grows with the resume, so nothing is ever clipped.

use crate::resume::ResumeData;
use quick_xml::events::Event;
use quick_xml::Reader;

mod svg;
pub mod text;

pub use svg::SvgMarkup;

/// Id of the element that wraps all resume content.
pub const CONTENT_ANCHOR: &str = "resume-content";

/// Content width in CSS pixels (A4 at 96 DPI).
pub const CONTENT_WIDTH_PX: f32 = 794.0;

/// A generated document, alive for the duration of one export.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Self-contained SVG source, stylesheet included.
    pub svg: String,
    /// Width in CSS pixels.
    pub width: f32,
    /// Height of the laid-out content in CSS pixels.
    pub height: f32,
    /// Id of the content anchor element.
    pub anchor: String,
}

impl RenderedDocument {
    /// Whether the markup contains an element whose `id` is the anchor.
    ///
    /// Text content that merely mentions the id does not count, and markup that
    /// fails to parse has no anchor.
    pub fn has_anchor(&self) -> bool {
        if self.anchor.is_empty() {
            return false;
        }

        let mut reader = Reader::from_str(&self.svg);
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let found = e.attributes().flatten().any(|attr| {
                        attr.key.as_ref() == b"id"
                            && attr
                                .unescape_value()
                                .is_ok_and(|value| value == self.anchor.as_str())
                    });
                    if found {
                        return true;
                    }
                }
                Ok(Event::Eof) => return false,
                Err(e) => {
                    log::debug!(
                        "markup is not well-formed at byte {}: {e}",
                        reader.buffer_position()
                    );
                    return false;
                }
                _ => {}
            }
        }
    }
}

pub trait MarkupGenerator {
    fn generate(&self, resume: &ResumeData) -> RenderedDocument;
}
