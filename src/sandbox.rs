//! Scoped render sandbox.
//!
//! A generated document is mounted into a sandbox for the duration of one export.
//! Mounting checks that the content anchor exists and that there is something to
//! capture. The sandbox owns the document, so it goes away with the sandbox on
//! every exit path of the export.

use crate::error::{ExportError, Result};
use crate::markup::RenderedDocument;

#[derive(Debug)]
pub struct RenderSandbox {
    document: RenderedDocument,
}

impl RenderSandbox {
    pub fn mount(document: RenderedDocument) -> Result<RenderSandbox> {
        if !document.has_anchor() {
            return Err(ExportError::MissingRenderTarget(document.anchor));
        }

        let (width, height) = (document.width.ceil(), document.height.ceil());
        if width < 1.0 || height < 1.0 {
            return Err(ExportError::EmptyDocument {
                width: width.max(0.0) as u32,
                height: height.max(0.0) as u32,
            });
        }

        log::debug!(
            "mounted #{} in render sandbox ({width}x{height}px)",
            document.anchor
        );
        Ok(RenderSandbox { document })
    }

    pub fn document(&self) -> &RenderedDocument {
        &self.document
    }

    /// Full scroll size of the content in CSS pixels, used as the capture viewport.
    pub fn scroll_size(&self) -> (f32, f32) {
        (self.document.width.ceil(), self.document.height.ceil())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::CONTENT_ANCHOR;

    fn document(svg: &str, width: f32, height: f32) -> RenderedDocument {
        RenderedDocument {
            svg: svg.to_string(),
            width,
            height,
            anchor: CONTENT_ANCHOR.to_string(),
        }
    }

    #[test]
    fn rejects_markup_without_anchor() {
        let result = RenderSandbox::mount(document("<svg><g/></svg>", 100.0, 100.0));
        assert!(matches!(
            result,
            Err(ExportError::MissingRenderTarget(anchor)) if anchor == CONTENT_ANCHOR
        ));
    }

    #[test]
    fn finds_anchor_with_spaced_attribute() {
        let sandbox = RenderSandbox::mount(document(
            r#"<svg><g id = "resume-content"><text>x</text></g></svg>"#,
            10.0,
            10.0,
        ))
        .expect("can mount document");
        assert_eq!(sandbox.document().anchor, CONTENT_ANCHOR);

        let result = RenderSandbox::mount(document(
            r#"<svg><text>id="resume-content"</text></svg>"#,
            10.0,
            10.0,
        ));
        assert!(matches!(result, Err(ExportError::MissingRenderTarget(_))));
    }

    #[test]
    fn rejects_empty_content() {
        let result = RenderSandbox::mount(document(
            r#"<svg><g id="resume-content"/></svg>"#,
            100.0,
            0.0,
        ));
        assert!(matches!(
            result,
            Err(ExportError::EmptyDocument {
                width: 100,
                height: 0
            })
        ));
    }

    #[test]
    fn scroll_size_rounds_up_to_whole_pixels() {
        let sandbox = RenderSandbox::mount(document(
            r#"<svg><g id="resume-content"/></svg>"#,
            794.0,
            1122.4,
        ))
        .expect("can mount document");
        assert_eq!(sandbox.scroll_size(), (794.0, 1123.0));
    }
}
