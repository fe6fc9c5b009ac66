//! Mapping a captured canvas onto PDF pages.
//!
//! Two strategies are supported:
//!
//! * [`PageStrategy::Dynamic`] produces a single page exactly as tall as the
//!   content plus the vertical margins. Nothing is ever cut.
//! * [`PageStrategy::Paginated`] keeps the standard page height and slices the
//!   canvas into page-sized bands; see [`paginate`] for the slicing rules.
//!
//! Both fit the canvas to the page's content width, scaling uniformly to
//! preserve the aspect ratio.

use crate::error::{ExportError, Result};
use crate::pdf::{Encoding, PdfPage};
use crate::raster::RasterCanvas;
use crate::units::{Margins, Mm};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod dynamic;
pub mod paginate;

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PageStrategy {
    /// One page sized to the content.
    #[default]
    Dynamic,
    /// Fixed-size pages, content split across as many as needed.
    Paginated,
}

impl fmt::Display for PageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageStrategy::Dynamic => write!(f, "single dynamic page"),
            PageStrategy::Paginated => write!(f, "multi-page split"),
        }
    }
}

/// Page size and margins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: Mm,
    pub height: Mm,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn available_width(&self) -> Mm {
        self.width - self.margins.horizontal()
    }

    pub fn available_height(&self) -> Mm {
        self.height - self.margins.vertical()
    }

    pub fn validate(&self) -> Result<()> {
        if self.available_width().0 <= 0.0 || self.available_height().0 <= 0.0 {
            return Err(ExportError::InvalidConfig(format!(
                "margins leave no content area on a {}x{}mm page",
                self.width.0, self.height.0
            )));
        }
        Ok(())
    }
}

/// Lays `canvas` out onto pages according to `strategy`.
pub fn lay_out(
    strategy: PageStrategy,
    canvas: &RasterCanvas,
    geometry: &PageGeometry,
    encoding: Encoding,
) -> Result<Vec<PdfPage>> {
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err(ExportError::EmptyDocument {
            width: canvas.width(),
            height: canvas.height(),
        });
    }

    match strategy {
        PageStrategy::Dynamic => dynamic::render(canvas, geometry, encoding),
        PageStrategy::Paginated => paginate::render(canvas, geometry, encoding),
    }
}
