//! Render a structured resume into a downloadable PDF.
//!
//! A [`ResumeData`] record is laid out as SVG, rasterized, and placed on PDF pages
//! either as one page sized to the content or split across fixed-size pages. The
//! [`Exporter`] runs the whole pipeline, keeps the output under a size budget and
//! saves it under a name derived from the resume.

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod markup;
pub mod notify;
pub mod pdf;
pub mod raster;
pub mod resume;
pub mod sandbox;
pub mod units;

pub use config::{Configuration, ExportConfig, CONFIG_FILE};
pub use error::{ExportError, Result};
pub use export::{ExportOutcome, Exporter, RenderedPdf};
pub use layout::PageStrategy;
pub use notify::{LogNotifier, Notifier, Severity};
pub use pdf::ImageFormat;
pub use resume::ResumeData;
