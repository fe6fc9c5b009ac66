//! Rasterization of mounted documents.
//!
//! The capture viewport is always the document's full scroll size multiplied by
//! the device-scale factor. The sandbox has no natural viewport of its own, so
//! using anything smaller would crop the resume.

use crate::error::{ExportError, Result};
use crate::sandbox::RenderSandbox;
use crate::units::Mm;
use image::RgbImage;
use resvg::tiny_skia;
use resvg::usvg;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Fidelity settings for one rasterization pass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderQuality {
    /// Device pixels per CSS pixel.
    pub scale: f32,
    /// JPEG quality, 1-100. Ignored for lossless page images.
    pub jpeg_quality: u8,
}

impl RenderQuality {
    /// Whether `self` is strictly lower than `other` in both scale and quality.
    pub fn is_below(&self, other: &RenderQuality) -> bool {
        self.scale < other.scale && self.jpeg_quality < other.jpeg_quality
    }
}

/// A captured pixel buffer, flattened onto white.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    pub image: RgbImage,
    pub scale: f32,
}

impl RasterCanvas {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn width_mm(&self) -> Mm {
        Mm::from_device_px(self.width(), self.scale)
    }

    pub fn height_mm(&self) -> Mm {
        Mm::from_device_px(self.height(), self.scale)
    }
}

pub trait Rasterizer {
    fn rasterize(&self, sandbox: &RenderSandbox, quality: RenderQuality) -> Result<RasterCanvas>;
}

/// Renders SVG markup with resvg.
///
/// The font database is loaded on first use and shared by every later pass.
#[derive(Debug, Default)]
pub struct SvgRasterizer {
    font_dir: Option<PathBuf>,
    fonts: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl SvgRasterizer {
    pub fn new(font_dir: Option<PathBuf>) -> SvgRasterizer {
        SvgRasterizer {
            font_dir,
            fonts: OnceLock::new(),
        }
    }

    fn fonts(&self) -> Arc<usvg::fontdb::Database> {
        self.fonts
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                if let Some(dir) = &self.font_dir {
                    db.load_fonts_dir(dir);
                }
                log::info!("loaded {} font faces", db.len());
                Arc::new(db)
            })
            .clone()
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, sandbox: &RenderSandbox, quality: RenderQuality) -> Result<RasterCanvas> {
        let mut options = usvg::Options::default();
        options.fontdb = self.fonts();

        let tree = usvg::Tree::from_str(&sandbox.document().svg, &options)
            .map_err(|e| ExportError::Rasterization(format!("failed to parse markup: {e}")))?;

        let (width, height) = sandbox.scroll_size();
        let px_width = (width * quality.scale).ceil() as u32;
        let px_height = (height * quality.scale).ceil() as u32;
        log::debug!(
            "rasterizing {width}x{height}px at scale {} into {px_width}x{px_height}",
            quality.scale
        );

        let mut pixmap = tiny_skia::Pixmap::new(px_width, px_height).ok_or_else(|| {
            ExportError::Rasterization(format!(
                "cannot allocate a {px_width}x{px_height} pixel canvas"
            ))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(quality.scale, quality.scale),
            &mut pixmap.as_mut(),
        );

        // the white fill makes every pixel opaque, so premultiplied alpha can be dropped as-is
        let rgb: Vec<u8> = pixmap
            .take()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let image = RgbImage::from_raw(px_width, px_height, rgb).ok_or_else(|| {
            ExportError::Rasterization("pixel buffer does not match canvas size".to_string())
        })?;

        Ok(RasterCanvas {
            image,
            scale: quality.scale,
        })
    }
}
