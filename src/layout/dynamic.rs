//! Single page sized to the content.

use super::PageGeometry;
use crate::error::Result;
use crate::pdf::{Encoding, PdfPage, Placement};
use crate::raster::RasterCanvas;
use crate::units::Mm;

/// PDF readers commonly refuse pages taller than 200 inches.
const MAX_PAGE_HEIGHT: Mm = Mm(5080.0);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DynamicPlan {
    /// Uniform scale applied to the canvas's physical size.
    pub fit: f32,
    pub page_height: Mm,
    pub placement: Placement,
}

impl DynamicPlan {
    /// Whether the page is taller than PDF readers reliably display.
    pub fn exceeds_reader_limit(&self) -> bool {
        self.page_height > MAX_PAGE_HEIGHT
    }
}

/// Sizes the page to a canvas of `width_px` x `height_px` captured at `scale`.
pub fn plan(width_px: u32, height_px: u32, scale: f32, geometry: &PageGeometry) -> DynamicPlan {
    let width_mm = Mm::from_device_px(width_px, scale);
    let height_mm = Mm::from_device_px(height_px, scale);

    let fit = geometry.available_width() / width_mm;
    let image_width = width_mm * fit;
    let image_height = height_mm * fit;

    DynamicPlan {
        fit,
        page_height: image_height + geometry.margins.vertical(),
        placement: Placement {
            x: geometry.margins.left,
            y: geometry.margins.top,
            width: image_width,
            height: image_height,
        },
    }
}

pub fn render(
    canvas: &RasterCanvas,
    geometry: &PageGeometry,
    encoding: Encoding,
) -> Result<Vec<PdfPage>> {
    let plan = plan(canvas.width(), canvas.height(), canvas.scale, geometry);
    if plan.exceeds_reader_limit() {
        log::warn!(
            "content page is {:.0}mm tall but some PDF readers cap pages at {:.0}mm; \
             use the paginated strategy (--strategy paginated) for content this long",
            plan.page_height.0,
            MAX_PAGE_HEIGHT.0
        );
    }
    log::debug!(
        "dynamic page {:.1}x{:.1}mm at fit {:.4}",
        geometry.width.0,
        plan.page_height.0,
        plan.fit
    );

    let image = encoding.encode(&canvas.image)?;
    Ok(vec![PdfPage {
        width: geometry.width,
        height: plan.page_height,
        image,
        placement: plan.placement,
    }])
}
