//! Splitting a tall canvas across fixed-size pages.
//!
//! The canvas is walked top to bottom in bands of `capacity` source pixels, where
//! `capacity` is how many pixels fill one page's content area at the width-fit
//! scale. Three rules shape the walk:
//!
//! * Once the remaining height is within [`LAST_PAGE_TOLERANCE`] of one page, the
//!   whole remainder goes on a final page rather than spilling a sliver onto an
//!   extra, nearly empty page. That final band can exceed the page by up to 20%
//!   and is shrunk uniformly to stay inside the margins.
//! * The walk stops once fewer than [`SAFETY_TAIL_PX`] pixels remain, and a
//!   non-empty tail is emitted as one last page.
//! * No more than [`MAX_PAGES`] pages are ever produced.
//!
//! Slices are contiguous and never overlap, so together they cover
//! `[0, height)` exactly unless the page cap truncated the walk.

use super::PageGeometry;
use crate::error::Result;
use crate::pdf::{Encoding, PdfPage, Placement};
use crate::raster::RasterCanvas;
use crate::units::Mm;
use image::{imageops, Rgb, RgbImage};

/// A remainder up to this multiple of one page is kept on a single last page.
pub const LAST_PAGE_TOLERANCE: f32 = 1.2;

/// Remainders shorter than this are left for the final safety-net page.
pub const SAFETY_TAIL_PX: u32 = 50;

/// Hard cap on the number of generated pages.
pub const MAX_PAGES: usize = 100;

/// One horizontal band of the source canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub y: u32,
    pub height: u32,
}

impl Slice {
    pub fn end(&self) -> u32 {
        self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub slices: Vec<Slice>,
    /// Source pixels per page.
    pub capacity: u32,
    /// Set when the page cap stopped the walk before the end of the canvas.
    pub truncated: bool,
}

/// How many source pixels fill one page's content height once the canvas is
/// fitted to the content width.
pub fn page_capacity_px(canvas_width_px: u32, geometry: &PageGeometry) -> u32 {
    // the fit scale maps canvas_width_px onto available_width
    let mm_per_px = geometry.available_width().0 / canvas_width_px.max(1) as f32;
    ((geometry.available_height().0 / mm_per_px).floor() as u32).max(1)
}

/// Plans the slices for a canvas `height` pixels tall.
pub fn plan_slices(height: u32, capacity: u32) -> Pagination {
    let capacity = capacity.max(1);
    let last_page_limit = (capacity as f64 * LAST_PAGE_TOLERANCE as f64).floor() as u32;
    let mut slices: Vec<Slice> = Vec::new();
    let mut y = 0u32;

    while height - y >= SAFETY_TAIL_PX && slices.len() < MAX_PAGES {
        let remaining = height - y;
        let band = if remaining <= last_page_limit {
            remaining
        } else {
            capacity
        };
        slices.push(Slice { y, height: band });
        y += band;
    }

    let mut truncated = false;
    if y < height {
        if slices.len() < MAX_PAGES {
            slices.push(Slice {
                y,
                height: height - y,
            });
        } else {
            truncated = true;
        }
    }

    Pagination {
        slices,
        capacity,
        truncated,
    }
}

/// Places one slice on its page, shrinking it if it overflows the content area.
fn placement(slice: &Slice, canvas_width_px: u32, geometry: &PageGeometry) -> Placement {
    let available_width = geometry.available_width();
    let available_height = geometry.available_height();
    let mm_per_px = available_width.0 / canvas_width_px as f32;

    let mut width = available_width;
    let mut height = Mm(slice.height as f32 * mm_per_px);
    if height > available_height {
        let shrink = available_height / height;
        width = width * shrink;
        height = available_height;
    }

    Placement {
        x: geometry.margins.left + (available_width - width) / 2.0,
        y: geometry.margins.top,
        width,
        height,
    }
}

/// Copies one band of the canvas onto a fresh white page image.
fn blit(canvas: &RgbImage, slice: &Slice) -> RgbImage {
    let mut page = RgbImage::from_pixel(canvas.width(), slice.height, Rgb([255, 255, 255]));
    let band = imageops::crop_imm(canvas, 0, slice.y, canvas.width(), slice.height).to_image();
    imageops::replace(&mut page, &band, 0, 0);
    page
}

pub fn render(
    canvas: &RasterCanvas,
    geometry: &PageGeometry,
    encoding: Encoding,
) -> Result<Vec<PdfPage>> {
    let capacity = page_capacity_px(canvas.width(), geometry);
    let pagination = plan_slices(canvas.height(), capacity);
    if pagination.truncated {
        log::warn!(
            "content needs more than {MAX_PAGES} pages; output stops at {}px of {}px",
            pagination.slices.last().map(Slice::end).unwrap_or_default(),
            canvas.height()
        );
    }
    log::debug!(
        "splitting {}px canvas into {} page(s) of {}px",
        canvas.height(),
        pagination.slices.len(),
        capacity
    );

    pagination
        .slices
        .iter()
        .map(|slice| {
            let image = encoding.encode(&blit(&canvas.image, slice))?;
            Ok(PdfPage {
                width: geometry.width,
                height: geometry.height,
                image,
                placement: placement(slice, canvas.width(), geometry),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::pdf::ImageFormat;
    use proptest::prelude::*;

    fn assert_contiguous(pagination: &Pagination, height: u32) {
        let mut expected_y = 0;
        for slice in &pagination.slices {
            assert_eq!(slice.y, expected_y, "gap or overlap at {expected_y}");
            assert!(slice.height > 0);
            expected_y = slice.end();
        }
        if !pagination.truncated {
            assert_eq!(expected_y, height);
        }
    }

    #[test]
    fn content_shorter_than_a_page_is_one_slice() {
        let pagination = plan_slices(800, 1000);
        assert_eq!(pagination.slices, vec![Slice { y: 0, height: 800 }]);
    }

    #[test]
    fn slight_overflow_stays_on_one_page() {
        let pagination = plan_slices(1150, 1000);
        assert_eq!(pagination.slices, vec![Slice { y: 0, height: 1150 }]);

        let pagination = plan_slices(1200, 1000);
        assert_eq!(pagination.slices.len(), 1);
    }

    #[test]
    fn one_point_three_pages_is_exactly_two() {
        let pagination = plan_slices(1300, 1000);
        assert_eq!(
            pagination.slices,
            vec![Slice { y: 0, height: 1000 }, Slice { y: 1000, height: 300 }]
        );
    }

    #[test]
    fn exact_multiples_fill_whole_pages() {
        let pagination = plan_slices(3000, 1000);
        // the third page is within tolerance of the remainder and takes it whole
        assert_eq!(
            pagination.slices,
            vec![
                Slice { y: 0, height: 1000 },
                Slice { y: 1000, height: 1000 },
                Slice { y: 2000, height: 1000 },
            ]
        );
    }

    #[test]
    fn small_tail_is_absorbed_by_the_last_page() {
        // 30px past two pages: the second page takes its share plus the tail
        let pagination = plan_slices(2030, 1000);
        assert_eq!(
            pagination.slices,
            vec![Slice { y: 0, height: 1000 }, Slice { y: 1000, height: 1030 }]
        );
    }

    #[test]
    fn safety_net_emits_short_tails() {
        // 130px left after the first page is past tolerance, so a full page is
        // taken and the 30px tail falls to the safety net
        let pagination = plan_slices(230, 100);
        assert_eq!(
            pagination.slices,
            vec![
                Slice { y: 0, height: 100 },
                Slice { y: 100, height: 100 },
                Slice { y: 200, height: 30 },
            ]
        );

        let pagination = plan_slices(140, 20);
        assert_contiguous(&pagination, 140);
        assert_eq!(pagination.slices.last(), Some(&Slice { y: 100, height: 40 }));
    }

    #[test]
    fn canvas_shorter_than_the_tail_is_one_page() {
        let pagination = plan_slices(30, 1000);
        assert_eq!(pagination.slices, vec![Slice { y: 0, height: 30 }]);
    }

    #[test]
    fn page_cap_truncates_runaway_content() {
        let pagination = plan_slices(1_000_000, 100);
        assert_eq!(pagination.slices.len(), MAX_PAGES);
        assert!(pagination.truncated);
        assert_contiguous(&pagination, 1_000_000);
    }

    #[test]
    fn capacity_matches_a4_content_area() {
        let geometry = a4();
        // 180mm wide content area and 267mm tall: 1588px wide canvas
        let capacity = page_capacity_px(1588, &geometry);
        let expected = (267.0_f32 / (180.0 / 1588.0)).floor() as u32;
        assert_eq!(capacity, expected);
    }

    #[test]
    fn overflowing_last_page_is_shrunk_to_fit() {
        let geometry = a4();
        let capacity = page_capacity_px(1000, &geometry);
        let slice = Slice {
            y: 0,
            height: capacity + capacity / 10,
        };
        let placed = placement(&slice, 1000, &geometry);
        assert!((placed.height.0 - 267.0).abs() < 1e-3);
        assert!(placed.width.0 < 180.0);
        // centred horizontally
        let right_gap = 210.0 - placed.x.0 - placed.width.0;
        assert!((placed.x.0 - right_gap).abs() < 1e-3);
    }

    #[test]
    fn blit_copies_the_requested_band() {
        let mut source = RgbImage::from_pixel(4, 10, Rgb([255, 255, 255]));
        for x in 0..4 {
            source.put_pixel(x, 6, Rgb([0, 0, 0]));
        }
        let page = blit(&source, &Slice { y: 5, height: 3 });
        assert_eq!(page.dimensions(), (4, 3));
        assert_eq!(page.get_pixel(0, 1).0, [0, 0, 0]);
        assert_eq!(page.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn renders_one_pdf_page_per_slice() {
        let geometry = a4();
        let capacity = page_capacity_px(200, &geometry);
        let height = capacity * 13 / 10;
        let encoding = Encoding {
            format: ImageFormat::Jpeg,
            jpeg_quality: 80,
        };
        let pages = render(&canvas(200, height, 1.0), &geometry, encoding).expect("can render");
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.height == Mm(297.0)));
        assert_eq!(pages[1].image.height, height - capacity);
    }

    proptest! {
        #[test]
        fn slices_cover_the_canvas_exactly(height in 1u32..200_000, capacity in 1u32..5_000) {
            let pagination = plan_slices(height, capacity);
            assert_contiguous(&pagination, height);
            prop_assert!(!pagination.slices.is_empty());
        }

        #[test]
        fn page_count_is_bounded(height in 1u32..200_000, capacity in 1u32..5_000) {
            let pagination = plan_slices(height, capacity);
            let bound = height.div_ceil(capacity) as usize + 1;
            prop_assert!(pagination.slices.len() <= bound);
            prop_assert!(pagination.slices.len() <= MAX_PAGES);
        }
    }
}
