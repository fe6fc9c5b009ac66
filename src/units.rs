//! Physical units used when placing raster content on PDF pages.
//!
//! PDF user space is measured in points (1/72 inch) while page geometry is
//! configured in millimetres, and rasters come out of the renderer in CSS pixels
//! multiplied by a device-scale factor.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Millimetres per CSS pixel at 96 DPI.
pub const PX_TO_MM: f32 = 0.264583;

/// Millimetres per inch.
const MM_PER_IN: f32 = 25.4;

/// Points per inch.
const PT_PER_IN: f32 = 72.0;

/// A length in millimetres.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Mm(pub f32);

/// A length in PDF points.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pt(pub f32);

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 / MM_PER_IN * PT_PER_IN)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Self {
        Mm(value.0 / PT_PER_IN * MM_PER_IN)
    }
}

impl Mm {
    /// The physical size of `px` device pixels captured at `scale`.
    pub fn from_device_px(px: u32, scale: f32) -> Mm {
        Mm(px as f32 / scale * PX_TO_MM)
    }
}

macro_rules! impl_arith {
    ($t:ident) => {
        impl Add for $t {
            type Output = $t;
            fn add(self, rhs: $t) -> $t {
                $t(self.0 + rhs.0)
            }
        }

        impl Sub for $t {
            type Output = $t;
            fn sub(self, rhs: $t) -> $t {
                $t(self.0 - rhs.0)
            }
        }

        impl Mul<f32> for $t {
            type Output = $t;
            fn mul(self, rhs: f32) -> $t {
                $t(self.0 * rhs)
            }
        }

        impl Div<f32> for $t {
            type Output = $t;
            fn div(self, rhs: f32) -> $t {
                $t(self.0 / rhs)
            }
        }

        impl Div for $t {
            type Output = f32;
            fn div(self, rhs: $t) -> f32 {
                self.0 / rhs.0
            }
        }
    };
}

impl_arith!(Mm);
impl_arith!(Pt);

/// Page sizes, as (width, height).
pub mod pagesize {
    use super::Mm;

    pub const A4: (Mm, Mm) = (Mm(210.0), Mm(297.0));
}

/// Page margins in millimetres.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Mm,
    pub right: Mm,
    pub bottom: Mm,
    pub left: Mm,
}

impl Margins {
    pub fn all(value: Mm) -> Margins {
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> Mm {
        self.left + self.right
    }

    pub fn vertical(&self) -> Mm {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_mm_and_points() {
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4);

        let mm: Mm = Pt(72.0).into();
        assert!((mm.0 - 25.4).abs() < 1e-4);
    }

    #[test]
    fn device_pixels_account_for_scale() {
        // 794 CSS px is one A4 width at 96 DPI
        let single = Mm::from_device_px(794, 1.0);
        let doubled = Mm::from_device_px(1588, 2.0);
        assert!((single.0 - 210.08).abs() < 0.01);
        assert!((single.0 - doubled.0).abs() < 1e-4);
    }

    #[test]
    fn margins_sum_per_axis() {
        let margins = Margins {
            top: Mm(10.0),
            right: Mm(5.0),
            bottom: Mm(20.0),
            left: Mm(15.0),
        };
        assert_eq!(margins.horizontal(), Mm(20.0));
        assert_eq!(margins.vertical(), Mm(30.0));
    }
}
