// ABOUTME: Triangle geometry — triangle-inequality validation, Heron's formula, labnah conversion.
// ABOUTME: Pure functions only; callers validate before computing an area.

use serde::{Deserialize, Serialize};

/// Square meters in one labnah, the regional unit areas are converted to.
pub const LABNAH_IN_SQUARE_METERS: f64 = 44.4444;

/// Returns true iff all sides are strictly positive and each side is strictly
/// shorter than the sum of the other two. Degenerate triangles are rejected.
pub fn validate_triangle(a: f64, b: f64, c: f64) -> bool {
    a > 0.0 && b > 0.0 && c > 0.0 && a + b > c && a + c > b && b + c > a
}

/// Area by Heron's formula. Only meaningful for a validated triple; an invalid
/// one may produce NaN.
pub fn compute_area(a: f64, b: f64, c: f64) -> f64 {
    let s = (a + b + c) / 2.0;
    (s * (s - a) * (s - b) * (s - c)).sqrt()
}

/// Converts an area in square meters to labnah. No rounding.
pub fn convert_to_secondary_unit(area_m2: f64) -> f64 {
    area_m2 / LABNAH_IN_SQUARE_METERS
}

/// A validated triangle described by its three side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub side1: f64,
    pub side2: f64,
    pub hypotenuse: f64,
}

impl Triangle {
    /// Builds a triangle, or `None` if the sides fail [`validate_triangle`].
    pub fn new(side1: f64, side2: f64, hypotenuse: f64) -> Option<Self> {
        validate_triangle(side1, side2, hypotenuse).then_some(Self {
            side1,
            side2,
            hypotenuse,
        })
    }

    pub fn area_m2(&self) -> f64 {
        compute_area(self.side1, self.side2, self.hypotenuse)
    }

    pub fn area_labnah(&self) -> f64 {
        convert_to_secondary_unit(self.area_m2())
    }
}
