// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Closed-form tests for the two largest regions of the complex
//! plane known to lie inside the Mandelbrot set.  A sample landing
//! in either one will never escape, so there is no point iterating
//! it.  Neither test catches everything inside the set; the
//! iteration bound handles the rest.

use num::Complex;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

/// True if the point lies inside (or on the edge of) the main
/// cardioid.
#[inline]
pub fn in_main_cardioid(c: &Complex<f64>) -> bool {
    let p = ((c.re - D4) * (c.re - D4) + c.im * c.im).sqrt();
    let x = p - (2.0 * p * p) + D4;
    c.re <= x
}

/// True if the point lies inside (or on the edge of) the period-2
/// bulb, the disc of radius 1/4 centred on -1.
#[inline]
pub fn in_period2_bulb(c: &Complex<f64>) -> bool {
    let x = (c.re + 1.0) * (c.re + 1.0) + c.im * c.im;
    x <= D16
}

/// True if the sample can be thrown away without iterating it.
#[inline]
pub fn rejects(c: &Complex<f64>) -> bool {
    in_main_cardioid(c) || in_period2_bulb(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_in_the_cardioid() {
        assert!(in_main_cardioid(&Complex::new(0.0, 0.0)));
        assert!(rejects(&Complex::new(0.0, 0.0)));
    }

    #[test]
    fn cardioid_edge_is_rejected() {
        // Both the cusp and the neck of the cardioid sit exactly on
        // the boundary: p is 0 and 1 respectively.
        assert!(in_main_cardioid(&Complex::new(0.25, 0.0)));
        assert!(in_main_cardioid(&Complex::new(-0.75, 0.0)));
    }

    #[test]
    fn bulb_edge_is_rejected() {
        let left = Complex::new(-1.25, 0.0);
        assert!(!in_main_cardioid(&left));
        assert!(in_period2_bulb(&left));
        assert!(rejects(&left));
    }

    #[test]
    fn bulb_centre_is_only_caught_by_the_bulb() {
        let c = Complex::new(-1.0, 0.0);
        assert!(!in_main_cardioid(&c));
        assert!(in_period2_bulb(&c));
    }

    #[test]
    fn escaping_points_are_kept() {
        for c in &[
            Complex::new(0.5, 0.0),
            Complex::new(-2.0, 1.0),
            Complex::new(2.0, 2.0),
            Complex::new(-1.3, 0.0),
            Complex::new(0.26, 0.0),
        ] {
            assert!(!rejects(c), "{} should not be rejected", c);
        }
    }
}
