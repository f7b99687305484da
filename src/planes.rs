// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneRegion, the rectangle of the complex plane we
//! both sample from and display, and the PlaneMapper, which relates
//! that rectangle to a square integral plane with its origin at 0,0.
//!
//! The real axis runs down the rows of the image and the imaginary
//! axis runs across the columns, which stands the Buddha upright.
use errors::{BuddhaError, Result};
use num::Complex;

/// Describes the row and column of a cell in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The minimum and maximum corners of a rectangle on the complex
/// plane.  Once built, the corners are known to be well ordered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneRegion {
    min: Complex<f64>,
    max: Complex<f64>,
}

impl PlaneRegion {
    /// Constructor.  Every bound, and the width and height between
    /// them, must be finite, and the minimum corner must be strictly
    /// less than the maximum corner on both axes.
    pub fn new(min: Complex<f64>, max: Complex<f64>) -> Result<PlaneRegion> {
        let finite = min.re.is_finite()
            && min.im.is_finite()
            && max.re.is_finite()
            && max.im.is_finite()
            && (max.re - min.re).is_finite()
            && (max.im - min.im).is_finite();
        if !finite || min.re >= max.re || min.im >= max.im {
            return Err(BuddhaError::InvalidRegion {
                min_re: min.re,
                min_im: min.im,
                max_re: max.re,
                max_im: max.im,
            });
        }
        Ok(PlaneRegion { min, max })
    }

    /// The corner with the smallest real and imaginary parts.
    pub fn min(&self) -> Complex<f64> {
        self.min
    }

    /// The corner with the largest real and imaginary parts.
    pub fn max(&self) -> Complex<f64> {
        self.max
    }

    /// True if the point lies inside the rectangle, edges included.
    pub fn contains(&self, point: &Complex<f64>) -> bool {
        point.re >= self.min.re
            && point.re <= self.max.re
            && point.im >= self.min.im
            && point.im <= self.max.im
    }
}

impl Default for PlaneRegion {
    fn default() -> Self {
        PlaneRegion {
            min: Complex::new(-2.0, -1.5),
            max: Complex::new(1.0, 1.5),
        }
    }
}

/// Map a single coordinate on one axis of the complex plane to its
/// index on the matching axis of the integral plane.  The result is
/// not clamped; values outside `min..max` land outside `0..resolution`.
#[inline]
pub fn axis_to_index(value: f64, min: f64, max: f64, resolution: usize) -> i64 {
    ((value - min) * (resolution as f64) / (max - min)).floor() as i64
}

/// Relates a PlaneRegion to a `size` by `size` grid of cells.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    size: usize,
    region: PlaneRegion,
}

impl PlaneMapper {
    /// Constructor.  A zero-sized grid has nowhere to put anything
    /// and is refused.
    pub fn new(size: usize, region: PlaneRegion) -> Result<PlaneMapper> {
        if size == 0 {
            return Err(BuddhaError::EmptyResolution);
        }
        Ok(PlaneMapper { size, region })
    }

    /// Width and height of the integral plane.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The total number of cells in the integral plane.
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The region of the complex plane being mapped.
    pub fn region(&self) -> &PlaneRegion {
        &self.region
    }

    /// Given a complex number, find the cell of the integral plane it
    /// falls in, or None if it lies outside the region.  A point
    /// sitting exactly on the maximum edge maps one past the last
    /// cell, so it is folded back into the last row or column.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        if !self.region.contains(point) {
            return None;
        }
        let (min, max) = (self.region.min, self.region.max);
        let row = axis_to_index(point.re, min.re, max.re, self.size);
        let col = axis_to_index(point.im, min.im, max.im, self.size);
        Some(Pixel(self.fold(row), self.fold(col)))
    }

    /// The linear offset of a cell from the root of a row-major buffer.
    pub fn offset(&self, pixel: Pixel) -> usize {
        pixel.0 * self.size + pixel.1
    }

    fn fold(&self, index: i64) -> usize {
        let last = (self.size - 1) as i64;
        if index < 0 {
            0
        } else if index > last {
            last as usize
        } else {
            index as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(min: (f64, f64), max: (f64, f64)) -> PlaneRegion {
        PlaneRegion::new(Complex::new(min.0, min.1), Complex::new(max.0, max.1)).unwrap()
    }

    #[test]
    fn region_fails_on_bad_shape() {
        let pr = PlaneRegion::new(Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pr.is_err());
        let pr = PlaneRegion::new(Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(pr.is_err());
    }

    #[test]
    fn region_fails_on_degenerate_shape() {
        let pr = PlaneRegion::new(Complex::new(0.0, -1.0), Complex::new(0.0, 1.0));
        assert_eq!(
            pr,
            Err(BuddhaError::InvalidRegion {
                min_re: 0.0,
                min_im: -1.0,
                max_re: 0.0,
                max_im: 1.0
            })
        );
        let nan = PlaneRegion::new(Complex::new(std::f64::NAN, -1.0), Complex::new(1.0, 1.0));
        assert!(nan.is_err());
    }

    #[test]
    fn region_fails_on_infinite_bounds() {
        let inf = std::f64::INFINITY;
        let cases = [
            (Complex::new(-inf, -1.5), Complex::new(1.0, 1.5)),
            (Complex::new(-2.0, -inf), Complex::new(1.0, 1.5)),
            (Complex::new(-2.0, -1.5), Complex::new(inf, 1.5)),
            (Complex::new(-2.0, -1.5), Complex::new(1.0, inf)),
            (Complex::new(std::f64::MIN, -1.5), Complex::new(std::f64::MAX, 1.5)),
        ];
        for &(min, max) in &cases {
            match PlaneRegion::new(min, max) {
                Err(BuddhaError::InvalidRegion { .. }) => (),
                other => panic!("{} .. {} gave {:?}", min, max, other),
            }
        }
    }

    #[test]
    fn region_passes_on_good_shape() {
        let pr = PlaneRegion::new(Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pr.is_ok());
    }

    #[test]
    fn region_contains_its_edges() {
        let pr = region((-2.0, -1.5), (1.0, 1.5));
        assert!(pr.contains(&Complex::new(-2.0, -1.5)));
        assert!(pr.contains(&Complex::new(1.0, 1.5)));
        assert!(pr.contains(&Complex::new(0.0, 0.0)));
        assert!(!pr.contains(&Complex::new(1.0001, 0.0)));
        assert!(!pr.contains(&Complex::new(0.0, -1.5001)));
    }

    #[test]
    fn mapper_fails_on_empty_plane() {
        assert!(PlaneMapper::new(0, PlaneRegion::default()).is_err());
    }

    #[test]
    fn axis_to_index_maps_min_and_last_cell() {
        assert_eq!(axis_to_index(-2.0, -2.0, 2.0, 4), 0);
        assert_eq!(axis_to_index(1.0, -2.0, 2.0, 4), 3);
        assert_eq!(axis_to_index(-2.0, -2.0, 1.0, 1000), 0);
        assert_eq!(axis_to_index(0.999, -2.0, 1.0, 1000), 999);
    }

    #[test]
    fn axis_to_index_does_not_clamp() {
        assert_eq!(axis_to_index(2.0, -2.0, 2.0, 4), 4);
        assert_eq!(axis_to_index(-3.0, -2.0, 2.0, 4), -1);
    }

    #[test]
    fn point_to_pixel_on_positive_planes() {
        let pm = PlaneMapper::new(5, region((0.0, 0.0), (5.0, 5.0))).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex::new(4.5, 1.2)), Some(Pixel(4, 1)));
    }

    #[test]
    fn point_to_pixel_puts_real_on_rows() {
        let pm = PlaneMapper::new(4, region((-2.0, -2.0), (2.0, 2.0))).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(1.5, -1.5)), Some(Pixel(3, 0)));
        assert_eq!(pm.offset(Pixel(3, 0)), 12);
    }

    #[test]
    fn point_to_pixel_folds_max_edge_into_last_cell() {
        let pm = PlaneMapper::new(4, region((-2.0, -2.0), (2.0, 2.0))).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), Some(Pixel(3, 3)));
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(2, 2)));
    }

    #[test]
    fn point_to_pixel_skips_outside_points() {
        let pm = PlaneMapper::new(640, region((-2.0, -1.5), (1.0, 1.5))).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 2.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.5, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 1.6)), None);
    }
}
