// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The visit-count grid.  Each escaping orbit increments every cell
//! its points pass through; the grid is only ever incremented, merged
//! or cleared.

use errors::{BuddhaError, Result};
use num::Complex;
use planes::PlaneMapper;

/// A square grid of visit counts stored row-major in one buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    size: usize,
    counts: Vec<u32>,
}

impl Histogram {
    /// A `size` by `size` grid of zeros.
    pub fn new(size: usize) -> Histogram {
        Histogram {
            size,
            counts: vec![0 as u32; size * size],
        }
    }

    /// Width and height of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The visit count of one cell.  Panics if the cell lies outside
    /// the grid.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.size && col < self.size);
        self.counts[row * self.size + col]
    }

    /// The raw row-major counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The highest visit count in the grid, zero if the grid is empty.
    pub fn max(&self) -> u32 {
        self.counts.iter().cloned().max().unwrap_or(0)
    }

    /// The sum of every cell.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Plot an orbit: every point of it inside the mapper's region
    /// adds one to the cell it lands in.  Points outside the region
    /// are skipped.
    pub fn accumulate(&mut self, orbit: &[Complex<f64>], mapper: &PlaneMapper) {
        debug_assert_eq!(mapper.size(), self.size);
        for point in orbit {
            if let Some(pixel) = mapper.point_to_pixel(point) {
                let cell = &mut self.counts[mapper.offset(pixel)];
                *cell = cell.saturating_add(1);
            }
        }
    }

    /// Add another grid of the same size into this one, cell by cell.
    /// Used to fold the per-worker grids of a pass together.
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        if other.size != self.size {
            return Err(BuddhaError::SizeMismatch {
                ours: self.size,
                theirs: other.size,
            });
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine = mine.saturating_add(*theirs);
        }
        Ok(())
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        for cell in self.counts.iter_mut() {
            *cell = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes::PlaneRegion;

    fn mapper(size: usize, min: (f64, f64), max: (f64, f64)) -> PlaneMapper {
        let region =
            PlaneRegion::new(Complex::new(min.0, min.1), Complex::new(max.0, max.1)).unwrap();
        PlaneMapper::new(size, region).unwrap()
    }

    #[test]
    fn new_histogram_is_zeroed() {
        let h = Histogram::new(4);
        assert_eq!(h.counts().len(), 16);
        assert_eq!(h.max(), 0);
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn accumulate_counts_in_bounds_points() {
        let pm = mapper(4, (-2.0, -2.0), (2.0, 2.0));
        let mut h = Histogram::new(4);
        h.accumulate(&[Complex::new(2.0, 2.0)], &pm);
        assert_eq!(h.get(3, 3), 1);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn accumulate_skips_out_of_bounds_points() {
        let pm = mapper(4, (-2.0, -1.5), (1.0, 1.5));
        let mut h = Histogram::new(4);
        h.accumulate(
            &[Complex::new(2.0, 2.0), Complex::new(-0.5, 0.0), Complex::new(0.0, -9.0)],
            &pm,
        );
        assert_eq!(h.total(), 1);
        assert_eq!(h.get(2, 2), 1);
    }

    #[test]
    fn accumulate_counts_repeat_visits() {
        let pm = mapper(4, (-2.0, -2.0), (2.0, 2.0));
        let mut h = Histogram::new(4);
        let p = Complex::new(0.1, -0.1);
        h.accumulate(&[p, p, p], &pm);
        h.accumulate(&[p], &pm);
        assert_eq!(h.get(2, 1), 4);
        assert_eq!(h.max(), 4);
    }

    #[test]
    fn merge_sums_cells() {
        let pm = mapper(2, (0.0, 0.0), (2.0, 2.0));
        let mut a = Histogram::new(2);
        let mut b = Histogram::new(2);
        a.accumulate(&[Complex::new(0.5, 0.5), Complex::new(1.5, 0.5)], &pm);
        b.accumulate(&[Complex::new(0.5, 0.5), Complex::new(1.5, 1.5)], &pm);
        a.merge(&b).unwrap();
        assert_eq!(a.counts(), &[2, 0, 1, 1]);
        assert_eq!(b.total(), 2);
    }

    #[test]
    fn merge_refuses_mismatched_sizes() {
        let mut a = Histogram::new(2);
        let b = Histogram::new(3);
        assert_eq!(
            a.merge(&b),
            Err(BuddhaError::SizeMismatch { ours: 2, theirs: 3 })
        );
    }

    #[test]
    fn clear_resets_everything() {
        let pm = mapper(2, (0.0, 0.0), (2.0, 2.0));
        let mut h = Histogram::new(2);
        h.accumulate(&[Complex::new(0.5, 0.5)], &pm);
        h.clear();
        assert_eq!(h, Histogram::new(2));
    }
}
