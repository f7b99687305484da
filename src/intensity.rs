// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a finished histogram into an 8-bit grayscale image, scaling
//! every cell linearly against the busiest one.

use histogram::Histogram;

/// A square, row-major grayscale image.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityImage {
    size: usize,
    pixels: Vec<u8>,
}

impl IntensityImage {
    /// Normalize a histogram.  The busiest cell becomes 255 and every
    /// other cell `floor(255 * count / max)`.  A histogram with
    /// nothing in it produces a black image.
    pub fn from_histogram(histogram: &Histogram) -> IntensityImage {
        let max = u64::from(histogram.max());
        let pixels = if max == 0 {
            vec![0 as u8; histogram.counts().len()]
        } else {
            histogram
                .counts()
                .iter()
                .map(|&count| (255 * u64::from(count) / max) as u8)
                .collect()
        };
        IntensityImage {
            size: histogram.size(),
            pixels,
        }
    }

    /// Width and height of the image.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The gray level of one pixel.  Panics outside the image.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.size && col < self.size);
        self.pixels[row * self.size + col]
    }

    /// Raw row-major bytes, one per pixel, ready for an 8-bit
    /// grayscale encoder.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Every pixel as `(row, column, gray)`, in row-major order.
    pub fn pixels<'a>(&'a self) -> impl Iterator<Item = (usize, usize, u8)> + 'a {
        iproduct!(0..self.size, 0..self.size).map(move |(row, col)| (row, col, self.get(row, col)))
    }
}
