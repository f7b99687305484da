// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before or during a histogram pass.

use std::result;

/// Failures raised by the renderer.  All of them are configuration
/// problems detected before sampling starts, except for a worker
/// thread dying mid-pass.
#[derive(Debug, Fail, PartialEq)]
pub enum BuddhaError {
    /// The plane region's minimum corner is not strictly below and to
    /// the left of its maximum corner.
    #[fail(
        display = "Invalid plane region: ({}, {}) is not strictly below ({}, {})",
        min_re, min_im, max_re, max_im
    )]
    InvalidRegion {
        /// Real part of the minimum corner.
        min_re: f64,
        /// Imaginary part of the minimum corner.
        min_im: f64,
        /// Real part of the maximum corner.
        max_re: f64,
        /// Imaginary part of the maximum corner.
        max_im: f64,
    },

    /// An output resolution of zero pixels.
    #[fail(display = "The output image must be at least one pixel wide")]
    EmptyResolution,

    /// A pass was requested with no worker threads.
    #[fail(display = "At least one worker thread is required")]
    NoWorkers,

    /// Two histograms of different resolutions were merged.
    #[fail(display = "Cannot merge a {}x{} histogram into a {}x{} one", theirs, theirs, ours, ours)]
    SizeMismatch {
        /// Size of the receiving histogram.
        ours: usize,
        /// Size of the histogram being merged in.
        theirs: usize,
    },

    /// A sampling worker panicked before finishing its batches.
    #[fail(display = "A sampling worker panicked")]
    WorkerPanicked,
}

/// Result type used throughout the renderer.
pub type Result<T> = result::Result<T, BuddhaError>;
