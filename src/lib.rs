#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Buddhabrot renderer
//!
//! The Buddhabrot is a variant of the Mandelbrot set that explores
//! what happens *outside* the black heart of the Mandelbrot.  The
//! Mandelbrot takes a point on the complex plane and repeatedly
//! squares it, adding the original point back in each time, and
//! colors the point by how quickly it runs off to infinity.
//!
//! Each of those iterations is itself a complex number, and so a
//! coordinate on the complex plane.  The Buddhabrot picks points at
//! random, throws away the ones that never escape, and for every one
//! that does, maps each step of its "orbit" to the nearest pixel and
//! increments that pixel by one.  Scaled against the busiest pixel,
//! the density of all those orbits is the image.
//!
//! Sampling is Monte-Carlo: [`sample_pass`] spreads the samples over a
//! pool of worker threads, and a [`Session`] caches the resulting
//! [`IntensityImage`] until its configuration changes.

extern crate crossbeam;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod errors;
pub mod filter;
pub mod histogram;
pub mod intensity;
pub mod orbit;
pub mod planes;
pub mod sampler;
pub mod session;

pub use errors::{BuddhaError, Result};
pub use histogram::Histogram;
pub use intensity::IntensityImage;
pub use orbit::{trace, Orbit};
pub use planes::{PlaneMapper, PlaneRegion};
pub use sampler::{sample_pass, Outcome, Pass, PassStats, RenderConfig, Sampler};
pub use session::{Freshness, ImageConsumer, Session};

/// A point on the complex plane.
pub type Point = num::Complex<f64>;
