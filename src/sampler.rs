// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Monte-Carlo driver.  A pass draws random samples from the
//! plane region, throws away those known to lie in the heart of the
//! Mandelbrot set, traces the rest and plots the orbits of those that
//! escape.
//!
//! Samples are independent and histogram increments commute, so the
//! pass is cut into batches handed out to a pool of scoped threads.
//! Each thread plots into its own histogram and the histograms are
//! merged once every thread has finished.  Every batch carries its
//! own seed, derived from the batch's index and one base seed drawn
//! from the caller's generator, which makes a pass reproducible from
//! that generator alone no matter how many threads run it or which
//! thread picks up which batch.

use std::ops::Add;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam::thread::ScopedJoinHandle;
use num::Complex;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use errors::{BuddhaError, Result};
use filter::rejects;
use histogram::Histogram;
use orbit::trace_into;
use planes::{PlaneMapper, PlaneRegion};

/// The number of samples a worker takes from the queue at a time.
pub const BATCH_SIZE: usize = 4096;

/// Everything needed to run a pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Width and height of the output image, in pixels.
    pub size: usize,
    /// The rectangle samples are drawn from and orbits are plotted in.
    pub region: PlaneRegion,
    /// How many samples to draw per pass.
    pub samples: usize,
    /// How many iterations an orbit gets before we give up on it.
    pub iterations: usize,
    /// How many worker threads share the pass.
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let size = 1000;
        RenderConfig {
            size,
            region: PlaneRegion::default(),
            samples: size * size * 30,
            iterations: 100,
            threads: 1,
        }
    }
}

impl RenderConfig {
    /// Check the configuration before any sampling starts.
    pub fn validate(&self) -> Result<()> {
        PlaneRegion::new(self.region.min(), self.region.max())?;
        if self.size == 0 {
            return Err(BuddhaError::EmptyResolution);
        }
        if self.threads == 0 {
            return Err(BuddhaError::NoWorkers);
        }
        Ok(())
    }
}

/// What became of a single sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Caught by the cardioid or bulb test; never iterated.
    Rejected,
    /// Still bounded when the iteration limit ran out.
    Bounded,
    /// Escaped; carries the length of its orbit.
    Escaped(usize),
}

/// Tallies of sample outcomes over some number of samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PassStats {
    /// Samples thrown away by the cardioid and bulb tests.
    pub rejected: usize,
    /// Samples that hit the iteration limit.
    pub bounded: usize,
    /// Samples whose orbits escaped and were plotted.
    pub escaped: usize,
}

impl PassStats {
    /// Total samples accounted for.
    pub fn samples(&self) -> usize {
        self.rejected + self.bounded + self.escaped
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Rejected => self.rejected += 1,
            Outcome::Bounded => self.bounded += 1,
            Outcome::Escaped(_) => self.escaped += 1,
        }
    }
}

impl Add for PassStats {
    type Output = PassStats;

    fn add(self, other: PassStats) -> PassStats {
        PassStats {
            rejected: self.rejected + other.rejected,
            bounded: self.bounded + other.bounded,
            escaped: self.escaped + other.escaped,
        }
    }
}

/// The result of a complete pass.
#[derive(Clone, Debug)]
pub struct Pass {
    /// The merged visit counts.
    pub histogram: Histogram,
    /// What happened to the samples.
    pub stats: PassStats,
}

/// Draws and plots samples for one configuration.  Cheap to build,
/// shared read-only between workers.
#[derive(Debug)]
pub struct Sampler {
    mapper: PlaneMapper,
    iterations: usize,
    real: Uniform<f64>,
    imag: Uniform<f64>,
}

impl Sampler {
    /// Build a sampler for a configuration, validating it first.
    pub fn new(config: &RenderConfig) -> Result<Sampler> {
        config.validate()?;
        let (min, max) = (config.region.min(), config.region.max());
        Ok(Sampler {
            mapper: PlaneMapper::new(config.size, config.region)?,
            iterations: config.iterations,
            real: Uniform::new_inclusive(min.re, max.re),
            imag: Uniform::new_inclusive(min.im, max.im),
        })
    }

    /// The plane mapper samples are plotted through.
    pub fn mapper(&self) -> &PlaneMapper {
        &self.mapper
    }

    /// A fresh, empty histogram the right size for this sampler.
    pub fn histogram(&self) -> Histogram {
        Histogram::new(self.mapper.size())
    }

    /// Draw one sample uniformly from the region.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Complex<f64> {
        let re = self.real.sample(rng);
        let im = self.imag.sample(rng);
        Complex::new(re, im)
    }

    /// Classify one sample, plotting its orbit if it escapes.  `orbit`
    /// is scratch space, reused from call to call.
    pub fn visit(
        &self,
        c: Complex<f64>,
        histogram: &mut Histogram,
        orbit: &mut Vec<Complex<f64>>,
    ) -> Outcome {
        if rejects(&c) {
            return Outcome::Rejected;
        }
        if !trace_into(c, self.iterations, orbit) {
            return Outcome::Bounded;
        }
        histogram.accumulate(orbit, &self.mapper);
        Outcome::Escaped(orbit.len())
    }

    /// Draw and visit `count` samples.
    pub fn sample_into<R: Rng>(
        &self,
        histogram: &mut Histogram,
        rng: &mut R,
        count: usize,
    ) -> PassStats {
        let mut stats = PassStats::default();
        let mut orbit = Vec::with_capacity(self.iterations);
        for _ in 0..count {
            let c = self.draw(rng);
            stats.record(self.visit(c, histogram, &mut orbit));
        }
        stats
    }
}

/// Hands out the batches of a pass one at a time: at most BATCH_SIZE
/// samples each, seeded from one base seed plus the batch index.
#[derive(Debug)]
struct Batches {
    remaining: usize,
    index: u64,
    base_seed: u64,
}

impl Batches {
    fn new<R: Rng>(samples: usize, rng: &mut R) -> Batches {
        Batches {
            remaining: samples,
            index: 0,
            base_seed: rng.gen::<u64>(),
        }
    }
}

impl Iterator for Batches {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<(usize, u64)> {
        if self.remaining == 0 {
            return None;
        }
        let count = self.remaining.min(BATCH_SIZE);
        let seed = self.base_seed.wrapping_add(self.index);
        self.remaining -= count;
        self.index += 1;
        Some((count, seed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining / BATCH_SIZE + usize::from(self.remaining % BATCH_SIZE != 0);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Batches {}

/// Run a complete pass: draw `config.samples` samples across
/// `config.threads` workers and merge what they plotted.
pub fn sample_pass<R: Rng>(config: &RenderConfig, rng: &mut R) -> Result<Pass> {
    let sampler = Sampler::new(config)?;
    let batches = Batches::new(config.samples, rng);
    let halfway = batches.len() / 2;
    let workers = config.threads.min(batches.len()).max(1);
    debug!(
        "Sampling {} points in {} batches across {} workers",
        config.samples,
        batches.len(),
        workers
    );

    let queue = Arc::new(Mutex::new(batches));
    let finished = Arc::new(AtomicUsize::new(0));
    let sampler = &sampler;

    let partials = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<(Histogram, PassStats)>> = (0..workers)
            .map(|_| {
                let queue = queue.clone();
                let finished = finished.clone();
                spawner.spawn(move |_| {
                    let mut histogram = sampler.histogram();
                    let mut stats = PassStats::default();
                    loop {
                        let batch = { queue.lock().ok().and_then(|mut q| q.next()) };
                        match batch {
                            Some((count, seed)) => {
                                let mut rng = StdRng::seed_from_u64(seed);
                                stats = stats + sampler.sample_into(&mut histogram, &mut rng, count);
                                if finished.fetch_add(1, Ordering::SeqCst) + 1 == halfway {
                                    info!("Half of the points calculated");
                                }
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    (histogram, stats)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<::std::thread::Result<Vec<(Histogram, PassStats)>>>()
    })
    .map_err(|_| BuddhaError::WorkerPanicked)?
    .map_err(|_| BuddhaError::WorkerPanicked)?;

    let mut histogram = sampler.histogram();
    let mut stats = PassStats::default();
    for (partial, partial_stats) in &partials {
        histogram.merge(partial)?;
        stats = stats + *partial_stats;
    }
    info!("Finished plotting");
    debug!(
        "{} rejected, {} bounded, {} escaped, {} points plotted",
        stats.rejected,
        stats.bounded,
        stats.escaped,
        histogram.total()
    );
    Ok(Pass { histogram, stats })
}
