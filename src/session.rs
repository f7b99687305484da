// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A Session owns a configuration, a random generator and the most
//! recently rendered image, and only re-renders when the image no
//! longer matches the configuration.  Whatever eventually shows or
//! stores the image sits behind the ImageConsumer trait.

use failure;
use rand::rngs::StdRng;
use rand::SeedableRng;

use errors::Result;
use intensity::IntensityImage;
use sampler::{sample_pass, RenderConfig};

/// Anything that can present a finished image.  Called once per
/// presentation, with a complete image; never with a partial one.
pub trait ImageConsumer {
    /// Present the image.
    fn render(&mut self, image: &IntensityImage) -> ::std::result::Result<(), failure::Error>;
}

/// Whether the cached image reflects the current configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Freshness {
    /// No image, or one rendered from an older configuration.
    Stale,
    /// The cached image was rendered from the current configuration.
    Fresh,
}

/// A renderer that remembers its last image.
pub struct Session {
    config: RenderConfig,
    rng: StdRng,
    state: Freshness,
    image: Option<IntensityImage>,
}

impl Session {
    /// Start a session with the given generator.  Nothing is rendered
    /// until the first refresh.
    pub fn new(config: RenderConfig, rng: StdRng) -> Result<Session> {
        config.validate()?;
        Ok(Session {
            config,
            rng,
            state: Freshness::Stale,
            image: None,
        })
    }

    /// Start a session whose passes are reproducible from `seed`.
    pub fn seeded(config: RenderConfig, seed: u64) -> Result<Session> {
        Session::new(config, StdRng::seed_from_u64(seed))
    }

    /// The current configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Whether the cached image is current.
    pub fn state(&self) -> Freshness {
        self.state
    }

    /// The last rendered image, if any.  May be stale.
    pub fn image(&self) -> Option<&IntensityImage> {
        self.image.as_ref()
    }

    /// Replace the configuration.  A bad configuration is refused and
    /// leaves the session as it was.
    pub fn reconfigure(&mut self, config: RenderConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.state = Freshness::Stale;
        Ok(())
    }

    /// Run a pass if the cached image is stale, and return the image.
    pub fn refresh(&mut self) -> Result<&IntensityImage> {
        let image = match self.image.take() {
            Some(image) if self.state == Freshness::Fresh => image,
            stale => match sample_pass(&self.config, &mut self.rng) {
                Ok(pass) => IntensityImage::from_histogram(&pass.histogram),
                Err(e) => {
                    self.image = stale;
                    return Err(e);
                }
            },
        };
        self.state = Freshness::Fresh;
        Ok(self.image.get_or_insert(image))
    }

    /// Refresh if needed, then hand the image to a consumer.
    pub fn present<C: ImageConsumer>(
        &mut self,
        consumer: &mut C,
    ) -> ::std::result::Result<(), failure::Error> {
        let image = self.refresh()?;
        consumer.render(image)
    }
}
