use crate::config::EngineConfig;
use crate::driver::{FrameDriver, FrameScheduler};
use crate::error::EngineError;
use crate::particle::{Particle, ParticleStore};
use crate::physics;
use crate::render::{self, Surface};
use crate::viewport::Viewport;
use rand::Rng;

/// Particle store, drawing surface and frame loop for one container.
///
/// The host calls `tick` from the frame callback it registered with the
/// scheduler, and `resize` whenever the container changes size.
pub struct Engine<S: Surface, F: FrameScheduler> {
    config: EngineConfig,
    store: ParticleStore,
    viewport: Viewport,
    surface: S,
    driver: FrameDriver<F>,
}

impl<S: Surface, F: FrameScheduler> Engine<S, F> {
    /// Builds the particle field and draws it once. The loop starts stopped.
    pub fn new<R: Rng>(config: EngineConfig, viewport: Viewport, surface: S, scheduler: F, rng: &mut R) -> Self {
        let store = ParticleStore::initialize(&config, &viewport, rng);
        let mut engine = Engine {
            config,
            store,
            viewport,
            surface,
            driver: FrameDriver::new(scheduler),
        };
        engine.resize(viewport);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.driver.start()? {
            log::debug!("particle animation started ({} particles)", self.store.len());
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.driver.stop() {
            log::debug!("particle animation stopped");
        }
    }

    /// Runs one frame if the loop is running. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.driver.begin_frame() {
            return false;
        }
        physics::step(&mut self.store, &self.viewport);
        render::draw_frame(&self.store, &self.config, &self.viewport, &mut self.surface);
        self.driver.schedule_next();
        true
    }

    /// Applies new container geometry and redraws immediately.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(&viewport);
        render::draw_frame(&self.store, &self.config, &self.viewport, &mut self.surface);
    }

    /// Stops the loop and releases the surface. The engine is gone afterwards.
    pub fn teardown(mut self) {
        self.stop();
        self.surface.release();
    }
}
