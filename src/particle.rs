// Simple particle struct to keep track of individual position, velocity, size
// and opacity, plus the fixed-length store the engine animates.

use crate::config::EngineConfig;
use crate::viewport::Viewport;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Scatters `config.particle_count` particles over the viewport.
    pub fn initialize<R: Rng>(config: &EngineConfig, viewport: &Viewport, rng: &mut R) -> ParticleStore {
        let mut particles = Vec::with_capacity(config.particle_count);
        let sample = |rng: &mut R, min: f64, max: f64| rng.gen::<f64>() * (max - min) + min;

        for _ in 0..config.particle_count {
            let radius = sample(rng, config.min_size, config.max_size);
            let x = (rng.gen::<f64>() - 0.5) * viewport.width;
            let y = (rng.gen::<f64>() - 0.5) * viewport.height;
            let opacity = sample(rng, config.min_opacity, config.max_opacity);
            let vel_x = (rng.gen::<f64>() - 0.5) * config.speed;
            let vel_y = (rng.gen::<f64>() - 0.5) * config.speed;
            particles.push(Particle::new([x, y], [vel_x, vel_y], radius, opacity));
        }

        ParticleStore { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> ParticleStore {
        ParticleStore { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}
