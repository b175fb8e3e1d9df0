use crate::particle::ParticleStore;
use crate::viewport::Viewport;

// Like JS Math.sign: zero stays zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Moves every particle by its velocity and bounces it off the container edges.
///
/// Each axis is handled independently. A particle whose edge passes the
/// boundary has that velocity component negated and is snapped back onto the
/// boundary; a particle sitting exactly on it is left alone.
pub fn step(store: &mut ParticleStore, viewport: &Viewport) {
    let half = viewport.half_extent();
    for particle in store.iter_mut() {
        particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

        for axis in 0..2 {
            let limit = half[axis] - particle.radius;
            if particle.pos[axis].abs() > limit {
                particle.vel[axis] *= -1.0;
                particle.pos[axis] = sign(particle.pos[axis]) * limit;
            }
        }
    }
}
