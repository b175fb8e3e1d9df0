// Draws one frame of the particle field onto a `Surface`. The surface works in
// centred CSS-pixel coordinates; the viewport transform is its concern.

use crate::color::Color;
use crate::config::EngineConfig;
use crate::particle::ParticleStore;
use crate::viewport::Viewport;
use vecmath::Vector2;

/// Anything the engine can draw onto.
pub trait Surface {
    /// Applies a new viewport: backing resolution, displayed size and origin.
    fn resize(&mut self, viewport: &Viewport);

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color);

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color);

    /// Called once when the engine is torn down.
    fn release(&mut self) {}
}

/// Opacity of the connective line between two particles `distance` apart, or
/// `None` when they are too far apart to be joined.
pub fn line_alpha(distance: f64, threshold: f64) -> Option<f64> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

pub fn draw_frame<S: Surface + ?Sized>(
    store: &ParticleStore,
    config: &EngineConfig,
    viewport: &Viewport,
    surface: &mut S,
) {
    let (x, y, width, height) = viewport.clear_rect();
    surface.clear(x, y, width, height);

    let particles = store.as_slice();
    for (i, p1) in particles.iter().enumerate() {
        for p2 in &particles[i + 1..] {
            let distance = vecmath::vec2_len(vecmath::vec2_sub(p1.pos, p2.pos));
            if let Some(alpha) = line_alpha(distance, config.line_distance) {
                surface.stroke_line(p1.pos, p2.pos, config.line_width, config.line_color.scale_alpha(alpha));
            }
        }
    }

    for p in particles {
        surface.fill_circle(p.pos, p.radius, config.color.scale_alpha(p.opacity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::testing::{DrawCall, RecordingSurface};

    fn at(x: f64, y: f64, opacity: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 3.0, opacity)
    }

    #[test]
    fn line_alpha_fades_linearly() {
        assert_eq!(line_alpha(0.0, 100.0), Some(1.0));
        assert_eq!(line_alpha(25.0, 100.0), Some(0.75));
        assert_eq!(line_alpha(100.0, 100.0), None);
        assert_eq!(line_alpha(150.0, 100.0), None);
    }

    #[test]
    fn zero_threshold_never_draws_lines() {
        assert_eq!(line_alpha(0.0, 0.0), None);
    }

    #[test]
    fn clears_then_lines_then_particles() {
        let store = ParticleStore::from_particles(vec![at(0.0, 0.0, 0.5), at(30.0, 40.0, 0.25), at(200.0, 0.0, 1.0)]);
        let config = EngineConfig::default();
        let viewport = Viewport::new(600.0, 400.0, 1.0);
        let mut surface = RecordingSurface::default();

        draw_frame(&store, &config, &viewport, &mut surface);

        let calls = &surface.calls;
        assert_eq!(calls.len(), 1 + 1 + 3);
        assert_eq!(calls[0], DrawCall::Clear(-300.0, -200.0, 600.0, 400.0));
        match &calls[1] {
            DrawCall::Line { from, to, width, color } => {
                assert_eq!(*from, [0.0, 0.0]);
                assert_eq!(*to, [30.0, 40.0]);
                assert_eq!(*width, 0.5);
                // distance 50 of 100 => half of the configured 0.2 alpha
                assert!((color.a - 0.1).abs() < 1e-12);
            }
            other => panic!("expected a line, got {:?}", other),
        }
        let circles: Vec<_> = calls[2..]
            .iter()
            .map(|c| match c {
                DrawCall::Circle { radius, color, .. } => (*radius, color.a),
                other => panic!("expected a circle, got {:?}", other),
            })
            .collect();
        assert_eq!(circles.len(), 3);
        assert!((circles[0].1 - 0.35).abs() < 1e-12);
        assert!((circles[1].1 - 0.175).abs() < 1e-12);
        assert!((circles[2].1 - 0.7).abs() < 1e-12);
    }

    #[test]
    fn coincident_particles_get_full_line_alpha() {
        let store = ParticleStore::from_particles(vec![at(5.0, 5.0, 1.0), at(5.0, 5.0, 1.0)]);
        let config = EngineConfig {
            line_color: Color::rgba(10, 20, 30, 1.0),
            ..EngineConfig::default()
        };
        let mut surface = RecordingSurface::default();
        draw_frame(&store, &config, &Viewport::new(100.0, 100.0, 1.0), &mut surface);

        assert_eq!(surface.lines().len(), 1);
        assert_eq!(surface.lines()[0].a, 1.0);
    }

    #[test]
    fn empty_store_only_clears() {
        let mut surface = RecordingSurface::default();
        draw_frame(
            &ParticleStore::default(),
            &EngineConfig::default(),
            &Viewport::new(10.0, 10.0, 1.0),
            &mut surface,
        );
        assert_eq!(surface.calls, vec![DrawCall::Clear(-5.0, -5.0, 10.0, 10.0)]);
    }
}
