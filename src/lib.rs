//! Decorative particle background for a canvas, compiled to WebAssembly.
//!
//! The engine core (particles, physics, rendering, frame loop) is host
//! independent and draws through [`render::Surface`] and schedules through
//! [`driver::FrameScheduler`]. The `web` module plugs those into a 2d canvas
//! and `requestAnimationFrame`.

mod utils;

pub mod color;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod particle;
pub mod physics;
pub mod render;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ColorParseError, ConfigError, EngineError};
pub use viewport::Viewport;

#[cfg(target_arch = "wasm32")]
pub use web::{mount_hero_background, ParticleBackground};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    #[cfg(target_arch = "wasm32")]
    web::init_logging();
}
