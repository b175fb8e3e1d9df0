use crate::color::Color;
use crate::error::ConfigError;
use serde::Deserialize;
use serde_json::Value;

/// Options recognized by the particle engine.
///
/// Built from the JS options object: each recognized key is applied on its
/// own over the defaults below, so a key with a bad value is dropped (with a
/// warning) without losing the others. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub min_size: f64,
    pub max_size: f64,
    /// Velocity components are drawn from `[-speed / 2, speed / 2)`.
    pub speed: f64,
    pub color: Color,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Particles closer than this are joined by a connective line.
    pub line_distance: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub auto_start: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 30,
            min_size: 2.0,
            max_size: 6.0,
            speed: 2.0,
            color: Color::rgba(255, 255, 255, 0.7),
            min_opacity: 0.1,
            max_opacity: 0.7,
            line_distance: 100.0,
            line_color: Color::rgba(255, 255, 255, 0.2),
            line_width: 0.5,
            auto_start: true,
        }
    }
}

// Every recognized key, still untyped. Each one is converted separately.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOptions {
    particle_count: Option<Value>,
    min_size: Option<Value>,
    max_size: Option<Value>,
    speed: Option<Value>,
    color: Option<Value>,
    min_opacity: Option<Value>,
    max_opacity: Option<Value>,
    line_distance: Option<Value>,
    line_color: Option<Value>,
    line_width: Option<Value>,
    auto_start: Option<Value>,
}

fn number(value: Value) -> Result<f64, ConfigError> {
    Ok(serde_json::from_value(value)?)
}

// A fractional count behaves like the `i < count` loop it stands for.
fn count(value: Value) -> Result<usize, ConfigError> {
    let n = number(value)?;
    if n.is_finite() && n > 0.0 {
        Ok(n.ceil() as usize)
    } else {
        Ok(0)
    }
}

fn color(value: Value) -> Result<Color, ConfigError> {
    let css: String = serde_json::from_value(value)?;
    Ok(Color::parse_css(&css)?)
}

fn flag(value: Value) -> Result<bool, ConfigError> {
    Ok(serde_json::from_value(value)?)
}

fn apply<T>(key: &str, value: Option<Value>, convert: fn(Value) -> Result<T, ConfigError>, slot: &mut T) {
    if let Some(value) = value {
        match convert(value) {
            Ok(parsed) => *slot = parsed,
            Err(e) => log::warn!("ignoring particle option `{}`: {}", key, e),
        }
    }
}

impl EngineConfig {
    /// Merges a JSON options object over the defaults. Only a document that
    /// is not an object at all is an error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawOptions = serde_json::from_str(json)?;
        let mut config = Self::default();

        apply("particleCount", raw.particle_count, count, &mut config.particle_count);
        apply("minSize", raw.min_size, number, &mut config.min_size);
        apply("maxSize", raw.max_size, number, &mut config.max_size);
        apply("speed", raw.speed, number, &mut config.speed);
        apply("color", raw.color, color, &mut config.color);
        apply("minOpacity", raw.min_opacity, number, &mut config.min_opacity);
        apply("maxOpacity", raw.max_opacity, number, &mut config.max_opacity);
        apply("lineDistance", raw.line_distance, number, &mut config.line_distance);
        apply("lineColor", raw.line_color, color, &mut config.line_color);
        apply("lineWidth", raw.line_width, number, &mut config.line_width);
        apply("autoStart", raw.auto_start, flag, &mut config.auto_start);

        Ok(config)
    }

    /// Preset used for the hero section background.
    pub fn hero() -> Self {
        Self {
            particle_count: 20,
            line_distance: 150.0,
            color: Color::rgba(100, 150, 255, 0.7),
            ..Self::default()
        }
    }
}
