// Browser side of the engine: a 2d canvas surface, a requestAnimationFrame
// scheduler, the window resize hook and the handle handed to JavaScript.

use crate::color::Color;
use crate::config::EngineConfig;
use crate::driver::FrameScheduler;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::render::Surface;
use crate::viewport::Viewport;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::{Rc, Weak};
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `log` backend that writes to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&message),
            log::Level::Warn => console::warn_1(&message),
            log::Level::Info => console::info_1(&message),
            log::Level::Debug | log::Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. Safe to call more than once.
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Creates a canvas and appends it to `container`.
    pub fn mount(document: &web_sys::Document, container: &Element) -> Result<CanvasSurface, EngineError> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| EngineError::Canvas(js_error(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::Canvas("created element is not a canvas".to_owned()))?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| EngineError::Canvas(js_error(e)))?
            .ok_or_else(|| EngineError::Canvas("2d context unavailable".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::Canvas("context is not 2d".to_owned()))?;
        container
            .append_child(&canvas)
            .map_err(|e| EngineError::Canvas(js_error(e)))?;

        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("height", "100%");

        // Setting the canvas size resets the context, so the transform is
        // applied absolutely rather than accumulated.
        let [a, b, c, d, e, f] = viewport.transform();
        if let Err(err) = self.context.set_transform(a, b, c, d, e, f) {
            log::warn!("unable to set canvas transform: {}", js_error(err));
        }
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color) {
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        let _ = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0);
        self.context.fill();
    }

    fn release(&mut self) {
        self.canvas.remove();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the shared frame callback with `requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, EngineError> {
        let callback = self.callback.borrow();
        let closure = callback
            .as_ref()
            .ok_or_else(|| EngineError::Scheduler("frame callback released".to_owned()))?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| EngineError::Scheduler(js_error(e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {}", js_error(e));
        }
    }
}

type CanvasEngine = Engine<CanvasSurface, AnimationFrameScheduler>;

fn read_viewport(window: &Window, container: &Element) -> Viewport {
    let rect = container.get_bounding_client_rect();
    Viewport::new(rect.width(), rect.height(), window.device_pixel_ratio())
}

fn read_config(options: &JsValue) -> EngineConfig {
    if options.is_undefined() || options.is_null() {
        return EngineConfig::default();
    }
    let json = match js_sys::JSON::stringify(options).ok().and_then(|s| JsValue::from(s).as_string()) {
        Some(json) => json,
        None => {
            log::warn!("particle options are not serializable, using defaults");
            return EngineConfig::default();
        }
    };
    EngineConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        EngineConfig::default()
    })
}

struct Mounted {
    window: Window,
    engine: Rc<RefCell<CanvasEngine>>,
    frame_callback: FrameCallback,
    resize_listener: Closure<dyn FnMut()>,
}

impl Mounted {
    fn new(container_id: &str, config: EngineConfig) -> Result<Mounted, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let document = window.document().ok_or(EngineError::NoDocument)?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| EngineError::ContainerNotFound(container_id.to_owned()))?;

        let surface = CanvasSurface::mount(&document, &container)?;
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler {
            window: window.clone(),
            callback: frame_callback.clone(),
        };
        let viewport = read_viewport(&window, &container);
        let mut rng = rand::thread_rng();
        let engine = Rc::new(RefCell::new(Engine::new(config, viewport, surface, scheduler, &mut rng)));

        // Both closures hold weak references; the handle owns the engine.
        let weak: Weak<RefCell<CanvasEngine>> = Rc::downgrade(&engine);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(engine) = weak.upgrade() {
                engine.borrow_mut().tick();
            }
        }) as Box<dyn FnMut()>));

        let weak = Rc::downgrade(&engine);
        let resize_window = window.clone();
        let resize_listener = Closure::wrap(Box::new(move || {
            if let Some(engine) = weak.upgrade() {
                let viewport = read_viewport(&resize_window, &container);
                engine.borrow_mut().resize(viewport);
            }
        }) as Box<dyn FnMut()>);
        if let Err(e) = window.add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref()) {
            engine.borrow().surface().canvas.remove();
            return Err(EngineError::Canvas(js_error(e)));
        }

        Ok(Mounted {
            window,
            engine,
            frame_callback,
            resize_listener,
        })
    }

    fn teardown(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_listener.as_ref().unchecked_ref());
        match Rc::try_unwrap(self.engine) {
            Ok(engine) => engine.into_inner().teardown(),
            Err(engine) => {
                let mut engine = engine.borrow_mut();
                engine.stop();
                engine.surface().canvas.remove();
            }
        }
        self.frame_callback.borrow_mut().take();
    }
}

/// Animated particle background mounted into a DOM container.
///
/// Construction never throws: if the container does not exist the handle is
/// inert and every method is a no-op.
#[wasm_bindgen]
pub struct ParticleBackground {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> ParticleBackground {
        crate::initialize();
        ParticleBackground::with_config(container_id, read_config(&options))
    }

    pub fn start(&self) {
        if let Some(mounted) = &self.inner {
            if let Err(e) = mounted.engine.borrow_mut().start() {
                log::warn!("{}", e);
            }
        }
    }

    pub fn stop(&self) {
        if let Some(mounted) = &self.inner {
            mounted.engine.borrow_mut().stop();
        }
    }

    /// Stops the animation, detaches the resize listener and removes the
    /// canvas. The handle is inert afterwards.
    pub fn teardown(&mut self) {
        if let Some(mounted) = self.inner.take() {
            mounted.teardown();
            log::debug!("particle background torn down");
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner
            .as_ref()
            .map_or(false, |mounted| mounted.engine.borrow().is_running())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |mounted| mounted.engine.borrow().particles().len())
    }
}

// A queued frame must never reach a freed closure.
impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl ParticleBackground {
    pub fn with_config(container_id: &str, config: EngineConfig) -> ParticleBackground {
        let auto_start = config.auto_start;
        let inner = match Mounted::new(container_id, config) {
            Ok(mounted) => Some(mounted),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        let background = ParticleBackground { inner };
        if auto_start {
            background.start();
        }
        background
    }
}

/// Mounts the hero section background. The caller keeps the returned handle.
#[wasm_bindgen(js_name = mountHeroBackground)]
pub fn mount_hero_background(container_id: &str) -> ParticleBackground {
    crate::initialize();
    ParticleBackground::with_config(container_id, EngineConfig::hero())
}
