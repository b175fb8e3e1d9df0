// In-memory host doubles for unit tests.

use crate::color::Color;
use crate::driver::FrameScheduler;
use crate::error::EngineError;
use crate::render::Surface;
use crate::viewport::Viewport;
use std::cell::RefCell;
use std::rc::Rc;
use vecmath::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Resize(Viewport),
    Clear(f64, f64, f64, f64),
    Line {
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
    },
    Circle {
        center: Vector2<f64>,
        radius: f64,
        color: Color,
    },
    Release,
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn lines(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Clear(..))).count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.calls.push(DrawCall::Resize(*viewport));
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear(x, y, width, height));
    }

    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, width: f64, color: Color) {
        self.calls.push(DrawCall::Line { from, to, width, color });
    }

    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color) {
        self.calls.push(DrawCall::Circle { center, radius, color });
    }

    fn release(&mut self) {
        self.calls.push(DrawCall::Release);
    }
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    pub next_id: u32,
    pub pending: Vec<u32>,
    pub cancelled: Vec<u32>,
    pub fail_next: bool,
}

/// Scheduler whose frames only fire when the test says so. The log is shared
/// so a test can inspect it after handing the scheduler to an engine.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pub log: Rc<RefCell<SchedulerLog>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.log.borrow().pending.len()
    }

    /// Removes the oldest pending frame, as the host does right before
    /// invoking its callback. Returns false when nothing was scheduled.
    pub fn fire(&self) -> bool {
        let mut log = self.log.borrow_mut();
        if log.pending.is_empty() {
            false
        } else {
            log.pending.remove(0);
            true
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Result<u32, EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_next {
            log.fail_next = false;
            return Err(EngineError::Scheduler("refused".to_owned()));
        }
        log.next_id += 1;
        let id = log.next_id;
        log.pending.push(id);
        Ok(id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut log = self.log.borrow_mut();
        log.pending.retain(|&id| id != handle);
        log.cancelled.push(handle);
    }
}
