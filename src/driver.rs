// Start/stop state machine around a host "run on next paint" primitive.

use crate::error::EngineError;

/// Per-frame callback registration and cancellation.
pub trait FrameScheduler {
    type Handle;

    /// Asks the host to invoke the frame callback once, at the next refresh.
    fn request_frame(&mut self) -> Result<Self::Handle, EngineError>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
}

pub struct FrameDriver<F: FrameScheduler> {
    scheduler: F,
    state: DriverState,
    pending: Option<F::Handle>,
}

impl<F: FrameScheduler> FrameDriver<F> {
    pub fn new(scheduler: F) -> Self {
        FrameDriver {
            scheduler,
            state: DriverState::Stopped,
            pending: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Stopped -> Running, scheduling the first frame. Returns `Ok(false)` if
    /// the loop was already running.
    pub fn start(&mut self) -> Result<bool, EngineError> {
        if self.is_running() {
            return Ok(false);
        }
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        self.state = DriverState::Running;
        Ok(true)
    }

    /// Called at the top of each frame callback. The host has consumed the
    /// pending request, so it is forgotten here.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.is_running()
    }

    /// Reschedules after a frame ran. A scheduler failure stops the loop.
    pub fn schedule_next(&mut self) {
        if !self.is_running() || self.pending.is_some() {
            return;
        }
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => {
                log::warn!("particle animation stopped: {}", e);
                self.state = DriverState::Stopped;
            }
        }
    }

    /// Running -> Stopped, cancelling the pending frame. Returns false if the
    /// loop was not running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = DriverState::Stopped;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        true
    }
}
