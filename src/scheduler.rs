//! "Run me again before the next paint" as a trait, so the driver's loop can
//! be stepped by hand in tests and by `requestAnimationFrame` in the browser.

use crate::error::BackdropError;

/// Identifies one pending frame request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, BackdropError>;
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Drops whatever the scheduler holds on to once the loop is over.
    fn release(&mut self) {}
}

/// Deterministic scheduler that only records requests. Whoever owns the
/// driver decides when the next frame actually runs.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: Vec<FrameHandle>,
    fail_after: Option<usize>,
    released: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `request_frame` fail.
    pub fn failing() -> Self {
        Self::failing_after(0)
    }

    /// Grants the first `granted` requests, then fails every later one.
    pub fn failing_after(granted: usize) -> Self {
        ManualScheduler {
            fail_after: Some(granted),
            ..Self::default()
        }
    }

    pub fn released(&self) -> bool {
        self.released
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Hands out the pending request, as the browser does right before it
    /// invokes the callback.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, BackdropError> {
        if self.fail_after.map_or(false, |granted| self.requested >= granted) {
            return Err(BackdropError::Scheduler("frame requests disabled".into()));
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }

    fn release(&mut self) {
        self.pending = None;
        self.released = true;
    }
}
