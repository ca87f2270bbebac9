//! Latest pointer and scroll values, recorded by event handlers and read by
//! the next simulation tick.
//!
//! Handlers only overwrite fields here; particle state is touched exclusively
//! from the frame callback.

use crate::config::ScrollMode;

/// What a single physics step gets to see.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepInput {
    pub pointer: Option<[f64; 2]>,
    pub scroll: Option<f64>,
}

impl StepInput {
    pub const NONE: StepInput = StepInput {
        pointer: None,
        scroll: None,
    };
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pointer: Option<[f64; 2]>,
    scroll_offset: f64,
    last_frame_scroll: f64,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn record_scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Records `offset` as already seen, so a page that was scrolled before
    /// the backdrop started does not count as one big scroll.
    pub fn baseline_scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.last_frame_scroll = offset;
    }

    pub fn pointer(&self) -> Option<[f64; 2]> {
        self.pointer
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Builds the input for this frame's physics steps and marks the current
    /// scroll offset as seen, so the next `Delta` frame only sees new movement.
    pub fn take_frame(
        &mut self,
        mouse_reactive: bool,
        scroll_reactive: bool,
        mode: ScrollMode,
    ) -> StepInput {
        let scroll = if scroll_reactive {
            Some(match mode {
                ScrollMode::Absolute => self.scroll_offset,
                ScrollMode::Delta => self.scroll_offset - self.last_frame_scroll,
            })
        } else {
            None
        };
        self.last_frame_scroll = self.scroll_offset;

        StepInput {
            pointer: if mouse_reactive { self.pointer } else { None },
            scroll,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
