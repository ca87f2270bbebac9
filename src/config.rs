// Activation parameters for the backdrop, and the fix-ups applied before they
// reach the factory and the physics step

use crate::color::{Color, DEFAULT_PALETTE};
use log::debug;

pub const DEFAULT_COUNT: usize = 50;
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;

/// An inclusive `[min, max]` pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Range {
        Range { min, max }
    }

    // Swaps reversed bounds and replaces non-finite ones with the fallback
    fn normalized(self, fallback: Range) -> Range {
        if !self.min.is_finite() || !self.max.is_finite() {
            return fallback;
        }
        if self.min > self.max {
            Range::new(self.max, self.min)
        } else {
            self
        }
    }

    fn clamped(self, lo: f64, hi: f64) -> Range {
        Range::new(self.min.max(lo).min(hi), self.max.max(lo).min(hi))
    }

    pub fn lerp(&self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    /// Change in scroll offset since the previous frame.
    Delta,
    /// Absolute scroll offset, applied every tick. Accumulates without bound.
    Absolute,
}

impl ScrollMode {
    pub fn parse(name: &str) -> Option<ScrollMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "delta" => Some(ScrollMode::Delta),
            "absolute" => Some(ScrollMode::Absolute),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub count: usize,
    pub mouse_reactive: bool,
    pub scroll_reactive: bool,
    pub show_connections: bool,
    pub size: Range,
    pub speed: Range,
    pub opacity: Range,
    pub colors: Vec<Color>,
    pub connection_distance: f64,
    pub max_life: Option<u32>,
    pub scroll_mode: ScrollMode,
    pub seed: Option<u64>,
    pub debug_timing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            count: DEFAULT_COUNT,
            mouse_reactive: true,
            scroll_reactive: false,
            show_connections: true,
            size: Range::new(0.5, 3.0),
            speed: Range::new(0.1, 0.5),
            opacity: Range::new(0.1, 0.5),
            colors: DEFAULT_PALETTE.to_vec(),
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            max_life: None,
            scroll_mode: ScrollMode::Delta,
            seed: None,
            debug_timing: false,
        }
    }
}

impl Settings {
    /// Returns a copy that is safe to simulate with. Never fails: reversed
    /// ranges are swapped, negatives clamped, opacity kept within `[0, 1]`,
    /// and an empty palette replaced by the default one.
    pub fn normalized(&self) -> Settings {
        let defaults = Settings::default();
        let mut out = self.clone();

        out.size = self.size.normalized(defaults.size).clamped(0.0, f64::MAX);
        out.speed = self.speed.normalized(defaults.speed).clamped(0.0, f64::MAX);
        out.opacity = self.opacity.normalized(defaults.opacity).clamped(0.0, 1.0);

        if out.colors.is_empty() {
            debug!("empty palette, falling back to defaults");
            out.colors = defaults.colors;
        }
        if !(self.connection_distance.is_finite() && self.connection_distance > 0.0) {
            debug!(
                "connection distance {} is unusable, using {}",
                self.connection_distance, DEFAULT_CONNECTION_DISTANCE
            );
            out.connection_distance = DEFAULT_CONNECTION_DISTANCE;
        }
        if out != *self {
            debug!("settings normalized: {:?}", out);
        }
        out
    }
}
