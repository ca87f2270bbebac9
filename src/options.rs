// JS-facing builder for `Settings`. Every setter accepts anything; bad
// values are fixed up later by `Settings::normalized`, never rejected.

use crate::color::Color;
use crate::config::{Range, ScrollMode, Settings};
use log::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct BackdropOptions {
    settings: Settings,
}

#[wasm_bindgen]
impl BackdropOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BackdropOptions {
        BackdropOptions::default()
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> u32 {
        self.settings.count as u32
    }

    #[wasm_bindgen(setter)]
    pub fn set_count(&mut self, count: u32) {
        self.settings.count = count as usize;
    }

    #[wasm_bindgen(getter = mouseReactive)]
    pub fn mouse_reactive(&self) -> bool {
        self.settings.mouse_reactive
    }

    #[wasm_bindgen(setter = mouseReactive)]
    pub fn set_mouse_reactive(&mut self, on: bool) {
        self.settings.mouse_reactive = on;
    }

    #[wasm_bindgen(getter = scrollReactive)]
    pub fn scroll_reactive(&self) -> bool {
        self.settings.scroll_reactive
    }

    #[wasm_bindgen(setter = scrollReactive)]
    pub fn set_scroll_reactive(&mut self, on: bool) {
        self.settings.scroll_reactive = on;
    }

    #[wasm_bindgen(getter = showConnections)]
    pub fn show_connections(&self) -> bool {
        self.settings.show_connections
    }

    #[wasm_bindgen(setter = showConnections)]
    pub fn set_show_connections(&mut self, on: bool) {
        self.settings.show_connections = on;
    }

    #[wasm_bindgen(js_name = setSizeRange)]
    pub fn set_size_range(&mut self, min: f64, max: f64) {
        self.settings.size = Range::new(min, max);
    }

    #[wasm_bindgen(js_name = setSpeedRange)]
    pub fn set_speed_range(&mut self, min: f64, max: f64) {
        self.settings.speed = Range::new(min, max);
    }

    #[wasm_bindgen(js_name = setOpacityRange)]
    pub fn set_opacity_range(&mut self, min: f64, max: f64) {
        self.settings.opacity = Range::new(min, max);
    }

    #[wasm_bindgen(getter = connectionDistance)]
    pub fn connection_distance(&self) -> f64 {
        self.settings.connection_distance
    }

    #[wasm_bindgen(setter = connectionDistance)]
    pub fn set_connection_distance(&mut self, distance: f64) {
        self.settings.connection_distance = distance;
    }

    /// Ticks before a particle is replaced. 0 keeps particles forever.
    #[wasm_bindgen(getter = maxLife)]
    pub fn max_life(&self) -> u32 {
        self.settings.max_life.unwrap_or(0)
    }

    #[wasm_bindgen(setter = maxLife)]
    pub fn set_max_life(&mut self, ticks: u32) {
        self.settings.max_life = if ticks == 0 { None } else { Some(ticks) };
    }

    /// RNG seed for a reproducible population. 0 seeds from entropy.
    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u32 {
        self.settings.seed.unwrap_or(0) as u32
    }

    #[wasm_bindgen(setter)]
    pub fn set_seed(&mut self, seed: u32) {
        self.settings.seed = if seed == 0 { None } else { Some(seed as u64) };
    }

    #[wasm_bindgen(getter = scrollMode)]
    pub fn scroll_mode(&self) -> String {
        match self.settings.scroll_mode {
            ScrollMode::Delta => "delta".to_owned(),
            ScrollMode::Absolute => "absolute".to_owned(),
        }
    }

    #[wasm_bindgen(setter = scrollMode)]
    pub fn set_scroll_mode(&mut self, mode: &str) {
        match ScrollMode::parse(mode) {
            Some(mode) => self.settings.scroll_mode = mode,
            None => warn!("unknown scroll mode {:?}, keeping {}", mode, self.scroll_mode()),
        }
    }

    #[wasm_bindgen(getter = debugTiming)]
    pub fn debug_timing(&self) -> bool {
        self.settings.debug_timing
    }

    #[wasm_bindgen(setter = debugTiming)]
    pub fn set_debug_timing(&mut self, on: bool) {
        self.settings.debug_timing = on;
    }

    /// Appends a palette entry. Returns false if `hex` is not a color.
    #[wasm_bindgen(js_name = addColor)]
    pub fn add_color(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => {
                self.settings.colors.push(color);
                true
            }
            None => {
                warn!("ignoring palette entry {:?}", hex);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = clearColors)]
    pub fn clear_colors(&mut self) {
        self.settings.colors.clear();
    }

    /// Replaces the palette with the parseable strings in `colors`.
    #[wasm_bindgen(js_name = setColors)]
    pub fn set_colors(&mut self, colors: &js_sys::Array) {
        self.clear_colors();
        for value in colors.iter() {
            if let Some(hex) = value.as_string() {
                self.add_color(&hex);
            }
        }
    }

    pub fn colors(&self) -> Vec<JsValue> {
        self.settings
            .colors
            .iter()
            .map(|c| JsValue::from_str(&c.to_css()))
            .collect()
    }
}

impl BackdropOptions {
    pub fn from_settings(settings: Settings) -> Self {
        BackdropOptions { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_settings() {
        let options = BackdropOptions::new();
        assert_eq!(options.count(), 50);
        assert!(options.mouse_reactive());
        assert!(!options.scroll_reactive());
        assert!(options.show_connections());
        assert_eq!(options.max_life(), 0);
        assert_eq!(options.seed(), 0);
        assert_eq!(options.scroll_mode(), "delta");
        assert_eq!(options.settings(), &Settings::default());
    }

    #[test]
    fn zero_means_unbounded_life_and_entropy_seed() {
        let mut options = BackdropOptions::new();
        options.set_max_life(120);
        options.set_seed(9);
        assert_eq!(options.settings().max_life, Some(120));
        assert_eq!(options.settings().seed, Some(9));
        options.set_max_life(0);
        options.set_seed(0);
        assert_eq!(options.settings().max_life, None);
        assert_eq!(options.settings().seed, None);
    }

    #[test]
    fn palette_editing() {
        let mut options = BackdropOptions::new();
        options.clear_colors();
        assert!(options.add_color("#ff0000"));
        assert!(!options.add_color("not a color"));
        assert_eq!(options.settings().colors, vec![Color::rgb(0xff, 0, 0)]);
    }

    #[test]
    fn unknown_scroll_mode_is_ignored() {
        let mut options = BackdropOptions::new();
        options.set_scroll_mode("absolute");
        options.set_scroll_mode("bogus");
        assert_eq!(options.settings().scroll_mode, ScrollMode::Absolute);
    }

    #[test]
    fn ranges_are_stored_as_given() {
        let mut options = BackdropOptions::new();
        options.set_speed_range(0.9, 0.2);
        assert_eq!(options.settings().speed, Range::new(0.9, 0.2));
        assert_eq!(options.settings().normalized().speed, Range::new(0.2, 0.9));
    }
}
