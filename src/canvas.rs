// Surface backed by an HTML canvas and its 2d context

use crate::color::Color;
use crate::error::BackdropError;
use crate::renderer::Surface;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, BackdropError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(BackdropError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BackdropError::ContextUnavailable)?;
        Ok(CanvasSurface { canvas, context })
    }

    // Looks the canvas up in the current document by element id
    pub fn from_element_id(id: &str) -> Result<Self, BackdropError> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(id))
            .ok_or(BackdropError::SurfaceUnavailable)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BackdropError::SurfaceUnavailable)?;
        CanvasSurface::new(canvas)
    }

    /// Pins the canvas as a fixed, full-viewport layer behind the page that
    /// never receives pointer events.
    pub fn apply_background_style(&self) -> Result<(), BackdropError> {
        let style = self.canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("z-index", "0")?;
        Ok(())
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }

    fn clear(&mut self) {
        self.context.set_global_alpha(1.0);
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.context.set_global_alpha(alpha);
        self.context.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        // arc only fails on a negative radius, which normalized settings rule out
        let _ = self.context.arc(center[0], center[1], radius, 0.0, 2.0 * PI);
        self.context.fill();
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.context.set_global_alpha(alpha);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
