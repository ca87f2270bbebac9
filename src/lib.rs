mod utils;

pub mod canvas;
pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod factory;
pub mod input;
pub mod logging;
pub mod options;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod scheduler;
pub mod spatial;
pub mod web;

use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::{Range, ScrollMode, Settings};
pub use driver::Driver;
pub use error::BackdropError;
pub use input::{InputSnapshot, StepInput};
pub use options::BackdropOptions;
pub use particle::Particle;
pub use physics::{advance, Bounds};
pub use renderer::{Renderer, Surface};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use web::Backdrop;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logging::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}
