//! Browser wiring: a `requestAnimationFrame` scheduler, DOM listeners that
//! feed the driver's input snapshot, and the `Backdrop` handle exported to JS.

use crate::canvas::CanvasSurface;
use crate::driver::Driver;
use crate::error::BackdropError;
use crate::logging::Timer;
use crate::options::BackdropOptions;
use crate::scheduler::{FrameHandle, FrameScheduler};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, MouseEvent, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Listeners = Rc<RefCell<Vec<EventListener>>>;
type CanvasDriver = Driver<CanvasSurface, AnimationFrameScheduler>;

pub struct AnimationFrameScheduler {
    window: Option<Window>,
    callback: Option<FrameCallback>,
}

impl AnimationFrameScheduler {
    pub fn new(window: Option<Window>, callback: FrameCallback) -> Self {
        AnimationFrameScheduler {
            window,
            callback: Some(callback),
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, BackdropError> {
        let window = self
            .window
            .as_ref()
            .ok_or_else(|| BackdropError::Scheduler("no window".into()))?;
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| BackdropError::Scheduler("scheduler released".into()))?
            .borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| BackdropError::Scheduler("frame callback already released".into()))?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|err| BackdropError::Scheduler(BackdropError::from(err).to_string()))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = self.window.as_ref() {
            if let Err(err) = window.cancel_animation_frame(handle.0) {
                warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
    }

    // The frame closure owns the driver, which owns this scheduler. Letting go
    // of the callback here breaks that cycle even if JS never calls `stop`.
    fn release(&mut self) {
        self.callback = None;
    }
}

// Removes itself from the target when dropped
struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    fn new<F>(target: &EventTarget, event: &'static str, passive: bool, f: F) -> Result<Self, BackdropError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(EventListener {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

#[wasm_bindgen]
pub struct Backdrop {
    driver: Rc<RefCell<CanvasDriver>>,
    frame_callback: FrameCallback,
    listeners: Listeners,
}

#[wasm_bindgen]
impl Backdrop {
    /// Starts a backdrop on the canvas with id `canvas_id`. Never throws: if
    /// the canvas or the window is missing the returned handle is inert.
    pub fn start(canvas_id: &str, options: &BackdropOptions) -> Backdrop {
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let window = web_sys::window();
        let scheduler = AnimationFrameScheduler::new(window.clone(), frame_callback.clone());
        let driver = Rc::new(RefCell::new(Driver::new(options.settings(), scheduler)));
        let mut backdrop = Backdrop {
            driver: driver.clone(),
            frame_callback: frame_callback.clone(),
            listeners: Rc::new(RefCell::new(Vec::new())),
        };

        let window = match window {
            Some(window) => window,
            None => {
                warn!("no window, particle backdrop disabled");
                return backdrop;
            }
        };

        let surface = match CanvasSurface::from_element_id(canvas_id) {
            Ok(surface) => surface,
            Err(err) => {
                warn!("particle backdrop on #{} disabled: {}", canvas_id, err);
                return backdrop;
            }
        };
        if let Err(err) = surface.apply_background_style() {
            debug!("could not style #{}: {}", canvas_id, err);
        }

        let debug_timing = options.settings().debug_timing;
        let frame_driver = driver.clone();
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let _timer = if debug_timing {
                Some(Timer::new("Backdrop::on_frame"))
            } else {
                None
            };
            if let Err(err) = frame_driver.borrow_mut().on_frame() {
                debug!("frame loop ended: {}", err);
            }
        }) as Box<dyn FnMut()>));

        if !driver.borrow_mut().activate(Some(surface), viewport_size(&window)) {
            backdrop.stop();
            return backdrop;
        }

        if options.settings().scroll_reactive {
            if let Ok(offset) = window.scroll_y() {
                driver.borrow_mut().scroll_baseline(offset);
            }
        }

        // However the loop ends, the DOM listeners go with it
        let listeners = backdrop.listeners.clone();
        driver
            .borrow_mut()
            .on_stop(move || listeners.borrow_mut().clear());

        if let Err(err) = backdrop.listen(&window, options) {
            warn!("particle backdrop input disabled: {}", err);
        }
        backdrop
    }

    pub fn stop(&mut self) {
        self.driver.borrow_mut().deactivate();
        self.listeners.borrow_mut().clear();
        // Breaks the closure -> driver -> scheduler -> closure cycle
        self.frame_callback.borrow_mut().take();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.driver.borrow().is_running()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.driver.borrow().particles().len() as u32
    }

    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.driver.borrow().frame_count() as f64
    }
}

impl Backdrop {
    fn listen(&self, window: &Window, options: &BackdropOptions) -> Result<(), BackdropError> {
        let settings = options.settings();
        let mut listeners = self.listeners.borrow_mut();
        let window_target: &EventTarget = window.as_ref();

        if settings.mouse_reactive {
            let driver = self.driver.clone();
            listeners.push(EventListener::new(window_target, "mousemove", true, move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    driver
                        .borrow_mut()
                        .pointer_moved(event.client_x() as f64, event.client_y() as f64);
                }
            })?);

            if let Some(root) = window.document().and_then(|d| d.document_element()) {
                let driver = self.driver.clone();
                listeners.push(EventListener::new(root.as_ref(), "mouseleave", true, move |_| {
                    driver.borrow_mut().pointer_left();
                })?);
            }
        }

        if settings.scroll_reactive {
            let driver = self.driver.clone();
            let scroll_window = window.clone();
            listeners.push(EventListener::new(window_target, "scroll", true, move |_| {
                if let Ok(offset) = scroll_window.scroll_y() {
                    driver.borrow_mut().scrolled(offset);
                }
            })?);
        }

        let driver = self.driver.clone();
        let resize_window = window.clone();
        listeners.push(EventListener::new(window_target, "resize", true, move |_| {
            let (width, height) = viewport_size(&resize_window);
            driver.borrow_mut().resized(width, height);
        })?);

        debug!("particle backdrop listening to {} events", listeners.len());
        Ok(())
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.stop();
    }
}
