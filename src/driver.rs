//! The simulation driver: owns the population, the input snapshot, the
//! drawing surface and the frame loop for one backdrop.
//!
//! The driver never talks to the browser directly. It draws through a
//! [`Surface`] and asks a [`FrameScheduler`] for the next frame, so the same
//! loop runs under `requestAnimationFrame` and under a hand-stepped
//! scheduler in tests.

use crate::config::Settings;
use crate::error::BackdropError;
use crate::factory;
use crate::input::InputSnapshot;
use crate::particle::Particle;
use crate::physics::{self, Bounds};
use crate::renderer::{Renderer, Surface};
use crate::scheduler::{FrameHandle, FrameScheduler};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Driver<S: Surface, F: FrameScheduler> {
    settings: Settings,
    renderer: Renderer,
    scheduler: F,
    surface: Option<S>,
    particles: Vec<Particle>,
    input: InputSnapshot,
    rng: StdRng,
    pending: Option<FrameHandle>,
    frame_count: u64,
    stop_hooks: Vec<Box<dyn FnMut()>>,
}

impl<S: Surface, F: FrameScheduler> Driver<S, F> {
    pub fn new(settings: &Settings, scheduler: F) -> Self {
        let settings = settings.normalized();
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Driver {
            renderer: Renderer::new(settings.show_connections, settings.connection_distance),
            settings,
            scheduler,
            surface: None,
            particles: Vec::new(),
            input: InputSnapshot::new(),
            rng,
            pending: None,
            frame_count: 0,
            stop_hooks: Vec::new(),
        }
    }

    /// Starts the loop on `surface`, sized to `viewport`. Without a surface
    /// nothing is scheduled and `false` is returned.
    pub fn activate(&mut self, surface: Option<S>, viewport: (u32, u32)) -> bool {
        if self.is_running() {
            return true;
        }
        let mut surface = match surface {
            Some(surface) => surface,
            None => {
                warn!("particle backdrop has no surface, not starting");
                return false;
            }
        };

        surface.resize(viewport.0, viewport.1);
        let (width, height) = surface.size();
        self.particles =
            factory::create_population(width as f64, height as f64, &self.settings, &mut self.rng);
        self.surface = Some(surface);
        self.frame_count = 0;

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                info!(
                    "particle backdrop started: {} particles on {}x{}",
                    self.particles.len(),
                    width,
                    height
                );
                true
            }
            Err(err) => {
                error!("could not schedule first frame: {}", err);
                self.teardown();
                false
            }
        }
    }

    /// One tick: clear, step every particle, draw, ask for the next frame.
    pub fn on_frame(&mut self) -> Result<(), BackdropError> {
        self.pending = None;
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return Ok(()),
        };

        let (width, height) = surface.size();
        let bounds = Bounds::new(width as f64, height as f64);
        let step_input = self.input.take_frame(
            self.settings.mouse_reactive,
            self.settings.scroll_reactive,
            self.settings.scroll_mode,
        );

        surface.clear();
        for particle in self.particles.iter_mut() {
            *particle = physics::advance(particle, bounds, &step_input);
            if particle.is_expired(self.settings.max_life) {
                *particle =
                    factory::spawn_particle(bounds.width, bounds.height, &self.settings, &mut self.rng);
            }
        }
        self.renderer.render(surface, &self.particles);
        self.frame_count += 1;

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(())
            }
            Err(err) => {
                error!("stopping particle backdrop, next frame not scheduled: {}", err);
                self.teardown();
                Err(err)
            }
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.input.record_pointer(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.input.clear_pointer();
    }

    pub fn scrolled(&mut self, offset: f64) {
        self.input.record_scroll(offset);
    }

    /// Tells the driver where the page is scrolled to right now, without that
    /// position counting as scroll movement.
    pub fn scroll_baseline(&mut self, offset: f64) {
        self.input.baseline_scroll(offset);
    }

    /// Runs `hook` once, whenever the loop ends: on `deactivate`, on drop, or
    /// when the next frame cannot be scheduled.
    pub fn on_stop<H: FnMut() + 'static>(&mut self, hook: H) {
        self.stop_hooks.push(Box::new(hook));
    }

    /// Re-fits the surface. Particles keep their positions; anything now
    /// outside is clamped by the next physics step.
    pub fn resized(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            debug!("resizing particle surface to {}x{}", width, height);
            surface.resize(width, height);
        }
    }

    /// Cancels the pending frame and drops the surface and population.
    pub fn deactivate(&mut self) {
        if self.surface.is_some() || self.pending.is_some() {
            info!("particle backdrop stopped after {} frames", self.frame_count);
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.scheduler.release();
        self.surface = None;
        self.particles.clear();
        self.input.reset();
        for mut hook in std::mem::take(&mut self.stop_hooks) {
            hook();
        }
    }

    pub fn is_running(&self) -> bool {
        self.surface.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }
}

impl<S: Surface, F: FrameScheduler> Drop for Driver<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scheduler::ManualScheduler;

    #[derive(Default)]
    struct Blank {
        size: (u32, u32),
        clears: usize,
        circles: usize,
    }

    impl Surface for Blank {
        fn size(&self) -> (u32, u32) {
            self.size
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn fill_circle(&mut self, _: [f64; 2], _: f64, _: Color, _: f64) {
            self.circles += 1;
        }
        fn stroke_line(&mut self, _: [f64; 2], _: [f64; 2], _: Color, _: f64, _: f64) {}
    }

    fn seeded(count: usize) -> Settings {
        Settings {
            count,
            seed: Some(5),
            ..Settings::default()
        }
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut driver: Driver<Blank, _> = Driver::new(&seeded(10), ManualScheduler::new());
        assert!(!driver.activate(None, (640, 480)));
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().requested(), 0);
        assert!(driver.on_frame().is_ok());
        assert_eq!(driver.frame_count(), 0);
    }

    #[test]
    fn activation_sizes_seeds_and_schedules() {
        let mut driver = Driver::new(&seeded(12), ManualScheduler::new());
        assert!(driver.activate(Some(Blank::default()), (640, 480)));
        assert_eq!(driver.surface().map(|s| s.size), Some((640, 480)));
        assert_eq!(driver.particles().len(), 12);
        assert_eq!(driver.scheduler().requested(), 1);
        assert!(driver.pending_frame().is_some());
    }

    #[test]
    fn second_activation_keeps_running_loop() {
        let mut driver = Driver::new(&seeded(3), ManualScheduler::new());
        assert!(driver.activate(Some(Blank::default()), (100, 100)));
        assert!(driver.activate(Some(Blank::default()), (200, 200)));
        assert_eq!(driver.scheduler().requested(), 1);
        assert_eq!(driver.surface().map(|s| s.size), Some((100, 100)));
    }

    #[test]
    fn frame_clears_then_draws_and_reschedules() {
        let mut driver = Driver::new(&seeded(7), ManualScheduler::new());
        driver.activate(Some(Blank::default()), (300, 200));
        driver.on_frame().unwrap();
        driver.on_frame().unwrap();
        let surface = driver.surface().unwrap();
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.circles, 14);
        assert_eq!(driver.frame_count(), 2);
        assert_eq!(driver.scheduler().requested(), 3);
        assert!(driver.particles().iter().all(|p| p.age == 2));
    }

    #[test]
    fn deactivate_cancels_pending_frame() {
        let mut driver = Driver::new(&seeded(4), ManualScheduler::new());
        driver.activate(Some(Blank::default()), (100, 100));
        let pending = driver.pending_frame().unwrap();
        driver.deactivate();
        assert!(!driver.is_running());
        assert!(driver.particles().is_empty());
        assert_eq!(driver.scheduler().cancelled(), &[pending]);
        assert_eq!(driver.scheduler().pending(), None);

        driver.deactivate();
        assert_eq!(driver.scheduler().cancelled().len(), 1);
    }

    #[test]
    fn failed_first_request_leaves_driver_stopped() {
        let mut driver = Driver::new(&seeded(4), ManualScheduler::failing());
        assert!(!driver.activate(Some(Blank::default()), (100, 100)));
        assert!(!driver.is_running());
    }

    #[test]
    fn failed_frame_request_tears_everything_down() {
        use std::cell::Cell;
        use std::rc::Rc;

        let stopped = Rc::new(Cell::new(0));
        let mut driver = Driver::new(&seeded(6), ManualScheduler::failing_after(1));
        let hook_count = stopped.clone();
        driver.on_stop(move || hook_count.set(hook_count.get() + 1));

        assert!(driver.activate(Some(Blank::default()), (200, 200)));
        assert!(driver.on_frame().is_err());
        assert!(!driver.is_running());
        assert!(driver.particles().is_empty());
        assert_eq!(driver.pending_frame(), None);
        assert!(driver.scheduler().released());
        assert_eq!(stopped.get(), 1);

        driver.deactivate();
        drop(driver);
        assert_eq!(stopped.get(), 1);
    }

    #[test]
    fn deactivate_runs_stop_hooks_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let stopped = Rc::new(Cell::new(false));
        let mut driver = Driver::new(&seeded(2), ManualScheduler::new());
        let flag = stopped.clone();
        driver.on_stop(move || flag.set(true));
        driver.activate(Some(Blank::default()), (50, 50));
        assert!(!stopped.get());
        driver.deactivate();
        assert!(stopped.get());
        assert!(driver.scheduler().released());
    }

    #[test]
    fn page_scrolled_before_start_is_not_a_kick() {
        let settings = Settings {
            scroll_reactive: true,
            mouse_reactive: false,
            scroll_mode: crate::config::ScrollMode::Delta,
            speed: crate::config::Range::new(0.0, 0.0),
            ..seeded(8)
        };
        let mut driver = Driver::new(&settings, ManualScheduler::new());
        driver.activate(Some(Blank::default()), (10_000, 10_000));
        driver.scroll_baseline(5000.0);
        driver.scrolled(5010.0);
        driver.on_frame().unwrap();
        for p in driver.particles() {
            assert!((p.vel[1] - 10.0 * physics::SCROLL_FACTOR).abs() < 1e-12, "vel {:?}", p.vel);
        }
    }

    #[test]
    fn expired_particles_are_respawned() {
        let settings = Settings {
            max_life: Some(3),
            ..seeded(20)
        };
        let mut driver = Driver::new(&settings, ManualScheduler::new());
        driver.activate(Some(Blank::default()), (400, 400));
        for _ in 0..3 {
            driver.on_frame().unwrap();
        }
        assert!(driver.particles().iter().all(|p| p.age == 0));
        driver.on_frame().unwrap();
        assert!(driver.particles().iter().all(|p| p.age == 1));
        assert_eq!(driver.particles().len(), 20);
    }

    #[test]
    fn reversed_settings_are_normalized() {
        let settings = Settings {
            speed: crate::config::Range::new(0.5, 0.1),
            ..seeded(1)
        };
        let driver: Driver<Blank, _> = Driver::new(&settings, ManualScheduler::new());
        assert_eq!(driver.settings().speed, crate::config::Range::new(0.1, 0.5));
    }
}
