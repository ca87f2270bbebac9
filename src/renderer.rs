// Renderer that draws particles and the lines between close neighbours onto
// anything implementing `Surface`. Clearing the previous frame is left to the
// driver, which calls `Surface::clear` before `Renderer::render`.

use crate::color::{Color, CONNECTION_COLOR};
use crate::particle::Particle;
use crate::spatial;

pub const LINE_ALPHA_SCALE: f64 = 0.2;
pub const LINE_WIDTH: f64 = 0.5;

/// A 2D drawing target sized in canvas pixels.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);
}

pub struct Renderer {
    pub show_connections: bool,
    pub connection_distance: f64,
    pub line_color: Color,
}

impl Renderer {
    pub fn new(show_connections: bool, connection_distance: f64) -> Self {
        Renderer {
            show_connections,
            connection_distance,
            line_color: CONNECTION_COLOR,
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) {
        self.render_particles(surface, particles);
        if self.show_connections {
            self.render_connections(surface, particles);
        }
    }

    pub fn render_particles<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) {
        for p in particles {
            surface.fill_circle(p.pos, p.size, p.color, p.opacity);
        }
    }

    pub fn render_connections<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) {
        for c in spatial::connections(particles, self.connection_distance) {
            let alpha = (1.0 - c.distance / self.connection_distance) * LINE_ALPHA_SCALE;
            surface.stroke_line(
                particles[c.a].pos,
                particles[c.b].pos,
                self.line_color,
                alpha,
                LINE_WIDTH,
            );
        }
    }
}
