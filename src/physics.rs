// One simulation tick for one particle: pointer attraction, scroll drift,
// Euler integration and reflection off the canvas edges

use crate::input::StepInput;
use crate::particle::Particle;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

pub const INTERACTION_RADIUS: f64 = 100.0;
pub const ATTRACTION_STRENGTH: f64 = 0.02;
pub const SCROLL_FACTOR: f64 = 0.001;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Bounds {
        Bounds {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn contains(&self, pos: Vector2<f64>) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width && pos[1] >= 0.0 && pos[1] <= self.height
    }
}

/// Velocity change pulling a particle at `pos` toward `pointer`. Zero outside
/// the interaction radius, at the radius itself, and at the pointer's exact
/// position.
pub fn attraction(pos: Vector2<f64>, pointer: Vector2<f64>) -> Vector2<f64> {
    let to_pointer = vec2_sub(pointer, pos);
    let distance = vec2_len(to_pointer);
    if distance <= 0.0 || distance >= INTERACTION_RADIUS {
        return [0.0, 0.0];
    }
    let falloff = (INTERACTION_RADIUS - distance) / INTERACTION_RADIUS;
    vec2_scale(to_pointer, falloff * ATTRACTION_STRENGTH / distance)
}

pub fn advance(particle: &Particle, bounds: Bounds, input: &StepInput) -> Particle {
    let mut next = particle.clone();

    if let Some(pointer) = input.pointer {
        next.vel = vec2_add(next.vel, attraction(next.pos, pointer));
    }
    if let Some(scroll) = input.scroll {
        next.vel[1] += scroll * SCROLL_FACTOR;
    }

    next.pos = vec2_add(next.pos, next.vel);

    let limits = [bounds.width, bounds.height];
    for axis in 0..2 {
        if next.pos[axis] < 0.0 || next.pos[axis] > limits[axis] {
            next.vel[axis] *= -1.0;
            next.pos[axis] = next.pos[axis].max(0.0).min(limits[axis]);
        }
    }

    next.age = next.age.saturating_add(1);
    next
}
