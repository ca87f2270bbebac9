//! Neighbor search for connection lines.
//!
//! Small populations use a plain pairwise scan. Larger ones are bucketed
//! into a uniform grid whose cells are as wide as the connection distance, so
//! only the 3x3 block of cells around a particle needs checking.

use crate::particle::Particle;
use std::collections::HashMap;
use vecmath::{vec2_len, vec2_sub};

/// Above this many particles the grid is used instead of the pairwise scan.
pub const GRID_THRESHOLD: usize = 128;

/// An unordered pair `(a, b)` with `a < b`, closer than the max distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

pub fn connections(particles: &[Particle], max_distance: f64) -> Vec<Connection> {
    if particles.len() > GRID_THRESHOLD {
        grid_connections(particles, max_distance)
    } else {
        pairwise_connections(particles, max_distance)
    }
}

pub fn pairwise_connections(particles: &[Particle], max_distance: f64) -> Vec<Connection> {
    let mut out = Vec::new();
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            if let Some(distance) = within(&particles[a], &particles[b], max_distance) {
                out.push(Connection { a, b, distance });
            }
        }
    }
    out
}

pub fn grid_connections(particles: &[Particle], max_distance: f64) -> Vec<Connection> {
    if !(max_distance > 0.0) {
        return Vec::new();
    }
    let cell_of = |p: &Particle| -> (i64, i64) {
        (
            (p.pos[0] / max_distance).floor() as i64,
            (p.pos[1] / max_distance).floor() as i64,
        )
    };

    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in particles.iter().enumerate() {
        cells.entry(cell_of(p)).or_insert_with(Vec::new).push(i);
    }

    let mut out = Vec::new();
    for (a, p) in particles.iter().enumerate() {
        let (cx, cy) = cell_of(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let bucket = match cells.get(&(cx + dx, cy + dy)) {
                    Some(bucket) => bucket,
                    None => continue,
                };
                for &b in bucket {
                    // Only the higher index reports, so each pair shows up once
                    if b <= a {
                        continue;
                    }
                    if let Some(distance) = within(p, &particles[b], max_distance) {
                        out.push(Connection { a, b, distance });
                    }
                }
            }
        }
    }
    out.sort_by(|x, y| (x.a, x.b).cmp(&(y.a, y.b)));
    out
}

fn within(p: &Particle, q: &Particle, max_distance: f64) -> Option<f64> {
    let distance = vec2_len(vec2_sub(p.pos, q.pos));
    if distance < max_distance {
        Some(distance)
    } else {
        None
    }
}
