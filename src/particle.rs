// Simple particle struct to keep track of individual position, velocity,
// look, and how many ticks it has been alive

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub opacity: f64,
    pub color: Color,
    pub age: u32,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], size: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
            color,
            age: 0,
        }
    }

    /// `max_life` of `None` means the particle lives forever.
    pub fn is_expired(&self, max_life: Option<u32>) -> bool {
        match max_life {
            Some(limit) => self.age >= limit,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_PALETTE;

    #[test]
    fn starts_at_age_zero() {
        let p = Particle::new([1.0, 2.0], [0.1, -0.1], 2.0, 0.3, DEFAULT_PALETTE[0]);
        assert_eq!(p.age, 0);
        assert!(!p.is_expired(None));
        assert!(p.is_expired(Some(0)));
    }

    #[test]
    fn expires_once_age_reaches_limit() {
        let mut p = Particle::new([0.0, 0.0], [0.0, 0.0], 1.0, 0.1, DEFAULT_PALETTE[1]);
        p.age = 9;
        assert!(!p.is_expired(Some(10)));
        p.age = 10;
        assert!(p.is_expired(Some(10)));
        assert!(!p.is_expired(None));
    }
}
