// Creates particle populations with randomized attributes within the
// configured bounds. Expects settings that went through `Settings::normalized`.

use crate::config::Settings;
use crate::particle::Particle;
use rand::seq::SliceRandom;
use rand::Rng;

pub fn create_population<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    settings: &Settings,
    rng: &mut R,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(settings.count);
    for _ in 0..settings.count {
        particles.push(spawn_particle(width, height, settings, rng));
    }
    particles
}

pub fn spawn_particle<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    settings: &Settings,
    rng: &mut R,
) -> Particle {
    let pos_x = rng.gen::<f64>() * width.max(0.0);
    let pos_y = rng.gen::<f64>() * height.max(0.0);
    // Each axis is bounded on its own, the speed magnitude is not
    let max_speed = settings.speed.max;
    let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * max_speed;
    let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * max_speed;
    let size = settings.size.lerp(rng.gen::<f64>());
    let opacity = settings.opacity.lerp(rng.gen::<f64>());
    let color = settings
        .colors
        .choose(rng)
        .copied()
        .unwrap_or(crate::color::DEFAULT_PALETTE[0]);

    Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn population_size_matches_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [0usize, 1, 4, 50, 333].iter() {
            let settings = Settings {
                count: *count,
                ..Settings::default()
            };
            let particles = create_population(800.0, 600.0, &settings, &mut rng);
            assert_eq!(particles.len(), *count);
        }
    }

    #[test]
    fn attributes_fall_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let settings = Settings {
            count: 500,
            ..Settings::default()
        };
        let particles = create_population(320.0, 240.0, &settings, &mut rng);
        for p in &particles {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 320.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 240.0);
            assert!(p.vel[0].abs() <= settings.speed.max);
            assert!(p.vel[1].abs() <= settings.speed.max);
            assert!(settings.size.contains(p.size));
            assert!(settings.opacity.contains(p.opacity));
            assert!(settings.colors.contains(&p.color));
            assert_eq!(p.age, 0);
        }
    }

    #[test]
    fn same_seed_same_population() {
        let settings = Settings::default();
        let a = create_population(100.0, 100.0, &settings, &mut StdRng::seed_from_u64(3));
        let b = create_population(100.0, 100.0, &settings, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_ranges_are_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = Settings {
            count: 20,
            size: Range::new(2.0, 2.0),
            opacity: Range::new(0.25, 0.25),
            speed: Range::new(0.0, 0.0),
            ..Settings::default()
        };
        for p in create_population(10.0, 10.0, &settings, &mut rng) {
            assert_eq!(p.size, 2.0);
            assert_eq!(p.opacity, 0.25);
            assert_eq!(p.vel, [0.0, 0.0]);
        }
    }
}
