//! Descriptors for the decorative falling blocks behind the page.

pub const PARTICLE_COUNT: usize = 15;
pub const SIZE_RANGE_PX: (f64, f64) = (20.0, 80.0);
pub const START_X_RANGE_PERCENT: (f64, f64) = (0.0, 100.0);
pub const FALL_DURATION_RANGE_SECS: (f64, f64) = (10.0, 20.0);
pub const DELAY_RANGE_SECS: (f64, f64) = (0.0, 10.0);
pub const ROTATION_RANGE_DEG: (f64, f64) = (0.0, 360.0);
pub const OUTLINE_PROBABILITY: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteColor {
    Accent1,
    Accent2,
    Accent3,
    Black,
    Transparent,
}

pub const PALETTE: [PaletteColor; 5] = [
    PaletteColor::Accent1,
    PaletteColor::Accent2,
    PaletteColor::Accent3,
    PaletteColor::Black,
    PaletteColor::Transparent,
];

impl PaletteColor {
    pub fn css(self) -> &'static str {
        match self {
            Self::Accent1 => "var(--color-accent-1)",
            Self::Accent2 => "var(--color-accent-2)",
            Self::Accent3 => "var(--color-accent-3)",
            Self::Black => "#000000",
            Self::Transparent => "transparent",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleFill {
    Outlined,
    Filled(PaletteColor),
}

impl ParticleFill {
    fn background(self) -> &'static str {
        match self {
            Self::Outlined => "transparent",
            Self::Filled(color) => color.css(),
        }
    }

    fn border(self) -> &'static str {
        match self {
            Self::Outlined => "var(--color-text-muted)",
            Self::Filled(_) => "#000000",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub start_x_percent: f64,
    pub fall_duration_secs: f64,
    pub delay_secs: f64,
    pub fill: ParticleFill,
    pub rotate_end_deg: f64,
}

fn sample(rng: &mut fastrand::Rng, (low, high): (f64, f64)) -> f64 {
    low + rng.f64() * (high - low)
}

impl Particle {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let size_px = sample(rng, SIZE_RANGE_PX);
        let start_x_percent = sample(rng, START_X_RANGE_PERCENT);
        let fall_duration_secs = sample(rng, FALL_DURATION_RANGE_SECS);
        let delay_secs = sample(rng, DELAY_RANGE_SECS);
        let outlined = rng.f64() < OUTLINE_PROBABILITY;
        let color = PALETTE[rng.usize(..PALETTE.len())];
        let rotate_end_deg = sample(rng, ROTATION_RANGE_DEG);

        Self {
            size_px,
            start_x_percent,
            fall_duration_secs,
            delay_secs,
            fill: if outlined {
                ParticleFill::Outlined
            } else {
                ParticleFill::Filled(color)
            },
            rotate_end_deg,
        }
    }

    /// Inline custom properties read by the `falling-block` keyframes.
    pub fn style(&self) -> String {
        format!(
            "--block-size: {:.2}px; --block-x: {:.2}vw; --fall-duration: {:.3}s; --fall-delay: {:.3}s; --rotate-end: {:.2}deg; --block-fill: {}; --block-border: {};",
            self.size_px,
            self.start_x_percent,
            self.fall_duration_secs,
            self.delay_secs,
            self.rotate_end_deg,
            self.fill.background(),
            self.fill.border(),
        )
    }
}

/// Fixed set of particles rolled once at mount; never re-rolled between loops.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    particles: [Particle; PARTICLE_COUNT],
}

impl ParticleField {
    pub fn generate(rng: &mut fastrand::Rng) -> Self {
        Self {
            particles: std::array::from_fn(|_| Particle::random(rng)),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(value: f64, (low, high): (f64, f64)) -> bool {
        (low..=high).contains(&value)
    }

    #[test]
    fn field_always_holds_fifteen_particles() {
        let field = ParticleField::generate(&mut fastrand::Rng::with_seed(7));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        assert_eq!(PARTICLE_COUNT, 15);
    }

    #[test]
    fn parameters_stay_in_bounds_across_seeds() {
        for seed in 0..2_000u64 {
            let field = ParticleField::generate(&mut fastrand::Rng::with_seed(seed));
            for particle in field.particles() {
                assert!(within(particle.size_px, (20.0, 80.0)), "size {}", particle.size_px);
                assert!(within(particle.fall_duration_secs, (10.0, 20.0)));
                assert!(within(particle.delay_secs, (0.0, 10.0)));
                assert!(within(particle.start_x_percent, START_X_RANGE_PERCENT));
                assert!(within(particle.rotate_end_deg, ROTATION_RANGE_DEG));
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let first = ParticleField::generate(&mut fastrand::Rng::with_seed(42));
        let second = ParticleField::generate(&mut fastrand::Rng::with_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn particles_in_a_field_are_independent() {
        let field = ParticleField::generate(&mut fastrand::Rng::with_seed(3));
        let first = field.particles()[0];
        assert!(field.particles().iter().skip(1).any(|p| *p != first));
    }

    #[test]
    fn both_variants_and_every_color_show_up() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut outlined = 0;
        let mut seen = Vec::new();
        let total = 4_000;
        for _ in 0..total {
            match Particle::random(&mut rng).fill {
                ParticleFill::Outlined => outlined += 1,
                ParticleFill::Filled(color) => {
                    if !seen.contains(&color) {
                        seen.push(color);
                    }
                }
            }
        }
        let ratio = f64::from(outlined) / f64::from(total);
        assert!((0.33..0.47).contains(&ratio), "outlined ratio {ratio}");
        assert_eq!(seen.len(), PALETTE.len());
    }

    #[test]
    fn style_exposes_animation_parameters() {
        let particle = Particle {
            size_px: 32.0,
            start_x_percent: 12.5,
            fall_duration_secs: 14.0,
            delay_secs: 2.5,
            fill: ParticleFill::Outlined,
            rotate_end_deg: 90.0,
        };
        let style = particle.style();
        assert!(style.contains("--block-size: 32.00px;"));
        assert!(style.contains("--block-x: 12.50vw;"));
        assert!(style.contains("--fall-duration: 14.000s;"));
        assert!(style.contains("--fall-delay: 2.500s;"));
        assert!(style.contains("--rotate-end: 90.00deg;"));
        assert!(style.contains("--block-fill: transparent;"));
        assert!(style.contains("--block-border: var(--color-text-muted);"));
    }
}
