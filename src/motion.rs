//! Pointer tracking, the trailing cursor spring, and the pointer-to-gallery mapping.
//!
//! Everything here is plain arithmetic over the latest pointer sample so the
//! browser layer only has to feed events in and read positions out.

pub const CURSOR_STIFFNESS: f64 = 500.0;
pub const CURSOR_MASS: f64 = 1.0;
const MAX_FRAME_SECS: f64 = 0.05;
const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Last valid pointer sample. Non-finite samples are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    position: PointerPosition,
}

impl PointerTracker {
    pub fn record(&mut self, x: f64, y: f64) -> bool {
        let sample = PointerPosition::new(x, y);
        if !sample.is_finite() {
            return false;
        }
        self.position = sample;
        true
    }

    pub fn position(&self) -> PointerPosition {
        self.position
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const CURSOR: Self = Self {
        stiffness: CURSOR_STIFFNESS,
        mass: CURSOR_MASS,
    };

    pub fn angular_frequency(self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

/// One-dimensional critically damped spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// Advances by `dt_secs` using the closed-form critically damped response.
    /// Returns `true` while the spring is still moving.
    pub fn step(&mut self, dt_secs: f64) -> bool {
        if self.is_settled() {
            return false;
        }

        let dt = if dt_secs.is_finite() {
            dt_secs.clamp(0.0, MAX_FRAME_SECS)
        } else {
            0.0
        };

        let omega = self.config.angular_frequency();
        let c1 = self.value - self.target;
        let c2 = self.velocity + omega * c1;
        let decay = (-omega * dt).exp();
        let displacement = (c1 + c2 * dt) * decay;

        self.velocity = (c2 - omega * (c1 + c2 * dt)) * decay;
        self.value = self.target + displacement;

        if displacement.abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.snap();
            return false;
        }
        true
    }
}

/// Trailing indicator that follows the raw pointer on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFollower {
    x: Spring,
    y: Spring,
}

impl CursorFollower {
    pub fn new(start: PointerPosition) -> Self {
        Self {
            x: Spring::new(SpringConfig::CURSOR, start.x),
            y: Spring::new(SpringConfig::CURSOR, start.y),
        }
    }

    pub fn set_target(&mut self, target: PointerPosition) {
        if !target.is_finite() {
            return;
        }
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn step(&mut self, dt_secs: f64) -> bool {
        let moving_x = self.x.step(dt_secs);
        let moving_y = self.y.step(dt_secs);
        moving_x || moving_y
    }

    pub fn snap(&mut self) {
        self.x.snap();
        self.y.snap();
    }

    pub fn position(&self) -> PointerPosition {
        PointerPosition::new(self.x.value(), self.y.value())
    }
}

/// Horizontal translation range of the gallery track, in percent of its own width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideRange {
    pub rest_percent: f64,
    pub end_percent: f64,
}

pub const GALLERY_SLIDE: SlideRange = SlideRange {
    rest_percent: 5.0,
    end_percent: -95.0,
};

/// Pointer x as a fraction of the viewport width, clamped to `[0, 1]`.
/// An unset or degenerate width maps to `0`.
pub fn pointer_fraction(x: f64, viewport_width: f64) -> f64 {
    if !x.is_finite() || !viewport_width.is_finite() || viewport_width <= 0.0 {
        return 0.0;
    }
    (x / viewport_width).clamp(0.0, 1.0)
}

impl SlideRange {
    pub fn offset_at(self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.rest_percent + (self.end_percent - self.rest_percent) * fraction
    }

    pub fn offset_for_pointer(self, x: f64, viewport_width: f64) -> f64 {
        self.offset_at(pointer_fraction(x, viewport_width))
    }
}
