//! Per-person simulation state

use crate::PhysicsConfig;
use kindred_domain::Position;
use std::f64::consts::TAU;

/// Drift frequency multiplier per axis, so the axes never move in lockstep
const AXIS_RATES: [f64; 3] = [1.0, 1.3, 0.7];

/// Live state of one person
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) position: Position,
    /// Spring state; `position` is this plus the idle drift
    pub(crate) base: Position,
    pub(crate) velocity: Position,
    pub(crate) rest_anchor: Position,
    pub(crate) drag_anchor: Position,
    pub(crate) dragging: bool,
    pub(crate) manual: bool,
    pub(crate) settled: bool,
    pub(crate) phase: [f64; 3],
    /// Engine clock at the last drag sample
    pub(crate) sampled_at: f64,
}

impl Body {
    pub(crate) fn new(anchor: Position, phase: [f64; 3]) -> Self {
        Self {
            position: anchor,
            base: anchor,
            velocity: Position::zeros(),
            rest_anchor: anchor,
            drag_anchor: anchor,
            dragging: false,
            manual: false,
            settled: false,
            phase,
            sampled_at: 0.0,
        }
    }

    /// Where the person is drawn right now
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Position {
        self.velocity
    }

    /// Position computed by the layout engine
    pub fn rest_anchor(&self) -> Position {
        self.rest_anchor
    }

    /// Position the spring pulls towards (the drop point after a drag)
    pub fn anchor(&self) -> Position {
        self.drag_anchor
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the anchor was placed by hand
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Whether the body has come to rest on its anchor
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Idle offset from the anchor at engine time `clock`
    pub(crate) fn drift(&self, clock: f64, config: &PhysicsConfig) -> Position {
        if config.drift_amplitude == 0.0 {
            return Position::zeros();
        }
        let wave = |axis: usize| {
            let omega = TAU * config.drift_frequency * AXIS_RATES[axis];
            config.drift_amplitude * (omega * clock + self.phase[axis]).sin()
        };
        Position::new(wave(0), wave(1), wave(2))
    }

    /// Advance by `h` seconds, ending at engine time `clock`
    pub(crate) fn step(&mut self, h: f64, clock: f64, config: &PhysicsConfig) {
        if self.dragging {
            return;
        }

        if !self.settled {
            // Semi-implicit Euler with exponential damping
            self.velocity += (self.drag_anchor - self.base) * (config.stiffness * h);
            self.velocity *= (-config.damping * h).exp();
            self.base += self.velocity * h;

            if self.manual {
                self.base = clamp_to_radius(self.base, self.drag_anchor, config.max_drag_radius);
            }

            let eps = config.rest_epsilon;
            if self.velocity.norm() < eps && (self.drag_anchor - self.base).norm() < eps {
                self.velocity = Position::zeros();
                self.base = self.drag_anchor;
                self.settled = true;
            }
        }

        self.position = self.base + self.drift(clock, config);
    }

    /// Follow the pointer to `target`, estimating velocity from the previous sample
    pub(crate) fn drag_to(&mut self, target: Position, clock: f64) {
        let elapsed = clock - self.sampled_at;
        if elapsed > 0.0 {
            self.velocity = (target - self.position) / elapsed;
        }
        self.position = target;
        self.base = target;
        self.sampled_at = clock;
    }
}

/// Project `point` onto the sphere of `radius` around `center` when it lies outside
pub fn clamp_to_radius(point: Position, center: Position, radius: f64) -> Position {
    let offset = point - center;
    let distance = offset.norm();
    if distance <= radius {
        return point;
    }
    if radius <= 0.0 || distance == 0.0 {
        return center;
    }
    center + offset * (radius / distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_untouched() {
        let p = Position::new(1.0, 1.0, 0.0);
        assert_eq!(clamp_to_radius(p, Position::zeros(), 3.0), p);
    }

    #[test]
    fn test_clamp_projects_onto_sphere() {
        let clamped = clamp_to_radius(Position::new(7.0, 0.0, 0.0), Position::new(1.0, 0.0, 0.0), 3.0);
        assert_eq!(clamped, Position::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_clamp_zero_radius_pins_to_center() {
        let center = Position::new(2.0, 2.0, 2.0);
        assert_eq!(clamp_to_radius(Position::zeros(), center, 0.0), center);
    }

    #[test]
    fn test_drift_is_bounded() {
        let config = PhysicsConfig::default();
        let body = Body::new(Position::zeros(), [0.3, 1.1, 2.9]);
        for i in 0..200 {
            let drift = body.drift(i as f64 * 0.1, &config);
            for axis in 0..3 {
                assert!(drift[axis].abs() <= config.drift_amplitude + 1e-12);
            }
        }
    }

    #[test]
    fn test_spring_settles_on_anchor() {
        let config = PhysicsConfig::still();
        let mut body = Body::new(Position::zeros(), [0.0; 3]);
        body.base = Position::new(2.0, 0.0, 0.0);

        let h = config.max_step;
        for i in 1..=300 {
            body.step(h, i as f64 * h, &config);
        }

        assert!(body.is_settled());
        assert_eq!(body.position(), Position::zeros());
    }

    #[test]
    fn test_dragging_body_is_left_alone() {
        let config = PhysicsConfig::default();
        let mut body = Body::new(Position::zeros(), [0.0; 3]);
        body.position = Position::new(1.0, 0.0, 0.0);
        body.base = body.position;
        body.dragging = true;
        body.step(0.1, 0.1, &config);
        assert_eq!(body.position(), Position::new(1.0, 0.0, 0.0));
    }
}
