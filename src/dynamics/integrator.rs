use serde::{Deserialize, Serialize};

use crate::math::Vec3;

use super::body::{Body, BodyKind};

/// Linear damping applied to every dynamic body once per integration step
pub const LINEAR_DAMPING: f32 = 0.999;

/// Extra damping applied to free balls on top of [`LINEAR_DAMPING`]
pub const SPIN_DAMPING: f32 = 0.95;

/// Substep length the per-step damping constants were tuned for
pub const REFERENCE_DT: f32 = 1.0 / 60.0;

/// How the per-step damping constants scale with the step length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DampingMode {
    /// Multiply by the constant once per step, whatever the step length.
    /// Total damping therefore depends on the substep size.
    PerStep,
    /// Scale the constant by `dt / reference_dt` so the damping per second
    /// stays the same across substep sizes
    TimeNormalized { reference_dt: f32 },
}

impl Default for DampingMode {
    fn default() -> Self {
        DampingMode::PerStep
    }
}

impl DampingMode {
    /// Effective multiplier for a constant `factor` over a step of `dt`
    #[inline]
    pub fn factor(self, factor: f32, dt: f32) -> f32 {
        match self {
            DampingMode::PerStep => factor,
            DampingMode::TimeNormalized { reference_dt } => factor.powf(dt / reference_dt),
        }
    }
}

/// Advances a body by `dt` using semi-implicit Euler.
///
/// Inactive and static bodies are left untouched. Accumulated force is
/// cleared every step.
pub fn integrate_body(body: &mut Body, gravity: Vec3, damping: DampingMode, dt: f32) {
    if !body.is_active || body.is_static() {
        return;
    }

    body.acceleration = body.force / body.mass() + gravity;
    body.velocity += body.acceleration * dt;
    body.velocity *= damping.factor(LINEAR_DAMPING, dt);
    body.position += body.velocity * dt;
    body.force = Vec3::ZERO;
}

/// Advances a ball: base integration, spin damping, then the floor clamp.
/// Held balls are frozen.
pub fn integrate_ball(body: &mut Body, gravity: Vec3, damping: DampingMode, dt: f32) {
    if body.is_held() {
        return;
    }

    integrate_body(body, gravity, damping, dt);
    if !body.is_active || body.is_static() {
        return;
    }

    body.velocity *= damping.factor(SPIN_DAMPING, dt);
    clamp_to_floor(body);
}

/// Keeps a ball above the ground plane y = 0, bouncing it with its restitution.
pub fn clamp_to_floor(body: &mut Body) {
    let radius = body.radius();
    if body.position.y < radius {
        body.position.y = radius;
        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * body.restitution;
        }
    }
}

/// Dispatches to the integration routine matching the body kind
pub fn step_body(body: &mut Body, gravity: Vec3, damping: DampingMode, dt: f32) {
    let kind = *body.kind();
    match kind {
        BodyKind::Sphere => integrate_body(body, gravity, damping, dt),
        BodyKind::Ball(_) => integrate_ball(body, gravity, damping, dt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{BallState, BodyDesc};

    const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
    const DT: f32 = 1.0 / 60.0;

    fn sphere(position: Vec3) -> Body {
        Body::new(&BodyDesc::sphere().with_position(position), BodyKind::Sphere).unwrap()
    }

    fn ball(position: Vec3) -> Body {
        Body::new(
            &BodyDesc::ball().with_position(position),
            BodyKind::Ball(BallState::new(1, Vec3::ONE)),
        )
        .unwrap()
    }

    #[test]
    fn test_gravity_integration() {
        let mut body = sphere(Vec3::new(0.0, 5.0, 0.0));
        integrate_body(&mut body, GRAVITY, DampingMode::PerStep, DT);

        let expected_vy = -9.81 * DT * LINEAR_DAMPING;
        assert!((body.velocity.y - expected_vy).abs() < 1e-6);
        assert!((body.position.y - (5.0 + expected_vy * DT)).abs() < 1e-6);
        assert_eq!(body.acceleration, GRAVITY);
    }

    #[test]
    fn test_force_is_cleared_each_step() {
        let mut body = sphere(Vec3::ZERO);
        body.apply_force(Vec3::new(2.0, 0.0, 0.0));

        integrate_body(&mut body, Vec3::ZERO, DampingMode::PerStep, DT);
        assert_eq!(body.force, Vec3::ZERO);
        assert!((body.acceleration.x - 2.0).abs() < 1e-6);

        integrate_body(&mut body, Vec3::ZERO, DampingMode::PerStep, DT);
        assert_eq!(body.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_static_body_no_integration() {
        let mut body = sphere(Vec3::new(0.0, 3.0, 0.0));
        body.set_static(true);

        for _ in 0..10 {
            integrate_body(&mut body, GRAVITY, DampingMode::PerStep, DT);
        }

        assert_eq!(body.position, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_inactive_body_no_integration() {
        let mut body = sphere(Vec3::new(0.0, 3.0, 0.0));
        body.is_active = false;
        integrate_body(&mut body, GRAVITY, DampingMode::PerStep, DT);
        assert_eq!(body.position, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_damping_without_gravity() {
        let mut body = sphere(Vec3::ZERO);
        body.velocity = Vec3::new(10.0, 0.0, 0.0);

        integrate_body(&mut body, Vec3::ZERO, DampingMode::PerStep, 1.0);
        assert!((body.velocity.x - 10.0 * LINEAR_DAMPING).abs() < 1e-5);
    }

    #[test]
    fn test_time_normalized_damping() {
        let mode = DampingMode::TimeNormalized {
            reference_dt: REFERENCE_DT,
        };
        assert!((mode.factor(LINEAR_DAMPING, REFERENCE_DT) - LINEAR_DAMPING).abs() < 1e-6);

        // Two half steps damp as much as one full step
        let half = mode.factor(LINEAR_DAMPING, REFERENCE_DT * 0.5);
        assert!((half * half - LINEAR_DAMPING).abs() < 1e-6);

        assert_eq!(DampingMode::PerStep.factor(LINEAR_DAMPING, 0.5), LINEAR_DAMPING);
    }

    #[test]
    fn test_ball_spin_damping() {
        let mut b = ball(Vec3::new(0.0, 5.0, 0.0));
        b.velocity = Vec3::new(1.0, 0.0, 0.0);

        integrate_ball(&mut b, Vec3::ZERO, DampingMode::PerStep, DT);
        assert!((b.velocity.x - LINEAR_DAMPING * SPIN_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn test_ball_floor_clamp() {
        let mut b = ball(Vec3::new(0.0, 0.26, 0.0));
        b.velocity = Vec3::new(0.0, -3.0, 0.0);

        integrate_ball(&mut b, GRAVITY, DampingMode::PerStep, DT);

        let impact_vy = (-3.0 - 9.81 * DT) * LINEAR_DAMPING * SPIN_DAMPING;
        assert_eq!(b.position.y, 0.25);
        assert!((b.velocity.y - (-impact_vy * 0.8)).abs() < 1e-5);
    }

    #[test]
    fn test_held_ball_is_frozen() {
        let mut b = ball(Vec3::new(0.0, 5.0, 0.0));
        b.set_held(true);

        step_body(&mut b, GRAVITY, DampingMode::PerStep, 0.5);
        assert_eq!(b.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_sphere_has_no_floor_clamp() {
        let mut body = sphere(Vec3::new(0.0, 0.1, 0.0));
        step_body(&mut body, GRAVITY, DampingMode::PerStep, DT);
        assert!(body.position.y < 0.1);
    }
}
