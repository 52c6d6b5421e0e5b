use serde::{Deserialize, Serialize};

use crate::collision::BodyHandle;
use crate::error::{PhysicsError, Result};
use crate::math::utils::unit_clamp;
use crate::math::Vec3;

use super::ball::BallState;

/// Speed above which a body counts as moving
pub const MOVING_SPEED_THRESHOLD: f32 = 0.1;

/// What a body is, beyond being a simulated sphere.
///
/// The world inspects this tag instead of the concrete type when it needs
/// ball-only behavior (hold/throw, floor clamp, collision perturbation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// A plain rigid sphere
    Sphere,
    /// A player-facing ball with color and hold state
    Ball(BallState),
}

/// A rigid sphere in the simulation
#[derive(Debug, Clone)]
pub struct Body {
    /// Handle of the slot owning this body
    pub handle: BodyHandle,
    kind: BodyKind,

    /// Position of the center in world space
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Acceleration computed by the last integration step
    pub acceleration: Vec3,
    /// Accumulated force (reset each step)
    pub force: Vec3,

    mass: f32,
    radius: f32,
    /// Restitution (bounciness), in [0, 1]
    pub restitution: f32,
    /// Friction coefficient, in [0, 1]
    pub friction: f32,

    is_static: bool,
    /// Inactive bodies are skipped by integration and collision
    pub is_active: bool,
}

impl Body {
    /// Builds a body from a description, rejecting non-positive mass or radius
    pub fn new(desc: &BodyDesc, kind: BodyKind) -> Result<Self> {
        if !desc.mass.is_finite() || desc.mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(desc.mass));
        }
        if !desc.radius.is_finite() || desc.radius <= 0.0 {
            return Err(PhysicsError::InvalidRadius(desc.radius));
        }

        let mut body = Self {
            handle: BodyHandle::INVALID,
            kind,
            position: desc.position,
            velocity: desc.velocity,
            acceleration: Vec3::ZERO,
            force: Vec3::ZERO,
            mass: desc.mass,
            radius: desc.radius,
            restitution: unit_clamp(desc.restitution),
            friction: unit_clamp(desc.friction),
            is_static: false,
            is_active: true,
        };
        body.set_static(desc.is_static);
        Ok(body)
    }

    /// Returns the kind tag of this body
    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut BodyKind {
        &mut self.kind
    }

    /// Returns the mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Returns the radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns true if this body is immovable (infinite mass)
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns the inverse mass (0 for static bodies)
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Marks the body static or dynamic.
    /// Becoming static stops the body dead.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
        if is_static {
            self.stop();
        }
    }

    /// Sets restitution, clamped to [0, 1]
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = unit_clamp(restitution);
    }

    /// Sets friction, clamped to [0, 1]
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = unit_clamp(friction);
    }

    /// Accumulates a force for the next integration step
    pub fn apply_force(&mut self, force: Vec3) {
        if !self.is_static {
            self.force += force;
        }
    }

    /// Applies an instantaneous change in momentum
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if !self.is_static {
            self.velocity += impulse / self.mass;
        }
    }

    /// Returns true if both bodies are active and their spheres overlap
    pub fn collides_with(&self, other: &Body) -> bool {
        if !self.is_active || !other.is_active {
            return false;
        }
        self.distance_to(other) < self.radius + other.radius
    }

    /// Distance between the two centers
    pub fn distance_to(&self, other: &Body) -> f32 {
        (self.position - other.position).length()
    }

    /// Kinetic energy (0.5 * m * v^2)
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Returns true if the speed exceeds [`MOVING_SPEED_THRESHOLD`]
    pub fn is_moving(&self) -> bool {
        self.velocity.length() > MOVING_SPEED_THRESHOLD
    }

    /// Teleports the body to `position` at rest, releasing any hold
    pub fn reset_to(&mut self, position: Vec3) {
        self.position = position;
        self.stop();
        if let BodyKind::Ball(ball) = &mut self.kind {
            ball.held = false;
        }
    }

    /// Zeroes velocity, acceleration, and accumulated force
    pub(crate) fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }
}

/// Description for creating a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub radius: f32,
    pub restitution: f32,
    pub friction: f32,
    pub is_static: bool,
    /// Spawn as a ball rather than a plain sphere
    pub ball: bool,
    /// Ball color; a random bright color is drawn when unset
    pub color: Option<Vec3>,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self::sphere()
    }
}

impl BodyDesc {
    /// A plain sphere: 1 kg, 0.5 m radius
    pub fn sphere() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            radius: 0.5,
            restitution: 0.7,
            friction: 0.5,
            is_static: false,
            ball: false,
            color: None,
        }
    }

    /// A ball: 500 g, 25 cm radius, very bouncy, rolls easily
    pub fn ball() -> Self {
        Self {
            mass: 0.5,
            radius: 0.25,
            restitution: 0.8,
            friction: 0.3,
            ball: true,
            ..Self::sphere()
        }
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Sets friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Makes the body static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Sets the ball color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = Some(color);
        self
    }
}
