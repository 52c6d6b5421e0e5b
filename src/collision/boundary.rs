use serde::{Deserialize, Serialize};

use crate::dynamics::Body;
use crate::error::{PhysicsError, Result};

/// How far above the floor contact a body still counts as resting on it
pub const FLOOR_CONTACT_TOLERANCE: f32 = 0.1;

/// Axis-aligned room the bodies are confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    /// Floor height
    pub min_y: f32,
    /// Ceiling height
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for WorldBounds {
    /// A 30 x 30 room, 10 m high
    fn default() -> Self {
        Self {
            min_x: -15.0,
            max_x: 15.0,
            min_y: 0.0,
            max_y: 10.0,
            min_z: -15.0,
            max_z: 15.0,
        }
    }
}

impl WorldBounds {
    /// Creates validated bounds
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) -> Result<Self> {
        let bounds = Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Creates bounds from `[min_x, max_x, min_y, max_y, min_z, max_z]`
    pub fn from_array(b: [f32; 6]) -> Result<Self> {
        Self::new(b[0], b[1], b[2], b[3], b[4], b[5])
    }

    /// Returns `[min_x, max_x, min_y, max_y, min_z, max_z]`
    pub fn to_array(self) -> [f32; 6] {
        [self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z]
    }

    /// Checks that min < max on every axis (NaN fails)
    pub fn validate(&self) -> Result<()> {
        for (axis, min, max) in self.axes() {
            if !(min < max) {
                return Err(PhysicsError::InvalidBounds { axis, min, max });
            }
        }
        Ok(())
    }

    fn axes(&self) -> [(char, f32, f32); 3] {
        [
            ('x', self.min_x, self.max_x),
            ('y', self.min_y, self.max_y),
            ('z', self.min_z, self.max_z),
        ]
    }

    /// Returns true if a sphere of `radius` at the body's position fits inside
    pub fn contains(&self, body: &Body) -> bool {
        let r = body.radius();
        let p = body.position;
        self.axes()
            .iter()
            .enumerate()
            .all(|(i, &(_, min, max))| p[i] >= min + r && p[i] <= max - r)
    }
}

/// Pushes a body back inside the room, reflecting velocity into any face it hits.
///
/// Applies floor friction to the horizontal velocity when a reflection happened
/// and the body is resting on the floor. Returns true if any face reflected
/// the body. Static, inactive, and held bodies are skipped.
pub fn resolve_boundary(body: &mut Body, bounds: &WorldBounds) -> bool {
    if body.is_static() || !body.is_simulated() {
        return false;
    }

    let radius = body.radius();
    let restitution = body.restitution;
    let mut collided = false;

    for (axis, (_, min, max)) in bounds.axes().into_iter().enumerate() {
        if body.position[axis] - radius < min {
            body.position[axis] = min + radius;
            if body.velocity[axis] < 0.0 {
                body.velocity[axis] = -body.velocity[axis] * restitution;
                collided = true;
            }
        } else if body.position[axis] + radius > max {
            body.position[axis] = max - radius;
            if body.velocity[axis] > 0.0 {
                body.velocity[axis] = -body.velocity[axis] * restitution;
                collided = true;
            }
        }
    }

    if collided && body.position.y <= bounds.min_y + radius + FLOOR_CONTACT_TOLERANCE {
        let keep = 1.0 - body.friction;
        body.velocity.x *= keep;
        body.velocity.z *= keep;
    }

    collided
}
