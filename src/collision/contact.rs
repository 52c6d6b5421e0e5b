use rand::Rng;

use crate::dynamics::Body;
use crate::math::Vec3;

/// Fraction of the penetration removed by positional correction
pub const CORRECTION_PERCENT: f32 = 0.8;

/// Penetration allowed before positional correction kicks in
pub const CORRECTION_SLOP: f32 = 0.01;

/// Half-width of the per-axis velocity jitter added to ball-ball contacts
pub const BALL_JITTER: f32 = 0.05;

/// Normal used when two centers coincide and no direction can be derived
pub const FALLBACK_NORMAL: Vec3 = Vec3::UP;

/// Contact between two overlapping spheres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereContact {
    /// Contact normal (pointing from B to A)
    pub normal: Vec3,
    /// Penetration depth (positive when overlapping)
    pub depth: f32,
    /// True when the centers coincided and [`FALLBACK_NORMAL`] was used
    pub degenerate: bool,
}

impl SphereContact {
    /// Computes the contact between `a` and `b` from their current positions.
    ///
    /// Does not check for overlap; `depth` is negative for separated spheres.
    pub fn between(a: &Body, b: &Body) -> Self {
        let offset = a.position - b.position;
        let distance = offset.length();
        let (normal, degenerate) = match offset.try_normalize() {
            Some(normal) => (normal, false),
            None => (FALLBACK_NORMAL, true),
        };

        Self {
            normal,
            depth: a.radius() + b.radius() - distance,
            degenerate,
        }
    }
}

/// Outcome of [`resolve_collision`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Bodies were moving apart; nothing was changed
    Separating,
    /// Both bodies have infinite mass; nothing was changed
    Immovable,
    /// An impulse (and possibly positional correction) was applied
    Resolved {
        contact: SphereContact,
        /// Scalar impulse applied along the normal
        impulse: f32,
    },
}

/// Resolves a collision between two overlapping bodies.
///
/// Applies a restitution impulse along the contact normal, then pushes the
/// bodies apart in proportion to their inverse masses. Ball-ball contacts
/// also receive an equal and opposite random velocity jitter drawn from `rng`.
pub fn resolve_collision<R: Rng + ?Sized>(a: &mut Body, b: &mut Body, rng: &mut R) -> Resolution {
    let contact = SphereContact::between(a, b);
    if contact.degenerate {
        log::debug!(
            "coincident centers for {} and {}, using fallback normal",
            a.handle,
            b.handle
        );
    }
    let normal = contact.normal;

    let relative_velocity = a.velocity - b.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);
    if velocity_along_normal > 0.0 {
        return Resolution::Separating;
    }

    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return Resolution::Immovable;
    }

    let restitution = a.restitution.min(b.restitution);
    let impulse_scalar = -(1.0 + restitution) * velocity_along_normal / inv_mass_sum;

    // The impulse is pre-scaled by inverse mass and `apply_impulse` divides by
    // mass again, so each body's delta-v is j / m^2. Momentum is only
    // conserved for equal masses. Static bodies ignore impulses.
    let impulse = normal * impulse_scalar;
    a.apply_impulse(impulse * inv_mass_a);
    b.apply_impulse(-impulse * inv_mass_b);

    if contact.depth > 0.0 {
        let correction =
            normal * (CORRECTION_PERCENT * (contact.depth - CORRECTION_SLOP).max(0.0) / inv_mass_sum);
        a.position += correction * inv_mass_a;
        b.position -= correction * inv_mass_b;
    }

    if a.is_ball() && b.is_ball() {
        let jitter = Vec3::new(
            rng.gen_range(-BALL_JITTER..=BALL_JITTER),
            rng.gen_range(-BALL_JITTER..=BALL_JITTER),
            rng.gen_range(-BALL_JITTER..=BALL_JITTER),
        );
        a.velocity += jitter;
        b.velocity -= jitter;
    }

    Resolution::Resolved {
        contact,
        impulse: impulse_scalar,
    }
}
