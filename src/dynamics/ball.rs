use std::fmt;

use rand::Rng;

use crate::math::Vec3;

use super::body::{Body, BodyKind};

/// Upward velocity added to every throw so it feels lofted
pub const THROW_LIFT: f32 = 2.0;

/// Range each color channel of a random ball color is drawn from
pub const COLOR_CHANNEL_MIN: f32 = 0.3;
pub const COLOR_CHANNEL_MAX: f32 = 1.0;

/// Ball-specific state carried by [`BodyKind::Ball`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    /// Identifier for logging; unique within a world
    pub id: u32,
    /// RGB color, each channel in [0, 1]
    pub color: Vec3,
    /// True while the player holds the ball
    pub held: bool,
}

impl BallState {
    /// A free (not held) ball
    pub fn new(id: u32, color: Vec3) -> Self {
        Self {
            id,
            color,
            held: false,
        }
    }
}

/// Draws a random bright color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let range = COLOR_CHANNEL_MIN..=COLOR_CHANNEL_MAX;
    Vec3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

impl Body {
    /// Returns the ball state if this body is a ball
    pub fn as_ball(&self) -> Option<&BallState> {
        match self.kind() {
            BodyKind::Ball(ball) => Some(ball),
            BodyKind::Sphere => None,
        }
    }

    /// Returns true if this body is a ball
    pub fn is_ball(&self) -> bool {
        self.as_ball().is_some()
    }

    /// True if this body is a ball currently held by the player
    pub fn is_held(&self) -> bool {
        self.as_ball().map_or(false, |ball| ball.held)
    }

    /// Returns true if this body takes part in physics this step
    pub fn is_simulated(&self) -> bool {
        self.is_active && !self.is_held()
    }

    /// Picks up or releases a ball. Picking up stops the ball dead.
    /// Returns false if the body is not a ball.
    pub fn set_held(&mut self, held: bool) -> bool {
        let BodyKind::Ball(ball) = self.kind_mut() else {
            return false;
        };
        ball.held = held;
        if held {
            self.stop();
        }
        true
    }

    /// Releases a held ball with the given velocity plus [`THROW_LIFT`].
    /// Does nothing unless the ball is currently held; returns whether it was thrown.
    pub fn throw_ball(&mut self, velocity: Vec3) -> bool {
        match self.kind_mut() {
            BodyKind::Ball(ball) if ball.held => ball.held = false,
            _ => return false,
        }
        self.velocity = velocity;
        self.velocity.y += THROW_LIFT;
        true
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ball() {
            Some(ball) => write!(
                f,
                "Ball {} at {} with velocity {}{}",
                ball.id,
                self.position,
                self.velocity,
                if ball.held { " (HELD)" } else { "" }
            ),
            None => write!(
                f,
                "Sphere {} at {} with velocity {}",
                self.handle, self.position, self.velocity
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::dynamics::BodyDesc;

    fn ball() -> Body {
        Body::new(
            &BodyDesc::ball().with_position(Vec3::new(0.0, 2.0, 0.0)),
            BodyKind::Ball(BallState::new(1, Vec3::ONE)),
        )
        .unwrap()
    }

    #[test]
    fn test_ball_defaults() {
        let b = ball();
        assert!(b.is_ball());
        assert_eq!(b.mass(), 0.5);
        assert_eq!(b.radius(), 0.25);
        assert_eq!(b.restitution, 0.8);
        assert_eq!(b.friction, 0.3);
        assert!(!b.is_held());
    }

    #[test]
    fn test_hold_stops_ball() {
        let mut b = ball();
        b.velocity = Vec3::new(1.0, 2.0, 3.0);
        b.force = Vec3::new(0.0, 5.0, 0.0);

        assert!(b.set_held(true));
        assert!(b.is_held());
        assert!(!b.is_simulated());
        assert_eq!(b.velocity, Vec3::ZERO);
        assert_eq!(b.force, Vec3::ZERO);

        // Dropping keeps it at rest
        assert!(b.set_held(false));
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_throw_adds_lift() {
        let mut b = ball();
        b.set_held(true);

        assert!(b.throw_ball(Vec3::new(10.0, 0.0, 0.0)));
        assert!(!b.is_held());
        assert_eq!(b.velocity, Vec3::new(10.0, THROW_LIFT, 0.0));
    }

    #[test]
    fn test_throw_requires_hold() {
        let mut b = ball();
        assert!(!b.throw_ball(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_sphere_cannot_be_held() {
        let mut sphere = Body::new(&BodyDesc::sphere(), BodyKind::Sphere).unwrap();
        assert!(!sphere.set_held(true));
        assert!(!sphere.is_held());
    }

    #[test]
    fn test_random_color_is_bright() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let c = random_color(&mut rng);
            for channel in c.to_array() {
                assert!((COLOR_CHANNEL_MIN..=COLOR_CHANNEL_MAX).contains(&channel));
            }
        }
    }

    #[test]
    fn test_display() {
        let mut b = ball();
        assert!(b.to_string().starts_with("Ball 1 at (0.000, 2.000, 0.000)"));
        b.set_held(true);
        assert!(b.to_string().ends_with("(HELD)"));
    }
}
