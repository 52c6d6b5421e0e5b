//! Player-side glue around a [`World`]: summoning balls, and picking up,
//! carrying, dropping, and throwing them.
//!
//! The sandbox only issues commands to the world between frames; it never
//! touches bodies while [`World::update`] runs.

pub mod console;

use rand::Rng;

use crate::collision::BodyHandle;
use crate::error::{PhysicsError, Result};
use crate::math::Vec3;
use crate::world::{StepReport, World};

/// Most balls a single summon may create
pub const MAX_SUMMON: usize = 100;

/// Horizontal scatter around the player for summoned balls
pub const SUMMON_SPREAD: f32 = 5.0;

/// Height range summoned balls appear in
pub const SUMMON_HEIGHT_MIN: f32 = 2.0;
pub const SUMMON_HEIGHT_MAX: f32 = 8.0;

/// Largest horizontal speed given to a summoned ball, per axis
pub const SUMMON_MAX_SPEED: f32 = 2.0;

/// Result of [`Sandbox::toggle_hold`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandAction {
    PickedUp(BodyHandle),
    Dropped(BodyHandle),
    /// Nothing held and no ball within reach
    Nothing,
}

/// A world plus the player's view and hand
pub struct Sandbox {
    world: World,
    held: Option<BodyHandle>,
    eye: Vec3,
    front: Vec3,
    paused: bool,
    /// Balls farther than this from the eye cannot be picked up
    pub pickup_range: f32,
    /// Speed a throw leaves the hand with, before the upward lift
    pub throw_speed: f32,
    /// Distance in front of the eye a held ball is carried at
    pub carry_distance: f32,
}

impl Sandbox {
    /// Wraps a world with the player standing at (0, 3, 8) looking down -Z
    pub fn new(world: World) -> Self {
        Self {
            world,
            held: None,
            eye: Vec3::new(0.0, 3.0, 8.0),
            front: Vec3::FORWARD,
            paused: false,
            pickup_range: 3.0,
            throw_speed: 15.0,
            carry_distance: 2.0,
        }
    }

    /// Returns the simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns the simulated world mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The ball currently in hand, if it still exists
    pub fn held(&self) -> Option<BodyHandle> {
        self.held.filter(|&handle| self.world.contains(handle))
    }

    /// Player eye position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Moves the player view. `front` is normalized; a zero vector keeps the old direction.
    pub fn set_view(&mut self, eye: Vec3, front: Vec3) {
        self.eye = eye;
        if let Some(front) = front.try_normalize() {
            self.front = front;
        }
    }

    /// Spawns `count` balls scattered around the player with a small
    /// random horizontal velocity
    pub fn summon(&mut self, count: usize) -> Result<Vec<BodyHandle>> {
        if count == 0 || count > MAX_SUMMON {
            return Err(PhysicsError::InvalidCount {
                count,
                max: MAX_SUMMON,
            });
        }

        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let rng = self.world.rng_mut();
            let position = Vec3::new(
                self.eye.x + rng.gen_range(-SUMMON_SPREAD..=SUMMON_SPREAD),
                rng.gen_range(SUMMON_HEIGHT_MIN..=SUMMON_HEIGHT_MAX),
                self.eye.z + rng.gen_range(-SUMMON_SPREAD..=SUMMON_SPREAD),
            );
            let velocity = Vec3::new(
                rng.gen_range(-SUMMON_MAX_SPEED..=SUMMON_MAX_SPEED),
                0.0,
                rng.gen_range(-SUMMON_MAX_SPEED..=SUMMON_MAX_SPEED),
            );

            let handle = self.world.create_ball(position, None)?;
            self.world.set_velocity(handle, velocity)?;
            handles.push(handle);
        }

        log::info!("summoned {} balls", count);
        Ok(handles)
    }

    /// Nearest free ball strictly within `pickup_range` of the eye
    pub fn nearest_ball(&self) -> Option<BodyHandle> {
        self.world
            .balls()
            .filter(|ball| !ball.is_held())
            .map(|ball| (ball.handle, ball.position.distance(self.eye)))
            .filter(|&(_, distance)| distance < self.pickup_range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, _)| handle)
    }

    /// Drops the held ball, or picks up the nearest one in reach
    pub fn toggle_hold(&mut self) -> Result<HandAction> {
        if let Some(handle) = self.held() {
            self.held = None;
            self.world.set_held(handle, false)?;
            return Ok(HandAction::Dropped(handle));
        }

        self.held = None;
        match self.nearest_ball() {
            Some(handle) => {
                self.world.set_held(handle, true)?;
                self.held = Some(handle);
                Ok(HandAction::PickedUp(handle))
            }
            None => Ok(HandAction::Nothing),
        }
    }

    /// Throws the held ball along the view direction
    pub fn throw(&mut self) -> Result<Option<BodyHandle>> {
        let Some(handle) = self.held() else {
            return Ok(None);
        };
        self.held = None;
        self.world.throw_ball(handle, self.front * self.throw_speed)?;
        Ok(Some(handle))
    }

    /// Returns true while frames are frozen
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses or resumes the simulation, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// Advances the world, then moves the held ball in front of the eye.
    /// Does nothing while paused.
    pub fn frame(&mut self, dt: f32) -> Result<StepReport> {
        if self.paused {
            return Ok(StepReport::default());
        }
        let report = self.world.update(dt);
        if let Some(handle) = self.held() {
            self.world
                .set_position(handle, self.eye + self.front * self.carry_distance)?;
        }
        Ok(report)
    }

    /// Removes every body and empties the hand
    pub fn clear_balls(&mut self) {
        self.world.clear();
        self.held = None;
    }
}
