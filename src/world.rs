use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::collision::{resolve_boundary, resolve_collision, BodyHandle, Resolution, WorldBounds};
use crate::dynamics::{random_color, step_body, BallState, Body, BodyDesc, BodyKind, DampingMode};
use crate::error::{PhysicsError, Result};
use crate::math::Vec3;

/// Configuration for the physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity vector applied to every dynamic body
    pub gravity: Vec3,
    /// Room the bodies are confined to
    pub bounds: WorldBounds,
    /// Size of each physics substep in seconds
    pub fixed_time_step: f32,
    /// Ceiling on substeps per update; elapsed time beyond it is dropped
    pub max_substeps: usize,
    /// How per-step damping scales with the substep length
    pub damping: DampingMode,
    /// Seed for colors and collision jitter; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            bounds: WorldBounds::default(),
            fixed_time_step: 1.0 / 60.0,
            max_substeps: 4,
            damping: DampingMode::PerStep,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks time step, substep ceiling, and bounds
    pub fn validate(&self) -> Result<()> {
        if !self.fixed_time_step.is_finite() || self.fixed_time_step <= 0.0 {
            return Err(PhysicsError::InvalidTimeStep(self.fixed_time_step));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidSubsteps);
        }
        if let DampingMode::TimeNormalized { reference_dt } = self.damping {
            if !reference_dt.is_finite() || reference_dt <= 0.0 {
                return Err(PhysicsError::InvalidTimeStep(reference_dt));
            }
        }
        self.bounds.validate()
    }

    /// Sets the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the fixed substep size
    pub fn with_fixed_time_step(mut self, fixed_time_step: f32) -> Self {
        self.fixed_time_step = fixed_time_step;
        self
    }

    /// Sets the substep ceiling
    pub fn with_max_substeps(mut self, max_substeps: usize) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Sets the gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }
}

/// What a call to [`World::update`] actually simulated
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Number of substeps taken
    pub substeps: usize,
    /// Seconds of simulated time
    pub simulated: f32,
    /// Seconds of elapsed time dropped by the substep ceiling
    pub dropped: f32,
}

/// Read-only view of a ball for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub handle: BodyHandle,
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub color: Vec3,
    pub held: bool,
}

/// Arena slot. The generation moves on every time the slot is emptied.
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// The physics world: owns every body and runs the fixed-step simulation
pub struct World {
    /// Configuration
    config: WorldConfig,
    /// Body storage
    slots: Vec<Slot>,
    /// Empty slot indices for reuse
    free_slots: Vec<usize>,
    /// Live slot indices in insertion order; defines pair enumeration order
    order: Vec<usize>,
    /// Randomness for colors and ball-ball jitter
    rng: StdRng,
    /// Last ball id handed out
    last_ball_id: u32,
    /// Simulated time in seconds
    time: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl World {
    /// Creates a new physics world with the given configuration
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            slots: Vec::new(),
            free_slots: Vec::new(),
            order: Vec::new(),
            rng,
            last_ball_id: 0,
            time: 0.0,
        }
    }

    /// Creates a body and returns its handle
    pub fn create_body(&mut self, desc: BodyDesc) -> Result<BodyHandle> {
        let mut body = Body::new(&desc, BodyKind::Sphere)?;
        if desc.ball {
            let color = desc.color.unwrap_or_else(|| random_color(&mut self.rng));
            self.last_ball_id += 1;
            *body.kind_mut() = BodyKind::Ball(BallState::new(self.last_ball_id, color));
        }

        let index = match self.free_slots.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        let handle = BodyHandle::new(index as u32, slot.generation);
        body.handle = handle;
        log::debug!("spawned {}", body);
        slot.body = Some(body);
        self.order.push(index);

        Ok(handle)
    }

    /// Creates a plain sphere with default material
    pub fn create_sphere(&mut self, position: Vec3, mass: f32, radius: f32) -> Result<BodyHandle> {
        self.create_body(
            BodyDesc::sphere()
                .with_position(position)
                .with_mass(mass)
                .with_radius(radius),
        )
    }

    /// Creates a ball, with a random bright color unless one is given
    pub fn create_ball(&mut self, position: Vec3, color: Option<Vec3>) -> Result<BodyHandle> {
        let mut desc = BodyDesc::ball().with_position(position);
        desc.color = color;
        self.create_body(desc)
    }

    /// Removes a body, returning it. The handle becomes stale.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body> {
        let index = handle.index();
        let slot = self
            .slots
            .get_mut(index)
            .filter(|slot| slot.generation == handle.generation())
            .ok_or(PhysicsError::BodyNotFound(handle))?;
        let body = slot.body.take().ok_or(PhysicsError::BodyNotFound(handle))?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(index);
        self.order.retain(|&i| i != index);
        log::debug!("removed {}", body);

        Ok(body)
    }

    /// Destroys every body. All outstanding handles become stale.
    pub fn clear(&mut self) {
        let count = self.order.len();
        for index in self.order.drain(..) {
            let slot = &mut self.slots[index];
            slot.body = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_slots.push(index);
        }
        log::debug!("cleared {} bodies", count);
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_ref())
    }

    /// Gets a mutable reference to a body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_mut())
    }

    fn live_body(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.body_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Returns true if the handle still refers to a body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    /// Applies a force to a body for the next step
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec3) -> Result<()> {
        self.live_body(handle)?.apply_force(force);
        Ok(())
    }

    /// Applies an impulse to a body
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) -> Result<()> {
        self.live_body(handle)?.apply_impulse(impulse);
        Ok(())
    }

    /// Sets the velocity of a body. Static bodies keep zero velocity.
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<()> {
        let body = self.live_body(handle)?;
        if !body.is_static() {
            body.velocity = velocity;
        }
        Ok(())
    }

    /// Moves a body. Works for static and held bodies too.
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> Result<()> {
        self.live_body(handle)?.position = position;
        Ok(())
    }

    /// Makes a body static (immovable) or dynamic
    pub fn set_static(&mut self, handle: BodyHandle, is_static: bool) -> Result<()> {
        self.live_body(handle)?.set_static(is_static);
        Ok(())
    }

    /// Enables or disables simulation of a body
    pub fn set_active(&mut self, handle: BodyHandle, is_active: bool) -> Result<()> {
        self.live_body(handle)?.is_active = is_active;
        Ok(())
    }

    /// Picks up or releases a ball
    pub fn set_held(&mut self, handle: BodyHandle, held: bool) -> Result<()> {
        let body = self.live_body(handle)?;
        if !body.set_held(held) {
            return Err(PhysicsError::NotABall(handle));
        }
        log::debug!("{} {}", if held { "picked up" } else { "dropped" }, body);
        Ok(())
    }

    /// Throws a held ball. Returns false if the ball was not held.
    pub fn throw_ball(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<bool> {
        let body = self.live_body(handle)?;
        if !body.is_ball() {
            return Err(PhysicsError::NotABall(handle));
        }
        let thrown = body.throw_ball(velocity);
        if thrown {
            log::debug!("threw {}", body);
        }
        Ok(thrown)
    }

    /// Steps the simulation by the elapsed wall-clock time `dt`.
    ///
    /// The time is split into substeps of at most `fixed_time_step`, capped at
    /// `max_substeps`; whatever is left over is dropped rather than simulated.
    pub fn update(&mut self, dt: f32) -> StepReport {
        let mut report = StepReport::default();
        if !dt.is_finite() || dt <= 0.0 {
            return report;
        }

        let mut remaining = dt;
        while remaining > 0.0 && report.substeps < self.config.max_substeps {
            let step = remaining.min(self.config.fixed_time_step);
            self.substep(step);
            remaining -= step;
            report.substeps += 1;
            report.simulated += step;
        }

        if remaining > 0.0 {
            report.dropped = remaining;
            log::debug!(
                "substep cap {} reached, dropped {:.4}s",
                self.config.max_substeps,
                remaining
            );
        }

        self.time += report.simulated;
        report
    }

    /// Performs a single simulation substep
    fn substep(&mut self, dt: f32) {
        log::trace!("substep dt={} bodies={}", dt, self.order.len());

        let gravity = self.config.gravity;
        let damping = self.config.damping;
        for &index in &self.order {
            if let Some(body) = self.slots[index].body.as_mut() {
                step_body(body, gravity, damping, dt);
            }
        }

        self.resolve_collisions();
        self.resolve_boundaries();
    }

    /// Resolves every overlapping pair once, in insertion order.
    /// Returns the number of pairs that received an impulse.
    pub fn resolve_collisions(&mut self) -> usize {
        let mut resolved = 0;
        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let Some((a, b)) = pair_mut(&mut self.slots, self.order[i], self.order[j]) else {
                    continue;
                };
                if !a.is_simulated() || !b.is_simulated() || !a.collides_with(b) {
                    continue;
                }
                if let Resolution::Resolved { .. } = resolve_collision(a, b, &mut self.rng) {
                    resolved += 1;
                }
            }
        }
        resolved
    }

    /// Keeps every body inside the room.
    /// Returns the number of bodies reflected off a face.
    pub fn resolve_boundaries(&mut self) -> usize {
        let bounds = self.config.bounds;
        let mut reflected = 0;
        for &index in &self.order {
            if let Some(body) = self.slots[index].body.as_mut() {
                if resolve_boundary(body, &bounds) {
                    reflected += 1;
                }
            }
        }
        reflected
    }

    /// Iterates over all bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order
            .iter()
            .filter_map(move |&index| self.slots[index].body.as_ref())
    }

    /// Iterates over all body handles in insertion order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies().map(|body| body.handle)
    }

    /// Iterates over all balls in insertion order
    pub fn balls(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies().filter(|body| body.is_ball())
    }

    /// Snapshots every ball for rendering
    pub fn list_balls(&self) -> Vec<BallSnapshot> {
        self.bodies()
            .filter_map(|body| {
                body.as_ball().map(|ball| BallSnapshot {
                    handle: body.handle,
                    id: ball.id,
                    position: body.position,
                    velocity: body.velocity,
                    radius: body.radius(),
                    color: ball.color,
                    held: ball.held,
                })
            })
            .collect()
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the number of balls in the world
    pub fn ball_count(&self) -> usize {
        self.balls().count()
    }

    /// Returns `[min_x, max_x, min_y, max_y, min_z, max_z]`
    pub fn bounds(&self) -> [f32; 6] {
        self.config.bounds.to_array()
    }

    /// Returns the room bounds
    pub fn world_bounds(&self) -> &WorldBounds {
        &self.config.bounds
    }

    /// Replaces the room bounds; rejected unless min < max on every axis
    pub fn set_world_bounds(
        &mut self,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
    ) -> Result<()> {
        self.config.bounds = WorldBounds::new(min_x, max_x, min_y, max_y, min_z, max_z)?;
        Ok(())
    }

    /// Sets the gravity
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// Gets the gravity
    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    /// Returns the configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the simulated time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// The world's random source, shared with spawners so a seed reproduces a run
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Borrows the bodies in slots `i` and `j` mutably at once
fn pair_mut(slots: &mut [Slot], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j {
        return None;
    }
    let (a, b) = if i < j {
        let (head, tail) = slots.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = slots.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    };
    Some((a.body.as_mut()?, b.body.as_mut()?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn seeded_world() -> World {
        World::new(WorldConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn test_world_creation() {
        let world = World::default();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.bounds(), [-15.0, 15.0, 0.0, 10.0, -15.0, 15.0]);
        assert_eq!(world.gravity(), Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_create_body() {
        let mut world = seeded_world();

        let handle = world.create_sphere(Vec3::new(0.0, 5.0, 0.0), 2.0, 0.5).unwrap();

        assert_eq!(world.body_count(), 1);
        assert_eq!(world.ball_count(), 0);
        let body = world.body(handle).unwrap();
        assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(body.mass(), 2.0);
        assert_eq!(body.handle, handle);
    }

    #[test]
    fn test_create_rejects_invalid_body() {
        let mut world = seeded_world();
        assert!(matches!(
            world.create_sphere(Vec3::ZERO, 0.0, 0.5),
            Err(PhysicsError::InvalidMass(_))
        ));
        assert!(matches!(
            world.create_sphere(Vec3::ZERO, 1.0, -0.5),
            Err(PhysicsError::InvalidRadius(_))
        ));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_ball_ids_and_colors() {
        let mut world = seeded_world();
        let red = Vec3::new(1.0, 0.0, 0.0);

        let a = world.create_ball(Vec3::new(0.0, 2.0, 0.0), Some(red)).unwrap();
        let b = world.create_ball(Vec3::new(1.0, 2.0, 0.0), None).unwrap();

        let balls = world.list_balls();
        assert_eq!(balls.len(), 2);
        assert_eq!(balls[0].handle, a);
        assert_eq!(balls[0].id, 1);
        assert_eq!(balls[0].color, red);
        assert_eq!(balls[1].handle, b);
        assert_eq!(balls[1].id, 2);
        assert!(balls[1].color.x >= 0.3 && balls[1].color.x <= 1.0);
    }

    #[test]
    fn test_remove_body() {
        let mut world = seeded_world();

        let handle = world.create_ball(Vec3::new(0.0, 2.0, 0.0), None).unwrap();
        assert_eq!(world.body_count(), 1);

        let removed = world.remove_body(handle).unwrap();
        assert_eq!(removed.handle, handle);
        assert_eq!(world.body_count(), 0);
        assert!(world.body(handle).is_none());
        assert!(matches!(
            world.remove_body(handle),
            Err(PhysicsError::BodyNotFound(_))
        ));
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut world = seeded_world();

        let old = world.create_sphere(Vec3::ZERO, 1.0, 0.5).unwrap();
        world.remove_body(old).unwrap();
        let new = world.create_sphere(Vec3::new(0.0, 3.0, 0.0), 1.0, 0.5).unwrap();

        assert_eq!(old.index(), new.index());
        assert!(world.body(old).is_none());
        assert!(matches!(
            world.apply_impulse(old, Vec3::X),
            Err(PhysicsError::BodyNotFound(_))
        ));
        assert_eq!(world.body(new).unwrap().position, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_insertion_order_survives_reuse() {
        let mut world = seeded_world();

        let a = world.create_sphere(Vec3::ZERO, 1.0, 0.5).unwrap();
        let b = world.create_sphere(Vec3::X, 1.0, 0.5).unwrap();
        let c = world.create_sphere(Vec3::Y, 1.0, 0.5).unwrap();
        world.remove_body(a).unwrap();
        let d = world.create_sphere(Vec3::Z, 1.0, 0.5).unwrap();

        let handles: Vec<_> = world.handles().collect();
        assert_eq!(handles, vec![b, c, d]);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut world = seeded_world();
        let handles: Vec<_> = (0..5)
            .map(|i| world.create_ball(Vec3::new(i as f32, 2.0, 0.0), None).unwrap())
            .collect();

        world.clear();

        assert_eq!(world.body_count(), 0);
        assert!(world.list_balls().is_empty());
        for handle in handles {
            assert!(!world.contains(handle));
            assert!(world.set_held(handle, true).is_err());
        }
    }

    #[test]
    fn test_gravity_simulation() {
        let mut world = seeded_world();
        world.set_gravity(Vec3::new(0.0, -10.0, 0.0));
        let handle = world.create_sphere(Vec3::new(0.0, 8.0, 0.0), 1.0, 0.5).unwrap();

        for _ in 0..30 {
            world.update(1.0 / 60.0);
        }

        let pos = world.body(handle).unwrap().position;
        assert!(pos.y < 8.0);
        assert_relative_eq!(world.time(), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_world_gravity_is_the_only_source() {
        let mut world = seeded_world();
        world.set_gravity(Vec3::ZERO);
        let handle = world.create_sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, 0.5).unwrap();

        for _ in 0..60 {
            world.update(1.0 / 60.0);
        }

        assert_eq!(world.body(handle).unwrap().position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_substep_cap_drops_time() {
        let mut world = seeded_world();
        world.create_ball(Vec3::new(0.0, 5.0, 0.0), None).unwrap();

        let report = world.update(1.0);

        assert_eq!(report.substeps, 4);
        assert_relative_eq!(report.simulated, 4.0 / 60.0, epsilon = 1e-5);
        assert_relative_eq!(report.dropped, 1.0 - 4.0 / 60.0, epsilon = 1e-5);
        assert_relative_eq!(world.time(), 4.0 / 60.0, epsilon = 1e-5);
    }

    #[test]
    fn test_partial_substep() {
        let mut world = seeded_world();
        let report = world.update(0.025);

        assert_eq!(report.substeps, 2);
        assert_relative_eq!(report.simulated, 0.025, epsilon = 1e-6);
        assert_eq!(report.dropped, 0.0);
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut world = seeded_world();
        let handle = world.create_ball(Vec3::new(0.0, 5.0, 0.0), None).unwrap();

        assert_eq!(world.update(0.0), StepReport::default());
        assert_eq!(world.update(-1.0), StepReport::default());
        assert_eq!(world.update(f32::NAN), StepReport::default());
        assert_eq!(world.body(handle).unwrap().position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_balls_collide() {
        let mut world = seeded_world();
        world.set_gravity(Vec3::ZERO);
        let a = world.create_ball(Vec3::new(-0.3, 5.0, 0.0), None).unwrap();
        let b = world.create_ball(Vec3::new(0.3, 5.0, 0.0), None).unwrap();
        world.set_velocity(a, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        world.set_velocity(b, Vec3::new(-5.0, 0.0, 0.0)).unwrap();

        world.update(1.0 / 60.0);

        assert!(world.body(a).unwrap().velocity.x < 0.0);
        assert!(world.body(b).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_held_ball_skips_collisions() {
        let mut world = seeded_world();
        let held = world.create_ball(Vec3::new(0.0, 5.0, 0.0), None).unwrap();
        let free = world.create_ball(Vec3::new(0.1, 5.0, 0.0), None).unwrap();
        world.set_held(held, true).unwrap();

        assert_eq!(world.resolve_collisions(), 0);
        world.update(1.0 / 60.0);

        assert_eq!(world.body(held).unwrap().position, Vec3::new(0.0, 5.0, 0.0));
        assert!(world.body(free).unwrap().position.y < 5.0);
    }

    #[test]
    fn test_throw_requires_ball() {
        let mut world = seeded_world();
        let sphere = world.create_sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, 0.5).unwrap();
        let ball = world.create_ball(Vec3::new(2.0, 5.0, 0.0), None).unwrap();

        assert!(matches!(
            world.set_held(sphere, true),
            Err(PhysicsError::NotABall(_))
        ));
        assert!(matches!(
            world.throw_ball(sphere, Vec3::X),
            Err(PhysicsError::NotABall(_))
        ));

        assert!(!world.throw_ball(ball, Vec3::X).unwrap());
        world.set_held(ball, true).unwrap();
        assert!(world.throw_ball(ball, Vec3::X).unwrap());
        assert_eq!(world.body(ball).unwrap().velocity, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_set_world_bounds() {
        let mut world = seeded_world();
        world.set_world_bounds(-1.0, 1.0, 0.0, 2.0, -1.0, 1.0).unwrap();
        assert_eq!(world.bounds(), [-1.0, 1.0, 0.0, 2.0, -1.0, 1.0]);

        assert!(world.set_world_bounds(1.0, -1.0, 0.0, 2.0, -1.0, 1.0).is_err());
        assert_eq!(world.bounds(), [-1.0, 1.0, 0.0, 2.0, -1.0, 1.0]);
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            World::new(WorldConfig::default().with_fixed_time_step(0.0)),
            Err(PhysicsError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            World::new(WorldConfig::default().with_max_substeps(0)),
            Err(PhysicsError::InvalidSubsteps)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let config = WorldConfig::from_json_str(
            r#"{
                "fixed_time_step": 0.01,
                "max_substeps": 8,
                "seed": 9,
                "damping": { "mode": "time_normalized", "reference_dt": 0.0166667 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.fixed_time_step, 0.01);
        assert_eq!(config.max_substeps, 8);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert!(matches!(config.damping, DampingMode::TimeNormalized { .. }));

        assert!(matches!(
            WorldConfig::from_json_str("{ not json"),
            Err(PhysicsError::Config(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "max_substeps": 0 }"#),
            Err(PhysicsError::InvalidSubsteps)
        ));
    }

    #[test]
    fn test_same_seed_same_run() {
        fn run() -> Vec<BallSnapshot> {
            let mut world = World::new(WorldConfig::default().with_seed(1234)).unwrap();
            for i in 0..6 {
                world
                    .create_ball(Vec3::new(0.1 * i as f32, 1.0 + 0.4 * i as f32, 0.0), None)
                    .unwrap();
            }
            for _ in 0..240 {
                world.update(1.0 / 60.0);
            }
            world.list_balls()
        }

        assert_eq!(run(), run());
    }
}
