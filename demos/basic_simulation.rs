//! Basic simulation example
//!
//! Drops a ball into the room, then drives a small sandbox through console
//! commands: summon a handful of balls, pick one up, throw it, and report.
//!
//! Run with `RUST_LOG=debug` to see spawn/hold/throw events.

use ballroom::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Ballroom - Basic Simulation Example");
    println!("===================================\n");

    let mut world = World::new(WorldConfig::default().with_seed(2024))?;
    let ball = world.create_ball(Vec3::new(0.0, 5.0, 0.0), Some(Vec3::new(1.0, 0.4, 0.2)))?;
    println!("Created ball at Y=5.0 (radius=0.25) in room {:?}\n", world.bounds());

    let dt = 1.0 / 60.0;
    let total_time = 3.0;
    let steps = (total_time / dt) as usize;

    println!("Simulating {} seconds ({} steps at {}Hz)...\n", total_time, steps, 1.0 / dt);

    for i in 0..steps {
        world.update(dt);

        if i % 30 == 0 {
            if let Some(body) = world.body(ball) {
                println!("t={:.2}s: {}", i as f32 * dt, body);
            }
        }
    }

    let final_pos = world.body(ball).map(|b| b.position).unwrap_or(Vec3::ZERO);
    println!("\nFinal ball position: {}", final_pos);
    println!("Expected resting position: ~(0, 0.25, 0) (floor at 0 + ball radius 0.25)\n");

    let mut sandbox = Sandbox::new(world);
    let mut console = Console::new();
    sandbox.set_view(Vec3::new(0.0, 0.5, 1.0), Vec3::FORWARD);

    for line in ["summon 5", "physics_info"] {
        for out in console.execute(&mut sandbox, line) {
            println!("{}", out);
        }
    }

    match sandbox.toggle_hold()? {
        HandAction::PickedUp(handle) => {
            println!("\nPicked up {:?}", handle);
            for _ in 0..10 {
                sandbox.frame(dt)?;
            }
            if let Some(thrown) = sandbox.throw()? {
                sandbox.frame(dt)?;
                if let Some(body) = sandbox.world().body(thrown) {
                    println!("Threw it: {}", body);
                }
            }
        }
        _ => println!("\nNothing within reach to pick up"),
    }

    for _ in 0..120 {
        sandbox.frame(dt)?;
    }

    println!();
    for snapshot in sandbox.world().list_balls() {
        println!(
            "ball {:>2} at {} color {}",
            snapshot.id, snapshot.position, snapshot.color
        );
    }

    Ok(())
}
