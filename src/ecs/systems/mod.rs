pub mod ai;
pub mod interaction;
pub mod physics;
pub mod spawn;
pub mod survival;

use glam::Vec2;

use crate::debug::{SystemPhase, SystemTimers};
use crate::ecs::components::Bounds;
use crate::geometry::Arena;

/// Run the fast systems for one fixed tick: sheep physics, then wolf AI
/// against the sheep's freshly rounded position.
pub fn physics_tick(
    world: &mut hecs::World,
    sheep: hecs::Entity,
    arena: Arena,
    rng: &mut fastrand::Rng,
    timers: &mut SystemTimers,
) {
    // 1. Sheep movement integration (intent, friction, fatigue, bounds)
    timers.begin();
    physics::integrate(world, arena);
    timers.end(SystemPhase::Physics);

    // 2. Wolves chase or patrol
    let Ok(target) = world.get::<&Bounds>(sheep).map(|b| Vec2::new(b.0.x as f32, b.0.y as f32))
    else {
        return;
    };
    timers.begin();
    ai::update(world, target, arena, rng);
    timers.end(SystemPhase::Ai);
}
