use glam::Vec2;

use crate::config::{CHASE_HYSTERESIS, PREDATOR_SIZE};
use crate::ecs::components::{Bounds, Predator, PredatorState, Position};
use crate::geometry::Arena;

/// Advance every wolf one AI tick toward its current target.
/// `sheep` is the sheep's integer top-left corner.
pub fn update(world: &mut hecs::World, sheep: Vec2, arena: Arena, rng: &mut fastrand::Rng) {
    for (entity, (predator, pos, bounds)) in
        world.query_mut::<(&mut Predator, &mut Position, &mut Bounds)>()
    {
        let before = predator.state;
        think(predator, pos, sheep, arena, rng);
        if predator.state != before {
            log::debug!("wolf {entity:?}: {before:?} -> {:?}", predator.state);
        }

        bounds.0.x = pos.0.x.round() as i32;
        bounds.0.y = pos.0.y.round() as i32;
    }
}

/// State transition plus one step of motion for a single wolf.
pub fn think(
    predator: &mut Predator,
    pos: &mut Position,
    sheep: Vec2,
    arena: Arena,
    rng: &mut fastrand::Rng,
) {
    let dist_to_sheep = pos.0.distance(sheep);

    // Hysteresis band keeps wolves from flickering at the edge of the radius
    match predator.state {
        PredatorState::Roaming if dist_to_sheep < predator.detection_radius => {
            predator.state = PredatorState::Chasing;
        }
        PredatorState::Chasing
            if dist_to_sheep > predator.detection_radius * CHASE_HYSTERESIS =>
        {
            predator.state = PredatorState::Roaming;
            predator.waypoint = random_waypoint(arena, rng);
        }
        _ => {}
    }

    let (target, speed) = match predator.state {
        PredatorState::Chasing => (sheep, predator.chase_speed),
        PredatorState::Roaming => {
            let target = predator.waypoint;
            if pos.0.distance(predator.waypoint) < predator.roam_speed * 2.0 {
                predator.waypoint = random_waypoint(arena, rng);
            }
            (target, predator.roam_speed)
        }
    };

    let to_target = target - pos.0;
    if to_target.length_squared() > 0.0 {
        pos.0 += to_target.normalize() * speed;
    }

    // Hard clamp, no bounce
    pos.0.x = pos.0.x.clamp(0.0, arena.max_x(PREDATOR_SIZE) as f32);
    pos.0.y = pos.0.y.clamp(0.0, arena.max_y(PREDATOR_SIZE) as f32);
}

/// Uniform point that keeps the whole wolf inside the arena.
pub fn random_waypoint(arena: Arena, rng: &mut fastrand::Rng) -> Vec2 {
    Vec2::new(
        rng.i32(0..arena.max_x(PREDATOR_SIZE).max(1)) as f32,
        rng.i32(0..arena.max_y(PREDATOR_SIZE).max(1)) as f32,
    )
}

/// Uniform point on a uniformly chosen arena edge.
pub fn edge_spawn(arena: Arena, rng: &mut fastrand::Rng) -> Vec2 {
    let max_x = arena.max_x(PREDATOR_SIZE) as f32;
    let max_y = arena.max_y(PREDATOR_SIZE) as f32;
    match rng.u8(0..4) {
        0 => Vec2::new(rng.f32() * max_x, 0.0),
        1 => Vec2::new(rng.f32() * max_x, max_y),
        2 => Vec2::new(0.0, rng.f32() * max_y),
        _ => Vec2::new(max_x, rng.f32() * max_y),
    }
}
