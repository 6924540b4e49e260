use glam::Vec2;

use crate::config::{Tuning, AVATAR_HEIGHT, AVATAR_WIDTH, PREDATOR_SIZE, REST_SPOT_ATTEMPTS};
use crate::ecs::components::*;
use crate::ecs::systems::{ai, interaction};
use crate::geometry::{Arena, Rect};

/// Spawn the sheep in the middle of the arena.
pub fn spawn_avatar(world: &mut hecs::World, tuning: &Tuning, arena: Arena) -> hecs::Entity {
    let x = (arena.width - AVATAR_WIDTH) / 2;
    let y = (arena.height - AVATAR_HEIGHT) / 2;
    world.spawn((
        Position(Vec2::new(x as f32, y as f32)),
        Velocity(Vec2::ZERO),
        Bounds(Rect::new(x, y, AVATAR_WIDTH, AVATAR_HEIGHT)),
        Intent::default(),
        Avatar::new(tuning.acceleration, tuning.max_speed, tuning.fatigue_scale),
    ))
}

/// Spawn the session's wolves, each on a random arena edge.
pub fn spawn_predators(
    world: &mut hecs::World,
    rng: &mut fastrand::Rng,
    tuning: &Tuning,
    arena: Arena,
) -> Vec<hecs::Entity> {
    (0..tuning.predator_count)
        .map(|_| {
            let pos = ai::edge_spawn(arena, rng);
            world.spawn((
                Position(pos),
                Bounds(Rect::new(
                    pos.x.round() as i32,
                    pos.y.round() as i32,
                    PREDATOR_SIZE,
                    PREDATOR_SIZE,
                )),
                Predator {
                    state: PredatorState::Roaming,
                    waypoint: ai::random_waypoint(arena, rng),
                    chase_speed: tuning.chase_speed,
                    roam_speed: tuning.roam_speed,
                    detection_radius: tuning.detection_radius,
                },
            ))
        })
        .collect()
}

/// Roll a random grass patch or puddle with a difficulty-scaled size and value,
/// placed uniformly inside the arena.
pub fn roll_resource(rng: &mut fastrand::Rng, tuning: &Tuning, arena: Arena) -> (Resource, Rect) {
    let is_grass = rng.bool();
    let w = rng.i32(0..tuning.resource_size_range) + tuning.resource_min_size;
    let h = rng.i32(0..tuning.resource_size_range) + tuning.resource_min_size;
    let x = rng.i32(0..=arena.max_x(w));
    let y = rng.i32(0..=arena.max_y(h));
    let value = 1 + rng.u32(0..tuning.resource_value_range);

    let resource = if is_grass {
        Resource::Grass(Grass::new(value))
    } else {
        Resource::Water(Water::new(value))
    };
    (resource, Rect::new(x, y, w, h))
}

/// Single-shot spawn: a candidate that lands on anything in `occupied` is
/// thrown away and nothing is retried.
pub fn try_spawn_resource(
    occupied: &[Rect],
    rng: &mut fastrand::Rng,
    tuning: &Tuning,
    arena: Arena,
) -> Option<(Resource, Rect)> {
    let (resource, rect) = roll_resource(rng, tuning, arena);
    if occupied.iter().any(|o| o.overlaps(&rect)) {
        log::trace!("spawn candidate at {:?} overlaps, discarded", (rect.x, rect.y));
        return None;
    }
    Some((resource, rect))
}

/// Try once to add a resource to the world, avoiding resources and rest spots.
/// `scratch` is reused between calls to collect obstacle rects.
pub fn spawn_resource(
    world: &mut hecs::World,
    rng: &mut fastrand::Rng,
    tuning: &Tuning,
    arena: Arena,
    scratch: &mut Vec<Rect>,
) -> Option<hecs::Entity> {
    interaction::occupied(world, scratch);
    let (resource, rect) = try_spawn_resource(scratch, rng, tuning, arena)?;
    log::debug!("spawned {resource:?} at {:?}", (rect.x, rect.y));
    Some(world.spawn((resource, Bounds(rect))))
}

/// Place up to `tuning.rest_spot_count` rest spots. Each slot gets a capped
/// number of placement attempts; a slot that never fits is skipped.
pub fn place_rest_spots(
    world: &mut hecs::World,
    rng: &mut fastrand::Rng,
    tuning: &Tuning,
    arena: Arena,
) -> Vec<hecs::Entity> {
    let mut occupied = Vec::new();
    let mut placed = Vec::with_capacity(tuning.rest_spot_count);

    for slot in 0..tuning.rest_spot_count {
        interaction::occupied(world, &mut occupied);
        let found = (0..REST_SPOT_ATTEMPTS).find_map(|_| {
            let w = tuning.rest_min_size + rng.i32(0..tuning.rest_size_range);
            let h = tuning.rest_min_size + rng.i32(0..tuning.rest_size_range);
            let x = rng.i32(0..arena.max_x(w).max(1));
            let y = rng.i32(0..arena.max_y(h).max(1));
            let rect = Rect::new(x, y, w, h);
            (!occupied.iter().any(|o| o.overlaps(&rect))).then_some(rect)
        });

        match found {
            Some(rect) => placed.push(world.spawn((
                RestSpot {
                    rest_power: tuning.rest_power,
                },
                Bounds(rect),
            ))),
            None => log::debug!("rest spot slot {slot} skipped after {REST_SPOT_ATTEMPTS} attempts"),
        }
    }

    placed
}
