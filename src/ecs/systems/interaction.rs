use crate::config::MAX_FATIGUE;
use crate::ecs::components::{Avatar, Bounds, Predator, Resource, RestSpot};
use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// Buffers: pre-allocated, reused each pass
// ---------------------------------------------------------------------------

pub struct InteractionBuffers {
    /// Resources used up this pass, despawned once the query is released.
    depleted: Vec<hecs::Entity>,
}

impl InteractionBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            depleted: Vec::with_capacity(capacity),
        }
    }
}

/// What one interaction pass did to the sheep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// A wolf caught the sheep. Nothing else was resolved.
    pub killed: bool,
    pub on_rest: bool,
    /// Hunger removed by grass.
    pub eaten: u32,
    /// Thirst removed by water.
    pub drunk: u32,
    /// Resources despawned.
    pub depleted: usize,
}

/// Resolve sheep contacts in fixed order: wolves, rest spots, then food and water.
pub fn resolve(
    world: &mut hecs::World,
    sheep: hecs::Entity,
    bufs: &mut InteractionBuffers,
) -> Resolution {
    let mut out = Resolution::default();

    let sheep_rect = match world.query_one_mut::<(&Bounds, &Avatar)>(sheep) {
        Ok((bounds, avatar)) if avatar.alive => bounds.0,
        _ => return out,
    };

    // 1. Wolves override everything else
    let caught = world
        .query_mut::<(&Predator, &Bounds)>()
        .into_iter()
        .any(|(_, (_, bounds))| bounds.0.overlaps(&sheep_rect));
    if caught {
        if let Ok(avatar) = world.query_one_mut::<&mut Avatar>(sheep) {
            avatar.alive = false;
        }
        log::info!("sheep caught by a wolf at {:?}", (sheep_rect.x, sheep_rect.y));
        out.killed = true;
        return out;
    }

    // 2. Rest spots stack
    let mut rest = 0.0;
    for (_, (spot, bounds)) in world.query_mut::<(&RestSpot, &Bounds)>() {
        if bounds.0.overlaps(&sheep_rect) {
            out.on_rest = true;
            rest += spot.rest_power;
        }
    }

    // 3. Grass and water
    bufs.depleted.clear();
    for (entity, (resource, bounds)) in world.query_mut::<(&mut Resource, &Bounds)>() {
        if !bounds.0.overlaps(&sheep_rect) {
            continue;
        }
        let bite = match resource {
            Resource::Grass(grass) => {
                let bite = grass.get_eaten();
                out.eaten += bite.amount;
                bite
            }
            Resource::Water(water) => {
                let gulp = water.get_drunk();
                out.drunk += gulp.amount;
                gulp
            }
        };
        if bite.depleted {
            bufs.depleted.push(entity);
        }
    }

    for entity in bufs.depleted.drain(..) {
        match world.despawn(entity) {
            Ok(()) => out.depleted += 1,
            Err(e) => log::warn!("used-up resource {entity:?} already gone: {e}"),
        }
    }

    if let Ok(avatar) = world.query_one_mut::<&mut Avatar>(sheep) {
        avatar.on_rest = out.on_rest;
        avatar.fatigue = (avatar.fatigue - rest).clamp(0.0, MAX_FATIGUE);
        avatar.hunger = avatar.hunger.saturating_sub(out.eaten);
        avatar.thirst = avatar.thirst.saturating_sub(out.drunk);
    }

    if out.eaten > 0 || out.drunk > 0 {
        log::debug!(
            "sheep ate {} drank {} ({} resources used up)",
            out.eaten,
            out.drunk,
            out.depleted
        );
    }

    out
}

/// Rect of every resource and rest spot, the obstacles new spawns must avoid.
pub fn occupied(world: &hecs::World, out: &mut Vec<Rect>) {
    out.clear();
    out.extend(
        world
            .query::<(&Resource, &Bounds)>()
            .iter()
            .map(|(_, (_, b))| b.0),
    );
    out.extend(
        world
            .query::<(&RestSpot, &Bounds)>()
            .iter()
            .map(|(_, (_, b))| b.0),
    );
}
