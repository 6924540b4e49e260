use crate::config::{MAX_HUNGER, MAX_THIRST};
use crate::ecs::components::Avatar;

/// Slow tick: hunger and thirst each grow by one. Returns true if this tick killed the sheep.
pub fn decay(world: &mut hecs::World) -> bool {
    let mut died = false;
    for (_, avatar) in world.query_mut::<&mut Avatar>() {
        if !avatar.alive {
            continue;
        }
        avatar.hunger = (avatar.hunger + 1).min(MAX_HUNGER);
        avatar.thirst = (avatar.thirst + 1).min(MAX_THIRST);

        if avatar.hunger >= MAX_HUNGER || avatar.thirst >= MAX_THIRST {
            avatar.alive = false;
            died = true;
            log::info!(
                "sheep died of {} (hunger {}, thirst {})",
                if avatar.hunger >= MAX_HUNGER { "hunger" } else { "thirst" },
                avatar.hunger,
                avatar.thirst
            );
        }
    }
    died
}
