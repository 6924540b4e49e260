use glam::Vec2;

use crate::config::{
    BASE_FATIGUE_RATE, FATIGUE_RECOVERY_IDLE, FATIGUE_SLOWDOWN, FRICTION, IDLE_SPEED_RATIO,
    MAX_FATIGUE, MIN_VELOCITY,
};
use crate::ecs::components::{Avatar, Bounds, Intent, Position, Velocity};
use crate::geometry::Arena;

/// Top speed after fatigue: full speed when rested, 40% of it when exhausted.
pub fn effective_max_speed(max_speed: f32, fatigue: f32) -> f32 {
    let tiredness = (fatigue / MAX_FATIGUE).clamp(0.0, 1.0);
    max_speed * (1.0 - FATIGUE_SLOWDOWN * tiredness)
}

/// One fixed physics step for the sheep: intent acceleration, friction,
/// fatigue-limited speed cap, integration, wall clamp, rounding, fatigue.
pub fn integrate(world: &mut hecs::World, arena: Arena) {
    for (_, (pos, vel, bounds, intent, avatar)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Bounds,
        &Intent,
        &mut Avatar,
    )>() {
        if !avatar.alive {
            continue;
        }
        step(pos, vel, bounds, intent, avatar, arena);
    }
}

fn step(
    pos: &mut Position,
    vel: &mut Velocity,
    bounds: &mut Bounds,
    intent: &Intent,
    avatar: &mut Avatar,
    arena: Arena,
) {
    // Held directions push along their axis; diagonals compose.
    vel.0 += intent.axis() * avatar.acceleration;

    vel.0 *= FRICTION;

    let cap = effective_max_speed(avatar.max_speed, avatar.fatigue);
    if vel.0.length() > cap {
        vel.0 = vel.0.normalize_or_zero() * cap;
    }

    // Snap tiny components so the sheep actually stops
    if vel.0.x.abs() < MIN_VELOCITY {
        vel.0.x = 0.0;
    }
    if vel.0.y.abs() < MIN_VELOCITY {
        vel.0.y = 0.0;
    }

    pos.0 += vel.0;

    // Walls are fully inelastic on the axis that hits them
    let max = Vec2::new(
        arena.max_x(bounds.0.w) as f32,
        arena.max_y(bounds.0.h) as f32,
    );
    if pos.0.x < 0.0 || pos.0.x > max.x {
        pos.0.x = pos.0.x.clamp(0.0, max.x);
        vel.0.x = 0.0;
    }
    if pos.0.y < 0.0 || pos.0.y > max.y {
        pos.0.y = pos.0.y.clamp(0.0, max.y);
        vel.0.y = 0.0;
    }

    bounds.0.x = pos.0.x.round() as i32;
    bounds.0.y = pos.0.y.round() as i32;

    let speed_ratio = vel.0.length() / avatar.max_speed;
    if speed_ratio > IDLE_SPEED_RATIO {
        avatar.fatigue += BASE_FATIGUE_RATE * speed_ratio * avatar.fatigue_scale;
    } else {
        avatar.fatigue -= FATIGUE_RECOVERY_IDLE * avatar.fatigue_scale;
    }
    avatar.fatigue = avatar.fatigue.clamp(0.0, MAX_FATIGUE);
}
