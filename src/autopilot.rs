use glam::Vec2;

use pasture::config::{MAX_FATIGUE, MAX_HUNGER, MAX_THIRST};
use pasture::{Direction, DrawableKind, PredatorState, Rect, Snapshot};

/// Wolves closer than this (centre to centre) make the sheep bolt.
const FLEE_RADIUS: f32 = 260.0;
/// Head for a rest spot once fatigue passes this fraction.
const TIRED: f32 = 0.7;
/// Leave the rest spot once fatigue drops under this fraction.
const RESTED: f32 = 0.1;
/// Axis presses need at least this share of the heading.
const DEADZONE: f32 = 0.35;

fn center(r: &Rect) -> Vec2 {
    Vec2::new(r.x as f32 + r.w as f32 * 0.5, r.y as f32 + r.h as f32 * 0.5)
}

/// Keyboard stand-in: reads a snapshot and holds or releases directions.
/// Only changes are emitted, like key-down/key-up events.
pub struct Autopilot {
    held: [bool; 4],
    resting: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            held: [false; 4],
            resting: false,
        }
    }

    /// Press/release events needed to follow this frame's heading.
    pub fn steer(&mut self, snapshot: &Snapshot) -> Vec<(Direction, bool)> {
        let heading = self.heading(snapshot);
        let want = held_for(heading);

        let mut events = Vec::new();
        for (i, dir) in Direction::ALL.into_iter().enumerate() {
            if self.held[i] != want[i] {
                self.held[i] = want[i];
                events.push((dir, want[i]));
            }
        }
        events
    }

    fn heading(&mut self, snapshot: &Snapshot) -> Vec2 {
        let avatar = &snapshot.avatar;
        if !avatar.alive || snapshot.is_over {
            return Vec2::ZERO;
        }
        let me = center(&avatar.bounds);

        // Run from anything hunting nearby
        let mut flee = Vec2::ZERO;
        for wolf in &snapshot.predators {
            let away = me - center(&wolf.bounds);
            let dist = away.length();
            if wolf.state == PredatorState::Chasing && dist < FLEE_RADIUS && dist > 0.0 {
                flee += away / dist * (1.0 - dist / FLEE_RADIUS);
            }
        }
        if flee.length_squared() > 0.0 {
            self.resting = false;
            return flee.normalize();
        }

        let tiredness = avatar.fatigue / MAX_FATIGUE;
        if tiredness > TIRED {
            self.resting = true;
        } else if tiredness < RESTED {
            self.resting = false;
        }
        if self.resting {
            if avatar.on_rest {
                return Vec2::ZERO;
            }
            if let Some(spot) = nearest(snapshot, me, |k| matches!(k, DrawableKind::RestSpot)) {
                return (spot - me).normalize_or_zero();
            }
        }

        let hungry = avatar.hunger as f32 / MAX_HUNGER as f32;
        let thirsty = avatar.thirst as f32 / MAX_THIRST as f32;
        let is_grass = |k: &DrawableKind| matches!(k, DrawableKind::Grass { .. });
        let is_water = |k: &DrawableKind| matches!(k, DrawableKind::Water { .. });
        let target = if hungry >= thirsty {
            nearest(snapshot, me, is_grass).or_else(|| nearest(snapshot, me, is_water))
        } else {
            nearest(snapshot, me, is_water).or_else(|| nearest(snapshot, me, is_grass))
        };
        target
            .map(|t| (t - me).normalize_or_zero())
            .unwrap_or(Vec2::ZERO)
    }
}

fn nearest(snapshot: &Snapshot, from: Vec2, want: impl Fn(&DrawableKind) -> bool) -> Option<Vec2> {
    snapshot
        .drawables
        .iter()
        .filter(|d| want(&d.kind))
        .map(|d| center(&d.bounds))
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Held flags in `Direction::ALL` order (up, down, left, right).
fn held_for(heading: Vec2) -> [bool; 4] {
    let len = heading.length();
    if len < 1e-3 {
        return [false; 4];
    }
    let h = heading / len;
    [h.y < -DEADZONE, h.y > DEADZONE, h.x < -DEADZONE, h.x > DEADZONE]
}
