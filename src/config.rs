use std::time::Duration;

use crate::geometry::Arena;

/// Arena size in pixels.
pub const ARENA: Arena = Arena::new(1200, 800);

/// Hunger at which the sheep starves.
pub const MAX_HUNGER: u32 = 10;
/// Thirst at which the sheep dies of thirst.
pub const MAX_THIRST: u32 = 50;
/// Fatigue ceiling. Top speed is lowest here.
pub const MAX_FATIGUE: f32 = 100.0;

/// Sheep footprint in pixels.
pub const AVATAR_WIDTH: i32 = 50;
pub const AVATAR_HEIGHT: i32 = 40;
/// Wolf footprint in pixels.
pub const PREDATOR_SIZE: i32 = 36;

/// Velocity multiplier applied every physics tick.
pub const FRICTION: f32 = 0.85;
/// Velocity components below this snap to zero.
pub const MIN_VELOCITY: f32 = 0.1;
/// Fraction of top speed lost at full fatigue.
pub const FATIGUE_SLOWDOWN: f32 = 0.60;
/// Fatigue gained per tick at full speed.
pub const BASE_FATIGUE_RATE: f32 = 0.15;
/// Fatigue recovered per tick while standing (near) still.
pub const FATIGUE_RECOVERY_IDLE: f32 = 0.1;
/// Below this fraction of top speed the sheep counts as idle.
pub const IDLE_SPEED_RATIO: f32 = 0.1;

/// Chasing wolves give up beyond `detection_radius * CHASE_HYSTERESIS`.
pub const CHASE_HYSTERESIS: f32 = 1.4;

/// Placement attempts per rest spot before the slot is skipped.
pub const REST_SPOT_ATTEMPTS: u32 = 20;

/// Physics + AI tick period.
pub const PHYSICS_PERIOD: Duration = Duration::from_millis(16);
/// Hunger/thirst decay period.
pub const SURVIVAL_PERIOD: Duration = Duration::from_millis(1000);
/// Base spawn period, stretched by difficulty.
pub const SPAWN_BASE_PERIOD: Duration = Duration::from_millis(1000);

/// Session difficulty, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Out-of-range values are clamped, never rejected.
    pub fn new(level: i32) -> Self {
        Self(level.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Shrink factor for resource and rest-spot sizes/values: 1.0 at level 1, 0.55 at level 10.
    pub fn resource_scale(self) -> f32 {
        // 1 - (d - 1) * 0.05, kept as a single division so ⌊60 * 0.55⌋ stays 33.
        (21.0 - self.0 as f32) / 20.0
    }

    /// Multiplier on fatigue gain and idle recovery.
    pub fn fatigue_scale(self) -> f32 {
        1.0 + (self.0 as f32 - 1.0) * 0.06
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(5)
    }
}

/// Every difficulty-scaled constant, computed once per session.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub difficulty: Difficulty,

    // Sheep
    pub acceleration: f32,
    pub max_speed: f32,
    pub fatigue_scale: f32,

    // Wolves
    pub predator_count: usize,
    pub chase_speed: f32,
    pub roam_speed: f32,
    pub detection_radius: f32,

    // Grass and water
    pub initial_resources: usize,
    pub resource_min_size: i32,
    pub resource_size_range: i32,
    pub resource_value_range: u32,

    // Rest spots
    pub rest_spot_count: usize,
    pub rest_min_size: i32,
    pub rest_size_range: i32,
    pub rest_power: f32,

    // Timers
    pub spawn_period: Duration,
}

impl Tuning {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let d = difficulty.level();
        let df = d as f32;
        let scale = difficulty.resource_scale();

        Self {
            difficulty,

            acceleration: 1.2,
            max_speed: 6.0 * (1.0 - (df - 1.0) * 0.03),
            fatigue_scale: difficulty.fatigue_scale(),

            predator_count: ((d as usize).saturating_sub(1)) / 2,
            chase_speed: 2.0 + df * 0.25,
            roam_speed: 0.8 + df * 0.15,
            detection_radius: 150.0 + df * 25.0,

            initial_resources: 11 - d as usize,
            resource_min_size: ((20.0 * scale) as i32).max(5),
            resource_size_range: ((70.0 * scale) as i32).max(10),
            resource_value_range: ((300.0 * scale) as u32).max(1),

            rest_spot_count: (4 - d as i32 / 3).max(1) as usize,
            rest_min_size: ((60.0 * scale) as i32).max(30),
            rest_size_range: ((40.0 * scale) as i32).max(20),
            rest_power: 2.0 * scale,

            spawn_period: SPAWN_BASE_PERIOD * (d as u32 / 2 + 1),
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_is_clamped() {
        assert_eq!(Difficulty::new(-3).level(), 1);
        assert_eq!(Difficulty::new(0).level(), 1);
        assert_eq!(Difficulty::new(7).level(), 7);
        assert_eq!(Difficulty::new(42).level(), 10);
    }

    #[test]
    fn easiest_preset() {
        let t = Tuning::for_difficulty(Difficulty::new(1));
        assert_eq!(t.predator_count, 0);
        assert_eq!(t.initial_resources, 10);
        assert_eq!(t.rest_spot_count, 4);
        assert_eq!(t.resource_min_size, 20);
        assert_eq!(t.resource_size_range, 70);
        assert_eq!(t.resource_value_range, 300);
        assert_eq!(t.spawn_period, Duration::from_millis(1000));
        assert!((t.fatigue_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hardest_preset() {
        let t = Tuning::for_difficulty(Difficulty::new(10));
        assert_eq!(t.predator_count, 4);
        assert_eq!(t.initial_resources, 1);
        assert_eq!(t.rest_spot_count, 1);
        assert_eq!(t.rest_min_size, 33);
        assert_eq!(t.rest_size_range, 22);
        assert_eq!(t.spawn_period, Duration::from_millis(6000));
        assert!((t.detection_radius - 400.0).abs() < 1e-4);
        assert!((t.fatigue_scale - 1.54).abs() < 1e-4);
    }

    #[test]
    fn sizes_and_values_never_reach_zero() {
        for level in 1..=10 {
            let t = Tuning::for_difficulty(Difficulty::new(level));
            assert!(t.resource_min_size > 0);
            assert!(t.resource_size_range > 0);
            assert!(t.resource_value_range > 0);
            assert!(t.rest_min_size > 0);
            assert!(t.rest_power > 0.0);
        }
    }

    #[test]
    fn acceleration_can_reach_top_speed_through_friction() {
        for level in 1..=10 {
            let t = Tuning::for_difficulty(Difficulty::new(level));
            let terminal = t.acceleration * FRICTION / (1.0 - FRICTION);
            assert!(terminal >= t.max_speed, "level {level} can never reach top speed");
        }
    }
}
