use glam::Vec2;

use crate::geometry::Rect;

/// Sub-pixel world position (top-left corner) of a mobile entity.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Velocity in pixels per physics tick.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Integer footprint used for drawing and overlap tests.
/// For mobile entities this is `round(Position)` after every tick.
#[derive(Debug, Clone, Copy)]
pub struct Bounds(pub Rect);

/// Which movement directions are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intent {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Unit-per-axis push: each held direction contributes ±1 on its axis.
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// The player's sheep: survival stats plus its per-session movement limits.
#[derive(Debug, Clone, Copy)]
pub struct Avatar {
    pub hunger: u32,
    pub thirst: u32,
    pub fatigue: f32,
    pub alive: bool,
    /// Recomputed every interaction pass.
    pub on_rest: bool,
    pub acceleration: f32,
    pub max_speed: f32,
    pub fatigue_scale: f32,
}

impl Avatar {
    pub fn new(acceleration: f32, max_speed: f32, fatigue_scale: f32) -> Self {
        Self {
            hunger: 0,
            thirst: 0,
            fatigue: 0.0,
            alive: true,
            on_rest: false,
            acceleration,
            max_speed,
            fatigue_scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PredatorState {
    Roaming,
    Chasing,
}

/// Wolf AI state. Wolves have no momentum, so there is no velocity component.
#[derive(Debug, Clone, Copy)]
pub struct Predator {
    pub state: PredatorState,
    pub waypoint: Vec2,
    pub chase_speed: f32,
    pub roam_speed: f32,
    pub detection_radius: f32,
}

/// A consumable patch of grass or puddle of water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Grass(Grass),
    Water(Water),
}

/// Outcome of one consumption event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bite {
    /// Hunger or thirst removed.
    pub amount: u32,
    /// The resource is used up and must be despawned.
    pub depleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grass {
    capacity: u32,
    nutritiousness: u32,
}

impl Grass {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            nutritiousness: capacity / 10,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn nutritiousness(&self) -> u32 {
        self.nutritiousness
    }

    /// Take one bite. While more than one bite's worth remains the sheep gets
    /// `nutritiousness`; otherwise the patch is gone and the bite gives nothing.
    /// Patches too small to have any nutrition go in one bite.
    pub fn get_eaten(&mut self) -> Bite {
        if self.nutritiousness > 0 && self.capacity > self.nutritiousness {
            self.capacity -= self.nutritiousness;
            Bite {
                amount: self.nutritiousness,
                depleted: false,
            }
        } else {
            self.capacity = 0;
            Bite {
                amount: 0,
                depleted: true,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Water {
    volume: u32,
}

impl Water {
    pub fn new(volume: u32) -> Self {
        Self { volume }
    }

    pub fn volume(&self) -> u32 {
        self.volume
    }

    /// Water goes down in one gulp.
    pub fn get_drunk(&mut self) -> Bite {
        let amount = self.volume;
        self.volume = 0;
        Bite {
            amount,
            depleted: true,
        }
    }
}

/// Static patch of ground where the sheep recovers fatigue.
#[derive(Debug, Clone, Copy)]
pub struct RestSpot {
    /// Fatigue removed per interaction pass while overlapping.
    pub rest_power: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_bites_then_depletes() {
        let mut grass = Grass::new(100);
        assert_eq!(grass.nutritiousness(), 10);

        let first = grass.get_eaten();
        assert_eq!(first, Bite { amount: 10, depleted: false });
        assert_eq!(grass.capacity(), 90);

        for _ in 0..8 {
            assert!(!grass.get_eaten().depleted);
        }
        assert_eq!(grass.capacity(), 10);

        let last = grass.get_eaten();
        assert_eq!(last, Bite { amount: 0, depleted: true });
        assert_eq!(grass.capacity(), 0);
    }

    #[test]
    fn tiny_grass_goes_in_one_bite() {
        let mut grass = Grass::new(7);
        assert_eq!(grass.nutritiousness(), 0);
        let bite = grass.get_eaten();
        assert_eq!(bite, Bite { amount: 0, depleted: true });
        assert_eq!(grass.capacity(), 0);
    }

    #[test]
    fn water_is_one_shot() {
        let mut water = Water::new(42);
        let gulp = water.get_drunk();
        assert_eq!(gulp, Bite { amount: 42, depleted: true });
        assert_eq!(water.volume(), 0);
    }

    #[test]
    fn diagonal_intent_composes() {
        let mut intent = Intent::default();
        intent.set(Direction::Up, true);
        intent.set(Direction::Right, true);
        assert_eq!(intent.axis(), Vec2::new(1.0, -1.0));

        intent.set(Direction::Left, true);
        assert_eq!(intent.axis(), Vec2::new(0.0, -1.0));

        intent.set(Direction::Up, false);
        intent.set(Direction::Right, false);
        intent.set(Direction::Left, false);
        assert_eq!(intent.axis(), Vec2::ZERO);
    }
}
