use std::time::Duration;

use crate::config::{self, Difficulty, Tuning, PHYSICS_PERIOD, SURVIVAL_PERIOD};
use crate::debug::{SystemPhase, SystemTimers};
use crate::ecs::components::{
    Avatar, Bounds, Direction, Intent, Position, Predator, Resource, RestSpot, Velocity,
};
use crate::ecs::systems::interaction::{self, InteractionBuffers};
use crate::ecs::systems::{self, spawn, survival};
use crate::geometry::{Arena, Rect};
use crate::schedule::{Schedule, TickKind};
use crate::snapshot::{AvatarView, Drawable, DrawableKind, Observer, PredatorView, Snapshot};

/// Pre-sized for the largest resource count a session realistically reaches.
const INTERACTION_CAPACITY: usize = 64;

/// One game: owns every entity, the three tick timers and the observers.
pub struct Session {
    world: hecs::World,
    sheep: hecs::Entity,
    tuning: Tuning,
    arena: Arena,

    // RNG (deterministic per seed)
    rng: fastrand::Rng,

    schedule: Schedule,
    observers: Vec<Box<dyn Observer>>,

    // Scratch buffers reused every tick
    interaction_bufs: InteractionBuffers,
    spawn_scratch: Vec<Rect>,

    timers: SystemTimers,
    tick_count: u64,
}

impl Session {
    /// Start a session with a random seed. `difficulty` is clamped to `1..=10`.
    pub fn new(difficulty: i32) -> Self {
        Self::with_rng(difficulty, fastrand::Rng::new())
    }

    /// Start a reproducible session.
    pub fn with_seed(difficulty: i32, seed: u64) -> Self {
        Self::with_rng(difficulty, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(difficulty: i32, mut rng: fastrand::Rng) -> Self {
        let difficulty = Difficulty::new(difficulty);
        let tuning = Tuning::for_difficulty(difficulty);
        let arena = config::ARENA;
        let mut world = hecs::World::new();
        let mut spawn_scratch = Vec::new();

        let sheep = spawn::spawn_avatar(&mut world, &tuning, arena);
        // Easier games start with more food and water
        for _ in 0..tuning.initial_resources {
            spawn::spawn_resource(&mut world, &mut rng, &tuning, arena, &mut spawn_scratch);
        }
        let wolves = spawn::spawn_predators(&mut world, &mut rng, &tuning, arena);
        let rest_spots = spawn::place_rest_spots(&mut world, &mut rng, &tuning, arena);

        log::info!(
            "session started: difficulty {}, {} resources, {} wolves, {} rest spots",
            difficulty.level(),
            world.query::<&Resource>().iter().count(),
            wolves.len(),
            rest_spots.len(),
        );

        let schedule = Schedule::new(PHYSICS_PERIOD, SURVIVAL_PERIOD, tuning.spawn_period);

        Self {
            world,
            sheep,
            tuning,
            arena,
            rng,
            schedule,
            observers: Vec::new(),
            interaction_bufs: InteractionBuffers::new(INTERACTION_CAPACITY),
            spawn_scratch,
            timers: SystemTimers::new(),
            tick_count: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.tuning.difficulty
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    /// Simulated time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.schedule.now()
    }

    /// Ticks of any kind run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn avatar(&self) -> Avatar {
        self.world
            .get::<&Avatar>(self.sheep)
            .map(|a| *a)
            .unwrap_or_else(|_| Avatar {
                alive: false,
                ..Avatar::new(0.0, 0.0, 0.0)
            })
    }

    fn alive(&self) -> bool {
        self.world
            .get::<&Avatar>(self.sheep)
            .map(|a| a.alive)
            .unwrap_or(false)
    }

    fn ticking(&self) -> bool {
        self.schedule.is_running() && self.alive()
    }

    /// True once the sheep is dead or the session was stopped. The first time
    /// it sees a dead sheep it also halts the timers.
    pub fn is_over(&mut self) -> bool {
        if !self.alive() {
            if self.schedule.halt() {
                log::info!(
                    "game over after {:.1}s ({} ticks)",
                    self.elapsed().as_secs_f32(),
                    self.tick_count
                );
            }
            return true;
        }
        !self.schedule.is_running()
    }

    /// Halt all ticking for good. Returns false if the session was already stopped.
    pub fn stop(&mut self) -> bool {
        let stopped = self.schedule.halt();
        if stopped {
            log::info!("session stopped at {:.1}s", self.elapsed().as_secs_f32());
        }
        stopped
    }

    /// A direction started or stopped being held.
    pub fn handle_intent(&mut self, direction: Direction, pressed: bool) {
        if !self.ticking() {
            return;
        }
        if let Ok(mut intent) = self.world.get::<&mut Intent>(self.sheep) {
            intent.set(direction, pressed);
        }
    }

    /// Register an observer. It sees the current state straight away.
    pub fn add_observer(&mut self, mut observer: Box<dyn Observer>) {
        observer.on_update(&self.snapshot());
        self.observers.push(observer);
    }

    /// Feed simulated time in and run every tick that falls due, in order.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.schedule.advance(elapsed);
        let mut ran = 0;
        while let Some(kind) = self.schedule.pop_due() {
            self.run_tick(kind);
            ran += 1;
            if self.is_over() {
                break;
            }
        }
        ran
    }

    /// Run one physics + AI tick now, outside the clock.
    pub fn advance_physics(&mut self) -> bool {
        self.run_tick(TickKind::Physics)
    }

    /// Run one hunger/thirst decay tick now, outside the clock.
    pub fn advance_survival(&mut self) -> bool {
        self.run_tick(TickKind::Survival)
    }

    /// Run one spawn attempt now, outside the clock.
    pub fn advance_spawn(&mut self) -> bool {
        self.run_tick(TickKind::Spawn)
    }

    /// Returns false without doing anything once the session is over.
    fn run_tick(&mut self, kind: TickKind) -> bool {
        if !self.ticking() {
            return false;
        }

        match kind {
            TickKind::Physics => systems::physics_tick(
                &mut self.world,
                self.sheep,
                self.arena,
                &mut self.rng,
                &mut self.timers,
            ),
            TickKind::Survival => {
                self.timers.begin();
                survival::decay(&mut self.world);
                self.timers.end(SystemPhase::Survival);
            }
            TickKind::Spawn => {
                self.timers.begin();
                spawn::spawn_resource(
                    &mut self.world,
                    &mut self.rng,
                    &self.tuning,
                    self.arena,
                    &mut self.spawn_scratch,
                );
                self.timers.end(SystemPhase::Spawn);
            }
        }
        self.tick_count += 1;

        self.resolve();
        self.notify();
        true
    }

    fn resolve(&mut self) {
        self.timers.begin();
        interaction::resolve(&mut self.world, self.sheep, &mut self.interaction_bufs);
        self.timers.end(SystemPhase::Interaction);
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        self.timers.begin();
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_update(&snapshot);
        }
        self.timers.end(SystemPhase::Notify);
    }

    /// Copy of the drawable world and the sheep's stats.
    pub fn snapshot(&self) -> Snapshot {
        let mut drawables = Vec::new();

        for (_, (_, bounds)) in self.world.query::<(&RestSpot, &Bounds)>().iter() {
            drawables.push(Drawable {
                kind: DrawableKind::RestSpot,
                bounds: bounds.0,
            });
        }
        for (_, (resource, bounds)) in self.world.query::<(&Resource, &Bounds)>().iter() {
            let kind = match resource {
                Resource::Grass(g) => DrawableKind::Grass {
                    capacity: g.capacity(),
                },
                Resource::Water(w) => DrawableKind::Water { volume: w.volume() },
            };
            drawables.push(Drawable {
                kind,
                bounds: bounds.0,
            });
        }

        let mut predators = Vec::new();
        for (_, (predator, pos, bounds)) in self
            .world
            .query::<(&Predator, &Position, &Bounds)>()
            .iter()
        {
            drawables.push(Drawable {
                kind: DrawableKind::Predator {
                    state: predator.state,
                },
                bounds: bounds.0,
            });
            predators.push(PredatorView {
                position: pos.0,
                bounds: bounds.0,
                state: predator.state,
            });
        }

        let avatar = self.avatar_view();
        drawables.push(Drawable {
            kind: DrawableKind::Avatar,
            bounds: avatar.bounds,
        });

        Snapshot {
            drawables,
            avatar,
            predators,
            is_over: !self.ticking(),
        }
    }

    fn avatar_view(&self) -> AvatarView {
        let avatar = self.avatar();
        let bounds = self
            .world
            .get::<&Bounds>(self.sheep)
            .map(|b| b.0)
            .unwrap_or(Rect::new(0, 0, 0, 0));
        let velocity = self
            .world
            .get::<&Velocity>(self.sheep)
            .map(|v| v.0)
            .unwrap_or_default();
        AvatarView {
            bounds,
            velocity,
            hunger: avatar.hunger,
            thirst: avatar.thirst,
            fatigue: avatar.fatigue,
            on_rest: avatar.on_rest,
            alive: avatar.alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_HUNGER, PREDATOR_SIZE};
    use crate::ecs::components::{Grass, PredatorState};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Difficulty 1 has no wolves; clear out food so nothing interferes.
    fn quiet_session(seed: u64) -> Session {
        let mut s = Session::with_seed(1, seed);
        let food: Vec<hecs::Entity> = s.world.query::<&Resource>().iter().map(|(e, _)| e).collect();
        for e in food {
            s.world.despawn(e).unwrap();
        }
        let spots: Vec<hecs::Entity> = s.world.query::<&RestSpot>().iter().map(|(e, _)| e).collect();
        for e in spots {
            s.world.despawn(e).unwrap();
        }
        s
    }

    fn recorder(s: &mut Session) -> Rc<RefCell<Vec<Snapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        s.add_observer(Box::new(move |snap: &Snapshot| sink.borrow_mut().push(snap.clone())));
        seen
    }

    fn sheep_rect(s: &Session) -> Rect {
        s.world.get::<&Bounds>(s.sheep).unwrap().0
    }

    #[test]
    fn difficulty_out_of_range_is_clamped() {
        assert_eq!(Session::with_seed(0, 1).difficulty().level(), 1);
        assert_eq!(Session::with_seed(99, 1).difficulty().level(), 10);
    }

    #[test]
    fn starting_population_follows_difficulty() {
        let s = Session::with_seed(9, 42);
        let wolves = s.world.query::<&Predator>().iter().count();
        assert_eq!(wolves, 4);
        let resources = s.world.query::<&Resource>().iter().count();
        assert!(resources <= 2);
        let spots = s.world.query::<&RestSpot>().iter().count();
        assert_eq!(spots, 1);
    }

    #[test]
    fn one_survival_tick_from_nine_hunger_ends_the_game() {
        let mut s = quiet_session(1);
        s.world.get::<&mut Avatar>(s.sheep).unwrap().hunger = MAX_HUNGER - 1;

        assert!(s.advance_survival());
        assert_eq!(s.avatar().hunger, MAX_HUNGER);
        assert!(s.is_over());
    }

    #[test]
    fn is_over_is_idempotent() {
        let mut s = quiet_session(2);
        s.world.get::<&mut Avatar>(s.sheep).unwrap().hunger = MAX_HUNGER - 1;
        s.advance_survival();

        assert!(s.is_over());
        assert!(s.is_over());
        assert!(s.is_over());
        // Already halted by the first is_over
        assert!(!s.stop());

        let before = s.elapsed();
        assert_eq!(s.advance(Duration::from_secs(5)), 0);
        assert_eq!(s.elapsed(), before);
        assert!(!s.advance_physics());
    }

    #[test]
    fn clock_driven_starvation() {
        let mut s = quiet_session(3);
        let mut frames = 0;
        while !s.is_over() && frames < 1000 {
            s.advance(Duration::from_millis(100));
            frames += 1;
        }
        assert!(s.is_over());
        // Unless a spawn landed on the sheep, hunger runs out at exactly 10s
        assert!(s.elapsed() >= Duration::from_secs(10));
        assert!(!s.avatar().alive);
    }

    #[test]
    fn explicit_stop_halts_ticking() {
        let mut s = quiet_session(4);
        let seen = recorder(&mut s);
        assert!(s.stop());
        assert!(!s.stop());
        assert!(s.is_over());
        assert_eq!(s.advance(Duration::from_secs(2)), 0);
        assert_eq!(seen.borrow().len(), 1);
        assert!(s.avatar().alive);
    }

    #[test]
    fn holding_right_moves_the_sheep() {
        let mut s = quiet_session(5);
        let start = sheep_rect(&s);
        s.handle_intent(Direction::Right, true);
        for _ in 0..30 {
            s.advance_physics();
        }
        let moved = sheep_rect(&s);
        assert!(moved.x > start.x + 50);
        assert_eq!(moved.y, start.y);

        s.handle_intent(Direction::Right, false);
        for _ in 0..60 {
            s.advance_physics();
        }
        assert_eq!(s.snapshot().avatar.velocity, Vec2::ZERO);
    }

    #[test]
    fn wolf_contact_ends_the_game() {
        let mut s = quiet_session(6);
        let r = sheep_rect(&s);
        s.world.spawn((
            Position(Vec2::new(r.x as f32, r.y as f32)),
            Bounds(Rect::new(r.x, r.y, PREDATOR_SIZE, PREDATOR_SIZE)),
            Predator {
                state: PredatorState::Roaming,
                waypoint: Vec2::ZERO,
                chase_speed: 3.0,
                roam_speed: 1.0,
                detection_radius: 200.0,
            },
        ));
        let seen = recorder(&mut s);

        s.advance_physics();
        assert!(s.is_over());
        let last = seen.borrow().last().cloned().unwrap();
        assert!(last.is_over);
        assert!(!last.avatar.alive);
        assert_eq!(last.predators[0].state, PredatorState::Chasing);
    }

    #[test]
    fn grazing_through_the_session() {
        let mut s = quiet_session(7);
        let r = sheep_rect(&s);
        s.world.get::<&mut Avatar>(s.sheep).unwrap().hunger = 8;
        let grass = s
            .world
            .spawn((Resource::Grass(Grass::new(100)), Bounds(Rect::new(r.x, r.y, 20, 20))));

        s.advance_physics();
        assert_eq!(s.avatar().hunger, 0);
        for _ in 0..8 {
            s.advance_physics();
        }
        assert!(s.world.contains(grass));

        // The bite that empties the patch feeds nothing
        s.world.get::<&mut Avatar>(s.sheep).unwrap().hunger = 6;
        s.advance_physics();
        assert_eq!(s.avatar().hunger, 6);
        assert!(!s.world.contains(grass));
        assert_eq!(s.snapshot().resource_count(), 0);
    }

    #[test]
    fn grass_too_small_to_feed_is_cleared_on_contact() {
        let mut s = quiet_session(13);
        let r = sheep_rect(&s);
        s.world.get::<&mut Avatar>(s.sheep).unwrap().hunger = 3;
        let grass = s
            .world
            .spawn((Resource::Grass(Grass::new(7)), Bounds(Rect::new(r.x, r.y, 20, 20))));

        s.advance_physics();
        assert!(!s.world.contains(grass));
        assert_eq!(s.avatar().hunger, 3);

        // The spot is free for new spawns again
        let mut occupied = Vec::new();
        interaction::occupied(&s.world, &mut occupied);
        assert!(occupied.is_empty());
    }

    #[test]
    fn observers_see_every_pass_in_draw_order() {
        let mut s = Session::with_seed(7, 8);
        let seen = recorder(&mut s);
        assert_eq!(seen.borrow().len(), 1);

        s.advance(Duration::from_millis(16 * 5));
        assert_eq!(seen.borrow().len(), 1 + 5);

        let rank = |k: &DrawableKind| match k {
            DrawableKind::RestSpot => 0,
            DrawableKind::Grass { .. } | DrawableKind::Water { .. } => 1,
            DrawableKind::Predator { .. } => 2,
            DrawableKind::Avatar => 3,
        };
        let snap = seen.borrow().last().cloned().unwrap();
        let ranks: Vec<i32> = snap.drawables.iter().map(|d| rank(&d.kind)).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "bad order {ranks:?}");
        assert_eq!(*ranks.last().unwrap(), 3);
        assert_eq!(snap.predators.len(), s.tuning().predator_count);
    }

    #[test]
    fn spawn_tick_adds_at_most_one_resource() {
        let mut s = quiet_session(9);
        // Park the sheep in a corner so it cannot eat what spawns.
        s.world.get::<&mut Bounds>(s.sheep).unwrap().0 = Rect::new(0, 0, 50, 40);
        for _ in 0..20 {
            let before = s.snapshot().resource_count();
            s.advance_spawn();
            let after = s.snapshot().resource_count();
            assert!(after == before || after == before + 1);
        }
    }

    #[test]
    fn sheep_stays_in_arena_while_wolves_hunt() {
        let mut s = Session::with_seed(10, 11);
        let mut rng = fastrand::Rng::with_seed(12);
        let arena = s.arena();
        let mut frame = 0;
        while !s.is_over() && frame < 3000 {
            if frame % 20 == 0 {
                for dir in Direction::ALL {
                    s.handle_intent(dir, rng.bool());
                }
            }
            s.advance(Duration::from_millis(16));
            let r = s.snapshot().avatar.bounds;
            assert!(r.x >= 0 && r.x <= arena.max_x(r.w));
            assert!(r.y >= 0 && r.y <= arena.max_y(r.h));
            frame += 1;
        }
    }
}
