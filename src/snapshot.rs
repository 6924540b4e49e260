use glam::Vec2;

use crate::ecs::components::PredatorState;
use crate::geometry::Rect;

/// What a drawable is, with the bits a renderer needs to pick a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawableKind {
    RestSpot,
    Grass { capacity: u32 },
    Water { volume: u32 },
    Predator { state: PredatorState },
    Avatar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarView {
    pub bounds: Rect,
    pub velocity: Vec2,
    pub hunger: u32,
    pub thirst: u32,
    pub fatigue: f32,
    pub on_rest: bool,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredatorView {
    pub position: Vec2,
    pub bounds: Rect,
    pub state: PredatorState,
}

/// Read-only copy of everything an observer may look at.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Rest spots, then resources, then wolves, then the sheep.
    pub drawables: Vec<Drawable>,
    pub avatar: AvatarView,
    pub predators: Vec<PredatorView>,
    pub is_over: bool,
}

impl Snapshot {
    pub fn resource_count(&self) -> usize {
        self.drawables
            .iter()
            .filter(|d| matches!(d.kind, DrawableKind::Grass { .. } | DrawableKind::Water { .. }))
            .count()
    }
}

/// Passive view of a session, called after every interaction pass.
pub trait Observer {
    fn on_update(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> Observer for F {
    fn on_update(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}
