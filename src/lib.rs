//! Survival simulation core: a sheep grazing, drinking and resting in a
//! bounded arena while wolves patrol and hunt it.
//!
//! Hosts create a [`Session`], feed it simulated time with
//! [`Session::advance`], forward held directions with
//! [`Session::handle_intent`] and read state back through [`Observer`]s or
//! [`Session::snapshot`].

pub mod config;
pub mod debug;
pub mod ecs;
pub mod geometry;
pub mod schedule;
pub mod session;
pub mod snapshot;

pub use config::{Difficulty, Tuning};
pub use ecs::components::{Direction, PredatorState};
pub use geometry::{overlaps, Arena, Rect};
pub use session::Session;
pub use snapshot::{Drawable, DrawableKind, Observer, Snapshot};
