pub mod timer;

pub use timer::{SystemPhase, SystemTimers};
