use instant::Instant;

/// Which phase of a session tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Ai = 0,
    Physics = 1,
    Survival = 2,
    Spawn = 3,
    Interaction = 4,
    Notify = 5,
}

impl SystemPhase {
    pub const ALL: [SystemPhase; 6] = [
        Self::Ai,
        Self::Physics,
        Self::Survival,
        Self::Spawn,
        Self::Interaction,
        Self::Notify,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Physics => "Physics",
            Self::Survival => "Survival",
            Self::Spawn => "Spawn",
            Self::Interaction => "Interaction",
            Self::Notify => "Notify",
        }
    }
}

/// Per-system timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    durations_us: [f64; 6],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 6],
            start: Instant::now(),
        }
    }

    /// Call before a system runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a system finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    pub fn get_us(&self, phase: SystemPhase) -> f64 {
        self.durations_us[phase as usize]
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line breakdown for log output, total first.
    pub fn summary(&self) -> String {
        let phases = SystemPhase::ALL
            .iter()
            .map(|&p| format!("{} {:.1}us", p.label(), self.get_us(p)))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("total {:.1}us: {}", self.total_us(), phases)
    }
}

impl Default for SystemTimers {
    fn default() -> Self {
        Self::new()
    }
}
