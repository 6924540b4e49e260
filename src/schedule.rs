use std::time::Duration;

/// The three periodic session timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TickKind {
    Physics = 0,
    Survival = 1,
    Spawn = 2,
}

impl TickKind {
    const ALL: [TickKind; 3] = [Self::Physics, Self::Survival, Self::Spawn];
}

#[derive(Debug, Clone, Copy)]
struct Periodic {
    period: Duration,
    next_due: Duration,
}

/// Simulated clock plus three fixed-period timers.
///
/// Time only moves through [`Schedule::advance`]; due ticks are handed out one
/// at a time in chronological order, ties broken physics, survival, spawn.
/// Once halted the schedule never yields another tick.
#[derive(Debug, Clone)]
pub struct Schedule {
    now: Duration,
    timers: [Periodic; 3],
    running: bool,
}

impl Schedule {
    pub fn new(physics: Duration, survival: Duration, spawn: Duration) -> Self {
        let timer = |period: Duration| Periodic {
            period,
            next_due: period,
        };
        Self {
            now: Duration::ZERO,
            timers: [timer(physics), timer(survival), timer(spawn)],
            running: true,
        }
    }

    /// Simulated time elapsed since the session started.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move the clock forward. No-op once halted.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.running {
            self.now += elapsed;
        }
    }

    /// Earliest tick whose deadline has passed, rescheduling it one period on.
    pub fn pop_due(&mut self) -> Option<TickKind> {
        if !self.running {
            return None;
        }
        let mut earliest: Option<TickKind> = None;
        for kind in TickKind::ALL {
            let due = self.timers[kind as usize].next_due;
            if due > self.now {
                continue;
            }
            match earliest {
                Some(e) if self.timers[e as usize].next_due <= due => {}
                _ => earliest = Some(kind),
            }
        }
        let kind = earliest?;
        let timer = &mut self.timers[kind as usize];
        timer.next_due += timer.period;
        Some(kind)
    }

    /// Stop all three timers. Returns false if they were already stopped.
    pub fn halt(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}
