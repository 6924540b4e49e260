use pasture::config::{MAX_FATIGUE, MAX_HUNGER, MAX_THIRST};
use pasture::{Observer, Snapshot};

/// Width of the text gauges.
const GAUGE_WIDTH: usize = 10;

/// Hunger/thirst/fatigue gauges written to the log whenever a stat moves.
pub struct HudLog {
    last: Option<(u32, u32, u32)>,
    reported_over: bool,
}

impl HudLog {
    pub fn new() -> Self {
        Self {
            last: None,
            reported_over: false,
        }
    }
}

/// `[####------]` style bar for `value` out of `max`.
fn gauge(value: f32, max: f32) -> String {
    let filled = ((value / max).clamp(0.0, 1.0) * GAUGE_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))
}

impl Observer for HudLog {
    fn on_update(&mut self, snapshot: &Snapshot) {
        let a = &snapshot.avatar;
        // Fatigue in whole gauge steps so the log is not flooded every tick
        let fatigue_step = (a.fatigue / MAX_FATIGUE * GAUGE_WIDTH as f32) as u32;
        let now = (a.hunger, a.thirst, fatigue_step);

        if self.last != Some(now) {
            self.last = Some(now);
            log::info!(
                "hunger {} {}/{}  thirst {} {}/{}  fatigue {}{}",
                gauge(a.hunger as f32, MAX_HUNGER as f32),
                a.hunger,
                MAX_HUNGER,
                gauge(a.thirst as f32, MAX_THIRST as f32),
                a.thirst,
                MAX_THIRST,
                gauge(a.fatigue, MAX_FATIGUE),
                if a.on_rest { " (resting)" } else { "" },
            );
        }

        if snapshot.is_over && !self.reported_over {
            self.reported_over = true;
            log::warn!("GAME OVER");
        }
    }
}
