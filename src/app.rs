use std::time::Duration;

use instant::Instant;
use pasture::Session;

use crate::autopilot::Autopilot;
use crate::hud::HudLog;
use crate::Args;

/// Host frame length (seconds per frame).
const FRAME_RATE: f64 = 1.0 / 60.0;
/// Max frame time handed to the session (prevents spiral of death).
const MAX_FRAME_TIME: f64 = 0.25;
/// How often to log frame stats (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, session: &Session) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | sim: {:.1}s | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                session.elapsed().as_secs_f64(),
                self.frame_count,
            );
            log::debug!("systems: {}", session.timers().summary());
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Host state: the session plus the input producer standing in for a keyboard.
struct App {
    session: Session,
    autopilot: Autopilot,
    frame_stats: FrameStats,
    last_frame_time: Option<Instant>,
}

impl App {
    fn new(args: &Args) -> Self {
        let mut session = match args.seed {
            Some(seed) => Session::with_seed(args.difficulty, seed),
            None => Session::new(args.difficulty),
        };
        session.add_observer(Box::new(HudLog::new()));

        Self {
            session,
            autopilot: Autopilot::new(),
            frame_stats: FrameStats::new(),
            last_frame_time: None,
        }
    }

    /// Steer, then hand the session one frame's worth of time.
    fn frame(&mut self, dt: f64) {
        let dt = dt.min(MAX_FRAME_TIME);

        let snapshot = self.session.snapshot();
        for (direction, pressed) in self.autopilot.steer(&snapshot) {
            self.session.handle_intent(direction, pressed);
        }

        self.session.advance(Duration::from_secs_f64(dt));
        self.frame_stats.record_frame(dt, &self.session);
    }

    /// Wall-clock frame delta, or a fixed step when running flat out.
    fn next_dt(&mut self, realtime: bool) -> f64 {
        if !realtime {
            return FRAME_RATE;
        }
        std::thread::sleep(Duration::from_secs_f64(FRAME_RATE));
        let now = Instant::now();
        let dt = self
            .last_frame_time
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(FRAME_RATE);
        self.last_frame_time = Some(now);
        dt
    }
}

/// Build a session and run it until the sheep dies or time runs out.
pub fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if !args.seconds.is_finite() || args.seconds <= 0.0 {
        return Err(format!("--seconds must be a positive number, got {}", args.seconds).into());
    }
    let limit = Duration::from_secs_f64(args.seconds);

    let mut app = App::new(args);
    log::info!(
        "running difficulty {} for up to {:.0}s{}",
        app.session.difficulty().level(),
        args.seconds,
        if args.realtime { " in real time" } else { "" }
    );

    loop {
        if app.session.is_over() {
            break;
        }
        if app.session.elapsed() >= limit {
            app.session.stop();
            break;
        }
        let dt = app.next_dt(args.realtime);
        app.frame(dt);
    }

    let avatar = app.session.avatar();
    log::info!(
        "{} after {:.1}s: hunger {}, thirst {}, fatigue {:.0}",
        if avatar.alive { "Sheep survived" } else { "Sheep died" },
        app.session.elapsed().as_secs_f64(),
        avatar.hunger,
        avatar.thirst,
        avatar.fatigue,
    );
    Ok(())
}
