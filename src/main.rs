//! Star Dodger entry point
//!
//! Runs the simulation headless: a scripted pilot presses keys, frame
//! callbacks arrive with jittered timestamps, and the final stats are printed
//! as JSON. Pass a settings JSON path as the only argument to override defaults.

use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use star_dodger::hud::Stats;
use star_dodger::platform::KeyEvent;
use star_dodger::renderer::DrawCommand;
use star_dodger::sim::{EntityKind, GameEvent};
use star_dodger::{App, Settings};

/// Simulated wall-clock duration of the run
const RUN_SECONDS: f64 = 90.0;

const KEY_SPACE: u32 = 32;
const KEY_LEFT: u32 = 65;
const KEY_RIGHT: u32 = 68;

/// Seconds to sit on the game-over screen before restarting
const RESTART_DELAY: f64 = 1.5;

/// Scripted input: chase the lowest enemy horizontally and keep firing
#[derive(Default)]
struct Pilot {
    left: bool,
    right: bool,
    firing: bool,
    dead_since: Option<f64>,
}

impl Pilot {
    fn set_key(app: &mut App, held: &mut bool, want: bool, code: u32) {
        if *held == want {
            return;
        }
        *held = want;
        let event = KeyEvent::new(code);
        if want {
            app.key_down(&event);
        } else {
            app.key_up(&event);
        }
    }

    fn drive(&mut self, app: &mut App, now: f64) {
        if app.session.is_game_over() {
            let since = *self.dead_since.get_or_insert(now);
            Self::set_key(app, &mut self.left, false, KEY_LEFT);
            Self::set_key(app, &mut self.right, false, KEY_RIGHT);
            // Release, then press again once the overlay has been up for a while
            let want_fire = now - since >= RESTART_DELAY;
            Self::set_key(app, &mut self.firing, want_fire, KEY_SPACE);
            return;
        }
        self.dead_since = None;

        let Some(player_x) = app.session.player().map(|p| p.body.pos.x) else {
            return;
        };
        let target = app
            .session
            .registry
            .iter_kind(EntityKind::Enemy)
            .max_by(|a, b| a.body().pos.y.total_cmp(&b.body().pos.y))
            .map(|e| e.body().pos.x);

        let (left, right) = match target {
            Some(x) if x < player_x - 2.0 => (true, false),
            Some(x) if x > player_x + 2.0 => (false, true),
            _ => (false, false),
        };
        Self::set_key(app, &mut self.left, left, KEY_LEFT);
        Self::set_key(app, &mut self.right, right, KEY_RIGHT);
        Self::set_key(app, &mut self.firing, true, KEY_SPACE);
    }
}

fn load_settings() -> Result<Settings, star_dodger::SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => {
            let settings = Settings::default();
            settings.validate()?;
            Ok(settings)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(&settings);
    let mut pilot = Pilot::default();
    let mut jitter = Pcg32::seed_from_u64(settings.seed ^ 0xF00D);
    let mut frame: Vec<DrawCommand> = Vec::new();
    let mut latest = Stats::default();
    let mut best_score = 0;

    let mut now = 0.0;
    while now < RUN_SECONDS {
        frame.clear();
        pilot.drive(&mut app, now);
        app.frame(now, &mut frame, &mut latest);

        for event in app.session.take_events() {
            match event {
                GameEvent::PlayerDied => {
                    best_score = best_score.max(latest.score);
                    log::info!("player died at t={:.2}s: {}", now, latest.lines().join(", "));
                }
                GameEvent::SessionRestarted { restarts } => {
                    log::info!("restart #{} at t={:.2}s", restarts, now)
                }
                _ => {}
            }
        }
        log::trace!("frame at {:.3}s: {} draw commands", now, frame.len());

        // Browser frame callbacks land roughly every 16 ms
        now += jitter.random_range(0.012..0.022);
    }

    best_score = best_score.max(latest.score);
    log::info!("final: {} (best score {})", latest.lines().join(", "), best_score);
    match serde_json::to_string_pretty(&latest) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("failed to serialize stats: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
