//! Frame driver
//!
//! Glues the pieces together the way a host's per-frame callback would:
//! the clock turns wall time into fixed steps, and after every step the frame
//! is redrawn and the stats are republished.

use crate::hud::{Stats, StatsSink};
use crate::platform::{InputHandler, KeyEvent};
use crate::renderer::{self, Canvas, DrawOptions};
use crate::settings::{CanvasSize, Settings};
use crate::sim::{GameSession, SimulationClock};

pub struct App {
    pub session: GameSession,
    pub clock: SimulationClock,
    input: InputHandler,
    draw_options: DrawOptions,
    canvas: CanvasSize,
    hi_dpi: bool,
}

impl App {
    /// `settings` must already be validated
    pub fn new(settings: &Settings) -> Self {
        let clock = SimulationClock::new(settings.update_rate.seconds(), settings.remainder)
            .with_max_substeps(settings.effective_max_substeps());
        log::info!(
            "canvas {}x{} @ {} fps ({:?} remainder)",
            settings.canvas.width,
            settings.canvas.height,
            settings.update_rate.fps,
            settings.remainder
        );
        Self {
            session: GameSession::new(settings),
            clock,
            input: InputHandler::new(settings.bindings.clone()),
            draw_options: DrawOptions {
                show_velocity: settings.show_velocity,
            },
            canvas: settings.canvas,
            hi_dpi: settings.hi_dpi,
        }
    }

    /// Pixel size the host should allocate for its backing store
    pub fn backing_size(&self) -> (u32, u32) {
        renderer::backing_size(self.canvas.width, self.canvas.height, self.hi_dpi)
    }

    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        self.input.key_down(&mut self.session.input, event)
    }

    pub fn key_up(&mut self, event: &KeyEvent) -> bool {
        self.input.key_up(&mut self.session.input, event)
    }

    /// Handle one host frame at `now` seconds. Returns the number of steps run.
    pub fn frame(
        &mut self,
        now: f64,
        canvas: &mut impl Canvas,
        stats: &mut impl StatsSink,
    ) -> u32 {
        let session = &mut self.session;
        let options = &self.draw_options;
        let mut loop_count = self.clock.loop_count();

        self.clock.frame(now, |dt| {
            session.step(dt);
            loop_count += 1;
            renderer::draw_frame(session, options, &mut *canvas);
            stats.publish(&Stats::collect(session, loop_count));
        })
    }

    pub fn stats(&self) -> Stats {
        Stats::collect(&self.session, self.clock.loop_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;

    #[test]
    fn test_frame_publishes_per_step() {
        let mut app = App::new(&Settings::default());
        let mut commands: Vec<DrawCommand> = Vec::new();
        let mut published: Vec<Stats> = Vec::new();

        assert_eq!(app.frame(0.0, &mut commands, &mut published), 0);
        assert!(published.is_empty());

        let steps = app.frame(0.06, &mut commands, &mut published);
        assert_eq!(steps, 3);
        let loops: Vec<u64> = published.iter().map(|s| s.loop_count).collect();
        assert_eq!(loops, vec![1, 2, 3]);
        assert_eq!(published[0].spawned, 1);
        // One background clear per step
        let clears = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count();
        assert_eq!(clears, 3);
        assert_eq!(app.stats().loop_count, 3);
    }

    #[test]
    fn test_backing_size_follows_hi_dpi() {
        let app = App::new(&Settings::default());
        assert_eq!(app.backing_size(), (600, 1000));

        let settings = Settings {
            hi_dpi: false,
            ..Settings::default()
        };
        assert_eq!(App::new(&settings).backing_size(), (300, 500));
    }

    #[test]
    fn test_keys_reach_player() {
        let mut app = App::new(&Settings::default());
        let mut commands: Vec<DrawCommand> = Vec::new();
        let mut latest = Stats::default();

        assert!(app.key_down(&KeyEvent::new(68)));
        app.frame(0.0, &mut commands, &mut latest);
        app.frame(1.0, &mut commands, &mut latest);

        let player = app.session.player().expect("player exists");
        assert!(player.body.pos.x > 150.0);
        assert!(app.key_up(&KeyEvent::new(68)));
        assert_eq!(app.session.input.move_x, 0);
    }
}
