//! Frame rendering
//!
//! The simulation never touches a real canvas. Each frame is turned into a
//! list of [`DrawCommand`]s and handed to a [`Canvas`] sink supplied by the host.

pub mod shapes;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Entity, GameSession};

/// RGB stroke/fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const BLACK: Color = Color(0x000000);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);

    /// CSS-style `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: Color, width: f32, height: f32 },
    /// Stroke a connected line through `points`
    Stroke { color: Color, points: Vec<Vec2> },
    Text {
        text: String,
        pos: Vec2,
        font_px: u32,
        align: TextAlign,
        color: Color,
    },
}

/// Sink for draw commands
pub trait Canvas {
    fn submit(&mut self, command: DrawCommand);
}

impl Canvas for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RESTART_TEXT: &str = "press space to restart";

/// Backing-store size for a canvas of logical size `width x height`
pub fn backing_size(width: f32, height: f32, hi_dpi: bool) -> (u32, u32) {
    let scale = if hi_dpi { 2.0 } else { 1.0 };
    ((width * scale) as u32, (height * scale) as u32)
}

/// Optional extras layered on top of the normal frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawOptions {
    /// Green velocity line on every moving body
    pub show_velocity: bool,
}

/// Draw commands for one entity, styled by its kind
pub fn entity_commands(entity: &Entity) -> Option<DrawCommand> {
    let body = entity.body();
    let (color, points) = match entity {
        // A dead player is no longer on the field
        Entity::Player(p) if p.is_dead() => return None,
        Entity::Player(_) => (Color::BLACK, shapes::triangle(body.pos, body.size.half())),
        Entity::Enemy(_) => (Color::RED, shapes::triangle(body.pos, body.size.half())),
        Entity::Shot(_) => (Color::RED, shapes::velocity_line(body.pos, body.vel)),
    };
    Some(DrawCommand::Stroke { color, points })
}

/// Render the whole session: background, entities in creation order, then
/// the game-over overlay when the player is dead.
pub fn draw_frame(session: &GameSession, options: &DrawOptions, canvas: &mut impl Canvas) {
    let bounds = session.bounds;
    canvas.submit(DrawCommand::Clear {
        color: Color::WHITE,
        width: bounds.width,
        height: bounds.height,
    });

    for entity in session.registry.iter() {
        let Some(command) = entity_commands(entity) else {
            continue;
        };
        canvas.submit(command);

        let body = entity.body();
        if options.show_velocity && body.vel != Vec2::ZERO {
            canvas.submit(DrawCommand::Stroke {
                color: Color::GREEN,
                points: shapes::velocity_line(body.pos, body.vel),
            });
        }
    }

    if session.is_player_dead() {
        let center = bounds.center();
        canvas.submit(DrawCommand::Text {
            text: GAME_OVER_TEXT.to_string(),
            pos: center,
            font_px: 30,
            align: TextAlign::Center,
            color: Color::BLACK,
        });
        canvas.submit(DrawCommand::Text {
            text: RESTART_TEXT.to_string(),
            pos: center + Vec2::new(0.0, 18.0),
            font_px: 12,
            align: TextAlign::Center,
            color: Color::BLACK,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorldBounds;

    fn session() -> GameSession {
        GameSession::with_bounds(WorldBounds::new(300.0, 500.0), 1)
    }

    fn strokes(commands: &[DrawCommand]) -> Vec<Color> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_draws_background_then_entities() {
        let mut session = session();
        session.registry.spawn_enemy(Vec2::new(20.0, 20.0));
        session.registry.spawn_shot(Vec2::new(40.0, 40.0));

        let mut commands = Vec::new();
        draw_frame(&session, &DrawOptions::default(), &mut commands);

        assert!(matches!(
            commands[0],
            DrawCommand::Clear {
                color: Color::WHITE,
                ..
            }
        ));
        // Player first (lowest id), then enemy, then shot
        assert_eq!(strokes(&commands), vec![Color::BLACK, Color::RED, Color::RED]);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn test_shot_drawn_as_velocity_line() {
        let mut session = session();
        let id = session.registry.spawn_shot(Vec2::new(40.0, 40.0));
        let shot = session.registry.get(id).expect("shot exists");
        let Some(DrawCommand::Stroke { points, .. }) = entity_commands(shot) else {
            panic!("expected stroke");
        };
        assert_eq!(points, vec![Vec2::new(40.0, 40.0), Vec2::new(40.0, 20.0)]);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = session();
        let id = session.player_id();
        if let Some(player) = session.registry.player_mut(id) {
            player.body.health = 0;
        }

        let mut commands = Vec::new();
        draw_frame(&session, &DrawOptions::default(), &mut commands);

        assert!(strokes(&commands).is_empty());
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, pos, .. } => Some((text.as_str(), *pos)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                (GAME_OVER_TEXT, Vec2::new(150.0, 250.0)),
                (RESTART_TEXT, Vec2::new(150.0, 268.0)),
            ]
        );
    }

    #[test]
    fn test_velocity_overlay() {
        let mut session = session();
        session.registry.spawn_enemy(Vec2::new(20.0, 20.0));
        let options = DrawOptions {
            show_velocity: true,
        };

        let mut commands = Vec::new();
        draw_frame(&session, &options, &mut commands);

        // Resting player gets no overlay, the falling enemy does
        assert_eq!(strokes(&commands), vec![Color::BLACK, Color::RED, Color::GREEN]);
    }

    #[test]
    fn test_backing_size() {
        assert_eq!(backing_size(300.0, 500.0, true), (600, 1000));
        assert_eq!(backing_size(300.0, 500.0, false), (300, 500));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::RED.to_hex(), "#FF0000");
        assert_eq!(Color::GREEN.to_hex(), "#00FF00");
    }
}
