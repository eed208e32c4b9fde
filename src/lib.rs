//! Star Dodger - A fixed-timestep arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game session)
//! - `renderer`: Draw command generation for an external canvas
//! - `platform`: Keyboard input adapter
//! - `hud`: Statistics counters for an external display
//! - `settings`: Startup configuration

pub mod app;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use hud::Stats;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default simulation rate
    pub const DEFAULT_FPS: u32 = 60;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 300.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Every body starts at this health
    pub const DEFAULT_HEALTH: i32 = 100;
    /// Default body extent
    pub const BODY_SIZE: f32 = 10.0;

    /// Player movement speed (pixels/s), halved while firing
    pub const PLAYER_SPEED: f32 = 100.0;
    pub const PLAYER_FIRING_SPEED: f32 = 50.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_SPAWN_OFFSET_Y: f32 = 100.0;
    /// Seconds between shots while fire is held
    pub const SHOT_COOLDOWN: f32 = 0.4;

    /// Shot travels straight up
    pub const SHOT_SPEED: f32 = 200.0;
    /// Shots appear this far above the player
    pub const SHOT_SPAWN_OFFSET_Y: f32 = 10.0;

    /// Enemies fall straight down
    pub const ENEMY_SPEED: f32 = 30.0;
    /// Enemy x is `random * width - ENEMY_SPAWN_INSET`
    pub const ENEMY_SPAWN_INSET: f32 = 20.0;
    /// Health lost per enemy contact
    pub const ENEMY_CONTACT_DAMAGE: i32 = 10;
    /// Seconds between enemy spawns
    pub const SPAWN_INTERVAL: f32 = 1.0;

    /// Score weight per hit
    pub const SCORE_PER_HIT: f32 = 30.0;
}
