//! Tunables and play-field configuration.

use std::time::Duration;

use log::warn;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_RADIUS: f32 = 20.0;
pub const PLAYER_START_X: f32 = 200.0;
pub const PLAYER_INITIAL_HEALTH: i32 = 500;

// ── Bullet ────────────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 10.0;
pub const BULLET_RADIUS: f32 = 5.0;

// ── Enemy ─────────────────────────────────────────────────────────────────────

pub const ENEMY_COUNT: usize = 5;
pub const ENEMY_RADIUS: f32 = 20.0;
pub const ENEMY_MIN_SPEED: f32 = 3.0;
pub const ENEMY_MAX_SPEED: f32 = 6.0;
/// Extra distance past the right edge an enemy may respawn at.
pub const ENEMY_SPAWN_JITTER: f32 = 300.0;
/// Keep-out band at the top and bottom of the field for respawns.
pub const ENEMY_SPAWN_MARGIN: f32 = 100.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const DAMAGE_PER_HIT: i32 = 100;
pub const SCORE_PER_KILL: u32 = 100;
pub const CLEAR_SCORE: u32 = 5000;

// ── Window / field ────────────────────────────────────────────────────────────

pub const WINDOW_TITLE: &str = "SIMPLE_STG";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

pub const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 240;

const SEED_VAR: &str = "SIMPLE_STG_SEED";
const FPS_VAR: &str = "SIMPLE_STG_FPS";

/// The rectangle the simulation runs in.  Used for clamping and spawn bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Field { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32)
    }
}

/// Process-level settings read once at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field: Field,
    /// `None` means seed from OS entropy.
    pub seed: Option<u64>,
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field: Field::default(),
            seed: None,
            fps: DEFAULT_FPS,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a closure in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GameConfig::default();

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!("ignoring {SEED_VAR}={raw:?}: not a u64"),
            }
        }

        if let Some(raw) = lookup(FPS_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(fps) => config.fps = fps.clamp(1, MAX_FPS),
                Err(_) => warn!("ignoring {FPS_VAR}={raw:?}: not a frame rate"),
            }
        }

        config
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}
