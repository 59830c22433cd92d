//! All game entity types: pure data, no logic.

use crate::config::GameConfig;

// ── Sprite geometry ───────────────────────────────────────────────────────────

/// Raven sprite sheet frame size in pixels.
pub const RAVEN_SPRITE_WIDTH: f32 = 271.0;
pub const RAVEN_SPRITE_HEIGHT: f32 = 194.0;
/// Number of flap frames on the raven sheet.
pub const RAVEN_FRAMES: u32 = 6;

/// Index of the last explosion frame; advancing past it retires the effect.
pub const BOOM_LAST_FRAME: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Identifying color painted into the picking buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Hostile entity ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Raven {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward speed. Positive values move the raven towards x = 0.
    pub dx: f32,
    /// Vertical speed, flipped when the raven bounces off a screen edge.
    pub dy: f32,
    pub frame: u32,
    pub time_since_flap: f64,
    pub flap_interval: f64,
    pub color: Rgb,
    pub marked_for_deletion: bool,
}

// ── Explosion effect ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Edge length of the square the effect is drawn into.
    pub size: f32,
    pub frame: u32,
    pub time_since_last_frame: f64,
    pub sound_played: bool,
    pub marked_for_deletion: bool,
}

impl Explosion {
    pub fn at(raven: &Raven) -> Self {
        Explosion {
            x: raven.x,
            y: raven.y,
            size: raven.width,
            frame: 0,
            time_since_last_frame: 0.0,
            sound_played: false,
            marked_for_deletion: false,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Live ravens, kept sorted by descending width after every spawn.
    pub ravens: Vec<Raven>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: GameStatus,
    /// Milliseconds accumulated since the last raven was spawned.
    pub time_to_next_raven: f64,
    /// Host timestamp (ms) of the previous tick.
    pub last_timestamp: f64,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub config: GameConfig,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
