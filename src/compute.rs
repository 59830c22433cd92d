//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and to
//! `tracing` events; anything the host must act on (sound cues) comes back
//! as a [`TickEvent`].

use rand::Rng;
use tracing::{debug, info};

use crate::config::{GameConfig, Motion};
use crate::entities::{
    Explosion, GameState, GameStatus, Raven, Rgb, BOOM_LAST_FRAME, RAVEN_FRAMES,
    RAVEN_SPRITE_HEIGHT, RAVEN_SPRITE_WIDTH,
};
use crate::picking::Rgba;

/// Something that happened during a tick that the host may care about.
#[derive(Clone, Debug, PartialEq)]
pub enum TickEvent {
    RavenSpawned { color: Rgb },
    /// An explosion ran its first tick; play the boom once.
    ExplosionSound { x: f32, y: f32 },
    RavenEscaped { x: f32, y: f32 },
    GameOver { score: u32 },
}

#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<TickEvent>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a viewport of `width` x `height` pixels.
pub fn init_state(config: GameConfig, width: f32, height: f32) -> GameState {
    GameState {
        ravens: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        time_to_next_raven: 0.0,
        last_timestamp: 0.0,
        frame: 0,
        width,
        height,
        config,
    }
}

/// A fresh raven on the right-hand edge with randomized size, heading and color.
pub fn spawn_raven(width: f32, height: f32, rng: &mut impl Rng) -> Raven {
    let scale: f32 = rng.gen_range(0.4..1.0);
    let raven_width = RAVEN_SPRITE_WIDTH * scale;
    let raven_height = RAVEN_SPRITE_HEIGHT * scale;
    Raven {
        x: width,
        y: rng.gen::<f32>() * (height - raven_height).max(0.0),
        width: raven_width,
        height: raven_height,
        dx: rng.gen_range(3.0..8.0),
        dy: rng.gen_range(-2.5..2.5),
        frame: 0,
        time_since_flap: 0.0,
        flap_interval: rng.gen_range(50.0..100.0),
        color: Rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255)),
        marked_for_deletion: false,
    }
}

// ── Entity updates ───────────────────────────────────────────────────────────

/// True once the raven is entirely past the left edge.
pub fn has_escaped(raven: &Raven) -> bool {
    raven.x < -raven.width
}

/// Move, bounce and animate one raven by `delta_ms`.
pub fn advance_raven(raven: &Raven, delta_ms: f64, screen_height: f32, motion: Motion) -> Raven {
    let mut next = raven.clone();

    // Reflect only while heading outward so a raven still out of bounds on
    // the next tick is not flipped back.
    let floor = screen_height - next.height;
    if (next.y < 0.0 && next.dy < 0.0) || (next.y > floor && next.dy > 0.0) {
        next.dy = -next.dy;
    }

    let scale = motion.step_scale(delta_ms);
    next.x -= next.dx * scale;
    next.y += next.dy * scale;

    if has_escaped(&next) {
        next.marked_for_deletion = true;
    }

    // Sub-interval remainder is dropped on purpose: the cadence resets.
    next.time_since_flap += delta_ms;
    if next.time_since_flap > next.flap_interval {
        next.frame = (next.frame + 1) % RAVEN_FRAMES;
        next.time_since_flap = 0.0;
    }

    next
}

/// Step an explosion's animation.  The flag is true on the tick that should
/// trigger the sound.
pub fn advance_explosion(explosion: &Explosion, delta_ms: f64, frame_interval_ms: f64) -> (Explosion, bool) {
    let mut next = explosion.clone();
    let cue = next.frame == 0 && !next.sound_played;
    if cue {
        next.sound_played = true;
    }

    next.time_since_last_frame += delta_ms;
    if next.time_since_last_frame > frame_interval_ms {
        next.frame += 1;
        next.time_since_last_frame = 0.0;
        if next.frame > BOOM_LAST_FRAME {
            next.marked_for_deletion = true;
        }
    }

    (next, cue)
}

// ── Per-frame tick (nearly pure: RNG is injected) ────────────────────────────

/// Advance the simulation to host time `timestamp_ms`: spawn, move, animate
/// and prune.  Once the game is over the state is returned unchanged.
pub fn tick(state: &GameState, timestamp_ms: f64, rng: &mut impl Rng) -> TickOutcome {
    if state.is_over() {
        return TickOutcome { state: state.clone(), events: Vec::new() };
    }

    let config = &state.config;
    let delta = (timestamp_ms - state.last_timestamp).max(0.0);
    let mut events = Vec::new();

    // ── 1. Spawner ───────────────────────────────────────────────────────────
    let mut ravens = state.ravens.clone();
    let mut time_to_next_raven = state.time_to_next_raven + delta;
    if time_to_next_raven > config.raven_interval_ms {
        let raven = spawn_raven(state.width, state.height, rng);
        debug!(width = raven.width, y = raven.y, color = ?raven.color, "raven spawned");
        events.push(TickEvent::RavenSpawned { color: raven.color });
        ravens.push(raven);
        time_to_next_raven = 0.0;
        // Larger (closer) ravens paint first so smaller ones layer on top.
        ravens.sort_by(|a, b| b.width.total_cmp(&a.width));
    }

    // ── 2. Advance ravens ────────────────────────────────────────────────────
    let ravens: Vec<Raven> = ravens
        .iter()
        .map(|r| {
            if r.marked_for_deletion {
                r.clone()
            } else {
                advance_raven(r, delta, state.height, config.motion)
            }
        })
        .collect();

    let mut status = state.status.clone();
    for raven in ravens.iter().filter(|r| has_escaped(r)) {
        info!(x = raven.x, y = raven.y, "raven escaped");
        events.push(TickEvent::RavenEscaped { x: raven.x, y: raven.y });
        status = GameStatus::GameOver;
    }

    // ── 3. Advance explosions ────────────────────────────────────────────────
    let explosions: Vec<Explosion> = state
        .explosions
        .iter()
        .map(|e| {
            if e.marked_for_deletion {
                return e.clone();
            }
            let (next, cue) = advance_explosion(e, delta, config.explosion_frame_interval_ms);
            if cue {
                events.push(TickEvent::ExplosionSound { x: next.x, y: next.y });
            }
            next
        })
        .collect();

    // ── 4. Prune ─────────────────────────────────────────────────────────────
    let ravens: Vec<Raven> = ravens.into_iter().filter(|r| !r.marked_for_deletion).collect();
    let explosions: Vec<Explosion> = explosions
        .into_iter()
        .filter(|e| !e.marked_for_deletion)
        .collect();

    if status == GameStatus::GameOver {
        info!(score = state.score, "game over");
        events.push(TickEvent::GameOver { score: state.score });
    }

    TickOutcome {
        state: GameState {
            ravens,
            explosions,
            status,
            time_to_next_raven,
            last_timestamp: timestamp_ms,
            frame: state.frame + 1,
            ..state.clone()
        },
        events,
    }
}

// ── Click resolution ─────────────────────────────────────────────────────────

/// Index of the first live raven whose color matches the sampled pixel.
/// Transparent or partially transparent pixels are background.
pub fn resolve_target(ravens: &[Raven], pixel: Option<Rgba>) -> Option<usize> {
    let [r, g, b, a] = pixel?;
    if a != 255 {
        return None;
    }
    let color = Rgb(r, g, b);
    ravens
        .iter()
        .position(|raven| !raven.marked_for_deletion && raven.color == color)
}

/// Apply a click whose picking-buffer sample is `pixel`.  A hit flags the
/// raven, scores one point and starts an explosion where it was.
pub fn click(state: &GameState, pixel: Option<Rgba>) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let Some(index) = resolve_target(&state.ravens, pixel) else {
        return state.clone();
    };

    let mut ravens = state.ravens.clone();
    ravens[index].marked_for_deletion = true;
    let mut explosions = state.explosions.clone();
    explosions.push(Explosion::at(&ravens[index]));
    let score = state.score + 1;
    info!(score, color = ?ravens[index].color, "raven hit");

    GameState {
        ravens,
        explosions,
        score,
        ..state.clone()
    }
}
