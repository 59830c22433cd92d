//! The simulation loop.  A `Session` is one game: it owns the state, the
//! picking buffer and the RNG, and is driven by the host once per display
//! refresh.  Starting over means building a new `Session`.

use rand::Rng;
use tracing::debug;

use crate::compute::{self, TickEvent};
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::picking::PickingBuffer;
use crate::render;
use crate::surface::{Canvas, Sound, SoundPlayer};

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct Session<R: Rng> {
    state: GameState,
    picking: PickingBuffer,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, width: usize, height: usize, rng: R) -> Self {
        Session {
            state: compute::init_state(config, width as f32, height as f32),
            picking: PickingBuffer::new(width, height),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn picking(&self) -> &PickingBuffer {
        &self.picking
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Run one tick at host time `timestamp_ms` and draw it.
    pub fn frame<C, A>(&mut self, timestamp_ms: f64, canvas: &mut C, audio: &mut A) -> LoopControl
    where
        C: Canvas,
        A: SoundPlayer,
    {
        if self.state.is_over() {
            return LoopControl::Stop;
        }

        let outcome = compute::tick(&self.state, timestamp_ms, &mut self.rng);
        for event in &outcome.events {
            if let TickEvent::ExplosionSound { .. } = event {
                audio.play(Sound::Boom);
            }
        }
        self.state = outcome.state;

        render::draw_frame(canvas, &mut self.picking, &self.state);

        if self.state.is_over() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Resolve a pointer click at viewport pixel `(x, y)` against the last
    /// presented picking frame.
    pub fn click(&mut self, x: f32, y: f32) {
        let pixel = self.picking.sample(x, y);
        debug!(x, y, ?pixel, "click");
        self.state = compute::click(&self.state, pixel);
    }
}
