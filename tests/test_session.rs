use raven_hunt::config::GameConfig;
use raven_hunt::session::{LoopControl, Session};
use raven_hunt::surface::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingCanvas {
    clears: usize,
    sprites: Vec<(Sprite, u32, Rect)>,
    texts: Vec<(String, TextStyle)>,
}

impl RecordingCanvas {
    fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|(t, _)| t == text)
    }

    fn sprite_count(&self, sprite: Sprite) -> usize {
        self.sprites.iter().filter(|(s, _, _)| *s == sprite).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.clears += 1;
        self.sprites.clear();
        self.texts.clear();
    }

    fn draw_sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect) {
        self.sprites.push((sprite, frame, dest));
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, style: TextStyle) {
        self.texts.push((text.to_string(), style));
    }
}

#[derive(Default)]
struct RecordingAudio {
    played: Vec<Sound>,
}

impl SoundPlayer for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}

fn new_session() -> Session<StdRng> {
    Session::new(GameConfig::default(), 800, 600, StdRng::seed_from_u64(7))
}

/// Run frames until the first raven appears; returns the next timestamp.
fn spawn_first_raven(
    session: &mut Session<StdRng>,
    canvas: &mut RecordingCanvas,
    audio: &mut RecordingAudio,
) -> f64 {
    assert_eq!(session.frame(0.0, canvas, audio), LoopControl::Continue);
    assert_eq!(session.frame(501.0, canvas, audio), LoopControl::Continue);
    assert_eq!(session.state().ravens.len(), 1);
    502.0
}

#[test]
fn first_frame_draws_score_overlay() {
    let mut session = new_session();
    let mut canvas = RecordingCanvas::default();
    let mut audio = RecordingAudio::default();

    assert_eq!(session.frame(0.0, &mut canvas, &mut audio), LoopControl::Continue);
    assert_eq!(canvas.clears, 1);
    let shades: Vec<Shade> = canvas
        .texts
        .iter()
        .filter(|(t, _)| t == "Score: 0")
        .map(|(_, style)| style.shade)
        .collect();
    assert_eq!(shades, vec![Shade::Black, Shade::White]);
    assert!(canvas.sprites.is_empty());
}

#[test]
fn spawned_raven_is_drawn_and_pickable() {
    let mut session = new_session();
    let mut canvas = RecordingCanvas::default();
    let mut audio = RecordingAudio::default();
    spawn_first_raven(&mut session, &mut canvas, &mut audio);

    let raven = session.state().ravens[0].clone();
    assert_eq!(canvas.sprite_count(Sprite::Raven), 1);
    let (_, frame, dest) = canvas.sprites[0];
    assert_eq!(frame, raven.frame);
    assert_eq!(dest, Rect { x: raven.x, y: raven.y, w: raven.width, h: raven.height });

    let c = raven.color;
    let pixel = session.picking().sample(799.0, raven.y + raven.height / 2.0);
    assert_eq!(pixel, Some([c.0, c.1, c.2, 255]));
}

#[test]
fn clicking_a_raven_scores_and_explodes() {
    let mut session = new_session();
    let mut canvas = RecordingCanvas::default();
    let mut audio = RecordingAudio::default();
    let t = spawn_first_raven(&mut session, &mut canvas, &mut audio);

    let raven = session.state().ravens[0].clone();
    session.click(799.0, raven.y + raven.height / 2.0);
    assert_eq!(session.state().score, 1);
    assert!(session.state().ravens[0].marked_for_deletion);
    assert_eq!(session.state().explosions.len(), 1);
    assert_eq!(session.state().explosions[0].x, raven.x);

    assert_eq!(session.frame(t, &mut canvas, &mut audio), LoopControl::Continue);
    assert!(session.state().ravens.is_empty());
    assert_eq!(audio.played, vec![Sound::Boom]);
    assert_eq!(canvas.sprite_count(Sprite::Raven), 0);
    assert_eq!(canvas.sprite_count(Sprite::Boom), 1);
    assert!(canvas.has_text("Score: 1"));

    session.frame(t + 16.0, &mut canvas, &mut audio);
    assert_eq!(audio.played.len(), 1, "the boom plays once");
}

#[test]
fn clicking_background_changes_nothing() {
    let mut session = new_session();
    let mut canvas = RecordingCanvas::default();
    let mut audio = RecordingAudio::default();
    spawn_first_raven(&mut session, &mut canvas, &mut audio);

    session.click(10.0, 10.0);
    session.click(-5.0, 10_000.0);
    assert_eq!(session.state().score, 0);
    assert!(session.state().explosions.is_empty());
    assert!(!session.state().ravens[0].marked_for_deletion);
}

#[test]
fn click_before_first_frame_is_a_miss() {
    let mut session = new_session();
    session.click(400.0, 300.0);
    assert_eq!(session.state().score, 0);
}

#[test]
fn escaped_raven_ends_the_game_for_good() {
    let mut session = new_session();
    let mut canvas = RecordingCanvas::default();
    let mut audio = RecordingAudio::default();
    let mut t = spawn_first_raven(&mut session, &mut canvas, &mut audio);

    let mut stopped = false;
    for _ in 0..2000 {
        if session.frame(t, &mut canvas, &mut audio) == LoopControl::Stop {
            stopped = true;
            break;
        }
        t += 1.0;
    }
    assert!(stopped);
    assert!(session.is_over());
    assert!(canvas.has_text("GAME OVER, your score is 0"));

    let clears = canvas.clears;
    let frame = session.state().frame;
    assert_eq!(session.frame(t + 1000.0, &mut canvas, &mut audio), LoopControl::Stop);
    assert_eq!(canvas.clears, clears);
    assert_eq!(session.state().frame, frame);

    session.click(400.0, 300.0);
    assert_eq!(session.state().score, 0);
}
