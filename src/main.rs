use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use raven_hunt::config::GameConfig;
use raven_hunt::display::{cell_center, TerminalBell, TerminalCanvas};
use raven_hunt::session::{LoopControl, Session};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const CONFIG_ENV: &str = "RAVEN_HUNT_CONFIG";
const LOG_ENV: &str = "RAVEN_HUNT_LOG";

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Log to the file named by `RAVEN_HUNT_LOG`; the terminal belongs to the game.
fn init_logging() -> std::io::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(PathBuf::from(path))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn load_config() -> std::io::Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => GameConfig::load(&PathBuf::from(path))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        None => Ok(GameConfig::default()),
    }
}

fn new_session(config: &GameConfig, canvas: &TerminalCanvas) -> Session<StdRng> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (width, height) = canvas.viewport();
    info!(width, height, "new game");
    Session::new(config.clone(), width, height, rng)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → start another game.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<StdRng>,
    canvas: &mut TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut bell = TerminalBell::default();
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if session.is_over() => {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = cell_center(column, row);
                    session.click(x, y);
                }
                _ => {}
            }
        }

        // GAME_OVER leaves the end screen up until the player decides.
        if !session.is_over() {
            let timestamp = started.elapsed().as_secs_f64() * 1000.0;
            if session.frame(timestamp, canvas, &mut bell) == LoopControl::Stop {
                info!(score = session.state().score, "session finished");
            }
            canvas.present(out)?;
            if let Err(err) = bell.ring(out) {
                debug!(%err, "bell failed");
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging()?;
    let config = load_config()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &config, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, config: &GameConfig, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    out.execute(terminal::Clear(terminal::ClearType::All))?;
    loop {
        let (cols, rows) = terminal::size()?;
        let mut canvas = TerminalCanvas::new(cols, rows);
        let mut session = new_session(config, &canvas);
        if game_loop(out, &mut session, &mut canvas, rx)? {
            break;
        }
    }
    Ok(())
}
