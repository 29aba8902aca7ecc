//! Terminal runner (default binary).
//!
//! Drives a [`GameLoop`] from crossterm input and wall-clock time, and redraws
//! the whole screen from a fresh snapshot whenever the game changes.

use std::env;
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, LevelFilter};

use webtris::core::{Engine, GameSnapshot};
use webtris::engine::GameLoop;
use webtris::input::{map_key, InputEvent};
use webtris::settings::Settings;
use webtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Poll interval while the game-over screen waits for a key.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(settings.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file while the terminal is in raw mode.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            if env::var_os("RUST_LOG").is_none() {
                builder.filter_level(LevelFilter::Debug);
            }
        }
        None if env::var_os("RUST_LOG").is_none() => return Ok(()),
        None => {}
    }
    builder.try_init()?;
    Ok(())
}

enum Outcome {
    Restart,
    Quit,
}

fn run(term: &mut TerminalRenderer, settings: &Settings) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut sessions = 0u32;
    loop {
        sessions += 1;
        let engine = Engine::new(settings.engine).context("starting a new game")?;
        info!("session {} started", sessions);

        let game = GameLoop::new(engine);
        match play(term, &view, &mut fb, &mut snap, game)? {
            Outcome::Restart => continue,
            Outcome::Quit => return Ok(()),
        }
    }
}

fn play(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    snap: &mut GameSnapshot,
    mut game: GameLoop,
) -> Result<Outcome> {
    let mut last = Instant::now();
    let mut force_redraw = true;

    loop {
        if force_redraw || game.is_dirty() {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(snap);
            view.render_into(snap, Viewport::new(w, h), fb);
            term.draw(fb)?;
            game.mark_presented();
            force_redraw = false;
        }

        let timeout = if game.is_running() {
            Duration::from_millis(game.time_until_tick_ms() as u64)
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(key) {
                    Some(InputEvent::Quit) => return Ok(Outcome::Quit),
                    Some(InputEvent::Restart) => return Ok(Outcome::Restart),
                    Some(InputEvent::Command(command)) => {
                        game.handle(command);
                    }
                    None => {}
                },
                Event::Resize(..) => force_redraw = true,
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = u32::try_from(now.duration_since(last).as_millis()).unwrap_or(u32::MAX);
        last = now;
        game.advance(elapsed);

        if let Some(ev) = game.take_last_event() {
            if ev.lines_cleared > 0 {
                debug!(
                    "cleared {} line(s), score {}",
                    ev.lines_cleared,
                    game.engine().score()
                );
            }
            if ev.game_over {
                info!(
                    "game over: score {} lines {} after {} ticks",
                    game.engine().score(),
                    game.engine().lines(),
                    game.ticks()
                );
            }
        }
    }
}
