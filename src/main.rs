//! Typefall terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `typefall-term`. The
//! session itself is driven with a fixed 16ms step; its events feed the on-screen
//! feedback and, when `TYPEFALL_LOG_PATH` is set, the JSONL log.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use typefall::core::{GameSnapshot, Session, SessionConfig, WordSets};
use typefall::input::{handle_key_event, should_quit};
use typefall::logging;
use typefall::term::{Feedback, FrameBuffer, GameView, TerminalRenderer, Viewport};
use typefall::types::TICK_MS;

fn main() -> Result<()> {
    logging::init_from_env()?;
    let mut session = build_session()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

/// Session from the environment; the seed comes from the clock unless pinned.
fn build_session() -> Result<Session> {
    let mut config = SessionConfig::from_env();
    if std::env::var_os("TYPEFALL_SEED").is_none() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
            .unwrap_or(1);
        config = config.with_seed(nanos);
    }

    let mut word_sets = WordSets::builtin();
    if let Ok(path) = std::env::var("TYPEFALL_WORDS_PATH") {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading word sets from {path}"))?;
        let count = word_sets
            .load_json(&json)
            .with_context(|| format!("loading word sets from {path}"))?;
        log::info!("loaded {count} word sets from {path}");
    }

    log::info!(
        "session seed {}, word set {}, {}s",
        config.seed,
        config.word_set,
        config.time_limit_secs
    );
    Ok(Session::with_word_sets(config, word_sets))
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut feedback = Feedback::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, &feedback, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, session.phase()) {
                        session.handle(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
            feedback.advance(TICK_MS);
        }

        let log_events = log::log_enabled!(log::Level::Debug);
        for event in session.drain_events() {
            feedback.apply(&event);
            if log_events {
                match serde_json::to_string(&event) {
                    Ok(json) => log::debug!(target: "typefall::events", "{json}"),
                    Err(err) => log::warn!("unserializable {} event: {err}", event.name()),
                }
            }
        }
    }
}
