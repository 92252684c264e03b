//! Terminal runner.
//!
//! The controller ticks on its own thread; this thread only reads keys,
//! forwards them as commands and redraws from snapshots.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use rt_tetris::engine::{Controller, ControllerConfig, CommandSender};
use rt_tetris::input::{map_key, should_quit};
use rt_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use rt_tetris::types::SendError;

const FRAME_PERIOD: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    init_logging()?;

    let config = ControllerConfig::from_env();
    log::info!(
        "starting: {} Hz, queue {}, seed {:?}",
        config.tick_hz,
        config.queue_capacity,
        config.seed
    );

    let (controller, commands) = Controller::new(config);
    let controller = Arc::new(controller);
    let ticker = controller.start().context("spawn tick thread")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &controller, &commands);
    // Always try to restore terminal state.
    let _ = term.exit();

    let ticks = ticker.ticks();
    let overruns = ticker.overruns();
    if ticker.stop().is_err() {
        log::error!("tick thread panicked");
    }
    log::info!("stopped after {} ticks ({} overruns)", ticks, overruns);
    result
}

/// Logs go to `TETRIS_LOG_FILE` when set; stderr would tear the screen.
fn init_logging() -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_target(false);
    if let Ok(path) = std::env::var("TETRIS_LOG_FILE") {
        let file = File::create(&path).with_context(|| format!("open log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, controller: &Controller, commands: &CommandSender) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_frame = Instant::now();

    loop {
        if Instant::now() >= next_frame {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let snapshot = controller.snapshot();
            view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            next_frame = Instant::now() + FRAME_PERIOD;
        }

        let timeout = next_frame.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(command) = map_key(key) else {
                    continue;
                };
                match commands.send(command) {
                    Ok(()) => {}
                    // Dropped input under a full queue is expected when keys repeat fast
                    Err(SendError::Full(_)) => {}
                    Err(err @ SendError::Closed) => return Err(err.into()),
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
