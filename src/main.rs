//! Terminal runner (default binary).
//!
//! Interactive mode drives a [`Match`] from real elapsed time and crossterm
//! key events and paints it with the framebuffer renderer. Headless mode runs
//! the same match on synthetic time and prints the final frame as JSON.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use tetris_duel::engine::{Match, MatchConfig};
use tetris_duel::input::{map_key, InputEvent};
use tetris_duel::term::{FrameBuffer, MatchView, TerminalRenderer, Viewport};
use tetris_duel::types::MatchMode;

/// Input poll / redraw cadence of the interactive loop.
const FRAME_MS: u64 = 16;

/// Synthetic time step of a headless run.
const HEADLESS_STEP_MS: u64 = 100;

fn parse_mode(s: &str) -> Result<MatchMode, String> {
    MatchMode::from_str(s).ok_or_else(|| format!("unknown mode {s:?} (solo, bot, pvp)"))
}

#[derive(Debug, Parser)]
#[command(name = "tetris-duel", about = "Falling-block puzzle: solo, versus the bot, or two players on one keyboard")]
struct Cli {
    #[arg(long, env = "TETRIS_DUEL_MODE", default_value = "solo", value_parser = parse_mode, help = "Match mode: solo, bot, pvp")]
    mode: MatchMode,

    #[arg(long, env = "TETRIS_DUEL_SEED", help = "Piece sequence seed (random if omitted)")]
    seed: Option<u64>,

    #[arg(long, help = "Run without a terminal on synthetic time and print the final frame as JSON")]
    headless: bool,

    #[arg(long, default_value_t = 60_000, help = "Simulated duration of a headless run in milliseconds")]
    duration_ms: u64,

    #[arg(long, help = "Write logs to this file in interactive mode")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logs go to stderr in headless mode and to `--log-file` (if any) in
/// interactive mode, never onto the game screen.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = tracing_subscriber::filter::LevelFilter::from_level(log_level(cli.verbose));

    let stderr_layer = cli.headless.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    let file_layer = match (&cli.log_file, cli.headless) {
        (Some(path), false) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(level)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let seed = seed_or_clock(cli.seed);
    info!(mode = cli.mode.as_str(), seed, headless = cli.headless, "starting");

    if cli.headless {
        return run_headless(cli.mode, seed, cli.duration_ms);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, MatchConfig::new(cli.mode, seed));
    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run_headless(mode: MatchMode, seed: u64, duration_ms: u64) -> Result<()> {
    let mut game = Match::new(MatchConfig::new(mode, seed).with_autoplay_solo(true));
    game.start();

    while game.now_ms() < duration_ms && !game.is_finished() {
        let step = HEADLESS_STEP_MS.min(duration_ms - game.now_ms());
        game.advance(step);
    }

    info!(now_ms = game.now_ms(), outcome = ?game.outcome(), "headless run finished");
    let json = serde_json::to_string_pretty(&game.frame())?;
    println!("{json}");
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: MatchConfig) -> Result<()> {
    let mut game = Match::new(config);
    let view = MatchView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut viewport = Viewport::new(w, h);
    let mut redraw = true;

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        // Catch the virtual clock up to wall time; avoids drift from per-frame rounding.
        let target = started.elapsed().as_millis() as u64;
        game.advance(target.saturating_sub(game.now_ms()));

        if game.take_dirty() || redraw {
            view.render_into(&game.frame(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            redraw = false;
        }

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match map_key(key) {
                Some(InputEvent::Quit) => return Ok(()),
                Some(InputEvent::Control(control)) => {
                    game.control(control);
                }
                Some(InputEvent::Play { slot, command }) => {
                    game.handle(slot, command);
                }
                None => {}
            },
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                redraw = true;
            }
            _ => {}
        }
    }
}
