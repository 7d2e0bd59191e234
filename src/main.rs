//! Stack Slice headless runner
//!
//! With no arguments, plays an auto-cut session at display cadence and prints
//! the final state as JSON. `--script FILE` replays a JSON command list and
//! prints one frame per advance instead.
//!
//! Options:
//!   --settings FILE   settings JSON (missing file = defaults)
//!   --script FILE     replay commands from FILE
//!   --rounds N        stop autoplay after N successful cuts (default 50)
//!   --tolerance T     auto-cut offset tolerance (default 2)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use stack_slice::consts::FRAME_DT;
use stack_slice::policy::run_frame;
use stack_slice::sim::{GameState, parse_script, run_script};
use stack_slice::{AutoCut, Settings};

/// Upper bound on autoplay frames so a stuck policy can't spin forever
const MAX_FRAMES: u32 = 1_000_000;

struct Args {
    settings: Option<PathBuf>,
    script: Option<PathBuf>,
    rounds: u32,
    tolerance: f32,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        settings: None,
        script: None,
        rounds: 50,
        tolerance: 2.0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = || iter.next().with_context(|| format!("{arg} needs a value"));
        match arg.as_str() {
            "--settings" => args.settings = Some(PathBuf::from(value()?)),
            "--script" => args.script = Some(PathBuf::from(value()?)),
            "--rounds" => args.rounds = value()?.parse().context("--rounds")?,
            "--tolerance" => args.tolerance = value()?.parse().context("--tolerance")?,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Stack Slice (headless) starting...");

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match &args.script {
        Some(path) => replay(settings, path),
        None => autoplay(settings, args.rounds, args.tolerance),
    }
}

fn replay(settings: Settings, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let commands = parse_script(&json).context("parsing script")?;
    log::info!("Replaying {} commands", commands.len());

    let frames = run_script(settings, &commands)?;
    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}

fn autoplay(settings: Settings, rounds: u32, tolerance: f32) -> Result<()> {
    let mut state = GameState::new(settings)?;
    let mut policy = AutoCut::new(tolerance, FRAME_DT);

    let mut frames = 0;
    while state.is_running() && state.height <= rounds && frames < MAX_FRAMES {
        run_frame(&mut state, &mut policy, FRAME_DT);
        frames += 1;
    }

    log::info!(
        "Autoplay stopped after {} frames at height {} (score {})",
        frames,
        state.height,
        state.score()
    );
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
