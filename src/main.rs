//! Emoji Drop headless runner
//!
//! Plays one round at a fixed frame rate with a simple autoplay tapper, then
//! updates the best score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use emoji_drop::sim::{DropKind, GameEvent, GameState, RoundPhase};
use emoji_drop::{BestScore, Engine, Tuning};

/// Longest frame the runner will feed the engine
const MAX_FRAME_DT: f32 = 0.1;
/// Safety stop for rounds stretched by time bonuses
const MAX_ROUND_SECONDS: f32 = 600.0;

#[derive(Debug, Parser)]
#[command(name = "emoji-drop", version, about = "Play a headless Emoji Drop round")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Round length in seconds (defaults to the tuning value)
    #[arg(long)]
    seconds: Option<u32>,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Directory holding the best score file
    #[arg(long, default_value = ".")]
    best_dir: PathBuf,
    /// Print every event as a JSON line on stdout
    #[arg(long)]
    events_json: bool,
    /// Average taps per second made by the autoplay
    #[arg(long, default_value_t = 4.0)]
    taps_per_second: f32,
}

/// Pick a drop worth tapping: rockets when the field is full, then power-ups,
/// then the lowest visible normal. Bombs are never chosen.
fn choose_target(state: &GameState) -> Option<u32> {
    let visible = || state.drops.iter().filter(|d| d.pos.y >= 0.0);
    let normals = visible().filter(|d| d.kind.is_normal()).count();

    if normals >= 5 {
        if let Some(rocket) = visible().find(|d| d.kind == DropKind::Rocket) {
            return Some(rocket.id);
        }
    }
    if let Some(power) = visible().find(|d| {
        matches!(
            d.kind,
            DropKind::Multiplier | DropKind::Freeze | DropKind::TimeBonus
        )
    }) {
        return Some(power.id);
    }
    visible()
        .filter(|d| d.kind.is_normal())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|d| d.id)
}

fn report(event: &GameEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        GameEvent::ScoreChanged { .. } => log::debug!("{:?}", event),
        _ => log::info!("{:?}", event),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Emoji Drop starting with seed {}", seed);

    let mut engine = Engine::new(tuning, seed).context("invalid tuning")?;
    engine.init();
    match args.seconds {
        Some(seconds) => engine.start(seconds),
        None => engine.start_default(),
    }

    let dt = (1.0 / args.fps.max(1) as f32).min(MAX_FRAME_DT);
    let tap_chance = (args.taps_per_second * dt).clamp(0.0, 1.0) as f64;
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let mut elapsed = 0.0f32;
    let mut final_score = None;

    while final_score.is_none() {
        engine.tick(dt);
        elapsed += dt;

        if engine.phase() == RoundPhase::Running && player.random_bool(tap_chance) {
            if let Some(id) = choose_target(engine.state()) {
                engine.handle_tap(id);
            }
        }

        for event in engine.drain_events() {
            report(&event, args.events_json)?;
            if let GameEvent::RoundEnded { final_score: score } = event {
                final_score = Some(score);
            }
        }

        if elapsed > MAX_ROUND_SECONDS {
            log::warn!("Round exceeded {}s, stopping", MAX_ROUND_SECONDS);
            final_score = Some(engine.score());
        }
    }
    engine.stop();

    let score = final_score.unwrap_or_default();
    let mut best = BestScore::load(&args.best_dir);
    let new_record = best.record(score);
    if new_record {
        best.save(&args.best_dir)
            .with_context(|| format!("saving best score to {}", args.best_dir.display()))?;
    }

    println!(
        "Score: {}  Best: {}{}",
        score,
        best.best_score,
        if new_record { "  (new record!)" } else { "" }
    );
    Ok(())
}
