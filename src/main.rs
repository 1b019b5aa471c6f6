//! Cosmic Catch headless runner
//!
//! Plays one session with a simple autopilot at a fixed 60 Hz frame rate,
//! records it in the JSON score file and prints the leaderboard.
//!
//! Environment:
//! - `COSMIC_CATCH_SETTINGS`: settings file (default `cosmic_settings.json`)
//! - `COSMIC_CATCH_SCORES`: score file (default `cosmic_scores.json`)

use std::path::PathBuf;

use cosmic_catch::audio::{AudioManager, Tone, ToneSink};
use cosmic_catch::highscores::format_age;
use cosmic_catch::sim::{GameEvent, GameState, Session, SessionSummary, TickInput};
use cosmic_catch::{JsonFileStore, Settings, unix_millis};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much simulated time
const MAX_RUN_MS: f64 = 180_000.0;

/// Logs tones instead of playing them
struct LogSink;

impl ToneSink for LogSink {
    fn schedule(&mut self, tone: Tone) {
        log::trace!(
            "tone {:.0} Hz {:?} for {:.2}s (+{:.2}s) gain {:.2} -> {:.3}",
            tone.frequency,
            tone.waveform,
            tone.duration_s,
            tone.delay_s,
            tone.gain,
            tone.gain_at(tone.duration_s)
        );
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Dodge the closest asteroid bearing down on the ship, otherwise chase
/// the nearest star or power-up
fn autopilot(state: &GameState) -> TickInput {
    let ship = state.player.body.center();
    let half = state.player.body.size.x * 0.5;

    let threat = state
        .hazards
        .iter()
        .map(|h| h.body.center())
        .filter(|c| c.y < ship.y && ship.y - c.y < 200.0 && (c.x - ship.x).abs() < half + 40.0)
        .min_by(|a, b| ship.distance(*a).total_cmp(&ship.distance(*b)));
    if let Some(rock) = threat {
        let away = if rock.x > ship.x { -1.0 } else { 1.0 };
        return TickInput::new(away, 0.0);
    }

    let target = state
        .collectibles
        .iter()
        .map(|c| c.body.center())
        .chain(state.powerups.iter().map(|p| p.body.center()))
        .min_by(|a, b| ship.distance(*a).total_cmp(&ship.distance(*b)));
    match target {
        Some(t) => {
            let dx = t.x - ship.x;
            TickInput::new(dx.signum() * (dx.abs() / 20.0).min(1.0), 0.0)
        }
        None => TickInput::default(),
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::AchievementUnlocked(a) => println!("  * {}", a.name()),
        GameEvent::LifeLost { remaining } => log::info!("Hit! {} lives left", remaining),
        GameEvent::PowerupActivated { kind, refreshed } => {
            log::info!("{} {}", kind.label(), if *refreshed { "refreshed" } else { "on" })
        }
        GameEvent::ComboBroken { length } if *length >= 3 => {
            log::info!("Combo of {} ended", length)
        }
        _ => {}
    }
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("Game over, {}!", summary.player_name);
    println!("  Difficulty: {}", summary.difficulty);
    println!("  Score:      {}", summary.final_score);
    println!("  Max combo:  {}", summary.max_combo);
    println!("  Time:       {:.1}s", summary.elapsed_ms / 1000.0);
    if summary.new_high_score {
        println!("  NEW HIGH SCORE!");
    }
}

fn main() {
    env_logger::init();
    log::info!("Cosmic Catch (headless) starting...");

    let settings = Settings::load(&env_path("COSMIC_CATCH_SETTINGS", "cosmic_settings.json"));
    let store = JsonFileStore::new(env_path("COSMIC_CATCH_SCORES", "cosmic_scores.json"));
    let audio = AudioManager::from_settings(&settings);
    let mut sink = LogSink;

    let mut session = Session::new(store, settings.session_config());
    println!(
        "High score: {} | {} flying {} on {}",
        session.high_score(),
        settings.player_name,
        settings.ship.as_str(),
        settings.difficulty
    );
    println!("Achievements:");
    session.start(settings.difficulty, &settings.player_name);

    let mut now = 0.0;
    let summary = loop {
        let input = session.state().map(autopilot).unwrap_or_default();
        let finished = session.frame(now, &input);

        let events = session.drain_events();
        audio.play_events(&events, &mut sink);
        events.iter().for_each(report);

        if let Some(summary) = finished {
            break Some(summary);
        }
        if now >= MAX_RUN_MS {
            break None;
        }
        now += FRAME_MS;
    };

    match summary {
        Some(summary) => print_summary(&summary),
        None => {
            let score = session.state().map_or(0, |s| s.score);
            println!();
            println!(
                "Still alive after {:.0}s with {} points, quitting",
                MAX_RUN_MS / 1000.0,
                score
            );
            session.quit();
        }
    }

    let board = session.leaderboard();
    if board.is_empty() {
        return;
    }
    let now = unix_millis();
    println!();
    println!("Leaderboard:");
    for (rank, entry) in board.entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<12} {:>6}  {:<6} {}",
            rank + 1,
            entry.name,
            entry.score,
            entry.difficulty.as_str(),
            format_age(now, entry.timestamp)
        );
    }
}
