//! Session lifecycle
//!
//! `Idle -> Running <-> Paused -> Ended -> (reset) -> Idle`. The session owns
//! the current [`GameState`] and the score store; the host calls [`Session::frame`]
//! once per display frame and drains events afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::achievements::Achievement;
use super::difficulty::Difficulty;
use super::state::{Arena, GameEvent, GameState};
use super::tick::{TickInput, TickOutcome, tick};
use crate::consts::MAX_FRAME_DT_MS;
use crate::highscores::Leaderboard;
use crate::persistence::ScoreStore;
use crate::settings::{ShipColor, normalize_player_name};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Ended,
}

/// Parameters that outlive a single run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionConfig {
    pub arena: Arena,
    pub ship: ShipColor,
    /// Base seed; run `n` uses `seed + n`. Random per run when unset.
    pub seed: Option<u64>,
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub final_score: u64,
    pub max_combo: u32,
    pub achievements: Vec<Achievement>,
    pub new_high_score: bool,
    pub elapsed_ms: f64,
}

pub struct Session<S: ScoreStore> {
    store: S,
    config: SessionConfig,
    phase: SessionPhase,
    game: Option<GameState>,
    player_name: String,
    /// Best score as of the start of the current run
    high_score: u64,
    /// Timestamp of the previous frame; None right after start/resume
    last_frame_ms: Option<f64>,
    summary: Option<SessionSummary>,
    runs: u64,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        let mut session = Self {
            store,
            config,
            phase: SessionPhase::Idle,
            game: None,
            player_name: normalize_player_name(""),
            high_score: 0,
            last_frame_ms: None,
            summary: None,
            runs: 0,
        };
        session.refresh_high_score();
        session
    }

    fn refresh_high_score(&mut self) {
        match self.store.load_high_score() {
            Ok(score) => self.high_score = score,
            Err(e) => log::warn!("Could not load high score: {}", e),
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = match self.config.seed {
            Some(base) => base.wrapping_add(self.runs),
            None => rand::rng().random(),
        };
        self.runs += 1;
        seed
    }

    /// Begin a fresh run, discarding any current one
    pub fn start(&mut self, difficulty: Difficulty, player_name: &str) {
        if self.phase == SessionPhase::Running || self.phase == SessionPhase::Paused {
            log::info!("Discarding active run");
        }
        self.refresh_high_score();

        let seed = self.next_seed();
        self.player_name = normalize_player_name(player_name);
        self.game = Some(GameState::new(
            difficulty,
            self.config.arena,
            self.config.ship,
            seed,
        ));
        self.summary = None;
        self.last_frame_ms = None;
        self.phase = SessionPhase::Running;
        log::info!(
            "Run started: {} on {} (seed {})",
            self.player_name,
            difficulty,
            seed
        );
    }

    pub fn pause(&mut self) {
        if self.phase != SessionPhase::Running {
            log::debug!("pause ignored in {:?}", self.phase);
            return;
        }
        self.phase = SessionPhase::Paused;
        log::info!("Paused");
    }

    pub fn resume(&mut self) {
        if self.phase != SessionPhase::Paused {
            log::debug!("resume ignored in {:?}", self.phase);
            return;
        }
        // Paused wall time must not reach the clock
        self.last_frame_ms = None;
        self.phase = SessionPhase::Running;
        log::info!("Resumed");
    }

    /// Abandon the run; nothing is recorded
    pub fn quit(&mut self) {
        if self.phase == SessionPhase::Idle {
            log::debug!("quit ignored while idle");
            return;
        }
        if let Some(game) = &mut self.game {
            game.clear_timers();
        }
        self.game = None;
        self.summary = None;
        self.phase = SessionPhase::Idle;
        log::info!("Run abandoned");
    }

    /// Back to idle after a finished run
    pub fn reset(&mut self) {
        if self.phase != SessionPhase::Ended {
            log::debug!("reset ignored in {:?}", self.phase);
            return;
        }
        self.game = None;
        self.summary = None;
        self.phase = SessionPhase::Idle;
    }

    /// Drive one display frame at wall-clock `timestamp_ms`
    ///
    /// The first frame after start or resume ticks with zero elapsed time.
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let dt = match self.last_frame_ms {
            Some(last) => (timestamp_ms - last).clamp(0.0, MAX_FRAME_DT_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        self.advance(dt, input)
    }

    /// Run one tick with an explicit elapsed time; returns the summary when
    /// this tick ended the run
    pub fn advance(&mut self, dt_ms: f64, input: &TickInput) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let game = self.game.as_mut()?;
        match tick(game, input, dt_ms) {
            TickOutcome::Continue => None,
            TickOutcome::LivesExhausted => Some(self.end()),
        }
    }

    fn end(&mut self) -> SessionSummary {
        self.phase = SessionPhase::Ended;
        self.last_frame_ms = None;

        let (difficulty, final_score, max_combo, achievements, elapsed_ms) = match &mut self.game
        {
            Some(game) => {
                game.clear_timers();
                (
                    game.difficulty,
                    game.score,
                    game.max_combo(),
                    game.achievements.unlocked().to_vec(),
                    game.elapsed_ms(),
                )
            }
            None => (Difficulty::default(), 0, 0, Vec::new(), 0.0),
        };

        if let Err(e) = self
            .store
            .record_session_end(final_score, difficulty, &self.player_name)
        {
            log::warn!("Could not record run: {}", e);
        }

        let new_high_score = final_score > self.high_score;
        if new_high_score {
            self.high_score = final_score;
        }

        let summary = SessionSummary {
            player_name: self.player_name.clone(),
            difficulty,
            final_score,
            max_combo,
            achievements,
            new_high_score,
            elapsed_ms,
        };
        log::info!(
            "Run over: {} scored {} (max combo {}, {} achievements){}",
            summary.player_name,
            summary.final_score,
            summary.max_combo,
            summary.achievements.len(),
            if new_high_score { " - new high score" } else { "" }
        );
        self.summary = Some(summary.clone());
        summary
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game
            .as_mut()
            .map(GameState::drain_events)
            .unwrap_or_default()
    }

    /// Adopt the renderer surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        let arena = Arena::new(width, height);
        self.config.arena = arena;
        if let Some(game) = &mut self.game {
            game.resize(arena);
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Current run, also kept after it ends for the final frame
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Summary of the last finished run
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn leaderboard(&self) -> Leaderboard {
        self.store.load_leaderboard().unwrap_or_else(|e| {
            log::warn!("Could not load leaderboard: {}", e);
            Leaderboard::new()
        })
    }

    pub fn clear_leaderboard(&mut self) {
        match self.store.clear_leaderboard() {
            Ok(()) => log::info!("Leaderboard cleared"),
            Err(e) => log::warn!("Could not clear leaderboard: {}", e),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};
    use crate::sim::difficulty::DifficultyProfile;
    use crate::sim::entity::{Body, Hazard};
    use glam::Vec2;

    const DT: f64 = 16.0;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(42),
            ..Default::default()
        }
    }

    fn started(store: MemoryStore, difficulty: Difficulty) -> Session<MemoryStore> {
        let mut session = Session::new(store, config());
        session.start(difficulty, "Nova");
        quiet(&mut session);
        session
    }

    /// No random hazards or stars
    fn quiet<S: ScoreStore>(session: &mut Session<S>) {
        let game = session.state_mut().unwrap();
        game.profile = DifficultyProfile {
            hazard_rate: 0.0,
            collectible_rate: 0.0,
            ..game.profile
        };
    }

    fn drop_hazard_on_player<S: ScoreStore>(session: &mut Session<S>) {
        let game = session.state_mut().unwrap();
        let id = game.spawner.next_entity_id();
        game.hazards.push(Hazard {
            id,
            body: Body::new(game.player.body.pos, Vec2::splat(30.0), Vec2::ZERO),
            rotation: 0.0,
            rotation_speed: 0.0,
        });
    }

    fn elapsed<S: ScoreStore>(session: &Session<S>) -> f64 {
        session.state().unwrap().elapsed_ms()
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn load_high_score(&self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable("offline"))
        }

        fn record_session_end(
            &mut self,
            _score: u64,
            _difficulty: Difficulty,
            _player_name: &str,
        ) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("offline"))
        }

        fn load_leaderboard(&self) -> Result<Leaderboard, StoreError> {
            Err(StoreError::Unavailable("offline"))
        }

        fn clear_leaderboard(&mut self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline"))
        }
    }

    #[test]
    fn test_easy_run_ends_after_five_hits() {
        let mut session = Session::new(MemoryStore::new(), config());
        session.start(Difficulty::Easy, "   ");
        quiet(&mut session);

        for _ in 0..4 {
            drop_hazard_on_player(&mut session);
            assert!(session.advance(DT, &TickInput::default()).is_none());
        }
        drop_hazard_on_player(&mut session);
        let summary = session.advance(DT, &TickInput::default()).unwrap();

        assert_eq!(summary.player_name, "Pilot");
        assert_eq!(summary.difficulty, Difficulty::Easy);
        assert_eq!(summary.final_score, 0);
        assert_eq!(summary.max_combo, 0);
        assert!(summary.achievements.is_empty());
        assert!(!summary.new_high_score);
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert_eq!(session.summary(), Some(&summary));

        let board = session.leaderboard();
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries[0].name, "Pilot");

        // Ended sessions ignore further frames
        assert!(session.advance(DT, &TickInput::default()).is_none());
    }

    #[test]
    fn test_pause_gates_ticks() {
        let mut session = started(MemoryStore::new(), Difficulty::Medium);
        session.advance(DT, &TickInput::default());
        session.pause();
        assert_eq!(session.phase(), SessionPhase::Paused);

        drop_hazard_on_player(&mut session);
        session.advance(DT, &TickInput::default());
        session.frame(5_000.0, &TickInput::default());
        assert_eq!(elapsed(&session), DT);
        assert_eq!(session.state().unwrap().lives, 3);

        session.resume();
        assert!(session.is_running());
        session.advance(DT, &TickInput::default());
        assert_eq!(session.state().unwrap().lives, 2);
    }

    #[test]
    fn test_frame_delta_real_time_and_rebased() {
        let mut session = started(MemoryStore::new(), Difficulty::Easy);
        let input = TickInput::default();

        session.frame(1_000.0, &input);
        assert_eq!(elapsed(&session), 0.0);
        session.frame(1_016.0, &input);
        assert_eq!(elapsed(&session), 16.0);
        session.frame(2_016.0, &input);
        assert_eq!(elapsed(&session), 1_016.0);

        // Stalls beyond the guard only count up to it
        session.frame(60_000.0, &input);
        assert_eq!(elapsed(&session), 1_016.0 + MAX_FRAME_DT_MS);

        session.pause();
        session.resume();
        session.frame(90_000.0, &input);
        assert_eq!(elapsed(&session), 1_016.0 + MAX_FRAME_DT_MS);
        session.frame(90_010.0, &input);
        assert_eq!(elapsed(&session), 1_026.0 + MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_slow_frames_keep_pace_with_wall_clock() {
        let mut session = started(MemoryStore::new(), Difficulty::Easy);
        let input = TickInput::default();
        for i in 0..=10 {
            session.frame(i as f64 * 250.0, &input);
            assert_eq!(elapsed(&session), i as f64 * 250.0);
        }
    }

    #[test]
    fn test_quit_records_nothing() {
        let mut session = started(MemoryStore::new(), Difficulty::Hard);
        session.state_mut().unwrap().score = 500;
        session.quit();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.state().is_none());
        assert!(session.summary().is_none());
        assert!(session.leaderboard().is_empty());
        assert_eq!(session.store().record.high_score, 0);

        // No-op when idle
        session.quit();
        session.pause();
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_new_high_score_against_start_value() {
        let mut session = started(MemoryStore::with_high_score(5), Difficulty::Hard);
        assert_eq!(session.high_score(), 5);
        {
            let game = session.state_mut().unwrap();
            game.score = 20;
            game.lives = 1;
        }
        drop_hazard_on_player(&mut session);
        let summary = session.advance(DT, &TickInput::default()).unwrap();
        assert!(summary.new_high_score);
        assert_eq!(summary.final_score, 20);
        assert_eq!(session.high_score(), 20);
        assert_eq!(session.store().record.high_score, 20);

        session.start(Difficulty::Hard, "Nova");
        quiet(&mut session);
        session.state_mut().unwrap().lives = 1;
        drop_hazard_on_player(&mut session);
        let summary = session.advance(DT, &TickInput::default()).unwrap();
        assert!(!summary.new_high_score);
    }

    #[test]
    fn test_failing_store_is_not_fatal() {
        let mut session = Session::new(FailingStore, config());
        assert_eq!(session.high_score(), 0);
        session.start(Difficulty::Hard, "Orion");
        quiet(&mut session);
        session.state_mut().unwrap().lives = 1;
        drop_hazard_on_player(&mut session);

        let summary = session.advance(DT, &TickInput::default()).unwrap();
        assert_eq!(summary.player_name, "Orion");
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert!(session.leaderboard().is_empty());
        session.clear_leaderboard();
    }

    #[test]
    fn test_restart_gives_fresh_state() {
        let mut session = started(MemoryStore::new(), Difficulty::Medium);
        let first_seed = session.state().unwrap().seed;
        session.state_mut().unwrap().score = 70;
        session.advance(DT, &TickInput::default());

        session.start(Difficulty::parse_or_default("nightmare"), "Nova");
        let game = session.state().unwrap();
        assert_eq!(game.difficulty, Difficulty::Easy);
        assert_eq!(game.lives, 5);
        assert_eq!(game.score, 0);
        assert_eq!(game.elapsed_ms(), 0.0);
        assert_eq!(game.seed, first_seed + 1);
    }

    #[test]
    fn test_reset_only_after_end() {
        let mut session = started(MemoryStore::new(), Difficulty::Hard);
        session.reset();
        assert_eq!(session.phase(), SessionPhase::Running);

        session.state_mut().unwrap().lives = 1;
        drop_hazard_on_player(&mut session);
        session.advance(DT, &TickInput::default());
        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_resize_updates_arena() {
        let mut session = started(MemoryStore::new(), Difficulty::Easy);
        session.resize(320.0, 240.0);
        let game = session.state().unwrap();
        assert_eq!(game.arena, Arena::new(320.0, 240.0));
        assert!(game.player.body.pos.x + game.player.body.size.x <= 320.0);
        assert_eq!(session.config().arena.width, 320.0);
    }

    #[test]
    fn test_events_drained_once() {
        let mut session = started(MemoryStore::new(), Difficulty::Easy);
        drop_hazard_on_player(&mut session);
        session.advance(DT, &TickInput::default());
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::LifeLost { remaining: 4 }));
        assert!(session.drain_events().is_empty());
    }
}
