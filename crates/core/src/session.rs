//! Session module - the game state machine
//!
//! One [`Session`] owns the board, the preview queue, the score, both timers and the RNG.
//! It is advanced by [`Session::handle`] (player actions) and [`Session::tick`] (elapsed
//! time from the host loop) and records a [`GameEvent`] for every visible change.
//!
//! Phases: `StartScreen -> Typing -> Falling -> Typing ...`, with `GameOver` reached on a
//! blocked spawn or when the countdown runs out. `Escape` always returns to the start
//! screen with a fresh board.

use crate::board::Board;
use crate::config::SessionConfig;
use crate::error::WordSetError;
use crate::events::{EventSink, GameEvent};
use crate::queue::{PreviewEntry, TypeOutcome, WordQueue};
use crate::rng::SimpleRng;
use crate::scoring::{
    completion_bonus, hard_drop_message, line_clear_message, line_clear_score, rank_for,
    soft_drop_message, DropBonus, MEMORY_BONUS_MESSAGE, NO_MISS_MESSAGE,
};
use crate::shapes::{template, try_rotate, Pivot, Shape};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timer::PeriodicTimer;
use crate::types::{
    Archetype, GameAction, GameOverReason, Phase, RotationDir, ScoreSource, COUNTDOWN_MS,
    DEFAULT_WORD_SET, SPAWN_X, SPAWN_Y,
};
use crate::words::{self, build_word_map, WordEntry, WordMap, WordSets, AVAILABLE};

pub const START_MESSAGE: &str = "GAME START\n[Space]";
pub const RESTART_MESSAGE: &str = "RESTART\n[Esc]";

/// The active falling piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: Archetype,
    pub x: i32,
    pub y: i32,
    pub shape: Shape,
    pub pivot: Pivot,
    pub color: &'static str,
    pub word: WordEntry,
}

impl Piece {
    /// A fresh copy of the archetype template at the spawn anchor.
    pub fn spawn(entry: PreviewEntry) -> Self {
        let t = template(entry.kind);
        Self {
            kind: entry.kind,
            x: SPAWN_X as i32,
            y: SPAWN_Y as i32,
            shape: t.shape(),
            pivot: t.pivot,
            color: t.color,
            word: entry.word,
        }
    }

    pub fn fits(&self, board: &Board, dx: i32, dy: i32) -> bool {
        board.can_move(self.x + dx, self.y + dy, self.shape.cells())
    }
}

fn headline(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::TimeUp => "TIME UP!!",
        GameOverReason::BlockedSpawn => "GAME OVER",
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    word_sets: WordSets,
    word_set: String,
    selected: usize,
    word_map: WordMap,
    board: Board,
    active: Option<Piece>,
    queue: WordQueue,
    phase: Phase,
    score: u32,
    drop_bonus: DropBonus,
    time_left: u32,
    countdown: PeriodicTimer,
    gravity: PeriodicTimer,
    rng: SimpleRng,
    message: Option<String>,
    game_over: Option<GameOverReason>,
    events: Vec<GameEvent>,
}

impl Session {
    /// New session on the start screen, using the built-in word sets.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_word_sets(config, WordSets::builtin())
    }

    /// New session with a caller-provided word-set registry.
    pub fn with_word_sets(config: SessionConfig, word_sets: WordSets) -> Self {
        let mut word_set = config.word_set.clone();
        if !word_sets.contains(&word_set) {
            log::warn!("unknown word set {word_set}, using {DEFAULT_WORD_SET}");
            word_set = DEFAULT_WORD_SET.to_string();
        }
        let selected = Self::selector_index(&word_set);

        let mut session = Self {
            rng: SimpleRng::new(config.seed),
            countdown: PeriodicTimer::new(COUNTDOWN_MS),
            gravity: PeriodicTimer::new(config.gravity_ms),
            time_left: config.time_limit_secs,
            config,
            word_sets,
            word_set,
            selected,
            word_map: WordMap::default(),
            board: Board::new(),
            active: None,
            queue: WordQueue::new(),
            phase: Phase::StartScreen,
            score: 0,
            drop_bonus: DropBonus::new(),
            message: None,
            game_over: None,
            events: Vec::new(),
        };
        session.prepare_start_screen();
        session
    }

    fn selector_index(name: &str) -> usize {
        AVAILABLE
            .iter()
            .position(|&n| n == name)
            .or_else(|| AVAILABLE.iter().position(|&n| n == DEFAULT_WORD_SET))
            .unwrap_or(0)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn drop_bonus(&self) -> u32 {
        self.drop_bonus.level()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access (test setups and benches).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn queue(&self) -> &WordQueue {
        &self.queue
    }

    /// Direct queue access (test setups).
    pub fn queue_mut(&mut self) -> &mut WordQueue {
        &mut self.queue
    }

    pub fn word_set(&self) -> &str {
        &self.word_set
    }

    pub fn word_sets(&self) -> &WordSets {
        &self.word_sets
    }

    pub fn word_map(&self) -> &WordMap {
        &self.word_map
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn gravity_running(&self) -> bool {
        self.gravity.is_running()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Forward every pending event to `sink`.
    pub fn forward_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain(..) {
            sink.emit(event);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // ---------------------------------------------------------------------
    // Word sets
    // ---------------------------------------------------------------------

    /// Select a registered word set and return to the start screen.
    pub fn set_word_set(&mut self, name: &str) -> Result<(), WordSetError> {
        if !self.word_sets.contains(name) {
            log::warn!("unknown word set: {name}");
            return Err(WordSetError::UnknownSet(name.to_string()));
        }
        self.word_set = name.to_string();
        if let Some(i) = AVAILABLE.iter().position(|&n| n == name) {
            self.selected = i;
        }
        self.emit(GameEvent::WordSetChanged {
            name: self.word_set.clone(),
        });
        self.prepare_start_screen();
        Ok(())
    }

    pub fn register_word_set(
        &mut self,
        name: &str,
        words: Vec<WordEntry>,
    ) -> Result<(), WordSetError> {
        self.word_sets.register(name, words)
    }

    /// Register every set of a JSON document; see [`WordSets::load_json`].
    pub fn load_word_sets_json(&mut self, json: &str) -> Result<usize, WordSetError> {
        self.word_sets.load_json(json)
    }

    fn cycle_word_set(&mut self, delta: isize) -> bool {
        if self.phase != Phase::StartScreen {
            return false;
        }
        let n = AVAILABLE.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(n) as usize;
        self.word_set = AVAILABLE[self.selected].to_string();
        self.emit(GameEvent::WordSetChanged {
            name: self.word_set.clone(),
        });
        self.reset(true);
        true
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Wipe all per-game state. The phase is left to the caller.
    fn reset(&mut self, keep_message: bool) {
        self.countdown.cancel();
        self.gravity.cancel();

        self.board.clear();
        self.emit(GameEvent::BoardChanged {
            occupancy: self.board.occupancy(),
        });

        let words = self
            .word_sets
            .random_words(&self.word_set, Archetype::ALL.len(), &mut self.rng);
        self.word_map = build_word_map(&words);

        self.score = 0;
        self.drop_bonus.reset();
        self.emit(GameEvent::ScoreChanged { total: 0 });

        self.time_left = self.config.time_limit_secs;
        self.emit(GameEvent::TimerChanged {
            seconds: self.time_left,
        });

        if !keep_message {
            self.message = None;
            self.emit(GameEvent::ClearMessage);
        }
        self.game_over = None;

        self.active = None;
        self.emit(GameEvent::PieceChanged { piece: None });

        self.queue.clear();
        self.refill_queue();
        self.emit_preview();
    }

    fn prepare_start_screen(&mut self) {
        self.reset(true);
        self.show_message(START_MESSAGE.to_string());
        self.set_phase(Phase::StartScreen);
    }

    fn start_gameplay(&mut self) {
        self.reset(false);
        self.set_phase(Phase::Typing);
        self.countdown.start();
        log::info!(
            "session started (word set {}, {}s)",
            self.word_set,
            self.time_left
        );
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged { phase });
        }
    }

    fn show_message(&mut self, text: String) {
        self.message = Some(text.clone());
        self.emit(GameEvent::Message { text });
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.gravity.cancel();
        self.countdown.cancel();
        self.active = None;
        self.queue.reset_attempt();
        self.game_over = Some(reason);
        self.set_phase(Phase::GameOver);

        self.emit(GameEvent::PieceChanged { piece: None });
        self.emit_preview();

        let rank = rank_for(self.score);
        self.show_message(format!(
            "{}\nRANK: {}\nSCORE: {}\n{}",
            headline(reason),
            rank.as_str(),
            self.score,
            RESTART_MESSAGE
        ));
        self.emit(GameEvent::GameOver {
            reason,
            score: self.score,
            rank: rank.as_str(),
        });
        log::info!("game over ({reason:?}), score {}", self.score);
    }

    // ---------------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------------

    /// Apply a player action. Returns false when it has no effect in the current phase.
    pub fn handle(&mut self, action: GameAction) -> bool {
        if action == GameAction::Escape {
            self.prepare_start_screen();
            return true;
        }

        match self.phase {
            Phase::StartScreen => match action {
                GameAction::CycleWordSetLeft => self.cycle_word_set(-1),
                GameAction::CycleWordSetRight => self.cycle_word_set(1),
                GameAction::Start => {
                    self.start_gameplay();
                    true
                }
                _ => false,
            },
            Phase::Typing => match action {
                GameAction::TypeChar(c) => self.type_char(c),
                _ => false,
            },
            Phase::Falling => match action {
                GameAction::MoveLeft => self.shift(-1),
                GameAction::MoveRight => self.shift(1),
                GameAction::RotateCw => self.rotate(RotationDir::Negative),
                GameAction::RotateCcw => self.rotate(RotationDir::Positive),
                GameAction::SoftDrop => self.soft_drop(),
                GameAction::HardDrop => self.hard_drop(),
                _ => false,
            },
            Phase::GameOver => false,
        }
    }

    fn type_char(&mut self, c: char) -> bool {
        match self.queue.push_char(c) {
            TypeOutcome::Ignored => false,
            TypeOutcome::Rejected | TypeOutcome::Accepted => {
                self.emit_preview();
                true
            }
            TypeOutcome::Completed(done) => {
                let bonus = completion_bonus(done.typed, done.slot, done.had_mistake);
                if bonus.memory {
                    self.bonus_message(MEMORY_BONUS_MESSAGE.to_string(), ScoreSource::Memory);
                }
                if bonus.no_miss {
                    self.bonus_message(NO_MISS_MESSAGE.to_string(), ScoreSource::Type);
                }
                if bonus.total > 0 {
                    self.add_score(bonus.total, bonus.source(done.slot));
                }
                self.spawn(done.entry);
                true
            }
        }
    }

    fn spawn(&mut self, entry: PreviewEntry) {
        self.drop_bonus.reset();
        let piece = Piece::spawn(entry);

        self.refill_queue();
        self.emit_preview();

        if !piece.fits(&self.board, 0, 0) {
            self.end_game(GameOverReason::BlockedSpawn);
            return;
        }

        self.active = Some(piece);
        self.emit_piece();
        self.set_phase(Phase::Falling);
        self.gravity.start();
    }

    fn shift(&mut self, dx: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.fits(&self.board, dx, 0) {
            return false;
        }
        piece.x += dx;
        self.emit_piece();
        true
    }

    fn rotate(&mut self, dir: RotationDir) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let board = &self.board;
        let Some((shape, dx)) = try_rotate(
            &piece.shape,
            piece.pivot,
            piece.kind,
            piece.x,
            piece.y,
            dir,
            |x, y, s| board.can_move(x, y, s.cells()),
        ) else {
            return false;
        };
        piece.shape = shape;
        piece.x += dx;
        self.emit_piece();
        true
    }

    fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.fits(&self.board, 0, 1) {
            return false;
        }
        piece.y += 1;
        self.emit_piece();

        let gained = self.drop_bonus.soft_drop();
        if gained > 0 {
            self.add_score(gained, ScoreSource::Drop);
        }
        if let Some(text) = soft_drop_message(gained) {
            self.bonus_message(text, ScoreSource::Drop);
        }
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        while piece.fits(&self.board, 0, 1) {
            piece.y += 1;
        }
        self.emit_piece();

        let gained = self.drop_bonus.hard_drop();
        if gained > 0 {
            self.add_score(gained, ScoreSource::Drop);
        }
        if let Some(text) = hard_drop_message(gained, self.drop_bonus.level()) {
            self.bonus_message(text, ScoreSource::Drop);
        }
        self.lock_active(true);
        true
    }

    /// Lock the active piece, clear rows, score them and go back to typing.
    ///
    /// Only hard drops announce cleared lines; gravity locks just report the delta.
    fn lock_active(&mut self, announce_clears: bool) {
        self.gravity.cancel();
        let Some(piece) = self.active.take() else {
            return;
        };

        if !self
            .board
            .lock(piece.x, piece.y, piece.shape.cells(), piece.kind)
        {
            log::warn!("lock rejected for {} at ({}, {})", piece.kind.as_str(), piece.x, piece.y);
        }

        let rows = self.board.clear_full_rows();
        self.emit(GameEvent::BoardChanged {
            occupancy: self.board.occupancy(),
        });
        if !rows.is_empty() {
            log::debug!("cleared rows {:?}", rows.as_slice());
            self.emit(GameEvent::RowsCleared {
                rows: rows.to_vec(),
            });
            self.add_score(line_clear_score(rows.len()), ScoreSource::Line);
            if let Some(text) = line_clear_message(rows.len()).filter(|_| announce_clears) {
                self.bonus_message(text, ScoreSource::Line);
            }
        }

        self.drop_bonus.reset();
        self.queue.reset_attempt();
        self.emit(GameEvent::PieceChanged { piece: None });
        self.emit_preview();
        self.set_phase(Phase::Typing);
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Advance both timers by `elapsed_ms`, firing whatever became due.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.countdown.advance(elapsed_ms);
        while self.countdown.poll() {
            self.time_left = self.time_left.saturating_sub(1);
            self.emit(GameEvent::TimerChanged {
                seconds: self.time_left,
            });
            if self.time_left == 0 {
                self.end_game(GameOverReason::TimeUp);
            }
        }

        self.gravity.advance(elapsed_ms);
        while self.gravity.poll() {
            self.gravity_step();
        }
    }

    fn gravity_step(&mut self) {
        let Some(piece) = self.active.as_mut() else {
            self.gravity.cancel();
            return;
        };
        if piece.fits(&self.board, 0, 1) {
            piece.y += 1;
            self.emit_piece();
        } else {
            self.lock_active(false);
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn draw_entry(rng: &mut SimpleRng, word_map: &WordMap) -> PreviewEntry {
        let kind = rng.next_archetype();
        PreviewEntry {
            kind,
            word: word_map.get(kind).clone(),
        }
    }

    fn refill_queue(&mut self) {
        let rng = &mut self.rng;
        let word_map = &self.word_map;
        self.queue.refill(|| Self::draw_entry(rng, word_map));
    }

    fn add_score(&mut self, amount: u32, source: ScoreSource) {
        self.score = self.score.saturating_add(amount);
        self.emit(GameEvent::ScoreDelta { amount, source });
        self.emit(GameEvent::ScoreChanged { total: self.score });
    }

    fn bonus_message(&mut self, text: String, variant: ScoreSource) {
        self.emit(GameEvent::BonusMessage { text, variant });
    }

    fn emit_piece(&mut self) {
        let piece = self.active.as_ref().map(ActiveSnapshot::from);
        self.emit(GameEvent::PieceChanged { piece });
    }

    fn emit_preview(&mut self) {
        self.emit(GameEvent::PreviewChanged {
            entries: self.queue.entries().to_vec(),
            highlight: self.queue.highlight(),
        });
    }

    // ---------------------------------------------------------------------
    // Snapshot
    // ---------------------------------------------------------------------

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            row.copy_from_slice(self.board.row(y));
        }
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.phase = self.phase;
        out.score = self.score;
        out.time_left = self.time_left;
        out.drop_bonus = self.drop_bonus.level();
        out.preview.clear();
        out.preview.extend(self.queue.entries().iter().cloned());
        out.highlight = self.queue.highlight();
        out.buffer.clear();
        out.buffer.push_str(self.queue.buffer());
        out.message.clone_from(&self.message);
        out.word_set.clone_from(&self.word_set);
        out.word_set_label.clear();
        out.word_set_label.push_str(words::label(&self.word_set));
        out.difficulty = words::difficulty(&self.word_set);
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
