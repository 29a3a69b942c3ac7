//! Game state module - the controller that owns one game
//!
//! Ties together grid, pieces, randomizer, gravity, lock delay and scoring. All mutation goes
//! through the methods here; time only moves when the owner calls [`GameState::tick`].
//!
//! At any moment while playing, exactly one of these holds: the gravity clock is running
//! (the piece can fall), the lock delay is active (the piece rests on something), or there
//! is no active piece.

use tracing::{debug, info};

use crate::collision::{can_move, can_move_down, drop_distance, piece_collides};
use crate::config::{ConfigError, EngineConfig};
use crate::gravity::GravityClock;
use crate::grid::Grid;
use crate::lock_delay::{LockDelay, ResetTrigger};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::rotation::try_rotate;
use crate::scoring::{calculate_drop_score, calculate_line_score, LevelCurve};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{
    GameAction, GameStatus, LockEvent, PieceKind, RotateDirection, TopOut, GRID_HEIGHT,
    VISIBLE_TOP,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    level_curve: LevelCurve,
    grid: Grid,
    active: Option<Tetromino>,
    piece_queue: PieceQueue,
    gravity: GravityClock,
    lock_delay: LockDelay,
    status: GameStatus,
    top_out: Option<TopOut>,
    /// Set while the soft drop input is held
    soft_dropping: bool,
    /// Successful spawns since the game started
    pieces_spawned: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
}

impl GameState {
    /// Default rules with a fixed randomizer seed
    pub fn new(seed: u32) -> Self {
        Self::build(EngineConfig::with_seed(seed))
    }

    /// Build a game from a configuration, rejecting invalid tuning
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let piece_queue = match config.seed {
            Some(seed) => PieceQueue::new(seed),
            None => PieceQueue::from_entropy(),
        };
        let level = config.start_level;
        let gravity = GravityClock::new(level);
        let lock_delay = LockDelay::with_limits(
            config.lock_delay_mode,
            config.lock_delay_ms,
            config.move_reset_limit,
        );

        Self {
            level_curve: config.level_curve(),
            config,
            grid: Grid::new(),
            active: None,
            piece_queue,
            gravity,
            lock_delay,
            status: GameStatus::Playing,
            top_out: None,
            soft_dropping: false,
            pieces_spawned: 0,
            last_event: None,
            score: 0,
            level,
            lines: 0,
        }
    }

    /// Reset score, lines, level and grid, then spawn the first piece.
    ///
    /// The randomizer keeps its sequence but opens a fresh bag; use
    /// [`GameState::reset_randomizer`] to reseed it.
    pub fn start_game(&mut self) {
        self.piece_queue.start_new_bag();
        self.grid.clear();
        self.active = None;
        self.status = GameStatus::Playing;
        self.top_out = None;
        self.soft_dropping = false;
        self.pieces_spawned = 0;
        self.last_event = None;
        self.score = 0;
        self.lines = 0;
        self.level = self.config.start_level;

        self.gravity = GravityClock::new(self.level);
        self.lock_delay.cancel();

        info!(level = self.level, seed = self.piece_queue.seed(), "game started");
        self.spawn_next();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    /// How the game ended, once it has
    pub fn top_out(&self) -> Option<TopOut> {
        self.top_out
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn gravity(&self) -> &GravityClock {
        &self.gravity
    }

    pub fn lock_delay(&self) -> &LockDelay {
        &self.lock_delay
    }

    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    /// Replace the grid contents (puzzle setups, replays, tests).
    ///
    /// An active piece that overlaps the new contents is discarded. Otherwise it keeps its
    /// position and its timers are re-derived from the new surroundings.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
        if let Some(active) = self.active {
            if piece_collides(&active, &self.grid) {
                self.active = None;
                self.gravity.stop();
                self.lock_delay.cancel();
            } else {
                self.settle();
            }
        }
    }

    /// Spawn the next piece from the randomizer.
    ///
    /// Any active piece is replaced. Returns false, and ends the game, when the new piece
    /// overlaps occupied cells at its spawn position.
    pub fn spawn_next(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        self.active = None;
        self.gravity.stop();
        self.lock_delay.cancel();

        let kind = self.piece_queue.draw();
        let mut piece = Tetromino::new(kind);
        if piece_collides(&piece, &self.grid) {
            self.game_over(TopOut::BlockOut);
            return false;
        }

        // Drop one row straight away if nothing is in the way.
        if can_move_down(&piece, &self.grid) {
            piece = piece.shifted(0, 1);
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(kind = kind.as_str(), x = piece.x, y = piece.y, "spawned");

        self.settle();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// One voluntary step down, worth one soft drop point
    pub fn move_down(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.add_score(calculate_drop_score(1, false));
        }
        moved
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotateDirection::Cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotateDirection::Ccw)
    }

    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        match try_rotate(&active, direction, &self.grid) {
            Some(outcome) => {
                self.active = Some(outcome.piece);
                self.after_action(ResetTrigger::Rotate);
                true
            }
            None => false,
        }
    }

    /// Speed gravity up by the configured soft drop factor until [`GameState::soft_drop_end`]
    pub fn soft_drop_start(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.soft_dropping = true;
        self.gravity.set_speedup(self.config.soft_drop_factor);
        true
    }

    pub fn soft_drop_end(&mut self) -> bool {
        if !self.soft_dropping {
            return false;
        }
        self.soft_dropping = false;
        self.gravity.set_speedup(1);
        true
    }

    /// Drop the active piece to its landing row and lock it at once.
    ///
    /// Returns the number of cells dropped (two points each).
    pub fn hard_drop(&mut self) -> u32 {
        let Some(active) = self.playable_piece() else {
            return 0;
        };

        let distance = drop_distance(&active, &self.grid);
        self.active = Some(active.shifted(0, distance));
        let cells = distance.max(0) as u32;
        self.commit_lock(calculate_drop_score(cells, true));
        cells
    }

    /// Pause the game. Gravity and lock delay freeze where they are.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        self.gravity.pause();
        debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        self.gravity.resume();
        debug!("resumed");
        true
    }

    /// Reseed the randomizer. `None` draws a fresh seed from system entropy.
    pub fn reset_randomizer(&mut self, seed: Option<u32>) {
        self.piece_queue.reset(seed);
        debug!(seed = self.piece_queue.seed(), "randomizer reset");
    }

    /// The next `n` pieces, in draw order
    pub fn peek_next(&self, n: usize) -> Vec<PieceKind> {
        self.piece_queue.peek_n(n)
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Runs every gravity step that came due, or lets the lock delay run down. Returns true
    /// if the active piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Playing || self.active.is_none() {
            return false;
        }

        if self.lock_delay.is_active() {
            if self.lock_delay.advance(elapsed_ms) {
                debug!("lock delay expired");
                self.commit_lock(0);
                return true;
            }
            return false;
        }

        self.gravity.advance(elapsed_ms);
        let mut changed = false;
        while self.gravity.take_step() {
            if !self.descend() {
                break;
            }
            changed = true;
            if self.soft_dropping {
                self.add_score(calculate_drop_score(1, false));
            }
            if self.lock_delay.is_active() {
                break;
            }
        }
        changed
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::SoftDropStart => self.soft_drop_start(),
            GameAction::SoftDropEnd => self.soft_drop_end(),
            GameAction::HardDrop => {
                let playing = self.playable_piece().is_some();
                self.hard_drop();
                playing
            }
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Restart => {
                self.start_game();
                true
            }
        }
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece.
    ///
    /// Returns false without touching anything unless a piece is in play. A lock-out also
    /// returns false.
    pub fn lock_piece(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.commit_lock(0)
    }

    /// Lock the active piece, crediting `drop_points` only if it lands below the buffer.
    fn commit_lock(&mut self, drop_points: u32) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        self.gravity.stop();
        self.lock_delay.cancel();

        let cells = active.cells();
        debug_assert!(
            cells.iter().all(|&(_, y)| y >= 0),
            "piece locked above the top of the grid"
        );
        if cells.iter().any(|&(_, y)| y < VISIBLE_TOP as i8) {
            self.game_over(TopOut::LockOut);
            return false;
        }

        self.add_score(drop_points);
        let locked = self.grid.lock_cells(&cells, active.kind);
        debug_assert!(locked, "active piece overlapped the grid at lock");

        let cleared = self.grid.clear_full_rows();
        let lines_cleared = cleared.len();

        let level_before = self.level;
        let points = calculate_line_score(lines_cleared, level_before);
        self.add_score(points);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        let level_after = self.level_curve.level_for(self.lines).max(self.level);
        if level_after != self.level {
            self.level = level_after;
            self.gravity.set_level(level_after);
            info!(level = level_after, lines = self.lines, "level up");
        }

        debug!(
            kind = active.kind.as_str(),
            lines = lines_cleared,
            points,
            "locked"
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: lines_cleared as u32,
            cleared_rows: cleared.iter().map(|&row| row as u8).collect(),
            points,
            level_before,
            level_after: self.level,
        });

        self.spawn_next();
        true
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => !can_move_down(piece, &self.grid),
            None => false,
        }
    }

    /// Row the active piece would land on (ghost piece)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + drop_distance(&active, &self.grid))
    }

    /// Check if piece can move in given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(ref piece) => can_move(piece, &self.grid, dx, dy),
            None => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clear();
        out.grid.extend((0..GRID_HEIGHT as usize).map(|y| {
            let mut row = [0u8; crate::types::GRID_WIDTH as usize];
            if let Some(cells) = self.grid.row(y) {
                for (dst, cell) in row.iter_mut().zip(cells) {
                    *dst = cell.map(|k| k.code()).unwrap_or(0);
                }
            }
            row
        }));

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next_queue.clear();
        out.next_queue
            .extend(self.piece_queue.peek_n(self.config.preview_count));
        out.status = self.status;
        out.seed = self.piece_queue.seed();
        out.pieces_spawned = self.pieces_spawned;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.timers = TimersSnapshot {
            gravity_running: self.gravity.is_running(),
            gravity_interval_us: self.gravity.effective_interval_us(),
            lock_delay_active: self.lock_delay.is_active(),
            lock_elapsed_ms: self.lock_delay.elapsed_ms(),
            lock_move_count: self.lock_delay.move_count(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn playable_piece(&self) -> Option<Tetromino> {
        if self.status != GameStatus::Playing {
            return None;
        }
        self.active
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if piece_collides(&moved, &self.grid) {
            return false;
        }

        self.active = Some(moved);
        let trigger = if dy > 0 {
            ResetTrigger::Step
        } else {
            ResetTrigger::Shift
        };
        self.after_action(trigger);
        true
    }

    /// One gravity step. Returns false if the piece could not fall.
    fn descend(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !can_move_down(&active, &self.grid) {
            self.settle();
            return false;
        }
        self.active = Some(active.shifted(0, 1));
        self.settle();
        true
    }

    /// Bookkeeping after a successful move or rotation
    fn after_action(&mut self, trigger: ResetTrigger) {
        if self.is_grounded() && self.lock_delay.is_active() {
            if self.lock_delay.on_action(trigger) {
                debug!("move reset limit reached");
                self.commit_lock(0);
            }
            return;
        }
        self.settle();
    }

    /// Run gravity if the piece can fall, otherwise the lock delay.
    fn settle(&mut self) {
        let Some(active) = self.active else {
            self.gravity.stop();
            self.lock_delay.cancel();
            return;
        };

        if can_move_down(&active, &self.grid) {
            self.lock_delay.cancel();
            if !self.gravity.is_running() {
                self.gravity.start();
            }
        } else {
            self.gravity.stop();
            self.lock_delay.start();
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    fn game_over(&mut self, reason: TopOut) {
        self.status = GameStatus::GameOver;
        self.top_out = Some(reason);
        self.active = None;
        self.soft_dropping = false;
        self.gravity.stop();
        self.lock_delay.cancel();
        info!(
            reason = ?reason,
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game over"
        );
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
