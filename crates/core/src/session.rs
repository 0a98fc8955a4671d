//! Session module - one player's complete game
//!
//! Ties together the board, the active/next pieces, the piece queue and the
//! scoring rules, and owns the handles of the session's scheduled work.
//!
//! Phases: `Ready -> Running <-> Paused`, and `Running -> Terminal` when a
//! freshly promoted piece collides at its spawn position. Gameplay commands
//! are accepted only while `Running`; anything else is a no-op reporting
//! `false`.
//!
//! Every method that can lock a piece or change the schedule takes the
//! [`Scheduler`] explicitly. The lock sequence (lock, clear rows, score,
//! promote next, spawn check, re-arm/stop timers) runs inside a single call,
//! so no command can observe it half-done.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::{Piece, Position};
use crate::rng::PieceQueue;
use crate::scheduler::{Scheduler, Task, TaskHandle, TaskKind};
use crate::scoring::apply_line_clear;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{
    Command, PlayerSlot, SessionPhase, AUTOPLAY_INTERVAL_MS, INITIAL_DROP_MS, INITIAL_LEVEL,
};

/// Result of one lock-and-advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub score_gained: u32,
    pub level_up: bool,
    /// The promoted piece collided at spawn; the session is now terminal.
    pub game_over: bool,
}

/// Complete state of one player's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    slot: PlayerSlot,
    board: Board,
    current: Piece,
    position: Position,
    next: Piece,
    queue: PieceQueue,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    phase: SessionPhase,
    automated: bool,
    /// Increments on every spawn; lets the automated player detect a new piece.
    piece_id: u32,
    gravity_task: Option<TaskHandle>,
    autoplay_task: Option<TaskHandle>,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Create a session in the `Ready` phase with fresh current/next pieces.
    pub fn new(slot: PlayerSlot, mut queue: PieceQueue) -> Self {
        let current = queue.next_piece();
        let next = queue.next_piece();
        Self {
            slot,
            board: Board::new(),
            current,
            position: current.spawn_position(),
            next,
            queue,
            score: 0,
            level: INITIAL_LEVEL,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            phase: SessionPhase::Ready,
            automated: false,
            piece_id: 1,
            gravity_task: None,
            autoplay_task: None,
            last_event: None,
        }
    }

    /// Builder: mark the session as driven by the move evaluator.
    pub fn with_automated(mut self, automated: bool) -> Self {
        self.automated = automated;
        self
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    pub fn is_automated(&self) -> bool {
        self.automated
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn next(&self) -> Piece {
        self.next
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

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn gravity_task(&self) -> Option<TaskHandle> {
        self.gravity_task
    }

    pub fn autoplay_task(&self) -> Option<TaskHandle> {
        self.autoplay_task
    }

    /// Whether `handle` is this session's live handle for `kind`.
    ///
    /// Dispatchers check this before acting on a fired task so a callback
    /// from a superseded schedule can never mutate the session.
    pub fn owns_task(&self, kind: TaskKind, handle: TaskHandle) -> bool {
        match kind {
            TaskKind::Gravity => self.gravity_task == Some(handle),
            TaskKind::AutoPlay => self.autoplay_task == Some(handle),
        }
    }

    /// Replace the board contents (fixtures and scripted scenarios).
    ///
    /// Only allowed before the game starts.
    pub fn load_board(&mut self, board: Board) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.board = board;
        true
    }

    /// Start playing.
    ///
    /// `Ready` begins the game; `Paused` resumes; `Terminal` resets and then
    /// begins a new game; `Running` is left untouched.
    pub fn start(&mut self, sched: &mut dyn Scheduler) -> bool {
        match self.phase {
            SessionPhase::Running => false,
            SessionPhase::Paused => self.resume(sched),
            SessionPhase::Terminal => {
                self.reset(sched);
                self.start(sched)
            }
            SessionPhase::Ready => {
                self.phase = SessionPhase::Running;
                self.arm_tasks(sched);
                info!(slot = ?self.slot, automated = self.automated, "session started");
                true
            }
        }
    }

    /// Suspend gravity and automated play.
    pub fn pause(&mut self, sched: &mut dyn Scheduler) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.cancel_tasks(sched);
        self.phase = SessionPhase::Paused;
        true
    }

    /// Resume at the current drop interval; automated play only if flagged.
    pub fn resume(&mut self, sched: &mut dyn Scheduler) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.arm_tasks(sched);
        true
    }

    pub fn toggle_pause(&mut self, sched: &mut dyn Scheduler) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(sched),
            SessionPhase::Paused => self.resume(sched),
            _ => false,
        }
    }

    /// Stop all scheduled work and return to a fresh `Ready` game.
    ///
    /// The piece queue restarts from its beginning, so seats sharing a seed
    /// see the same pieces again after a reset.
    pub fn reset(&mut self, sched: &mut dyn Scheduler) {
        self.cancel_tasks(sched);
        self.board.clear();
        self.score = 0;
        self.level = INITIAL_LEVEL;
        self.lines = 0;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.queue.rewind();
        self.current = self.queue.next_piece();
        self.position = self.current.spawn_position();
        self.next = self.queue.next_piece();
        self.piece_id = self.piece_id.wrapping_add(1);
        self.phase = SessionPhase::Ready;
        self.last_event = None;
    }

    /// Hand input authority to (or take it back from) the move evaluator.
    pub fn set_automated(&mut self, automated: bool, sched: &mut dyn Scheduler) {
        self.automated = automated;
        if self.phase != SessionPhase::Running {
            return;
        }
        if automated {
            self.arm_autoplay(sched);
        } else if let Some(handle) = self.autoplay_task.take() {
            sched.cancel(handle);
        }
    }

    fn arm_tasks(&mut self, sched: &mut dyn Scheduler) {
        self.arm_gravity(sched);
        if self.automated {
            self.arm_autoplay(sched);
        }
    }

    /// Cancel-then-schedule, so at most one gravity task exists.
    fn arm_gravity(&mut self, sched: &mut dyn Scheduler) {
        if let Some(handle) = self.gravity_task.take() {
            sched.cancel(handle);
        }
        let task = Task::new(self.slot, TaskKind::Gravity);
        self.gravity_task = Some(sched.schedule(task, self.drop_interval_ms));
    }

    fn arm_autoplay(&mut self, sched: &mut dyn Scheduler) {
        if let Some(handle) = self.autoplay_task.take() {
            sched.cancel(handle);
        }
        let task = Task::new(self.slot, TaskKind::AutoPlay);
        self.autoplay_task = Some(sched.schedule(task, AUTOPLAY_INTERVAL_MS));
    }

    fn cancel_tasks(&mut self, sched: &mut dyn Scheduler) {
        if let Some(handle) = self.gravity_task.take() {
            sched.cancel(handle);
        }
        if let Some(handle) = self.autoplay_task.take() {
            sched.cancel(handle);
        }
    }

    /// Try to move the active piece; rejected moves leave everything untouched.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        let candidate = self.position.offset(dx, dy);
        if self.board.collides(&self.current, candidate) {
            return false;
        }
        self.position = candidate;
        true
    }

    /// Rotate clockwise in place (no wall kicks).
    pub fn try_rotate(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        let rotated = self.current.rotate_cw();
        if self.board.collides(&rotated, self.position) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Gravity step: move down one row, or lock and advance if blocked.
    pub fn tick(&mut self, sched: &mut dyn Scheduler) -> Option<LockEvent> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        if self.try_move(0, 1) {
            return None;
        }
        Some(self.lock_and_advance(sched))
    }

    /// Drop straight down as far as possible, then lock exactly once.
    pub fn hard_drop(&mut self, sched: &mut dyn Scheduler) -> Option<LockEvent> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        while self.try_move(0, 1) {}
        Some(self.lock_and_advance(sched))
    }

    /// Row the active piece would come to rest on.
    pub fn landing_y(&self) -> i8 {
        let mut pos = self.position;
        while !self.board.collides(&self.current, pos.offset(0, 1)) {
            pos = pos.offset(0, 1);
        }
        pos.y
    }

    /// Apply one input command. Returns whether the session changed.
    pub fn apply_command(&mut self, command: Command, sched: &mut dyn Scheduler) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.try_move(0, 1),
            Command::Rotate => self.try_rotate(),
            Command::HardDrop => self.hard_drop(sched).is_some(),
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn lock_and_advance(&mut self, sched: &mut dyn Scheduler) -> LockEvent {
        self.board.lock(&self.current, self.position);
        let rows = self.board.clear_full_rows().len();

        let progress = apply_line_clear(
            rows,
            self.score,
            self.level,
            self.lines,
            self.drop_interval_ms,
        );
        self.score = progress.score;
        self.level = progress.level;
        self.lines = progress.lines;
        self.drop_interval_ms = progress.drop_interval_ms;

        debug!(
            slot = ?self.slot,
            kind = self.current.kind.as_str(),
            x = self.position.x,
            y = self.position.y,
            rows,
            score = self.score,
            "piece locked"
        );

        if progress.leveled_up {
            info!(slot = ?self.slot, level = self.level, interval_ms = self.drop_interval_ms, "level up");
            self.arm_gravity(sched);
        }

        self.current = self.next;
        self.position = self.current.spawn_position();
        self.next = self.queue.next_piece();
        self.piece_id = self.piece_id.wrapping_add(1);

        let game_over = self.board.collides(&self.current, self.position);
        if game_over {
            self.cancel_tasks(sched);
            self.phase = SessionPhase::Terminal;
            info!(slot = ?self.slot, score = self.score, lines = self.lines, "game over");
        }

        let event = LockEvent {
            rows_cleared: rows as u32,
            score_gained: progress.gained,
            level_up: progress.leveled_up,
            game_over,
        };
        self.last_event = Some(event);
        event
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            slot: self.slot,
            grid: self.board.to_grid(),
            active: ActiveSnapshot::new(self.current, self.position),
            ghost_y: self.landing_y(),
            next: self.next,
            score: self.score,
            level: self.level,
            lines: self.lines,
            drop_interval_ms: self.drop_interval_ms,
            phase: self.phase,
            paused: self.phase == SessionPhase::Paused,
            terminal: self.phase == SessionPhase::Terminal,
            automated: self.automated,
            piece_id: self.piece_id,
        }
    }
}
