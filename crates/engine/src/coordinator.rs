//! Match coordinator: one or two sessions, one clock, one outcome.
//!
//! The coordinator owns the [`VirtualClock`], routes human commands to the
//! right seat, dispatches fired tasks (gravity and autoplay), and decides when
//! the match is over. It never reaches into a session's fields; it only calls
//! the session's public operations and reads its phase afterwards.

use serde::Serialize;
use tracing::{debug, info};

use tetris_duel_core::types::{Command, MatchControl, MatchMode, PlayerSlot};
use tetris_duel_core::{
    GameSession, PieceQueue, SessionSnapshot, Task, TaskHandle, TaskKind, VirtualClock,
};

use crate::autoplay::AutoPilot;

/// How to build a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub mode: MatchMode,
    /// Seed of every seat's piece queue; both seats see the same pieces.
    pub seed: u64,
    /// Start seat one under automated control (headless solo runs).
    pub autoplay_solo: bool,
}

impl MatchConfig {
    pub fn new(mode: MatchMode, seed: u64) -> Self {
        Self {
            mode,
            seed,
            autoplay_solo: false,
        }
    }

    pub fn with_autoplay_solo(mut self, on: bool) -> Self {
        self.autoplay_solo = on;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(MatchMode::Solo, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchOutcome {
    InProgress,
    /// `winner` is `None` for a solo game over.
    Finished { winner: Option<PlayerSlot> },
}

/// Render-sink payload for the whole match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFrame {
    pub mode: MatchMode,
    pub outcome: MatchOutcome,
    pub now_ms: u64,
    pub seats: Vec<SessionSnapshot>,
}

#[derive(Debug, Clone)]
struct Seat {
    session: GameSession,
    pilot: AutoPilot,
}

#[derive(Debug, Clone)]
pub struct Match {
    mode: MatchMode,
    seats: Vec<Seat>,
    clock: VirtualClock,
    outcome: MatchOutcome,
    dirty: bool,
}

fn automated_from_start(mode: MatchMode, slot: PlayerSlot, autoplay_solo: bool) -> bool {
    match mode {
        MatchMode::Solo => autoplay_solo,
        MatchMode::HumanVsBot => slot == PlayerSlot::Two,
        MatchMode::HumanVsHuman => false,
    }
}

impl Match {
    pub fn new(config: MatchConfig) -> Self {
        let sessions = (0..config.mode.seat_count())
            .filter_map(PlayerSlot::from_index)
            .map(|slot| {
                GameSession::new(slot, PieceQueue::random(config.seed))
                    .with_automated(automated_from_start(config.mode, slot, config.autoplay_solo))
            })
            .collect();
        Self::with_sessions(config.mode, sessions)
    }

    /// Build a match around prepared sessions (scripted queues, loaded boards).
    ///
    /// Seats are ordered by slot; a repeated slot keeps its first session.
    /// Extra sessions beyond the mode's seat count are dropped. In
    /// human-vs-bot mode seat two is always automated.
    pub fn with_sessions(mode: MatchMode, mut sessions: Vec<GameSession>) -> Self {
        sessions.sort_by_key(|s| s.slot().index());
        sessions.dedup_by_key(|s| s.slot());
        let seats = sessions
            .into_iter()
            .take(mode.seat_count())
            .map(|session| {
                let session = if mode == MatchMode::HumanVsBot && session.slot() == PlayerSlot::Two {
                    session.with_automated(true)
                } else {
                    session
                };
                Seat {
                    session,
                    pilot: AutoPilot::new(),
                }
            })
            .collect();
        Self {
            mode,
            seats,
            clock: VirtualClock::new(),
            outcome: MatchOutcome::InProgress,
            dirty: true,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Finished { .. })
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn session(&self, slot: PlayerSlot) -> Option<&GameSession> {
        self.seat_index(slot).map(|i| &self.seats[i].session)
    }

    fn seat_index(&self, slot: PlayerSlot) -> Option<usize> {
        self.seats.iter().position(|s| s.session.slot() == slot)
    }

    /// Seat index that receives commands from control scheme `slot`.
    pub fn route(&self, slot: PlayerSlot) -> usize {
        match self.mode {
            MatchMode::HumanVsHuman => slot.index(),
            MatchMode::Solo | MatchMode::HumanVsBot => 0,
        }
    }

    /// Forward a gameplay command. Returns whether anything changed.
    ///
    /// Ignored once the match is finished, for automated seats, and for
    /// seats that are not running.
    pub fn handle(&mut self, slot: PlayerSlot, command: Command) -> bool {
        if self.is_finished() {
            return false;
        }
        let index = self.route(slot);
        let Some(seat) = self.seats.get_mut(index) else {
            return false;
        };
        if seat.session.is_automated() || !seat.session.is_running() {
            return false;
        }
        let changed = seat.session.apply_command(command, &mut self.clock);
        if changed {
            self.dirty = true;
            self.update_outcome();
        }
        changed
    }

    pub fn control(&mut self, control: MatchControl) -> bool {
        match control {
            MatchControl::Start => self.start(),
            MatchControl::TogglePause => self.toggle_pause(),
            MatchControl::Reset => {
                self.reset();
                true
            }
            MatchControl::ToggleAutoplay => self.toggle_autoplay(),
        }
    }

    /// Start every seat. A finished match is reset first; paused seats resume.
    pub fn start(&mut self) -> bool {
        if self.is_finished() {
            self.reset();
        }
        let mut changed = false;
        for seat in &mut self.seats {
            changed |= seat.session.start(&mut self.clock);
        }
        if changed {
            info!(mode = self.mode.as_str(), "match started");
            self.dirty = true;
        }
        changed
    }

    /// Pause every running seat, or resume every paused one.
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let any_running = self.seats.iter().any(|s| s.session.is_running());
        let mut changed = false;
        for seat in &mut self.seats {
            changed |= if any_running {
                seat.session.pause(&mut self.clock)
            } else {
                seat.session.resume(&mut self.clock)
            };
        }
        self.dirty |= changed;
        changed
    }

    /// Stop all scheduled work and return every seat to `Ready`.
    pub fn reset(&mut self) {
        for seat in &mut self.seats {
            seat.session.reset(&mut self.clock);
            seat.pilot.clear();
        }
        self.outcome = MatchOutcome::InProgress;
        self.dirty = true;
        debug!(mode = self.mode.as_str(), "match reset");
    }

    /// Hand solo control to the evaluator or take it back.
    pub fn toggle_autoplay(&mut self) -> bool {
        if self.mode != MatchMode::Solo {
            return false;
        }
        let Some(seat) = self.seats.first_mut() else {
            return false;
        };
        let on = !seat.session.is_automated();
        seat.session.set_automated(on, &mut self.clock);
        seat.pilot.clear();
        self.dirty = true;
        info!(on, "autoplay toggled");
        true
    }

    /// Move time forward, dispatching every task that falls due on the way.
    ///
    /// Tasks fire one at a time in due order, so each one sees the effects of
    /// the previous (including cancellations).
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.clock.now_ms().saturating_add(elapsed_ms);
        while let Some((handle, task)) = self.clock.pop_due(until) {
            self.dispatch(handle, task);
        }
    }

    fn dispatch(&mut self, handle: TaskHandle, task: Task) {
        let Some(index) = self.seat_index(task.slot) else {
            return;
        };
        let seat = &mut self.seats[index];
        if !seat.session.owns_task(task.kind, handle) {
            return;
        }
        match task.kind {
            TaskKind::Gravity => {
                seat.session.tick(&mut self.clock);
            }
            TaskKind::AutoPlay => {
                seat.pilot.step(&mut seat.session, &mut self.clock);
            }
        }
        self.dirty = true;
        self.update_outcome();
    }

    fn update_outcome(&mut self) {
        if self.is_finished() {
            return;
        }
        if !self.seats.iter().any(|s| s.session.is_terminal()) {
            return;
        }
        let mut survivors = self.seats.iter().filter(|s| !s.session.is_terminal());
        let winner = match (survivors.next(), survivors.next()) {
            (None, _) => None,
            (Some(seat), None) => Some(seat.session.slot()),
            (Some(_), Some(_)) => return,
        };
        self.outcome = MatchOutcome::Finished { winner };
        for seat in &mut self.seats {
            seat.session.pause(&mut self.clock);
        }
        info!(mode = self.mode.as_str(), ?winner, "match finished");
    }

    pub fn frame(&self) -> MatchFrame {
        MatchFrame {
            mode: self.mode,
            outcome: self.outcome,
            now_ms: self.clock.now_ms(),
            seats: self.seats.iter().map(|s| s.session.snapshot()).collect(),
        }
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
