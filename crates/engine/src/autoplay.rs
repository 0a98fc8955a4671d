//! Automated player: turns a [`Placement`] into session commands.
//!
//! The pilot plans once per spawned piece and then performs exactly one
//! micro-step per autoplay task: rotate, then shift one column, then hard
//! drop. Lateral travel is therefore visible cell by cell.

use tracing::trace;

use tetris_duel_core::{GameSession, Scheduler};

use crate::evaluator::{best_placement, Placement};

/// What a single autoplay step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Rotate { ok: bool },
    Shift { dx: i8, ok: bool },
    HardDrop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Plan {
    piece_id: u32,
    target: Option<Placement>,
    rotations_left: u8,
    /// Set once a shift is rejected; the piece is dropped where it is.
    shift_blocked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AutoPilot {
    plan: Option<Plan>,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of the current plan, if one has been made.
    pub fn target(&self) -> Option<Placement> {
        self.plan.and_then(|p| p.target)
    }

    /// Forget the current plan (used on reset).
    pub fn clear(&mut self) {
        self.plan = None;
    }

    /// Perform one micro-step on `session`. `None` if the session is not running.
    pub fn step(&mut self, session: &mut GameSession, sched: &mut dyn Scheduler) -> Option<Step> {
        if !session.is_running() {
            return None;
        }

        let piece_id = session.piece_id();
        let plan = match self.plan {
            Some(plan) if plan.piece_id == piece_id => plan,
            _ => {
                let target = best_placement(session.board(), &session.current(), session.position().y);
                trace!(slot = ?session.slot(), piece_id, ?target, "autopilot planned");
                Plan {
                    piece_id,
                    target,
                    rotations_left: target.map_or(0, |t| t.rotations),
                    shift_blocked: false,
                }
            }
        };
        let (plan, step) = Self::advance(plan, session, sched);
        self.plan = Some(plan);
        Some(step)
    }

    fn advance(mut plan: Plan, session: &mut GameSession, sched: &mut dyn Scheduler) -> (Plan, Step) {
        let Some(target) = plan.target else {
            session.hard_drop(sched);
            return (plan, Step::HardDrop);
        };

        if plan.rotations_left > 0 {
            let ok = session.try_rotate();
            plan.rotations_left = if ok { plan.rotations_left - 1 } else { 0 };
            return (plan, Step::Rotate { ok });
        }

        let dx = (target.x - session.position().x).signum();
        if dx != 0 && !plan.shift_blocked {
            let ok = session.try_move(dx, 0);
            plan.shift_blocked = !ok;
            return (plan, Step::Shift { dx, ok });
        }

        session.hard_drop(sched);
        (plan, Step::HardDrop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_duel_core::types::{PieceKind, PlayerSlot};
    use tetris_duel_core::{PieceQueue, VirtualClock};

    fn session(kinds: &[PieceKind]) -> (GameSession, VirtualClock) {
        let mut clock = VirtualClock::new();
        let mut s = GameSession::new(PlayerSlot::One, PieceQueue::sequence(kinds)).with_automated(true);
        s.start(&mut clock);
        (s, clock)
    }

    #[test]
    fn centred_i_drops_without_moving() {
        let (mut s, mut clock) = session(&[PieceKind::I]);
        let mut pilot = AutoPilot::new();
        assert_eq!(pilot.step(&mut s, &mut clock), Some(Step::HardDrop));
        assert_eq!(s.piece_id(), 2);
        assert_eq!(s.board().column_height(3), 1);
        assert_eq!(s.board().column_height(6), 1);
    }

    #[test]
    fn walks_one_column_per_step() {
        // Well at column 9 pulls a vertical I to x=7 (spawn x=3).
        let mut clock = VirtualClock::new();
        let mut s = GameSession::new(PlayerSlot::One, PieceQueue::sequence(&[PieceKind::I]))
            .with_automated(true);
        s.load_board(tetris_duel_core::Board::from_rows(&["#########."]));
        s.start(&mut clock);

        let mut pilot = AutoPilot::new();
        assert_eq!(pilot.step(&mut s, &mut clock), Some(Step::Rotate { ok: true }));
        for x in 4..=7 {
            assert_eq!(pilot.step(&mut s, &mut clock), Some(Step::Shift { dx: 1, ok: true }));
            assert_eq!(s.position().x, x);
        }
        assert_eq!(pilot.step(&mut s, &mut clock), Some(Step::HardDrop));
        assert_eq!(s.lines(), 1);
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn idle_when_not_running() {
        let (mut s, mut clock) = session(&[PieceKind::T]);
        s.pause(&mut clock);
        let mut pilot = AutoPilot::new();
        assert_eq!(pilot.step(&mut s, &mut clock), None);
        assert!(pilot.target().is_none());
    }

    #[test]
    fn replans_for_each_piece() {
        let (mut s, mut clock) = session(&[PieceKind::O, PieceKind::T]);
        let mut pilot = AutoPilot::new();
        while s.piece_id() == 1 {
            pilot.step(&mut s, &mut clock);
        }
        pilot.step(&mut s, &mut clock);
        assert_eq!(s.current().kind, PieceKind::T);
        assert!(pilot.target().is_some());
        assert_eq!(pilot.plan.map(|p| p.piece_id), Some(2));
    }
}
