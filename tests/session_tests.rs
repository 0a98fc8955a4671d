//! Session tests - lifecycle, gravity, locking and scoring through the public API

use tetris_duel::core::{
    Board, GameSession, PieceQueue, Position, Scheduler, Task, TaskHandle, VirtualClock,
};
use tetris_duel::types::{Command, PieceKind, PlayerSlot, SessionPhase};

fn running(kinds: &[PieceKind]) -> (GameSession, VirtualClock) {
    let mut clock = VirtualClock::new();
    let mut session = GameSession::new(PlayerSlot::One, PieceQueue::sequence(kinds));
    assert!(session.start(&mut clock));
    (session, clock)
}

fn running_on(board: Board, kinds: &[PieceKind]) -> (GameSession, VirtualClock) {
    let mut clock = VirtualClock::new();
    let mut session = GameSession::new(PlayerSlot::One, PieceQueue::sequence(kinds));
    assert!(session.load_board(board));
    assert!(session.start(&mut clock));
    (session, clock)
}

#[test]
fn test_o_falls_eighteen_rows_then_locks() {
    let (mut session, mut clock) = running(&[PieceKind::O]);
    assert_eq!(session.position(), Position::new(4, 0));

    for _ in 0..18 {
        assert!(session.try_move(0, 1));
    }
    assert_eq!(session.position().y, 18);
    assert!(!session.try_move(0, 1));

    let event = session.tick(&mut clock).expect("blocked tick locks");
    assert_eq!(event.rows_cleared, 0);
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(session.board().get(x, y), Some(Some(PieceKind::O)));
    }
}

#[test]
fn test_completing_bottom_row_scores_one_line() {
    // Bottom row full except columns 4-5, where the O lands.
    let board = Board::from_rows(&[
        "..........",
        "####..####",
    ]);
    let (mut session, mut clock) = running_on(board, &[PieceKind::O]);

    let event = session.hard_drop(&mut clock).unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.score_gained, 100);
    assert_eq!(session.score(), 100);
    assert_eq!(session.lines(), 1);
    // Row 18 of the O survives and drops into row 19.
    assert_eq!(session.board().get(4, 19), Some(Some(PieceKind::O)));
    assert_eq!(session.board().get(0, 19), Some(None));
}

#[test]
fn test_hard_drop_lands_on_stack() {
    let board = Board::from_rows(&["....#.....", "....#....."]);
    let (mut session, mut clock) = running_on(board, &[PieceKind::T, PieceKind::I]);
    assert_eq!(session.landing_y(), 16);

    session.apply_command(Command::HardDrop, &mut clock);
    // Stem at (5, 16), bar across columns 4-6 of row 17.
    assert_eq!(session.board().get(5, 16), Some(Some(PieceKind::T)));
    assert_eq!(session.board().get(4, 17), Some(Some(PieceKind::T)));
    assert_eq!(session.current().kind, PieceKind::I);
}

#[test]
fn test_lateral_moves_never_lock() {
    let (mut session, mut clock) = running(&[PieceKind::T]);
    while session.try_move(-1, 0) {}
    assert_eq!(session.position().x, 0);
    assert!(!session.apply_command(Command::MoveLeft, &mut clock));
    assert_eq!(session.piece_id(), 1);
    assert!(session.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_spawn_collision_ends_game() {
    // Rows 2..=19 filled except the last column; the first piece locks in rows 0-1.
    let board = Board::from_rows(&["#########."; 18]);
    let (mut session, mut clock) = running_on(board, &[PieceKind::O]);

    let event = session.tick(&mut clock).unwrap();
    assert!(event.game_over);
    assert_eq!(session.phase(), SessionPhase::Terminal);
    assert_eq!(clock.pending(), 0);

    let before = session.board().clone();
    assert!(session.tick(&mut clock).is_none());
    assert!(session.hard_drop(&mut clock).is_none());
    assert!(!session.try_move(1, 0));
    assert_eq!(session.board(), &before);
}

#[test]
fn test_start_after_game_over_begins_fresh_game() {
    let board = Board::from_rows(&["#########."; 18]);
    let (mut session, mut clock) = running_on(board, &[PieceKind::O]);
    session.hard_drop(&mut clock);
    assert!(session.is_terminal());

    assert!(session.start(&mut clock));
    assert!(session.is_running());
    assert_eq!(session.board().max_height(), 0);
    assert_eq!(session.score(), 0);
    assert!(session.gravity_task().is_some());
}

#[test]
fn test_gravity_task_drives_tick() {
    let (mut session, mut clock) = running(&[PieceKind::I]);
    let handle = session.gravity_task().unwrap();

    let (fired, task) = clock.pop_due(1_000).unwrap();
    assert_eq!(fired, handle);
    assert!(session.owns_task(task.kind, fired));
    session.tick(&mut clock);
    assert_eq!(session.position().y, 1);
}

#[test]
fn test_reset_cancels_outstanding_tasks() {
    let mut clock = VirtualClock::new();
    let mut session =
        GameSession::new(PlayerSlot::One, PieceQueue::random(5)).with_automated(true);
    session.start(&mut clock);
    let gravity = session.gravity_task().unwrap();
    let autoplay = session.autoplay_task().unwrap();

    session.reset(&mut clock);
    assert!(!clock.is_scheduled(gravity));
    assert!(!clock.is_scheduled(autoplay));
    assert_eq!(clock.pop_due(10_000), None);
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[test]
fn test_toggle_pause_round_trip() {
    let (mut session, mut clock) = running(&[PieceKind::S]);
    assert!(session.toggle_pause(&mut clock));
    assert!(session.is_paused());
    assert_eq!(clock.pending(), 0);
    assert!(session.toggle_pause(&mut clock));
    assert!(session.is_running());
    assert_eq!(clock.interval_of(session.gravity_task().unwrap()), Some(1000));

    // Starting a paused session resumes it.
    session.pause(&mut clock);
    assert!(session.start(&mut clock));
    assert!(session.is_running());
}

#[test]
fn test_snapshot_reflects_state() {
    let (mut session, mut clock) = running(&[PieceKind::L, PieceKind::Z]);
    session.pause(&mut clock);
    let snap = session.snapshot();

    assert_eq!(snap.active.kind, PieceKind::L);
    assert_eq!(snap.next.kind, PieceKind::Z);
    assert_eq!(snap.ghost_y, 18);
    assert!(snap.paused);
    assert!(!snap.terminal);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.drop_interval_ms, 1000);
    assert_eq!(snap.filled_cells(), 0);
}

#[test]
fn test_custom_scheduler_receives_requests() {
    #[derive(Default)]
    struct Recorder {
        inner: VirtualClock,
        scheduled: Vec<u32>,
        cancelled: usize,
    }
    impl Scheduler for Recorder {
        fn schedule(&mut self, task: Task, interval_ms: u32) -> TaskHandle {
            self.scheduled.push(interval_ms);
            self.inner.schedule(task, interval_ms)
        }
        fn cancel(&mut self, handle: TaskHandle) {
            self.cancelled += 1;
            self.inner.cancel(handle);
        }
    }

    let mut rec = Recorder::default();
    let mut session =
        GameSession::new(PlayerSlot::Two, PieceQueue::random(1)).with_automated(true);
    session.start(&mut rec);
    assert_eq!(rec.scheduled, vec![1000, 100]);
    session.pause(&mut rec);
    assert_eq!(rec.cancelled, 2);
    assert_eq!(rec.inner.pending(), 0);
}
