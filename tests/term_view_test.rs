use tetris_duel::core::{Board, GameSession, PieceQueue};
use tetris_duel::engine::{Match, MatchConfig};
use tetris_duel::term::{FrameBuffer, MatchView, Viewport};
use tetris_duel::types::{Command, MatchMode, PieceKind, PlayerSlot};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let game = Match::new(MatchConfig::new(MatchMode::Solo, 1));
    let view = MatchView::default();

    // Exactly the required size: title row, 22x22 board frame, footer row.
    let vp = view.required_size(1);
    let fb = view.render(&game.frame(), vp);

    assert_eq!(fb.get(0, 1).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 1).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 22).unwrap().ch, '└');
    assert_eq!(fb.get(21, 22).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut session = GameSession::new(PlayerSlot::One, PieceQueue::sequence(&[PieceKind::T]));
    session.load_board(Board::from_rows(&["Z........."]));
    let game = Match::with_sessions(MatchMode::Solo, vec![session]);

    let view = MatchView::default();
    let fb = view.render(&game.frame(), view.required_size(1));

    // Inside the border the board origin is (1, 2); row 19 is 19 rows down.
    let y0 = 2 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_both_seats_and_panels() {
    let mut game = Match::new(MatchConfig::new(MatchMode::HumanVsBot, 5));
    game.start();
    let view = MatchView::default();
    let fb = view.render(&game.frame(), Viewport::new(90, 30));
    let text = screen_text(&fb);

    assert!(text.contains("PLAYER 1"));
    assert!(text.contains("BOT"));
    assert_eq!(text.matches("SCORE").count(), 2);
    assert_eq!(text.matches("NEXT").count(), 2);
    assert!(text.contains("1000ms"));
}

#[test]
fn term_view_shows_phase_banners() {
    let mut game = Match::new(MatchConfig::new(MatchMode::HumanVsHuman, 5));
    let view = MatchView::default();
    let vp = view.required_size(2);

    assert_eq!(screen_text(&view.render(&game.frame(), vp)).matches("PRESS G").count(), 2);

    game.start();
    game.handle(PlayerSlot::One, Command::SoftDrop);
    assert!(!screen_text(&view.render(&game.frame(), vp)).contains("PRESS G"));

    game.toggle_pause();
    assert_eq!(screen_text(&view.render(&game.frame(), vp)).matches("PAUSED").count(), 2);
}

#[test]
fn term_view_announces_winner() {
    let mut loser = GameSession::new(PlayerSlot::One, PieceQueue::sequence(&[PieceKind::O]));
    loser.load_board(Board::from_rows(&["#########."; 18]));
    let winner = GameSession::new(PlayerSlot::Two, PieceQueue::sequence(&[PieceKind::I]));
    let mut game = Match::with_sessions(MatchMode::HumanVsHuman, vec![loser, winner]);
    game.start();
    game.handle(PlayerSlot::One, Command::HardDrop);

    let view = MatchView::default();
    let text = screen_text(&view.render(&game.frame(), view.required_size(2)));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("WINNER"));
    assert!(!text.contains("PAUSED"));
}

#[test]
fn term_view_clips_on_tiny_viewport() {
    let game = Match::new(MatchConfig::new(MatchMode::HumanVsHuman, 1));
    let fb = MatchView::default().render(&game.frame(), Viewport::new(10, 5));
    assert_eq!(fb.width(), 10);
    assert_eq!(fb.height(), 5);
}
