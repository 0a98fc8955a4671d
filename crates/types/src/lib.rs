//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (core rules, move search, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval reduction per level-up |
//! | `DROP_INTERVAL_FLOOR_MS` | 100 | Fastest gravity interval |
//! | `AUTOPLAY_INTERVAL_MS` | 100 | Cadence of automated-play micro-steps |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{Command, MatchMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(MatchMode::from_str("pvp"), Some(MatchMode::HumanVsHuman));
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval of a fresh session (level 1).
pub const INITIAL_DROP_MS: u32 = 1000;

/// Amount the gravity interval shrinks on each level-up.
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Gravity never gets faster than this.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 100;

/// Fixed cadence of the automated-play decision/step cycle.
///
/// Independent of the gravity interval.
pub const AUTOPLAY_INTERVAL_MS: u32 = 100;

/// Level of a fresh session.
pub const INITIAL_LEVEL: u32 = 1;

/// Lines needed per level: a level-up happens once `lines >= level * LINES_PER_LEVEL`.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring, indexed by rows cleared at once, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds.
///
/// The kind doubles as the colour tag stored in locked board cells:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Magenta, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name, also used as the colour tag on screen.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with the piece's colour tag)
pub type Cell = Option<PieceKind>;

/// Gameplay commands delivered by an input source to one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
}

impl Command {
    /// Parse a command name (case-insensitive).
    ///
    /// Unrecognized names yield `None`; callers treat them as no-ops.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "softdrop" | "down" => Some(Command::SoftDrop),
            "rotate" | "up" => Some(Command::Rotate),
            "harddrop" | "drop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
        }
    }
}

/// Which player (control scheme) a command or seat belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerSlot::One),
            1 => Some(PlayerSlot::Two),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Match composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// One session; automated play can be toggled on top of manual control.
    Solo,
    /// Seat one is human, seat two is driven by the move evaluator.
    HumanVsBot,
    /// Two human seats with disjoint control schemes.
    HumanVsHuman,
}

impl MatchMode {
    /// Parse a mode name (case-insensitive), accepting a few common aliases.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "solo" | "single" => Some(MatchMode::Solo),
            "bot" | "battle" | "human-vs-bot" | "vs-bot" => Some(MatchMode::HumanVsBot),
            "pvp" | "versus" | "human-vs-human" => Some(MatchMode::HumanVsHuman),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Solo => "solo",
            MatchMode::HumanVsBot => "human-vs-bot",
            MatchMode::HumanVsHuman => "human-vs-human",
        }
    }

    /// Number of sessions the mode composes.
    pub fn seat_count(&self) -> usize {
        match self {
            MatchMode::Solo => 1,
            MatchMode::HumanVsBot | MatchMode::HumanVsHuman => 2,
        }
    }
}

/// Match-level controls (the UI chrome buttons of a graphical front-end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchControl {
    Start,
    TogglePause,
    Reset,
    ToggleAutoplay,
}

/// Lifecycle of a single game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Post-reset, pre-start.
    Ready,
    Running,
    Paused,
    /// Game over: a freshly spawned piece collided at its spawn position.
    Terminal,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Ready => "ready",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
            SessionPhase::Terminal => "terminal",
        }
    }
}
