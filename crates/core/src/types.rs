use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct UnitId;
}

/// Grid coordinate. `Display`/`FromStr` use the `x-y` key form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cardinal neighbours in search order: up, down, right, left.
    pub fn neighbors(self) -> [Pos; 4] {
        Direction::SEARCH_ORDER.map(|direction| self.step(direction))
    }

    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("position key '{0}' is not of the form x-y")]
pub struct ParsePosError(String);

impl FromStr for Pos {
    type Err = ParsePosError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePosError(key.to_string());
        // The separator is the first '-' that follows a digit; any other '-' is a sign.
        let bytes = key.as_bytes();
        let split = (1..bytes.len())
            .find(|&i| bytes[i] == b'-' && bytes[i - 1].is_ascii_digit())
            .ok_or_else(malformed)?;
        let x = key[..split].parse().map_err(|_| malformed())?;
        let y = key[split + 1..].parse().map_err(|_| malformed())?;
        Ok(Pos { x, y })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    /// Direction of a single cardinal step from `from` to `to`, if they are adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Direction> {
        Direction::SEARCH_ORDER.into_iter().find(|direction| from.step(*direction) == to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Move,
    Attack,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    Ally,
    Enemy,
}

/// Inbound action primitives shared by human input and the AI planner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Select(Pos),
    Move(Pos),
    SetPhase(Phase),
    Attack(Pos),
    EndTurn,
    Reset,
    AiTurn { player: String },
}

/// Why an action was absorbed as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    GameOver,
    NoUnitSelected,
    WrongPhase,
    InvalidPhase,
    NotActivePlayerUnit,
    NoMovesLeft,
    NotAdjacent,
    Occupied,
    OffGrid,
    NoEnemyAtTarget,
    SelfTarget,
    AttackAlreadyUsed,
    OutOfRange,
    NotActivePlayer,
    NotAiPlayer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    UnitSelected { unit: UnitId },
    PhaseChanged { phase: Phase },
    UnitMoved { unit: UnitId, from: Pos, to: Pos, dropped_tail: Option<Pos> },
    UnitAttacked { attacker: UnitId, target: UnitId, damage: u32 },
    UnitDestroyed { unit: UnitId },
    PlayerEliminated { player: String },
    TurnEnded { turn: u64 },
    GameOver { winner: String },
    GameReset,
}
