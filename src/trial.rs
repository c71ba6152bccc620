use crate::error::{CcResult, CoConError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum ResponseSelection {
    None,
    Conditional,
}

impl ResponseSelection {
    pub fn parse(s: &str) -> CcResult<Self> {
        Self::from_str(s.trim()).map_err(|_| CoConError::UnknownMode(s.to_string()))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum Conflict {
    Neutral,
    Congruent,
    Incongruent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Yellow,
    Blue,
    Black,
}

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::White => (255, 255, 255),
            Self::Red => (255, 85, 54),
            Self::Yellow => (255, 235, 59),
            Self::Blue => (33, 150, 243),
            Self::Black => (0, 0, 0),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Global,
    Local,
}

/// Keys a participant may press, plus `Up` which only exists as the
/// orientation of a 180° stimulus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Down,
    Right,
    Left,
    Up,
}

/// Keys accepted while a stimulus is on screen.
pub const RESPONSE_KEYS: [Direction; 3] = [Direction::Down, Direction::Right, Direction::Left];

/// Stimulus rotation. Only four orientations exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Angle {
    Left,
    Down,
    Right,
    Up,
}

impl Angle {
    pub const ALL: [Angle; 4] = [Angle::Left, Angle::Down, Angle::Right, Angle::Up];
    pub const RESPONSIVE: [Angle; 3] = [Angle::Left, Angle::Down, Angle::Right];

    pub fn degrees(&self) -> i16 {
        match self {
            Self::Left => -90,
            Self::Down => 0,
            Self::Right => 90,
            Self::Up => 180,
        }
    }

    pub fn orientation(&self) -> Direction {
        match self {
            Self::Left => Direction::Left,
            Self::Down => Direction::Down,
            Self::Right => Direction::Right,
            Self::Up => Direction::Up,
        }
    }

    /// Rotation of the global figure on an incongruent trial:
    /// -90 and 0 turn by +180, 90 and 180 turn by -180.
    pub fn mirrored(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stimulus {
    pub color: Color,
    pub shape: Shape,
    pub angle: Angle,
}

impl Stimulus {
    /// Image key, e.g. `red_local`.
    pub fn asset_name(&self) -> String {
        format!("{}_{}", self.color, self.shape)
    }

    pub fn asset_path<P: AsRef<Path>>(&self, stimuli_dir: P) -> PathBuf {
        stimuli_dir
            .as_ref()
            .join(format!("{}.png", self.asset_name()))
    }
}

/// The experimental condition a block is run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockParams {
    pub response_selection: ResponseSelection,
    pub inhibition: bool,
    pub conflict: bool,
}

impl BlockParams {
    pub const fn new(response_selection: ResponseSelection, inhibition: bool, conflict: bool) -> Self {
        Self {
            response_selection,
            inhibition,
            conflict,
        }
    }
}

/// What a trial asks of the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum TrialKind {
    /// Respond with the local orientation.
    Go,
    /// Local figure points up: withhold.
    NoResponse,
    /// White global figure cancels an otherwise valid response.
    InhibitGo,
    /// Pointing up and cancelled.
    InhibitDouble,
}

/// Everything recorded while a trial was on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// 1-based position within the block as presented.
    pub order: usize,
    pub trial_onset: DateTime<Local>,
    pub prestimulus_interval: u32,
    pub stimulus_onset: DateTime<Local>,
    /// `None` when the response window timed out.
    pub response: Option<Direction>,
    pub rt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub params: BlockParams,
    pub global: Stimulus,
    pub local: Stimulus,
    pub inhibition: bool,
    pub conflict: Conflict,
    pub response_available: bool,
    /// Angle whose orientation is the right answer; `None` when the right
    /// answer is to not respond.
    pub response_correct: Option<Angle>,
    pub outcome: Option<Outcome>,
}

impl Trial {
    pub fn expected_response(&self) -> Option<Direction> {
        self.response_correct.map(|a| a.orientation())
    }

    pub fn kind(&self) -> TrialKind {
        match (self.response_available, self.inhibition) {
            (true, false) => TrialKind::Go,
            (false, false) => TrialKind::NoResponse,
            (true, true) => TrialKind::InhibitGo,
            (false, true) => TrialKind::InhibitDouble,
        }
    }
}
