//! Status enumerations for moves.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a move.
///
/// The allowed transitions form a small state machine:
///
/// - `pending → generating | active`
/// - `generating → active`
/// - `active ↔ paused`
/// - `active | paused → completed`
///
/// `completed` is terminal and is only reachable through completion, which
/// records an outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    /// Created but the start date has not arrived yet
    Pending,

    /// Waiting for the content collaborator to prepare assets
    Generating,

    /// Running; tasks are being worked through
    #[default]
    Active,

    /// Temporarily on hold
    Paused,

    /// Closed with an outcome; read-only from here on
    Completed,
}

impl MoveStatus {
    /// States reachable from `self`.
    pub fn valid_transitions(&self) -> &'static [MoveStatus] {
        match self {
            Self::Pending => &[Self::Generating, Self::Active],
            Self::Generating => &[Self::Active],
            Self::Active => &[Self::Paused, Self::Completed],
            Self::Paused => &[Self::Active, Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Whether `target` is a legal successor.
    pub fn can_transition_to(&self, target: MoveStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Terminal state check.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Generating => "generating",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Status with a leading icon for list output.
    pub fn with_icon(&self) -> &'static str {
        match self {
            Self::Pending => "◷ Pending",
            Self::Generating => "⚙ Generating",
            Self::Active => "➤ Active",
            Self::Paused => "‖ Paused",
            Self::Completed => "✓ Completed",
        }
    }
}

impl FromStr for MoveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "generating" => Ok(Self::Generating),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid move status: {s}")),
        }
    }
}

/// How a completed move turned out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Meh,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Meh => "meh",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "won" => Ok(Self::Won),
            "meh" => Ok(Self::Meh),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid outcome: {s}")),
        }
    }
}

/// Who executes the move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Solo,
    Team,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Team => "team",
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solo" => Ok(Self::Solo),
            "team" => Ok(Self::Team),
            _ => Err(format!("Invalid run mode: {s}")),
        }
    }
}

/// Health of a running move, comparing task progress against elapsed time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveHealth {
    /// Progress keeps pace with the calendar
    OnTrack,
    /// Progress trails the calendar by a small margin
    AtRisk,
    /// Progress trails the calendar badly
    OffTrack,
    /// The move is completed
    Done,
}

impl MoveHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::AtRisk => "at_risk",
            Self::OffTrack => "off_track",
            Self::Done => "done",
        }
    }
}
