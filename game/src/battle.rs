//====================================================================

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::characters::BattleCharacter;

//====================================================================

/// Opaque identifier the backend hands out when a battle is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleId(String);

impl BattleId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BattleId {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    Setup,
    Ongoing,
    Victory,
    Defeat,
    Draw,
    #[serde(other)]
    Unknown,
}

impl BattleStatus {
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            BattleStatus::Victory | BattleStatus::Defeat | BattleStatus::Draw
        )
    }
}

impl Display for BattleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BattleStatus::Setup => "setup",
            BattleStatus::Ongoing => "ongoing",
            BattleStatus::Victory => "victory",
            BattleStatus::Defeat => "defeat",
            BattleStatus::Draw => "draw",
            BattleStatus::Unknown => "unknown",
        };

        write!(f, "{}", name)
    }
}

//====================================================================

/// Full observable state of a battle at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub state: BattleStatus,
    pub turn: u32,
    pub team_a: Vec<BattleCharacter>,
    pub team_b: Vec<BattleCharacter>,
    pub active_character: Option<String>,
    #[serde(default)]
    pub log: Vec<String>,
}

//====================================================================

/// Answer to a turn advance request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTurnOutcome", into = "RawTurnOutcome")]
pub enum TurnOutcome {
    Advanced {
        /// Narrative line for the turn that was just played.
        result: Option<String>,
        summary: BattleSummary,
    },
    /// The battle already ended, no summary is sent back.
    NotOngoing { state: BattleStatus, message: String },
}

/// Both answer shapes in one struct, so a bad `summary` reports its own
/// field error.
#[derive(Clone, Serialize, Deserialize)]
struct RawTurnOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<BattleSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<BattleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl TryFrom<RawTurnOutcome> for TurnOutcome {
    type Error = String;

    fn try_from(value: RawTurnOutcome) -> Result<Self, Self::Error> {
        match value {
            RawTurnOutcome {
                result,
                summary: Some(summary),
                ..
            } => Ok(TurnOutcome::Advanced { result, summary }),
            RawTurnOutcome {
                state: Some(state),
                message: Some(message),
                ..
            } => Ok(TurnOutcome::NotOngoing { state, message }),
            _ => Err("turn answer has neither `summary` nor `state` and `message`".into()),
        }
    }
}

impl From<TurnOutcome> for RawTurnOutcome {
    fn from(value: TurnOutcome) -> Self {
        match value {
            TurnOutcome::Advanced { result, summary } => Self {
                result,
                summary: Some(summary),
                state: None,
                message: None,
            },
            TurnOutcome::NotOngoing { state, message } => Self {
                result: None,
                summary: None,
                state: Some(state),
                message: Some(message),
            },
        }
    }
}

impl TurnOutcome {
    #[inline]
    pub fn summary(&self) -> Option<&BattleSummary> {
        match self {
            TurnOutcome::Advanced { summary, .. } => Some(summary),
            TurnOutcome::NotOngoing { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoplayOutcome {
    #[serde(default)]
    pub results: Vec<String>,
    pub summary: BattleSummary,
}

//====================================================================

#[derive(Debug, Serialize)]
pub(crate) struct CreateBattleRequest<'a> {
    pub team_a: &'a [String],
    pub team_b: &'a [String],
    pub level: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBattleResponse {
    pub battle_id: BattleId,
}

//====================================================================


//====================================================================
