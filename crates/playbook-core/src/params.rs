//! Parameter structures for playbook operations.
//!
//! These structures are shared by every interface (CLI, MCP). They carry no
//! framework-specific derives beyond serde; JSON schema derives are added
//! behind the `schema` feature so the MCP layer can wrap them transparently:
//!
//! ```ignore
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct CompleteRequest(playbook_core::params::CompleteMove);
//! ```
//!
//! The CLI builds them from its clap arguments.

use std::collections::BTreeMap;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    draft::PlanDraftBuilder,
    error::{PlaybookError, Result},
    models::{MoveFilter, MoveStatus, Outcome, RunMode},
    situation::Situation,
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for get_move, move_day_number and detach_move_from_campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the move to operate on
    pub id: u64,
}

/// Parameters for listing moves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListMoves {
    /// Only moves in this status
    #[serde(default)]
    pub status: Option<MoveStatus>,
    /// Only moves linked to this campaign
    #[serde(default)]
    pub campaign_id: Option<u64>,
    /// Include completed moves
    #[serde(default)]
    pub all: bool,
}

impl From<&ListMoves> for MoveFilter {
    fn from(params: &ListMoves) -> Self {
        MoveFilter {
            status: params.status,
            campaign_id: params.campaign_id,
            // an explicit status filter wins over the default hiding
            exclude_completed: !params.all && params.status.is_none(),
        }
    }
}

/// Addresses one task of a move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    pub move_id: u64,
    pub task_id: u64,
}

/// Parameters for rescheduling a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskDay {
    pub move_id: u64,
    pub task_id: u64,
    /// New day, between 1 and the move's duration
    pub day: u32,
}

/// Parameters for attaching proof of work to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AttachProof {
    pub move_id: u64,
    pub task_id: u64,
    /// Link to the published work
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
}

/// Parameters for logging a KPI observation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LogTracking {
    pub move_id: u64,
    /// Observed value of the primary KPI
    pub value: f64,
}

/// Parameters for a lifecycle status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetStatus {
    pub id: u64,
    /// Target status (completion has its own operation)
    pub status: MoveStatus,
}

/// Parameters for closing a move.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteMove {
    pub id: u64,
    pub outcome: Outcome,
    /// What was learned, for the retrospective
    #[serde(default)]
    pub learning: Option<String>,
}

/// Parameters for linking a move to a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CampaignLink {
    pub id: u64,
    pub campaign_id: u64,
}

/// Parameters for permanently deleting a move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteMove {
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for listing a day's tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TasksForDay {
    pub id: u64,
    /// Day of the move; defaults to the current day
    #[serde(default)]
    pub day: Option<u32>,
}

/// Parameters for ranking frameworks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Recommend {
    /// Problem id from the catalog
    #[serde(default)]
    pub problem_id: Option<String>,
    #[serde(flatten)]
    pub situation: Situation,
    /// How many frameworks to return (default 4)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Everything needed to assemble and launch a plan draft in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LaunchMove {
    pub problem_id: String,
    /// Framework id; defaults to the top recommendation
    #[serde(default)]
    pub framework_id: Option<String>,
    #[serde(flatten)]
    pub situation: Situation,
    /// Answers keyed by input field id
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    /// Optional rules to switch off
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// 0-based positions of daily actions to leave out
    #[serde(default)]
    pub disabled_actions: Vec<usize>,
    /// Optional deliverables to drop
    #[serde(default)]
    pub removed_outputs: Vec<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub baseline: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
    /// Move name; defaults to the framework name
    #[serde(default)]
    pub name: Option<String>,
    /// First day as YYYY-MM-DD; defaults to today
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<u64>,
    #[serde(default)]
    pub run_mode: RunMode,
    /// Start in `generating` and wait for content
    #[serde(default)]
    pub generate_content: bool,
}

impl LaunchMove {
    /// Translate into a draft builder.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidInput` for a malformed start date.
    pub fn to_builder(&self) -> Result<PlanDraftBuilder> {
        let start_date = self
            .start_date
            .as_deref()
            .map(|s| {
                s.trim().parse::<Date>().map_err(|e| {
                    PlaybookError::invalid_input("start_date")
                        .with_reason(format!("expected YYYY-MM-DD: {e}"))
                })
            })
            .transpose()?;

        let mut builder = PlanDraftBuilder::new(&self.problem_id)
            .situation(self.situation.clone())
            .framework(self.framework_id.clone())
            .baseline(self.baseline)
            .target(self.target)
            .move_name(self.name.clone())
            .start_date(start_date)
            .campaign(self.campaign_id)
            .run_mode(self.run_mode)
            .generate_content(self.generate_content);

        for (field, value) in &self.inputs {
            builder = builder.input(field, value);
        }
        for rule in &self.disabled_rules {
            builder = builder.disable_rule(rule);
        }
        for index in &self.disabled_actions {
            builder = builder.disable_action(*index);
        }
        for output in &self.removed_outputs {
            builder = builder.remove_output(output);
        }
        for channel in &self.channels {
            builder = builder.channel(channel);
        }

        Ok(builder)
    }
}
