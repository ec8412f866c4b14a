//! MCP tool handlers implementation

use log::debug;
use playbook_core::{
    display::{move_list_title, CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params as core, Playbook, PlaybookError,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// Core parameter types are wrapped in a transparent serde container so the
// MCP layer owns its protocol-facing derives. Deserialization passes straight
// through to the wrapped type and the schema is the core type's own.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type ListMoves = McpParams<core::ListMoves>;
pub type TaskRef = McpParams<core::TaskRef>;
pub type SetTaskDay = McpParams<core::SetTaskDay>;
pub type AttachProof = McpParams<core::AttachProof>;
pub type LogTracking = McpParams<core::LogTracking>;
pub type SetStatus = McpParams<core::SetStatus>;
pub type CompleteMove = McpParams<core::CompleteMove>;
pub type CampaignLink = McpParams<core::CampaignLink>;
pub type DeleteMove = McpParams<core::DeleteMove>;
pub type TasksForDay = McpParams<core::TasksForDay>;
pub type Recommend = McpParams<core::Recommend>;
pub type LaunchMove = McpParams<core::LaunchMove>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

/// Handler implementations for the MCP server
#[derive(Clone)]
pub struct McpHandlers {
    playbook: Playbook,
}

impl McpHandlers {
    pub fn new(playbook: Playbook) -> Self {
        Self { playbook }
    }

    pub fn list_problems(&self) -> McpResult {
        debug!("list_problems");

        let problems = self.playbook.list_problems();
        text(format!("# Problems\n\n{problems}"))
    }

    pub fn recommend(&self, Parameters(params): Parameters<Recommend>) -> McpResult {
        debug!("recommend: {params:?}");

        let ranked = self.playbook.recommend(params.as_ref());
        text(format!("# Recommended Frameworks\n\n{ranked}"))
    }

    pub fn preflight(&self, Parameters(params): Parameters<LaunchMove>) -> McpResult {
        debug!("preflight: {params:?}");

        let report = self
            .playbook
            .preflight(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to assemble plan", &e))?;
        text(report)
    }

    pub async fn launch_move(&self, Parameters(params): Parameters<LaunchMove>) -> McpResult {
        debug!("launch_move: {params:?}");

        let outcome = self
            .playbook
            .launch(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to launch move", &e))?;
        text(outcome)
    }

    pub async fn list_moves(&self, Parameters(params): Parameters<ListMoves>) -> McpResult {
        debug!("list_moves: {params:?}");

        let inner_params = params.as_ref();
        let summaries = self
            .playbook
            .list_moves_summary(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to list moves", &e))?;

        text(format!("# {}\n\n{summaries}", move_list_title(inner_params)))
    }

    pub async fn show_move(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_move: {params:?}");

        let id = params.as_ref().id;
        let mv = self
            .playbook
            .get_move(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get move", &e))?
            .ok_or_else(|| to_mcp_error("Failed to get move", &PlaybookError::MoveNotFound { id }))?;
        text(mv)
    }

    pub async fn move_day(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("move_day: {params:?}");

        let day = self
            .playbook
            .move_day_number(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute move day", &e))?;
        text(OperationStatus::success(format!(
            "Move {} is on day {day}",
            params.as_ref().id
        )))
    }

    pub async fn tasks_for_day(&self, Parameters(params): Parameters<TasksForDay>) -> McpResult {
        debug!("tasks_for_day: {params:?}");

        let tasks = self
            .playbook
            .move_tasks_for_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;
        text(tasks)
    }

    pub async fn set_move_status(&self, Parameters(params): Parameters<SetStatus>) -> McpResult {
        debug!("set_move_status: {params:?}");

        let mv = self
            .playbook
            .update_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change move status", &e))?;
        let change = format!("Status changed to {}", mv.status);
        text(UpdateResult::with_changes(mv, vec![change]))
    }

    pub async fn complete_move(&self, Parameters(params): Parameters<CompleteMove>) -> McpResult {
        debug!("complete_move: {params:?}");

        let mv = self
            .playbook
            .complete_move(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete move", &e))?;
        let change = format!("Completed with outcome {}", params.as_ref().outcome);
        text(UpdateResult::with_changes(mv, vec![change]))
    }

    pub async fn toggle_task(&self, Parameters(params): Parameters<TaskRef>) -> McpResult {
        debug!("toggle_task: {params:?}");

        let task = self
            .playbook
            .toggle_task_done(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?;
        let change = if task.done {
            "Marked as done"
        } else {
            "Marked as not done"
        };
        text(UpdateResult::with_changes(task, vec![change.to_string()]))
    }

    pub async fn set_task_day(&self, Parameters(params): Parameters<SetTaskDay>) -> McpResult {
        debug!("set_task_day: {params:?}");

        let task = self
            .playbook
            .set_task_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reschedule task", &e))?;
        let change = format!("Moved to day {}", task.day);
        text(UpdateResult::with_changes(task, vec![change]))
    }

    pub async fn attach_proof(&self, Parameters(params): Parameters<AttachProof>) -> McpResult {
        debug!("attach_proof: {params:?}");

        let task = self
            .playbook
            .attach_proof_to_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to attach proof", &e))?;
        text(UpdateResult::with_changes(
            task,
            vec!["Proof attached".to_string()],
        ))
    }

    pub async fn log_tracking(&self, Parameters(params): Parameters<LogTracking>) -> McpResult {
        debug!("log_tracking: {params:?}");

        let update = self
            .playbook
            .add_tracking_update(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to log tracking update", &e))?;
        text(CreateResult::new(update))
    }

    pub async fn attach_campaign(&self, Parameters(params): Parameters<CampaignLink>) -> McpResult {
        debug!("attach_campaign: {params:?}");

        let mv = self
            .playbook
            .attach_move_to_campaign(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to link campaign", &e))?;
        let change = format!("Linked to campaign {}", params.as_ref().campaign_id);
        text(UpdateResult::with_changes(mv, vec![change]))
    }

    pub async fn detach_campaign(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("detach_campaign: {params:?}");

        let mv = self
            .playbook
            .detach_move_from_campaign(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to unlink campaign", &e))?;
        let change = "Unlinked from its campaign".to_string();
        text(UpdateResult::with_changes(mv, vec![change]))
    }

    pub async fn delete_move(&self, Parameters(params): Parameters<DeleteMove>) -> McpResult {
        debug!("delete_move: {params:?}");

        let mv = self
            .playbook
            .delete_move(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete move", &e))?;
        text(DeleteResult::new(mv))
    }
}
