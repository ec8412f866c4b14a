//! MCP server implementation for Playbook
//!
//! Exposes the wizard and move operations as Model Context Protocol tools
//! over stdio. Every tool returns the same markdown the CLI prints.

use anyhow::Result;
use log::{debug, error, info};
use playbook_core::Playbook;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AttachProof, CampaignLink, CompleteMove, DeleteMove, Id, LaunchMove, ListMoves, LogTracking,
    McpHandlers, McpResult, Recommend, SetStatus, SetTaskDay, TaskRef, TasksForDay,
};

/// MCP server for Playbook
#[derive(Clone)]
pub struct PlaybookMcpServer {
    handlers: McpHandlers,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PlaybookMcpServer {
    pub fn new(playbook: Playbook) -> Self {
        Self {
            handlers: McpHandlers::new(playbook),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "list_problems",
        description = "List the marketing problems the catalog has frameworks for. Start here: every recommendation and launch needs a problem_id from this list."
    )]
    async fn list_problems(&self) -> McpResult {
        self.handlers.list_problems()
    }

    #[tool(
        name = "recommend",
        description = "Rank frameworks for a problem, best first, with a fit score from 0 to 100. Optional situation answers sharpen the ranking: speed_needed (\"7\", \"14\", \"30\", \"90\"), time_budget (low/medium/high), sales_motion, traffic, proof_strength, offer_clarity, paid_budget, primary_channel. limit defaults to 4."
    )]
    async fn recommend(&self, params: Parameters<Recommend>) -> McpResult {
        self.handlers.recommend(params)
    }

    #[tool(
        name = "preflight",
        description = "Dry-run the launch gate for a plan without storing anything. Takes the same parameters as launch_move and returns every check grouped by category (Offer, Tracking, Outputs, Channels) with the wizard step that fixes each failing one."
    )]
    async fn preflight(&self, params: Parameters<LaunchMove>) -> McpResult {
        self.handlers.preflight(params)
    }

    #[tool(
        name = "launch_move",
        description = "Assemble a plan from a problem, an optional framework_id (defaults to the top recommendation), offer inputs, channels (one or two), baseline and target; run the preflight gate; and launch the move if every check passes. A blocked launch stores nothing and returns the failing checks."
    )]
    async fn launch_move(&self, params: Parameters<LaunchMove>) -> McpResult {
        self.handlers.launch_move(params).await
    }

    #[tool(
        name = "list_moves",
        description = "List moves with progress, current day and health. Completed moves are hidden unless all=true or status is given. Filter by campaign_id to see one campaign."
    )]
    async fn list_moves(&self, params: Parameters<ListMoves>) -> McpResult {
        self.handlers.list_moves(params).await
    }

    #[tool(
        name = "show_move",
        description = "Show a move in full: status, tracking, result and the checklist grouped by day."
    )]
    async fn show_move(&self, params: Parameters<Id>) -> McpResult {
        self.handlers.show_move(params).await
    }

    #[tool(
        name = "move_day",
        description = "Report which day of its duration a move is on today, clamped to the duration."
    )]
    async fn move_day(&self, params: Parameters<Id>) -> McpResult {
        self.handlers.move_day(params).await
    }

    #[tool(
        name = "tasks_for_day",
        description = "List the checklist items scheduled for one day of a move. day defaults to the move's current day."
    )]
    async fn tasks_for_day(&self, params: Parameters<TasksForDay>) -> McpResult {
        self.handlers.tasks_for_day(params).await
    }

    #[tool(
        name = "set_move_status",
        description = "Change a move's lifecycle status: pending → generating → active, active ⇄ paused. Use complete_move to finish a move."
    )]
    async fn set_move_status(&self, params: Parameters<SetStatus>) -> McpResult {
        self.handlers.set_move_status(params).await
    }

    #[tool(
        name = "complete_move",
        description = "Complete a move with an outcome (won, meh, failed) and an optional learning. A completed move is read-only."
    )]
    async fn complete_move(&self, params: Parameters<CompleteMove>) -> McpResult {
        self.handlers.complete_move(params).await
    }

    #[tool(
        name = "toggle_task",
        description = "Flip a checklist item between done and not done."
    )]
    async fn toggle_task(&self, params: Parameters<TaskRef>) -> McpResult {
        self.handlers.toggle_task(params).await
    }

    #[tool(
        name = "set_task_day",
        description = "Move a checklist item to another day between 1 and the move's duration."
    )]
    async fn set_task_day(&self, params: Parameters<SetTaskDay>) -> McpResult {
        self.handlers.set_task_day(params).await
    }

    #[tool(
        name = "attach_proof",
        description = "Attach proof of work to a checklist item: a url, a note or both. Replaces any earlier proof; at least one of url and note is required."
    )]
    async fn attach_proof(&self, params: Parameters<AttachProof>) -> McpResult {
        self.handlers.attach_proof(params).await
    }

    #[tool(
        name = "log_tracking",
        description = "Append a new observed value of the move's KPI. Updates are append-only and timestamped."
    )]
    async fn log_tracking(&self, params: Parameters<LogTracking>) -> McpResult {
        self.handlers.log_tracking(params).await
    }

    #[tool(
        name = "attach_campaign",
        description = "Link a move to a campaign by campaign_id."
    )]
    async fn attach_campaign(&self, params: Parameters<CampaignLink>) -> McpResult {
        self.handlers.attach_campaign(params).await
    }

    #[tool(
        name = "detach_campaign",
        description = "Unlink a move from its campaign."
    )]
    async fn detach_campaign(&self, params: Parameters<Id>) -> McpResult {
        self.handlers.detach_campaign(params).await
    }

    #[tool(
        name = "delete_move",
        description = "Permanently delete a move with its checklist and tracking history. Requires confirmed=true and cannot be undone."
    )]
    async fn delete_move(&self, params: Parameters<DeleteMove>) -> McpResult {
        self.handlers.delete_move(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PlaybookMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "playbook".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Playbook turns a marketing problem into a time-boxed "move": a day-by-day checklist with one KPI to track.

## Core Concepts
- **Problem**: what the user is struggling with (list_problems)
- **Framework**: a proven playbook for a problem, ranked by fit (recommend)
- **Preflight**: the launch gate; every check must pass before a move is created
- **Move**: a launched plan with tasks per day, KPI tracking and a lifecycle

## Typical Flow
1. `list_problems`, then `recommend` with the problem and what you know about the situation
2. `preflight` with the chosen framework, offer inputs, channels, baseline and target
3. Fix failing checks, then `launch_move`
4. Each day: `tasks_for_day`, `toggle_task`, `attach_proof`, and `log_tracking` when the KPI moves
5. `complete_move` with an outcome and what was learned

## Lifecycle
pending → generating → active ⇄ paused → completed. Completed moves are read-only."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PlaybookMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Playbook MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_every_tool() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let playbook = playbook_core::PlaybookBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to create playbook");
        let server = PlaybookMcpServer::new(playbook);

        let info = server.get_info();
        assert_eq!(info.server_info.name, "playbook");

        let names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(names.len(), 17);
        assert!(names.iter().any(|n| n == "launch_move"));
        assert!(names.iter().any(|n| n == "delete_move"));
    }
}
