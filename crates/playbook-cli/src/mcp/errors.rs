//! Error handling utilities for MCP server

use playbook_core::PlaybookError;
use rmcp::ErrorData;

/// Hint appended to not-found errors so the assistant can recover.
const NOT_FOUND_HINT: &str = "Use list_moves with all=true to see existing moves";

/// Convert playbook errors to MCP errors
///
/// Missing moves and tasks become `resource_not_found`, requests the caller
/// can fix become `invalid_params`, everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &PlaybookError) -> ErrorData {
    if error.is_not_found() {
        ErrorData::resource_not_found(format!("{message}: {error}. {NOT_FOUND_HINT}"), None)
    } else if error.is_rejected() {
        ErrorData::invalid_params(format!("{message}: {error}"), None)
    } else {
        ErrorData::internal_error(format!("{message}: {error}"), None)
    }
}
