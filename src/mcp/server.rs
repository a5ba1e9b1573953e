/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the journal
/// 3. Sends JSON-RPC responses to stdout

use schemars::{schema_for, JsonSchema};
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{AppError, JournalApp};

/// Parse tool arguments into the tool's parameter type and run it
///
/// Evaluates to `Err` when the arguments do not fit the parameters, and to
/// `Ok(outcome)` with the tool's message or error otherwise.
macro_rules! dispatch {
    ($tool:path, $app:expr, $arguments:expr) => {
        match serde_json::from_value(Value::Object($arguments)) {
            Ok(params) => Ok($tool($app, params).await.map(|response| response.message)),
            Err(e) => Err(e),
        }
    };
}

fn tool<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schema_for!(P)).unwrap_or_else(|e| {
        error!("Failed to build input schema for {}: {}", name, e);
        json!({"type": "object"})
    });

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool this server offers
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::SaveEntryParams>(
            "journal_save",
            "Write the journal entry for a day (defaults to today); rewriting a day replaces its entry",
        ),
        tool::<tools::GetEntryParams>(
            "journal_get",
            "Read one entry by id or date; locked entries need their password",
        ),
        tool::<tools::DeleteEntryParams>("journal_delete", "Delete the entry written for a day"),
        tool::<tools::ListEntriesParams>("journal_list", "List entries newest first, one page at a time"),
        tool::<tools::SearchEntriesParams>(
            "journal_search",
            "Search entries by text, date range, mood, tags or category",
        ),
        tool::<tools::LockEntryParams>(
            "journal_lock",
            "Lock an entry behind a Strong, PIN or Simple password",
        ),
        tool::<tools::UnlockEntryParams>("journal_unlock", "Remove the lock from an entry"),
        tool::<tools::NoParams>("journal_streak", "Show the current and longest writing streaks"),
        tool::<tools::MissedDaysParams>("journal_missed_days", "List the days without an entry in a range"),
        tool::<tools::AnalyticsParams>(
            "journal_analytics",
            "Mood, tag, category and word count statistics for a date range",
        ),
        tool::<tools::TagsParams>("journal_tags", "List tags by usage, or the suggested tag names"),
        tool::<tools::ExportParams>("journal_export", "Export entries to a CSV, JSON or text file"),
        tool::<tools::LoginParams>("journal_login", "Start a session, checking the application PIN if set"),
        tool::<tools::NoParams>("journal_logout", "End the current session"),
        tool::<tools::PinParams>(
            "journal_pin",
            "Set, change or turn off the application PIN checked by journal_login",
        ),
    ]
}

/// MCP server that handles communication with Claude
pub struct McpServer {
    app: JournalApp,
    initialized: bool,
}

impl McpServer {
    pub fn new(app: JournalApp) -> Self {
        Self {
            app,
            initialized: false,
        }
    }

    pub fn app(&self) -> &JournalApp {
        &self.app
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), AppError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        match request.id.clone() {
            Some(id) => Some(self.handle_request(id, request).await),
            None => {
                self.handle_notification(&request);
                None
            }
        }
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "initialized" | "notifications/initialized" => self.initialized = true,
            other => debug!("Ignoring notification {}", other),
        }
    }

    async fn handle_request(&mut self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "tools/list" => JsonRpcResponse::success(id, json!({"tools": tool_definitions()})),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Journal MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    async fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let name = tool_params.name;
        let args: Map<String, Value> = tool_params.arguments;
        debug!("Calling tool {}", name);

        let outcome = match name.as_str() {
            "journal_save" => dispatch!(tools::save_entry, &self.app, args),
            "journal_get" => dispatch!(tools::get_entry, &self.app, args),
            "journal_delete" => dispatch!(tools::delete_entry, &self.app, args),
            "journal_list" => dispatch!(tools::list_entries, &self.app, args),
            "journal_search" => dispatch!(tools::search_entries, &self.app, args),
            "journal_lock" => dispatch!(tools::lock_entry, &self.app, args),
            "journal_unlock" => dispatch!(tools::unlock_entry, &self.app, args),
            "journal_streak" => dispatch!(tools::streak_status, &self.app, args),
            "journal_missed_days" => dispatch!(tools::missed_days, &self.app, args),
            "journal_analytics" => dispatch!(tools::journal_analytics, &self.app, args),
            "journal_tags" => dispatch!(tools::list_tags, &self.app, args),
            "journal_export" => dispatch!(tools::export_journal, &self.app, args),
            "journal_login" => dispatch!(tools::login, &mut self.app, args),
            "journal_logout" => dispatch!(tools::logout, &mut self.app, args),
            "journal_pin" => dispatch!(tools::manage_pin, &self.app, args),
            _ => {
                return JsonRpcResponse::from_serializable(
                    id,
                    &ToolCallResult::error(format!("Unknown tool: {}", name), error_codes::METHOD_NOT_FOUND),
                );
            }
        };

        let result = match outcome {
            Ok(Ok(message)) => ToolCallResult::success(message),
            Ok(Err(e)) => {
                debug!("Tool {} failed: {}", name, e);
                ToolCallResult::from_app_error(&e)
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid arguments for {}: {}", name, e),
                    None,
                );
            }
        };

        JsonRpcResponse::from_serializable(id, &result)
    }
}
