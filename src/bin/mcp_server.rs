//! `lodestone-jobs` MCP Server
//!
//! Exposes character job lookups to MCP clients over stdio. Uses the
//! 2025-06-18 MCP protocol.
//!
//! # Usage
//!
//! ```bash
//! lodestone-jobs-mcp
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::mcp_server::{server_runtime, ServerHandler};
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequest, CallToolResult, Implementation, InitializeResult,
    ListToolsRequest, ListToolsResult, RpcError, ServerCapabilities, ServerCapabilitiesTools,
    TextContent, LATEST_PROTOCOL_VERSION,
};
use rust_mcp_sdk::{tool_box, McpServer, StdioTransport, TransportOptions};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use lodestone_jobs::{parse_character_page, JobLookup, LookupConfig, UpstreamClient};

// Global shared lookup (initialized once)
static LOOKUP: OnceCell<JobLookup<UpstreamClient>> = OnceCell::const_new();

async fn get_lookup() -> Result<&'static JobLookup<UpstreamClient>, CallToolError> {
    LOOKUP
        .get_or_try_init(|| async {
            let config = LookupConfig::load()?;
            let client = UpstreamClient::from_config(&config)?;
            Ok::<_, anyhow::Error>(JobLookup::new(config, client))
        })
        .await
        .map_err(|e| CallToolError::from_message(format!("failed to initialize lookup: {e}")))
}

fn json_text(value: &serde_json::Value) -> Result<CallToolResult, CallToolError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CallToolError::from_message(e.to_string()))?;
    Ok(CallToolResult::text_content(vec![TextContent::from(text)]))
}

// ============================================================================
// TOOLS
// ============================================================================

#[mcp_tool(
    name = "character_jobs",
    description = "Fetch a character's class/job page and return job progression as JSON.

Output groups jobs into DoW/DoM (Tank, Healer, Melee DPS, Physical Ranged DPS,
Magical Ranged DPS, Limited Jobs) and DoH/DoL (Disciples of the Hand / Land).
Each job has job_icon, job_level, job_name, job_name_tooltip, job_exp, job_exp_max.

Returns: JSON record, or an error with the attempted upstream URL.",
    read_only_hint = true,
    open_world_hint = true
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CharacterJobsTool {
    /// Character id as it appears in the profile URL
    character_id: String,
}

impl CharacterJobsTool {
    pub async fn run(&self) -> Result<CallToolResult, CallToolError> {
        let lookup = get_lookup().await?;
        let response = lookup.respond(&self.character_id).await;

        if response.is_success() {
            json_text(&response.body)
        } else {
            Err(CallToolError::from_message(response.body.to_string()))
        }
    }
}

#[mcp_tool(
    name = "parse_character_html",
    description = "Parse a saved character class/job page without network access.

Accepts the page HTML or a browser view-source dump of it.

Returns: JSON record in the same shape as character_jobs.",
    read_only_hint = true
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ParseCharacterHtmlTool {
    /// Raw page text
    html: String,
}

impl ParseCharacterHtmlTool {
    pub fn run(&self) -> Result<CallToolResult, CallToolError> {
        let jobs = parse_character_page(&self.html);
        let value =
            serde_json::to_value(&jobs).map_err(|e| CallToolError::from_message(e.to_string()))?;
        json_text(&value)
    }
}

// Generate the tools enum
tool_box!(LodestoneJobsTools, [CharacterJobsTool, ParseCharacterHtmlTool]);

// ============================================================================
// SERVER HANDLER
// ============================================================================

pub struct LodestoneJobsHandler;

#[async_trait]
impl ServerHandler for LodestoneJobsHandler {
    async fn handle_list_tools_request(
        &self,
        _request: ListToolsRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: LodestoneJobsTools::tools(),
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        let tool = LodestoneJobsTools::try_from(request.params)
            .map_err(|e| CallToolError::from_message(e.to_string()))?;

        match tool {
            LodestoneJobsTools::CharacterJobsTool(t) => t.run().await,
            LodestoneJobsTools::ParseCharacterHtmlTool(t) => t.run(),
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (to stderr so it doesn't interfere with MCP)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let server_details = InitializeResult {
        server_info: Implementation {
            name: "lodestone-jobs".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            title: Some("Lodestone Job Progression".into()),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(
            "lodestone-jobs returns a character's job levels and experience, grouped by role, as JSON.".into(),
        ),
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
    };

    let transport = StdioTransport::new(TransportOptions::default())?;
    let handler = LodestoneJobsHandler;

    // Create server (takes 3 args: details, transport, handler)
    let server = server_runtime::create_server(server_details, transport, handler);

    Ok(server.start().await?)
}
