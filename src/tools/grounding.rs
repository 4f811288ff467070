//! Web search grounding tool
//!
//! Bridges the chat loop to the hosted Agents API: each call opens a
//! throwaway grounding session, runs the query through it, and returns
//! the grounded answer with its sources appended. Remote agent and
//! thread never outlive the call.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::agents::{AgentDefinition, AgentsClient, GroundedAnswer, GroundingSession};
use crate::chat::ToolDefinition;
use crate::core::AgentsResult;

use super::tool::{Tool, ToolResult};

/// Name under which the search tool is advertised to the model
pub const GROUNDING_TOOL_NAME: &str = "bing_search";

/// A web search tool backed by a grounded remote agent
pub struct GroundingSearchTool {
    client: AgentsClient,
    definition: AgentDefinition,
}

impl GroundingSearchTool {
    /// Create a search tool that runs queries through `client` using
    /// agents created from `definition`
    pub fn new(client: AgentsClient, definition: AgentDefinition) -> Self {
        Self { client, definition }
    }

    /// Run one grounded query and format the answer with its sources
    ///
    /// This is the tool's whole contract: text in, grounded text out.
    pub async fn search(&self, query: &str) -> AgentsResult<String> {
        let answer =
            GroundingSession::search_once(&self.client, self.definition.clone(), query).await?;
        Ok(format_answer(answer))
    }
}

#[async_trait]
impl Tool for GroundingSearchTool {
    fn name(&self) -> &str {
        GROUNDING_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Performs a web search using Bing, returning relevant results for grounding LLM responses."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            self.name(),
            self.description(),
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let Some(query) = input.get("query").and_then(Value::as_str) else {
            return Ok(ToolResult::error("Missing required parameter: query"));
        };

        match self.search(query).await {
            Ok(text) => Ok(ToolResult::success(text)),
            // The model gets told the search failed and can decide what
            // to do with the turn
            Err(e) => Ok(ToolResult::error(format!("Search failed: {}", e))),
        }
    }
}

/// Append the citation list to the answer text
fn format_answer(answer: GroundedAnswer) -> String {
    if answer.citations.is_empty() {
        return answer.text;
    }

    let mut lines = vec![answer.text, String::new(), "Sources:".to_string()];
    for citation in &answer.citations {
        match &citation.title {
            Some(title) => lines.push(format!("- {} ({})", title, citation.url)),
            None => lines.push(format!("- {}", citation.url)),
        }
    }
    lines.join("\n")
}
