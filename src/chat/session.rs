//! Chat session turn loop
//!
//! Drives the Input -> LLM -> Tools -> Output cycle for one conversation:
//! the model is called with the full history and the registered tool
//! definitions, requested tools are executed, their outputs are appended
//! to the history, and the loop continues until the model answers in
//! plain text (or the iteration bound trips).

use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use serde_json::Value;

use crate::tools::ToolRegistry;

use super::completion::{AssistantReply, AzureChatClient};
use super::history::ChatHistory;
use super::types::{ChatStreamEvent, ToolCallRequest, ToolDefinition};

/// Configuration for a [`ChatSession`]
///
/// ```ignore
/// let config = ChatSessionConfig::new("You are a news assistant.")
///     .with_streaming(true)
///     .with_max_tool_iterations(5);
/// ```
pub struct ChatSessionConfig {
    /// System prompt opening the conversation
    pub system_prompt: String,

    /// Maximum number of LLM calls per turn (prevents infinite tool loops)
    pub max_tool_iterations: usize,

    /// Whether to stream responses rather than wait for whole completions
    pub streaming_enabled: bool,
}

impl ChatSessionConfig {
    /// Create a configuration with a system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            max_tool_iterations: 10,
            streaming_enabled: false,
        }
    }

    /// Set maximum LLM calls per turn
    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = max;
        self
    }

    /// Enable or disable streaming responses
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming_enabled = enabled;
        self
    }
}

impl Default for ChatSessionConfig {
    fn default() -> Self {
        Self::new("You are a helpful assistant.")
    }
}

/// A conversation bound to one chat deployment and an optional tool set
pub struct ChatSession {
    llm: AzureChatClient,
    config: ChatSessionConfig,
    tools: Option<Arc<ToolRegistry>>,
    history: ChatHistory,
}

impl ChatSession {
    /// Create a session; the history opens with the configured system prompt
    pub fn new(llm: AzureChatClient, config: ChatSessionConfig) -> Self {
        let history = ChatHistory::with_system_prompt(&config.system_prompt);
        Self {
            llm,
            config,
            tools: None,
            history,
        }
    }

    /// Attach a tool registry
    pub fn with_tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// The conversation so far
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .as_ref()
            .map(|t| t.get_definitions())
            .unwrap_or_default()
    }

    /// Process one user turn (may involve multiple LLM calls for tool use)
    ///
    /// Assistant text is delivered through `on_delta` as it arrives: per
    /// fragment when streaming is enabled, once per response otherwise.
    /// Returns the final assistant text of the turn, or an empty string
    /// when the iteration bound trips first.
    pub async fn turn(
        &mut self,
        user_input: &str,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        self.history.add_user_message(user_input);
        let tool_definitions = self.tool_definitions();
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.config.max_tool_iterations {
                tracing::warn!(
                    "[ChatSession] Max tool iterations ({}) reached",
                    self.config.max_tool_iterations
                );
                return Ok(String::new());
            }

            tracing::info!(
                "[ChatSession] Calling LLM with {} messages (iteration {})",
                self.history.len(),
                iterations
            );

            let reply = if self.config.streaming_enabled {
                self.call_llm_streaming(&tool_definitions, on_delta).await?
            } else {
                self.call_llm(&tool_definitions, on_delta).await?
            };

            if reply.tool_calls.is_empty() {
                self.history.add_assistant_message(&reply.text);
                return Ok(reply.text);
            }

            // Record the assistant's tool request, then each tool's output
            let content = if reply.text.is_empty() {
                None
            } else {
                Some(reply.text.clone())
            };
            self.history
                .add_assistant_tool_calls(content, reply.tool_calls.clone());

            for call in &reply.tool_calls {
                let output = self.execute_tool(call).await;
                self.history.add_tool_result(call.id.clone(), output);
            }
        }
    }

    /// Call the LLM without streaming
    async fn call_llm(
        &self,
        tool_definitions: &[ToolDefinition],
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<AssistantReply> {
        let reply = self
            .llm
            .complete(self.history.messages(), tool_definitions)
            .await?;
        if !reply.text.is_empty() {
            on_delta(&reply.text);
        }
        Ok(reply)
    }

    /// Call the LLM with streaming, forwarding text deltas in real time
    async fn call_llm_streaming(
        &self,
        tool_definitions: &[ToolDefinition],
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<AssistantReply> {
        let mut stream = self
            .llm
            .stream(self.history.messages(), tool_definitions)
            .await?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();

        while let Some(event) = stream.next().await {
            match event? {
                ChatStreamEvent::TextDelta(delta) => {
                    text.push_str(&delta);
                    on_delta(&delta);
                }
                ChatStreamEvent::ToolCall(call) => {
                    tool_calls.push(call);
                }
                ChatStreamEvent::Done { finish_reason } => {
                    tracing::debug!("[ChatSession] Stream finished: {}", finish_reason);
                }
            }
        }

        Ok(AssistantReply { text, tool_calls })
    }

    /// Execute one tool call, folding every failure into model-visible text
    async fn execute_tool(&self, call: &ToolCallRequest) -> String {
        tracing::info!("[ChatSession] Tool use: {} ({})", call.function.name, call.id);

        let Some(tools) = &self.tools else {
            return format!("No tools configured, cannot execute: {}", call.function.name);
        };

        let input: Value = match serde_json::from_str(&call.function.arguments) {
            Ok(value) => value,
            Err(e) => return format!("Invalid tool arguments JSON: {}", e),
        };

        match tools.execute(&call.function.name, &input).await {
            Ok(result) if result.is_error => format!("Error: {}", result.output),
            Ok(result) => result.output,
            Err(e) => format!("Tool execution failed: {}", e),
        }
    }
}
