//! In-memory chat history
//!
//! Message sequence for one chat completion conversation. History lives
//! only for the lifetime of the process; nothing is persisted.

use super::types::{ChatMessage, ToolCallRequest};

/// Ordered messages of one conversation
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a history opened by a system message
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt)],
        }
    }

    /// Append a message
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append an assistant text message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Append an assistant message carrying tool calls
    pub fn add_assistant_tool_calls(
        &mut self,
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) {
        self.messages
            .push(ChatMessage::assistant_tool_calls(content, tool_calls));
    }

    /// Append a tool message answering `tool_call_id`
    pub fn add_tool_result(
        &mut self,
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.messages
            .push(ChatMessage::tool_result(tool_call_id, content));
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history holds no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
