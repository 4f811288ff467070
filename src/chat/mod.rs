//! Azure OpenAI chat orchestration
//!
//! A chat-completions client with function calling and SSE streaming, the
//! message history it feeds, and the session loop that wires tools in.

pub mod completion;
pub mod history;
pub mod session;
pub mod types;

pub use completion::{AssistantReply, AzureChatClient};
pub use history::ChatHistory;
pub use session::{ChatSession, ChatSessionConfig};
pub use types::{
    ChatMessage, ChatRole, ChatStreamEvent, FunctionCall, ToolCallRequest, ToolDefinition,
};
