//! Tools the model can call during a chat turn
//!
//! The registry dispatches execution by name; the grounding search tool
//! is the one tool this crate ships.

pub mod grounding;
pub mod registry;
pub mod tool;

pub use grounding::{GroundingSearchTool, GROUNDING_TOOL_NAME};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolResult};
