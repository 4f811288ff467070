//! Hosted Agents API integration
//!
//! This module talks to a Foundry project's Agents API: it creates agents
//! carrying the Bing grounding tool, runs them against threads, polls the
//! runs, and reads back grounded answers with their citations.
//!
//! [`AgentsClient`] maps one method to one HTTP round-trip;
//! [`GroundingSession`] composes those calls into the create/ask/delete
//! lifecycle of a grounded exchange.

pub mod client;
pub mod poll;
pub mod session;
pub mod types;

pub use client::AgentsClient;
pub use poll::{PollPolicy, PollState, PollStep};
pub use session::{GroundedAnswer, GroundingSession};
pub use types::{
    AgentDefinition, AgentDescriptor, Annotation, Citation, GroundingConfig, ListEnvelope,
    MessageContent, MessageRole, ResourceId, RunDescriptor, RunError, RunStatus, TextContent,
    ThreadDescriptor, ThreadMessage, UrlCitation,
};
