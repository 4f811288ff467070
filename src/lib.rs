pub mod core;
pub mod config;
pub mod auth;

// The hosted Agents API: agents, threads, runs, grounded search sessions
pub mod agents;

// Azure OpenAI chat orchestration with function calling
pub mod chat;

// Tools callable by the chat model
pub mod tools;

// Optional components
pub mod cli;
pub mod logging;
