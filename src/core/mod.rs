//! Core types for the grounding SDK
//!
//! This module provides the fundamental types used throughout the crate:
//! - `AgentsError` / `AgentsResult` - Error taxonomy for the Agents API

pub mod error;

pub use error::{AgentsError, AgentsResult};
