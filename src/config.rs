//! Environment-driven configuration
//!
//! Two independent surfaces are configured here: the Foundry project that
//! hosts agents, threads and runs, and the Azure OpenAI deployment that
//! serves chat completions. Both read from the process environment so the
//! binary can be pointed at a project with a `.env` file alone.

use anyhow::{Context, Result};
use std::env;

/// Default Agents API version appended to every request URL
pub const DEFAULT_API_VERSION: &str = "2025-05-15-preview";

/// Default chat completions API version
pub const DEFAULT_CHAT_API_VERSION: &str = "2024-10-21";

/// Default chat model deployment name
pub const DEFAULT_CHAT_DEPLOYMENT: &str = "gpt-4o";

/// Connection details for a Foundry project hosting the Agents API
///
/// ```ignore
/// let config = FoundryConfig::from_env()?;
/// let client = AgentsClient::from_config(&config, credential);
/// ```
#[derive(Debug, Clone)]
pub struct FoundryConfig {
    /// Project endpoint, e.g. `https://my-project.services.ai.azure.com/api/projects/my-project`
    pub endpoint: String,

    /// API version appended to every request as `?api-version=`
    pub api_version: String,

    /// Connection id of the Bing search resource attached to the project
    pub connection_id: String,
}

impl FoundryConfig {
    /// Create a configuration with the default API version
    pub fn new(endpoint: impl Into<String>, connection_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            connection_id: connection_id.into(),
        }
    }

    /// Override the API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Load the configuration from environment variables
    ///
    /// Reads from:
    /// - `AZURE_AI_FOUNDRY_PROJECT_ENDPOINT` (required)
    /// - `BING_SEARCH_CONNECTION_ID` (required)
    /// - `AZURE_AI_FOUNDRY_API_VERSION` (optional, defaults to `2025-05-15-preview`)
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var("AZURE_AI_FOUNDRY_PROJECT_ENDPOINT")
            .context("AZURE_AI_FOUNDRY_PROJECT_ENDPOINT environment variable not set")?;

        let connection_id = env::var("BING_SEARCH_CONNECTION_ID")
            .context("BING_SEARCH_CONNECTION_ID environment variable not set")?;

        let api_version = env::var("AZURE_AI_FOUNDRY_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            endpoint,
            api_version,
            connection_id,
        })
    }
}

/// Connection details for an Azure OpenAI chat completions deployment
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Deployment base URL, e.g. `https://my-resource.openai.azure.com/openai/deployments/gpt-4o`
    pub base_url: String,

    /// API key sent in the `api-key` header
    pub api_key: String,

    /// Deployment name, used for logging only (the URL selects the deployment)
    pub deployment: String,

    /// API version appended to every request as `?api-version=`
    pub api_version: String,
}

impl ChatConfig {
    /// Create a configuration with default deployment name and API version
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            deployment: DEFAULT_CHAT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_CHAT_API_VERSION.to_string(),
        }
    }

    /// Override the deployment name
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Override the API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Load the configuration from environment variables
    ///
    /// Reads from:
    /// - `AZURE_OPENAI_BASE_URL` (required)
    /// - `AZURE_OPENAI_API_KEY` (required)
    /// - `AZURE_OPENAI_DEPLOYMENT_NAME` (optional, defaults to `gpt-4o`)
    /// - `AZURE_OPENAI_API_VERSION` (optional, defaults to `2024-10-21`)
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("AZURE_OPENAI_BASE_URL")
            .context("AZURE_OPENAI_BASE_URL environment variable not set")?;

        let api_key = env::var("AZURE_OPENAI_API_KEY")
            .context("AZURE_OPENAI_API_KEY environment variable not set")?;

        let deployment = env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
            .unwrap_or_else(|_| DEFAULT_CHAT_DEPLOYMENT.to_string());

        let api_version = env::var("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_CHAT_API_VERSION.to_string());

        Ok(Self {
            base_url,
            api_key,
            deployment,
            api_version,
        })
    }
}
