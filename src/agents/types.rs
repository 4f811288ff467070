//! Wire types for the hosted Agents API
//!
//! These types serialize/deserialize against the agents endpoints
//! (`/assistants`, `/threads`, `/threads/{id}/messages`,
//! `/threads/{id}/runs`). Request shapes follow the service's REST
//! reference; response parsing only declares the fields this SDK reads.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Model used for newly created agents unless overridden
pub const DEFAULT_AGENT_MODEL: &str = "gpt-4o";

/// Name given to agents created by this SDK unless overridden
pub const DEFAULT_AGENT_NAME: &str = "my-agent";

/// Instructions given to agents created by this SDK unless overridden
pub const DEFAULT_AGENT_INSTRUCTIONS: &str = "You are a helpful agent.";

/// Default freshness window: only results from the last three days
const DEFAULT_FRESHNESS_DAYS: i64 = 3;

// ============================================================================
// Agent creation
// ============================================================================

/// Configuration of the Bing grounding tool attached to an agent
///
/// Serializes as one entry of `tools[].bing_grounding.search_configurations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingConfig {
    /// Bing Search connection id from the project
    pub connection_id: String,

    /// Number of search results to retrieve
    pub count: u32,

    /// Market code, e.g. "en-US"
    pub market: String,

    /// Result language
    pub set_lang: String,

    /// Only results published on or after this date (YYYY-MM-DD)
    pub freshness: String,
}

impl GroundingConfig {
    /// Create a grounding configuration with the service defaults:
    /// 7 results, en-US market, English, three-day freshness window.
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            count: 7,
            market: "en-US".to_string(),
            set_lang: "en".to_string(),
            freshness: freshness_date(DEFAULT_FRESHNESS_DAYS),
        }
    }

    /// Set the number of search results
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Set the market code
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Set the result language
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.set_lang = lang.into();
        self
    }

    /// Set the freshness window to the last `days` days
    pub fn with_freshness_days(mut self, days: i64) -> Self {
        self.freshness = freshness_date(days);
        self
    }

    /// Set an explicit freshness date (YYYY-MM-DD)
    pub fn with_freshness(mut self, date: impl Into<String>) -> Self {
        self.freshness = date.into();
        self
    }
}

/// Format a freshness cutoff `days` days in the past
fn freshness_date(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Everything needed to create a remote agent
///
/// ```ignore
/// let definition = AgentDefinition::new(GroundingConfig::new(connection_id))
///     .with_model("gpt-4o")
///     .with_instructions("You are a news research agent.");
/// let agent = client.create_agent(&definition).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub instructions: String,
    pub name: String,
    pub model: String,
    pub grounding: GroundingConfig,
}

impl AgentDefinition {
    /// Create a definition with the default model, name and instructions
    pub fn new(grounding: GroundingConfig) -> Self {
        Self {
            instructions: DEFAULT_AGENT_INSTRUCTIONS.to_string(),
            name: DEFAULT_AGENT_NAME.to_string(),
            model: DEFAULT_AGENT_MODEL.to_string(),
            grounding,
        }
    }

    /// Set the model backing the agent
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the agent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the agent instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Build the creation request body
    pub(crate) fn to_request(&self) -> CreateAgentRequest {
        CreateAgentRequest {
            instructions: self.instructions.clone(),
            name: self.name.clone(),
            model: self.model.clone(),
            tools: vec![AgentToolSpec {
                tool_type: "bing_grounding".to_string(),
                bing_grounding: BingGroundingSpec {
                    search_configurations: vec![self.grounding.clone()],
                },
            }],
        }
    }
}

/// Request body for POST /assistants
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateAgentRequest {
    pub instructions: String,
    pub name: String,
    pub model: String,
    pub tools: Vec<AgentToolSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AgentToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub bing_grounding: BingGroundingSpec,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BingGroundingSpec {
    pub search_configurations: Vec<GroundingConfig>,
}

// ============================================================================
// Descriptors
// ============================================================================

/// A remotely created agent and the grounding configuration it carries
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    /// Server-assigned agent id ("asst_...")
    pub id: String,
    /// Grounding tool configuration the agent was created with
    pub grounding: GroundingConfig,
}

/// A remote conversation thread
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadDescriptor {
    /// Server-assigned thread id ("thread_...")
    pub id: String,
}

/// One execution of an agent against a thread
#[derive(Debug, Clone, Deserialize)]
pub struct RunDescriptor {
    /// Server-assigned run id ("run_...")
    pub id: String,

    /// Thread the run executes against
    #[serde(default)]
    pub thread_id: String,

    /// Current lifecycle status
    pub status: RunStatus,

    /// Failure detail, present when the run failed
    #[serde(default)]
    pub last_error: Option<RunError>,

    /// Why the run ended incomplete, when it did
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
}

impl RunDescriptor {
    /// Human-readable failure detail for non-successful terminal runs
    pub fn failure_detail(&self) -> String {
        if let Some(err) = &self.last_error {
            return format!("{}: {}", err.code, err.message);
        }
        if let Some(details) = &self.incomplete_details {
            if let Some(reason) = &details.reason {
                return reason.clone();
            }
        }
        "no failure detail provided by the service".to_string()
    }
}

/// Remote-supplied error attached to a failed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Remote-supplied reason for an incomplete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncompleteDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

// ============================================================================
// Run lifecycle
// ============================================================================

/// Lifecycle status of a run
///
/// A run moves monotonically queued -> in_progress -> terminal and never
/// returns to an earlier phase. `Unknown` catches statuses this SDK does
/// not know about and is treated as in-flight so polling continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Incomplete,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the run can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
                | RunStatus::Incomplete
        )
    }

    /// Position in the monotonic status progression.
    ///
    /// Transitions may only keep or increase the phase; a decrease means
    /// the service reported an illegal regression.
    pub fn phase(&self) -> u8 {
        match self {
            RunStatus::Queued => 0,
            RunStatus::InProgress | RunStatus::Unknown => 1,
            RunStatus::Completed
            | RunStatus::Failed
            | RunStatus::Cancelled
            | RunStatus::Expired
            | RunStatus::Incomplete => 2,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Role of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Request body for POST /threads/{id}/messages
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateMessageRequest {
    pub content: String,
    pub role: MessageRole,
}

/// Request body for POST /threads/{id}/runs
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRunRequest {
    pub assistant_id: String,
}

/// One turn in a thread, as returned by the list-messages endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,

    /// Creation time, unix seconds; used for chronological ordering
    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    /// Concatenated text of all text content blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                MessageContent::Text { text } => Some(text.value.as_str()),
                MessageContent::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// URL citations attached to this message's text blocks
    pub fn citations(&self) -> Vec<Citation> {
        let mut citations = Vec::new();
        for block in &self.content {
            let MessageContent::Text { text } = block else {
                continue;
            };
            for annotation in &text.annotations {
                if let Annotation::UrlCitation { url_citation, .. } = annotation {
                    citations.push(Citation {
                        title: url_citation.title.clone(),
                        url: url_citation.url.clone(),
                    });
                }
            }
        }
        citations
    }
}

/// A content block inside a thread message
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    #[serde(other)]
    Unsupported,
}

/// Text block payload: the value plus grounding annotations
#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Annotation attached to a text block
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Bing grounding citation: a span of the text backed by a URL
    UrlCitation {
        #[serde(default)]
        text: Option<String>,
        url_citation: UrlCitation,
    },
    #[serde(other)]
    Unsupported,
}

/// The cited source of a `UrlCitation` annotation
#[derive(Debug, Clone, Deserialize)]
pub struct UrlCitation {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A deduplicated, caller-facing citation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: Option<String>,
    pub url: String,
}

// ============================================================================
// List envelopes
// ============================================================================

/// Paged list envelope used by the list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Minimal identity of a listed or newly created resource
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    pub id: String,
}

/// Acknowledgement returned by the delete endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DeletionAck {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_agent_request_shape() {
        let definition = AgentDefinition::new(
            GroundingConfig::new("conn-123").with_freshness("2025-08-20"),
        );
        let value = serde_json::to_value(definition.to_request()).unwrap();

        assert_eq!(value["instructions"], "You are a helpful agent.");
        assert_eq!(value["name"], "my-agent");
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["tools"][0]["type"], "bing_grounding");

        let config = &value["tools"][0]["bing_grounding"]["search_configurations"][0];
        assert_eq!(config["connection_id"], "conn-123");
        assert_eq!(config["count"], 7);
        assert_eq!(config["market"], "en-US");
        assert_eq!(config["set_lang"], "en");
        assert_eq!(config["freshness"], "2025-08-20");
    }

    #[test]
    fn test_freshness_window_is_a_date() {
        let config = GroundingConfig::new("conn").with_freshness_days(3);
        // YYYY-MM-DD
        assert_eq!(config.freshness.len(), 10);
        assert_eq!(config.freshness.as_bytes()[4], b'-');
        assert_eq!(config.freshness.as_bytes()[7], b'-');
    }

    #[test]
    fn test_run_status_parsing() {
        let status: RunStatus = serde_json::from_value(json!("in_progress")).unwrap();
        assert_eq!(status, RunStatus::InProgress);

        let status: RunStatus = serde_json::from_value(json!("expired")).unwrap();
        assert_eq!(status, RunStatus::Expired);

        // Statuses this SDK does not know about stay in-flight
        let status: RunStatus = serde_json::from_value(json!("requires_action")).unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_run_status_phases() {
        assert_eq!(RunStatus::Queued.phase(), 0);
        assert_eq!(RunStatus::InProgress.phase(), 1);
        for status in [
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::Cancelled,
            RunStatus::Expired,
            RunStatus::Incomplete,
        ] {
            assert_eq!(status.phase(), 2);
            assert!(status.is_terminal());
        }
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_run_descriptor_failure_detail() {
        let run: RunDescriptor = serde_json::from_value(json!({
            "id": "run_1",
            "thread_id": "thread_1",
            "status": "failed",
            "last_error": { "code": "server_error", "message": "boom" }
        }))
        .unwrap();
        assert_eq!(run.failure_detail(), "server_error: boom");

        let run: RunDescriptor = serde_json::from_value(json!({
            "id": "run_2",
            "status": "incomplete",
            "incomplete_details": { "reason": "max_completion_tokens" }
        }))
        .unwrap();
        assert_eq!(run.failure_detail(), "max_completion_tokens");

        let run: RunDescriptor = serde_json::from_value(json!({
            "id": "run_3",
            "status": "cancelled"
        }))
        .unwrap();
        assert!(run.failure_detail().contains("no failure detail"));
    }

    #[test]
    fn test_thread_message_text_and_citations() {
        let message: ThreadMessage = serde_json::from_value(json!({
            "id": "msg_1",
            "role": "assistant",
            "created_at": 1_735_000_000,
            "content": [
                {
                    "type": "text",
                    "text": {
                        "value": "Tesla shipped a new model.",
                        "annotations": [
                            {
                                "type": "url_citation",
                                "text": "【1†source】",
                                "url_citation": {
                                    "url": "https://example.com/tesla",
                                    "title": "Tesla news"
                                }
                            }
                        ]
                    }
                },
                { "type": "image_file" }
            ]
        }))
        .unwrap();

        assert_eq!(message.text(), "Tesla shipped a new model.");
        let citations = message.citations();
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].url, "https://example.com/tesla");
        assert_eq!(citations[0].title.as_deref(), Some("Tesla news"));
    }

    #[test]
    fn test_list_envelope_parsing() {
        let envelope: ListEnvelope<ResourceId> = serde_json::from_value(json!({
            "object": "list",
            "data": [ { "id": "thread_1" }, { "id": "thread_2" } ],
            "has_more": true
        }))
        .unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert!(envelope.has_more);
    }
}
