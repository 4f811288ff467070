//! Agents API client
//!
//! Thin HTTP client for the hosted Agents API: agents live under
//! `/assistants`, conversations under `/threads`, executions under
//! `/threads/{thread}/runs`. Every operation is exactly one authenticated
//! round-trip; the only loop in this module is [`AgentsClient::poll_run`],
//! which performs one round-trip per poll interval.
//!
//! Error mapping is uniform across operations: non-2xx responses are
//! classified by status code, and 2xx responses that fail to parse become
//! [`AgentsError::Protocol`] carrying the raw body for diagnosis.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::TokenCredential;
use crate::config::{FoundryConfig, DEFAULT_API_VERSION};
use crate::core::{AgentsError, AgentsResult};

use super::poll::{PollPolicy, PollState, PollStep};
use super::types::{
    AgentDefinition, AgentDescriptor, CreateMessageRequest, CreateRunRequest, DeletionAck,
    ListEnvelope, MessageRole, ResourceId, RunDescriptor, ThreadDescriptor, ThreadMessage,
};

/// Client for one Foundry project's Agents API
///
/// Cloning is cheap: the underlying connection pool and credential are
/// shared between clones.
///
/// ```ignore
/// let client = AgentsClient::from_config(&config, credential);
/// let agent = client.create_agent(&definition).await?;
/// let thread = client.create_thread().await?;
/// ```
#[derive(Clone)]
pub struct AgentsClient {
    client: Client,
    /// Project endpoint without a trailing slash
    endpoint: String,
    api_version: String,
    credential: Arc<dyn TokenCredential>,
}

impl AgentsClient {
    /// Create a client for `endpoint` with the default API version
    pub fn new(endpoint: impl Into<String>, credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            credential,
        }
    }

    /// Override the API version appended to every request
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Create a client from a loaded [`FoundryConfig`]
    pub fn from_config(config: &FoundryConfig, credential: Arc<dyn TokenCredential>) -> Self {
        Self::new(config.endpoint.clone(), credential).with_api_version(config.api_version.clone())
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Create a remote agent carrying the Bing grounding tool
    pub async fn create_agent(&self, definition: &AgentDefinition) -> AgentsResult<AgentDescriptor> {
        let created: ResourceId = self.post_json("assistants", &definition.to_request()).await?;
        tracing::info!("[Agents] Created agent {} (model {})", created.id, definition.model);
        Ok(AgentDescriptor {
            id: created.id,
            grounding: definition.grounding.clone(),
        })
    }

    /// Delete a remote agent
    pub async fn delete_agent(&self, agent: &AgentDescriptor) -> AgentsResult<()> {
        let ack = self.delete(&format!("assistants/{}", agent.id)).await?;
        if ack.deleted {
            tracing::info!("[Agents] Deleted agent {}", ack.id);
        } else {
            tracing::warn!("[Agents] Service did not confirm deletion of agent {}", ack.id);
        }
        Ok(())
    }

    /// List ids of all agents in the project (first page)
    pub async fn list_agents(&self) -> AgentsResult<Vec<ResourceId>> {
        let envelope: ListEnvelope<ResourceId> = self.get_json("assistants").await?;
        Ok(envelope.data)
    }

    /// Delete every agent in the project, following pagination
    ///
    /// Returns the number of agents deleted. Intended for cleaning up after
    /// interrupted sessions that leaked remote resources.
    pub async fn purge_agents(&self) -> AgentsResult<usize> {
        let mut deleted = 0;
        loop {
            let envelope: ListEnvelope<ResourceId> = self.get_json("assistants").await?;
            if envelope.data.is_empty() {
                break;
            }
            for agent in &envelope.data {
                self.delete(&format!("assistants/{}", agent.id)).await?;
                deleted += 1;
            }
            if !envelope.has_more {
                break;
            }
        }
        tracing::info!("[Agents] Purged {} agents", deleted);
        Ok(deleted)
    }

    // ========================================================================
    // Threads and messages
    // ========================================================================

    /// Create an empty conversation thread
    pub async fn create_thread(&self) -> AgentsResult<ThreadDescriptor> {
        let thread: ThreadDescriptor = self.post_empty("threads").await?;
        tracing::info!("[Agents] Created thread {}", thread.id);
        Ok(thread)
    }

    /// Delete a thread and the messages it holds
    pub async fn delete_thread(&self, thread: &ThreadDescriptor) -> AgentsResult<()> {
        let ack = self.delete(&format!("threads/{}", thread.id)).await?;
        if ack.deleted {
            tracing::info!("[Agents] Deleted thread {}", ack.id);
        } else {
            tracing::warn!("[Agents] Service did not confirm deletion of thread {}", ack.id);
        }
        Ok(())
    }

    /// List ids of all threads in the project (first page)
    pub async fn list_threads(&self) -> AgentsResult<Vec<ResourceId>> {
        let envelope: ListEnvelope<ResourceId> = self.get_json("threads").await?;
        Ok(envelope.data)
    }

    /// Delete every thread in the project, following pagination
    pub async fn purge_threads(&self) -> AgentsResult<usize> {
        let mut deleted = 0;
        loop {
            let envelope: ListEnvelope<ResourceId> = self.get_json("threads").await?;
            if envelope.data.is_empty() {
                break;
            }
            for thread in &envelope.data {
                self.delete(&format!("threads/{}", thread.id)).await?;
                deleted += 1;
            }
            if !envelope.has_more {
                break;
            }
        }
        tracing::info!("[Agents] Purged {} threads", deleted);
        Ok(deleted)
    }

    /// Append a message to a thread
    pub async fn post_message(
        &self,
        thread: &ThreadDescriptor,
        role: MessageRole,
        content: &str,
    ) -> AgentsResult<()> {
        let request = CreateMessageRequest {
            content: content.to_string(),
            role,
        };
        let message: ResourceId = self
            .post_json(&format!("threads/{}/messages", thread.id), &request)
            .await?;
        tracing::debug!("[Agents] Posted message {} to thread {}", message.id, thread.id);
        Ok(())
    }

    /// Fetch a thread's messages, oldest first
    pub async fn fetch_messages(&self, thread: &ThreadDescriptor) -> AgentsResult<Vec<ThreadMessage>> {
        let envelope: ListEnvelope<ThreadMessage> = self
            .get_json(&format!("threads/{}/messages", thread.id))
            .await?;
        let mut messages = envelope.data;
        // The service lists newest first; callers read transcripts oldest first
        messages.sort_by_key(|message| message.created_at);
        tracing::debug!(
            "[Agents] Fetched {} messages from thread {}",
            messages.len(),
            thread.id
        );
        Ok(messages)
    }

    // ========================================================================
    // Runs
    // ========================================================================

    /// Start executing `agent` against `thread`
    ///
    /// Returns immediately with the run in its initial status; use
    /// [`AgentsClient::poll_run`] to wait for the outcome.
    pub async fn start_run(
        &self,
        thread: &ThreadDescriptor,
        agent: &AgentDescriptor,
    ) -> AgentsResult<RunDescriptor> {
        let request = CreateRunRequest {
            assistant_id: agent.id.clone(),
        };
        let mut run: RunDescriptor = self
            .post_json(&format!("threads/{}/runs", thread.id), &request)
            .await?;
        if run.thread_id.is_empty() {
            run.thread_id = thread.id.clone();
        }
        tracing::info!(
            "[Agents] Started run {} on thread {} ({})",
            run.id,
            run.thread_id,
            run.status
        );
        Ok(run)
    }

    /// Query the current status of a run
    pub async fn run_status(&self, run: &RunDescriptor) -> AgentsResult<RunDescriptor> {
        let mut updated: RunDescriptor = self
            .get_json(&format!("threads/{}/runs/{}", run.thread_id, run.id))
            .await?;
        if updated.thread_id.is_empty() {
            updated.thread_id = run.thread_id.clone();
        }
        Ok(updated)
    }

    /// Poll a run at a fixed interval until it reaches a terminal status
    ///
    /// At least one status query is always performed, even under a zero
    /// budget. The run is returned only when it completed; every other
    /// terminal status becomes [`AgentsError::RunFailed`], and exhausting
    /// the budget becomes [`AgentsError::Timeout`].
    pub async fn poll_run(
        &self,
        run: &RunDescriptor,
        policy: PollPolicy,
    ) -> AgentsResult<RunDescriptor> {
        let mut state = PollState::new(policy);
        let started = Instant::now();
        tracing::debug!(
            "[Agents] Polling run {} every {:?} (budget {:?})",
            run.id,
            policy.interval,
            policy.timeout
        );

        loop {
            let current = self.run_status(run).await?;
            match state.observe(current.status, started.elapsed()) {
                PollStep::Wait(interval) => {
                    tracing::debug!("[Agents] Run {} still {}", current.id, current.status);
                    tokio::time::sleep(interval).await;
                }
                PollStep::Finished => {
                    tracing::info!(
                        "[Agents] Run {} completed after {} queries in {:?}",
                        current.id,
                        state.queries(),
                        started.elapsed()
                    );
                    return Ok(current);
                }
                PollStep::Failed { status } => {
                    let detail = current.failure_detail();
                    tracing::error!("[Agents] Run {} ended as {}: {}", current.id, status, detail);
                    return Err(AgentsError::RunFailed {
                        run_id: current.id,
                        status,
                        detail,
                    });
                }
                PollStep::TimedOut { last_status } => {
                    tracing::error!(
                        "[Agents] Run {} still {} after {:?}",
                        current.id,
                        last_status,
                        policy.timeout
                    );
                    return Err(AgentsError::Timeout {
                        run_id: current.id,
                        last_status,
                        budget: policy.timeout,
                    });
                }
                PollStep::Regressed { from, to } => {
                    return Err(AgentsError::RunRegressed {
                        run_id: current.id,
                        from,
                        to,
                    });
                }
            }
        }
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Build the URL for an API path, appending the API version
    fn url(&self, path: &str) -> String {
        format!("{}/{}?api-version={}", self.endpoint, path, self.api_version)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AgentsResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> AgentsResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AgentsResult<T> {
        self.send::<(), T>(Method::POST, path, None).await
    }

    async fn delete(&self, path: &str) -> AgentsResult<DeletionAck> {
        self.send::<(), DeletionAck>(Method::DELETE, path, None).await
    }

    /// Perform one authenticated round-trip and decode the response
    ///
    /// The bearer token is fetched from the credential immediately before
    /// sending, never cached here.
    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> AgentsResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self
            .credential
            .get_token()
            .await
            .map_err(AgentsError::Credential)?;

        let url = self.url(path);
        let started = Instant::now();

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Content-Type", "application/json")
            .bearer_auth(&token.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(
            "[Agents] {} /{} -> {} in {:?}",
            method,
            path,
            status,
            started.elapsed()
        );

        if !status.is_success() {
            tracing::error!("[Agents] API error: {} - {}", status, text);
            return Err(AgentsError::for_status(status.as_u16(), text));
        }

        serde_json::from_str(&text)
            .map_err(|source| AgentsError::protocol(status.as_u16(), text, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::types::{GroundingConfig, RunStatus};
    use crate::auth::static_credential;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> AgentsClient {
        AgentsClient::new(server.uri(), static_credential("test-token"))
    }

    fn test_definition() -> AgentDefinition {
        AgentDefinition::new(GroundingConfig::new("conn-1").with_freshness("2025-08-20"))
    }

    fn test_agent() -> AgentDescriptor {
        AgentDescriptor {
            id: "asst_1".to_string(),
            grounding: GroundingConfig::new("conn-1"),
        }
    }

    fn test_thread() -> ThreadDescriptor {
        ThreadDescriptor {
            id: "thread_1".to_string(),
        }
    }

    fn pending_run() -> RunDescriptor {
        RunDescriptor {
            id: "run_1".to_string(),
            thread_id: "thread_1".to_string(),
            status: RunStatus::Queued,
            last_error: None,
            incomplete_details: None,
        }
    }

    fn run_body(status: &str) -> serde_json::Value {
        json!({ "id": "run_1", "thread_id": "thread_1", "status": status })
    }

    #[tokio::test]
    async fn test_create_agent_sends_token_and_api_version() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assistants"))
            .and(query_param("api-version", DEFAULT_API_VERSION))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(json!({ "model": "gpt-4o", "name": "my-agent" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "asst_abc",
                "object": "assistant"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let agent = client.create_agent(&test_definition()).await.unwrap();
        assert_eq!(agent.id, "asst_abc");
        assert_eq!(agent.grounding.connection_id, "conn-1");
    }

    #[tokio::test]
    async fn test_create_agent_auth_failure_stops_before_thread_creation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .expect(1)
            .mount(&server)
            .await;
        // Verified on drop: an auth failure must not be followed by thread creation
        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "thread_1" })))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.create_agent(&test_definition()).await.unwrap_err();
        assert!(matches!(err, AgentsError::Authentication { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_agent_is_a_configuration_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/assistants/asst_1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such agent"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.delete_agent(&test_agent()).await.unwrap_err();
        assert!(matches!(err, AgentsError::Configuration { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_html_success_body_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.create_agent(&test_definition()).await.unwrap_err();
        match err {
            AgentsError::Protocol { status, body, .. } => {
                assert_eq!(status, 200);
                assert!(body.contains("<html>"));
            }
            other => panic!("expected protocol error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_post_message_sends_role_and_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads/thread_1/messages"))
            .and(body_partial_json(json!({
                "role": "user",
                "content": "tell me the news"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .post_message(&test_thread(), MessageRole::User, "tell me the news")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_start_run_fills_thread_id_when_response_omits_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads/thread_1/runs"))
            .and(body_partial_json(json!({ "assistant_id": "asst_1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "run_1",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let run = client.start_run(&test_thread(), &test_agent()).await.unwrap();
        assert_eq!(run.id, "run_1");
        assert_eq!(run.thread_id, "thread_1");
        assert_eq!(run.status, RunStatus::Queued);
    }

    #[tokio::test]
    async fn test_poll_run_queries_until_completed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("in_progress")))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("completed")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let policy = PollPolicy::default().with_interval(Duration::from_millis(5));
        let finished = client.poll_run(&pending_run(), policy).await.unwrap();
        assert_eq!(finished.status, RunStatus::Completed);
    }

    #[tokio::test]
    async fn test_poll_run_queries_at_least_once_under_zero_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("completed")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let policy = PollPolicy::new(Duration::from_millis(1), Duration::ZERO);
        // A terminal status at the budget boundary still wins over the timeout
        let finished = client.poll_run(&pending_run(), policy).await.unwrap();
        assert_eq!(finished.status, RunStatus::Completed);
    }

    #[tokio::test]
    async fn test_poll_run_surfaces_run_failure_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "run_1",
                "thread_id": "thread_1",
                "status": "failed",
                "last_error": { "code": "server_error", "message": "model exploded" }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .poll_run(&pending_run(), PollPolicy::default())
            .await
            .unwrap_err();
        match err {
            AgentsError::RunFailed {
                run_id,
                status,
                detail,
            } => {
                assert_eq!(run_id, "run_1");
                assert_eq!(status, RunStatus::Failed);
                assert!(detail.contains("model exploded"));
            }
            other => panic!("expected run failure, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_poll_run_never_returns_a_non_completed_terminal_run() {
        for status in ["failed", "cancelled", "expired", "incomplete"] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/threads/thread_1/runs/run_1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(run_body(status)))
                .mount(&server)
                .await;

            let client = test_client(&server);
            let err = client
                .poll_run(&pending_run(), PollPolicy::default())
                .await
                .unwrap_err();
            assert!(
                matches!(err, AgentsError::RunFailed { .. }),
                "status {status} must fail the poll"
            );
        }
    }

    #[tokio::test]
    async fn test_poll_run_times_out_within_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("in_progress")))
            .expect(1..)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let policy = PollPolicy::new(Duration::from_millis(10), Duration::from_millis(40));
        let started = Instant::now();
        let err = client.poll_run(&pending_run(), policy).await.unwrap_err();
        let elapsed = started.elapsed();

        match err {
            AgentsError::Timeout { last_status, .. } => {
                assert_eq!(last_status, RunStatus::InProgress);
            }
            other => panic!("expected timeout, got {other}"),
        }
        // Budget plus one interval plus scheduling slack
        assert!(elapsed < Duration::from_millis(400), "poll ran for {elapsed:?}");
    }

    #[tokio::test]
    async fn test_poll_run_rejects_status_regression() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("in_progress")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("queued")))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let policy = PollPolicy::default().with_interval(Duration::from_millis(5));
        let err = client.poll_run(&pending_run(), policy).await.unwrap_err();
        assert!(matches!(
            err,
            AgentsError::RunRegressed {
                from: RunStatus::InProgress,
                to: RunStatus::Queued,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_messages_returns_oldest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [
                    {
                        "id": "msg_2",
                        "role": "assistant",
                        "created_at": 200,
                        "content": [
                            { "type": "text", "text": { "value": "Tesla shipped a new battery.", "annotations": [] } }
                        ]
                    },
                    {
                        "id": "msg_1",
                        "role": "user",
                        "created_at": 100,
                        "content": [
                            { "type": "text", "text": { "value": "any Tesla news?", "annotations": [] } }
                        ]
                    }
                ],
                "has_more": false
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let messages = client.fetch_messages(&test_thread()).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].text(), "Tesla shipped a new battery.");
    }

    #[tokio::test]
    async fn test_purge_threads_follows_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [ { "id": "thread_1" }, { "id": "thread_2" } ],
                "has_more": true
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [ { "id": "thread_3" } ],
                "has_more": false
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/threads/thread_[0-9]$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "thread_x",
                "deleted": true
            })))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let deleted = client.purge_threads().await.unwrap();
        assert_eq!(deleted, 3);
    }
}
