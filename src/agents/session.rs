//! Grounding session lifecycle
//!
//! A [`GroundingSession`] owns one remote agent and one remote thread for
//! the duration of a grounded exchange. Both resources cost quota on the
//! hosted service, so the session creates them on open, and deletes them
//! on close; [`GroundingSession::search_once`] wraps the whole lifecycle
//! around a single question for callers that want no state at all.

use uuid::Uuid;

use crate::core::{AgentsError, AgentsResult};

use super::client::AgentsClient;
use super::poll::PollPolicy;
use super::types::{AgentDefinition, AgentDescriptor, Citation, MessageRole, ThreadDescriptor};

/// The outcome of one grounded question
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    /// Text of the assistant's reply
    pub text: String,

    /// Web sources cited by the reply, deduplicated by URL in citation order
    pub citations: Vec<Citation>,

    /// The run that produced the reply
    pub run_id: String,
}

/// One remote agent plus one remote thread, opened together and closed
/// together
///
/// ```ignore
/// let session = GroundingSession::open(client, definition).await?;
/// let answer = session.ask("what changed in the news today?").await?;
/// session.close().await?;
/// ```
pub struct GroundingSession {
    client: AgentsClient,
    agent: AgentDescriptor,
    thread: ThreadDescriptor,
    policy: PollPolicy,
    /// Correlates this session's log lines; never sent to the service
    session_id: String,
}

impl GroundingSession {
    /// Create the remote agent and thread backing a new session
    ///
    /// The two creations are independent and issued concurrently. If one
    /// fails, the resource the other call created is deleted before the
    /// error is returned, so a failed open leaks nothing.
    pub async fn open(client: AgentsClient, definition: AgentDefinition) -> AgentsResult<Self> {
        let session_id = Uuid::new_v4().to_string();
        tracing::info!("[Session {}] Opening grounding session", session_id);

        let (agent_result, thread_result) =
            tokio::join!(client.create_agent(&definition), client.create_thread());

        let (agent, thread) = match (agent_result, thread_result) {
            (Ok(agent), Ok(thread)) => (agent, thread),
            (Err(err), Ok(thread)) => {
                if let Err(cleanup) = client.delete_thread(&thread).await {
                    tracing::warn!(
                        "[Session {}] Failed to clean up thread {}: {}",
                        session_id,
                        thread.id,
                        cleanup
                    );
                }
                return Err(err);
            }
            (Ok(agent), Err(err)) => {
                if let Err(cleanup) = client.delete_agent(&agent).await {
                    tracing::warn!(
                        "[Session {}] Failed to clean up agent {}: {}",
                        session_id,
                        agent.id,
                        cleanup
                    );
                }
                return Err(err);
            }
            (Err(err), Err(_)) => return Err(err),
        };

        Ok(Self {
            client,
            agent,
            thread,
            policy: PollPolicy::default(),
            session_id,
        })
    }

    /// Override the polling policy used by [`GroundingSession::ask`]
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The agent backing this session
    pub fn agent(&self) -> &AgentDescriptor {
        &self.agent
    }

    /// The thread backing this session
    pub fn thread(&self) -> &ThreadDescriptor {
        &self.thread
    }

    /// Ask one grounded question and wait for the answer
    ///
    /// Posts the question, starts a run, polls it to completion, then
    /// reads the newest assistant message from the thread. Citations are
    /// deduplicated by URL, keeping first-seen order.
    pub async fn ask(&self, question: &str) -> AgentsResult<GroundedAnswer> {
        tracing::info!("[Session {}] Query: {}", self.session_id, question);

        self.client
            .post_message(&self.thread, MessageRole::User, question)
            .await?;
        let run = self.client.start_run(&self.thread, &self.agent).await?;
        let finished = self.client.poll_run(&run, self.policy).await?;

        let messages = self.client.fetch_messages(&self.thread).await?;
        let answer = messages
            .iter()
            .rev()
            .find(|message| message.role == MessageRole::Assistant)
            .ok_or_else(|| AgentsError::MissingAnswer {
                run_id: finished.id.clone(),
                thread_id: self.thread.id.clone(),
            })?;

        let citations = dedup_citations(answer.citations());
        tracing::info!(
            "[Session {}] Answered by run {} with {} citations",
            self.session_id,
            finished.id,
            citations.len()
        );

        Ok(GroundedAnswer {
            text: answer.text(),
            citations,
            run_id: finished.id,
        })
    }

    /// Delete the remote agent and thread
    ///
    /// Both deletions are always attempted; the first failure is returned
    /// after both have settled.
    pub async fn close(self) -> AgentsResult<()> {
        tracing::info!("[Session {}] Closing grounding session", self.session_id);
        let (agent_result, thread_result) = tokio::join!(
            self.client.delete_agent(&self.agent),
            self.client.delete_thread(&self.thread),
        );
        agent_result?;
        thread_result?;
        Ok(())
    }

    /// Run one grounded question through a throwaway session
    ///
    /// Opens a session, asks, and closes it again. Close failures after a
    /// successful answer are logged rather than returned: the caller has
    /// their answer, and the leak is recoverable via
    /// [`AgentsClient::purge_agents`] / [`AgentsClient::purge_threads`].
    pub async fn search_once(
        client: &AgentsClient,
        definition: AgentDefinition,
        question: &str,
    ) -> AgentsResult<GroundedAnswer> {
        let session = Self::open(client.clone(), definition).await?;
        let session_id = session.session_id.clone();
        let outcome = session.ask(question).await;
        if let Err(cleanup) = session.close().await {
            tracing::warn!("[Session {}] Cleanup failed: {}", session_id, cleanup);
        }
        outcome
    }
}

/// Deduplicate citations by URL, preserving first-seen order
fn dedup_citations(citations: Vec<Citation>) -> Vec<Citation> {
    let mut seen = std::collections::HashSet::new();
    citations
        .into_iter()
        .filter(|citation| seen.insert(citation.url.clone()))
        .collect()
}
