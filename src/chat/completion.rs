//! Chat completions client
//!
//! Direct HTTP client for an OpenAI-compatible chat completions
//! deployment. The deployment is addressed by base URL and authenticated
//! with an `api-key` header; requests carry `?api-version=`.
//!
//! ```ignore
//! let llm = AzureChatClient::from_env()?;
//! let reply = llm.complete(history.messages(), &tools).await?;
//! ```

use std::collections::BTreeMap;
use std::pin::Pin;

use anyhow::{Context, Result};
use futures::stream::Stream;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::config::ChatConfig;

use super::types::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ChatStreamEvent, FunctionCall, ToolCallRequest, ToolDefinition,
};

/// The distilled outcome of one completion: text plus requested tool calls
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// Assistant text, empty when the model only called tools
    pub text: String,

    /// Tool calls the model wants executed before it can answer
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Client for one chat completions deployment
pub struct AzureChatClient {
    client: Client,
    config: ChatConfig,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl AzureChatClient {
    /// Create a client for a configured deployment
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a client from environment variables
    ///
    /// Reads the variables documented on [`ChatConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        tracing::info!("Creating chat client from environment");
        let config = ChatConfig::from_env()?;
        tracing::info!("Using deployment: {}", config.deployment);
        Ok(Self::new(config))
    }

    /// Set the sampling temperature sent with every request
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the completion length sent with every request
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions?api-version={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version
        )
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        stream: bool,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: messages.to_vec(),
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream,
        }
    }

    /// Request one completion and wait for the whole response
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantReply> {
        let request = self.build_request(messages, tools, false);
        let request_json =
            serde_json::to_string(&request).context("Failed to serialize chat request")?;
        tracing::debug!("[Chat] Request JSON: {}", request_json);

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("api-key", &self.config.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to chat deployment")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read chat response body")?;

        tracing::debug!("[Chat] Response status: {}", status);
        tracing::debug!("[Chat] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[Chat] API error: {} - {}", status, response_text);
            anyhow::bail!("Chat API error ({}): {}", status, response_text);
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&response_text).context("Failed to parse chat completion")?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .context("Chat completion returned no choices")?;

        Ok(AssistantReply {
            text: choice.message.content.unwrap_or_default(),
            tool_calls: choice.message.tool_calls,
        })
    }

    /// Request one completion as a stream of events
    ///
    /// Text arrives as [`ChatStreamEvent::TextDelta`] fragments. Tool call
    /// fragments are accumulated internally and emitted as whole
    /// [`ChatStreamEvent::ToolCall`] events when the model finishes.
    pub async fn stream(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatStreamEvent>> + Send>>> {
        let request = self.build_request(messages, tools, true);
        let request_json =
            serde_json::to_string(&request).context("Failed to serialize chat streaming request")?;
        tracing::debug!("[Chat] Streaming request JSON: {}", request_json);

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header("api-key", &self.config.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send streaming request to chat deployment")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!("[Chat] Streaming API error: {} - {}", status, error_text);
            anyhow::bail!("Chat API error ({}): {}", status, error_text);
        }

        tracing::debug!("[Chat] Streaming response started");

        let byte_stream = response.bytes_stream();
        let stream_reader = StreamReader::new(
            byte_stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string()))),
        );
        let buf_reader = tokio::io::BufReader::new(stream_reader);

        let stream = async_stream::try_stream! {
            let mut lines = buf_reader.lines();
            // Tool call fragments keyed by their index within the response
            let mut pending: BTreeMap<u32, PendingToolCall> = BTreeMap::new();

            while let Some(line) = lines.next_line().await? {
                if !line.starts_with("data: ") {
                    continue;
                }
                let data = &line[6..];
                if data.is_empty() {
                    continue;
                }
                if data == "[DONE]" {
                    break;
                }

                let chunk: ChatCompletionChunk = match serde_json::from_str(data) {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        tracing::warn!("[Chat] Failed to parse streaming chunk: {}", e);
                        continue;
                    }
                };

                for choice in &chunk.choices {
                    if let Some(text) = &choice.delta.content {
                        if !text.is_empty() {
                            yield ChatStreamEvent::TextDelta(text.clone());
                        }
                    }

                    for fragment in &choice.delta.tool_calls {
                        let entry = pending.entry(fragment.index).or_default();
                        if let Some(id) = &fragment.id {
                            entry.id = Some(id.clone());
                        }
                        if let Some(name) = &fragment.function.name {
                            entry.name.push_str(name);
                        }
                        if let Some(arguments) = &fragment.function.arguments {
                            entry.arguments.push_str(arguments);
                        }
                    }

                    if let Some(reason) = &choice.finish_reason {
                        for (_, call) in std::mem::take(&mut pending) {
                            if !call.name.is_empty() {
                                yield ChatStreamEvent::ToolCall(call.assemble());
                            }
                        }
                        yield ChatStreamEvent::Done {
                            finish_reason: reason.clone(),
                        };
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Accumulator for one streamed tool call
#[derive(Debug, Default)]
struct PendingToolCall {
    id: Option<String>,
    name: String,
    arguments: String,
}

impl PendingToolCall {
    fn assemble(self) -> ToolCallRequest {
        ToolCallRequest {
            // The id normally arrives on the first fragment
            id: self
                .id
                .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4())),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: self.name,
                arguments: self.arguments,
            },
        }
    }
}
