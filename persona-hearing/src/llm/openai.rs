//! OpenAI Responses API backend
//!
//! Sends one `POST {base_url}/responses` per generation with a strict JSON Schema
//! output format and, when granted, the hosted web-search tool.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hearing::config::ModelConfig;
use crate::workflow_utils::agent::{AgentError, GenerationRequest, TextGenerator, ToolGrant};

/// [`TextGenerator`] backed by the OpenAI HTTP API
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiGenerator {
    /// Build a generator from resolved model settings.
    ///
    /// The configured request timeout applies to every call.
    pub fn new(config: &ModelConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/responses", config.base_url),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(
        &self,
        agent: &str,
        body: &ResponsesRequest<'_>,
    ) -> Result<ResponsesResponse, AgentError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let reason = if err.is_timeout() {
                    "request timed out"
                } else {
                    "request failed"
                };
                AgentError::invocation(agent, format!("OpenAI API {reason}: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(agent, status, &body_text));
        }

        response.json().await.map_err(|err| {
            AgentError::invocation(agent, format!("Failed to parse OpenAI response: {err}"))
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, AgentError> {
        let body = ResponsesRequest::from_generation(&self.model, request);

        tracing::debug!(
            agent = request.agent_name,
            model = %self.model,
            tools = body.tools.len(),
            "sending responses request"
        );

        let response = self.send_request(request.agent_name, &body).await?;
        extract_output_text(request.agent_name, response)
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolSpec>,
    text: TextConfig<'a>,
}

impl<'a> ResponsesRequest<'a> {
    fn from_generation(model: &'a str, request: &GenerationRequest<'a>) -> Self {
        Self {
            model,
            instructions: request.instructions,
            input: request.prompt,
            tools: request.tools.iter().map(|tool| ToolSpec::from(*tool)).collect(),
            text: TextConfig {
                format: FormatSpec {
                    kind: "json_schema",
                    name: request.output.name,
                    schema: request.output.schema,
                    strict: request.output.strict,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolSpec {
    WebSearchPreview,
}

impl From<ToolGrant> for ToolSpec {
    fn from(grant: ToolGrant) -> Self {
        match grant {
            ToolGrant::WebSearch => ToolSpec::WebSearchPreview,
        }
    }
}

#[derive(Debug, Serialize)]
struct TextConfig<'a> {
    format: FormatSpec<'a>,
}

#[derive(Debug, Serialize)]
struct FormatSpec<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct IncompleteDetails {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    WebSearchCall,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_output_text(agent: &str, response: ResponsesResponse) -> Result<String, AgentError> {
    if response.status.as_deref() == Some("incomplete") {
        let reason = response
            .incomplete_details
            .and_then(|details| details.reason)
            .unwrap_or_else(|| "unknown reason".to_string());
        return Err(AgentError::invocation(
            agent,
            format!("response incomplete: {reason}"),
        ));
    }

    let mut text = String::new();
    let mut searches = 0usize;

    for item in response.output {
        match item {
            OutputItem::Message { content } => {
                for part in content {
                    match part {
                        ContentPart::OutputText { text: chunk } => text.push_str(&chunk),
                        ContentPart::Refusal { refusal } => {
                            return Err(AgentError::invocation(
                                agent,
                                format!("model refused: {refusal}"),
                            ));
                        }
                        ContentPart::Other => {}
                    }
                }
            }
            OutputItem::WebSearchCall => searches += 1,
            OutputItem::Other => {}
        }
    }

    if searches > 0 {
        tracing::debug!(agent, searches, "web search calls in response");
    }

    if text.trim().is_empty() {
        return Err(AgentError::invocation(
            agent,
            "OpenAI API returned no output text",
        ));
    }

    Ok(text)
}

fn map_http_error(agent: &str, status: StatusCode, body: &str) -> AgentError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    AgentError::invocation(agent, format!("HTTP {}: {}", status.as_u16(), message))
}
