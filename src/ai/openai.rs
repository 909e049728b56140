use super::AIError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
}

/// Raw HTTP outcome. Status and body are interpreted by the gateway so the
/// transport only has to report what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends one chat completion request. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<HttpReply, AIError>;
}

/// `reqwest`-backed transport. No timeout is set beyond the client default.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionTransport for ReqwestTransport {
    async fn post(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<HttpReply, AIError> {
        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AIError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AIError::NetworkError(format!("Failed to read response body: {}", e)))?;

        Ok(HttpReply { status, body })
    }
}

/// Pull `choices[0].message.content` out of a successful response body.
pub fn extract_completion(body: &str) -> Result<String, AIError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| AIError::InvalidResponse(e.to_string()))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::InvalidResponse("No choices in response".to_string()))?
        .message
        .content
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(AIError::InvalidResponse(
            "Empty response from API".to_string(),
        ));
    }

    Ok(text)
}
