use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub mod config;
pub mod openai;
pub mod prompts;

pub use openai::{ChatCompletionRequest, CompletionTransport, HttpReply, Message, ReqwestTransport};
pub use prompts::build_prompt;

use crate::platforms;
use crate::utils::logger::{log_api_response, log_operation, LogContext, OperationPhase};
use config::*;


/// Connection details for the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AISettings {
    pub enabled: bool,
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl Default for AISettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AISettings {
    /// Enabled and carrying a key. An enabled config without a key behaves
    /// exactly like a disabled one.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

/// One transformation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub content: String,
    pub platform_id: String,
}

impl TransformRequest {
    pub fn new(content: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            platform_id: platform_id.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Why the rule-based text was used.
#[derive(Debug)]
pub enum FallbackReason {
    Disabled,
    MissingApiKey,
    Failed(AIError),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Disabled => write!(f, "AI transformation disabled"),
            FallbackReason::MissingApiKey => write!(f, "no API key configured"),
            FallbackReason::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Result of the two-stage transform: remote attempt, then local substitute.
#[derive(Debug)]
pub enum TransformOutcome {
    Generated(String),
    Fallback { text: String, reason: FallbackReason },
}

impl TransformOutcome {
    pub fn text(&self) -> &str {
        match self {
            TransformOutcome::Generated(text) => text,
            TransformOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TransformOutcome::Generated(text) => text,
            TransformOutcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, TransformOutcome::Generated(_))
    }
}

/// Build the request body for one rewrite.
pub fn build_request(content: &str, platform_id: &str, settings: &AISettings) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_prompt(content, platform_id)),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_tokens: DEFAULT_MAX_TOKENS,
    }
}

fn clip_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// Single remote attempt. Every way it can go wrong is an `AIError`.
pub async fn request_completion(
    transport: &dyn CompletionTransport,
    content: &str,
    platform_id: &str,
    settings: &AISettings,
) -> Result<String, AIError> {
    let request = build_request(content, platform_id, settings);
    let started = Instant::now();

    let reply = match transport
        .post(&settings.endpoint, &settings.api_key, &request)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            let elapsed = started.elapsed().as_millis() as u64;
            log_api_response(&settings.endpoint, None, elapsed, Some(&e.to_string()));
            return Err(e);
        }
    };
    let elapsed = started.elapsed().as_millis() as u64;

    if !(200..300).contains(&reply.status) {
        let error = AIError::HttpStatus {
            status: reply.status,
            body: clip_body(&reply.body),
        };
        log_api_response(&settings.endpoint, Some(reply.status), elapsed, Some(&error.to_string()));
        return Err(error);
    }

    log_api_response(&settings.endpoint, Some(reply.status), elapsed, None);
    openai::extract_completion(&reply.body)
}

/// Transform `content` for `platform_id`, preferring the AI path and
/// substituting the rule-based formatter whenever it is unavailable.
pub async fn transform_with(
    transport: &dyn CompletionTransport,
    content: &str,
    platform_id: &str,
    settings: &AISettings,
) -> TransformOutcome {
    let context = LogContext::default()
        .with("platform", platform_id)
        .with("model", settings.model.as_str());

    let reason = if !settings.enabled {
        FallbackReason::Disabled
    } else if settings.api_key.trim().is_empty() {
        FallbackReason::MissingApiKey
    } else {
        log_operation("AI_TRANSFORM", OperationPhase::Start, Some(context.clone()));
        let started = Instant::now();

        match request_completion(transport, content, platform_id, settings).await {
            Ok(text) => {
                log_operation(
                    "AI_TRANSFORM",
                    OperationPhase::Complete {
                        duration_ms: started.elapsed().as_millis() as u64,
                    },
                    Some(context),
                );
                return TransformOutcome::Generated(text);
            }
            Err(e) => FallbackReason::Failed(e),
        }
    };

    match &reason {
        FallbackReason::Failed(_) => log_operation(
            "AI_TRANSFORM",
            OperationPhase::Degraded {
                reason: reason.to_string(),
            },
            Some(context),
        ),
        _ => log::debug!("Using rule-based formatting for '{}': {}", platform_id, reason),
    }

    TransformOutcome::Fallback {
        text: platforms::format(content, platform_id),
        reason,
    }
}

static DEFAULT_TRANSPORT: Lazy<ReqwestTransport> = Lazy::new(ReqwestTransport::new);

/// Process-wide HTTP transport. Every call shares one connection pool.
pub fn default_transport() -> &'static ReqwestTransport {
    &DEFAULT_TRANSPORT
}

/// Library entry point: transform through the shared HTTP transport. Never
/// fails; the worst case is the rule-based text. Callers that need the
/// fallback reason use `transform_with` directly.
pub async fn transform_ai(content: &str, platform_id: &str, settings: &AISettings) -> String {
    transform_with(default_transport(), content, platform_id, settings)
        .await
        .into_text()
}

/// `transform_ai` over a `TransformRequest`.
pub async fn transform_request(request: &TransformRequest, settings: &AISettings) -> String {
    transform_ai(&request.content, &request.platform_id, settings).await
}
