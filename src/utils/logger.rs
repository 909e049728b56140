//! Structured logging helpers for the transformation pipeline.
//!
//! Events go through the `log` facade, so the binary decides where they end
//! up (`env_logger`, filtered by `RUST_LOG`). Nothing here ever sees the API
//! key; callers pass endpoint, model and platform only.

use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub enum LogEvent {
    Operation {
        name: String,
        phase: OperationPhase,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<LogContext>,
    },
    Network {
        operation: String,
        status: NetworkStatus,
        duration_ms: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<NetworkDetails>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub enum OperationPhase {
    Start,
    Complete { duration_ms: u64 },
    /// Finished, but on the degraded path
    Degraded { reason: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LogContext {
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

impl LogContext {
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum NetworkStatus {
    Success,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkDetails {
    pub endpoint: String,
    pub method: String,
    pub status_code: Option<u16>,
}

pub fn log_event(event: LogEvent) {
    match event {
        LogEvent::Operation {
            name,
            phase,
            context,
        } => {
            let ctx_str = context
                .map(|c| format!(" | {:?}", c.fields))
                .unwrap_or_default();
            match phase {
                OperationPhase::Start => {
                    log::info!("🚀 {} STARTING{}", name, ctx_str);
                }
                OperationPhase::Complete { duration_ms } => {
                    log::info!("✅ {} COMPLETE in {}ms{}", name, duration_ms, ctx_str);
                }
                OperationPhase::Degraded { reason } => {
                    log::warn!("↩️ {} FELL BACK: {}{}", name, reason, ctx_str);
                }
            }
        }
        LogEvent::Network {
            operation,
            status,
            duration_ms,
            details,
        } => {
            let detail_str = details
                .map(|d| match d.status_code {
                    Some(code) => format!(" | {} {} -> {}", d.method, d.endpoint, code),
                    None => format!(" | {} {}", d.method, d.endpoint),
                })
                .unwrap_or_default();
            match status {
                NetworkStatus::Success => {
                    log::info!("🌐 {} SUCCESS in {}ms{}", operation, duration_ms, detail_str);
                }
                NetworkStatus::Failed { error } => {
                    log::warn!(
                        "🌐 {} FAILED after {}ms: {}{}",
                        operation,
                        duration_ms,
                        error,
                        detail_str
                    );
                }
            }
        }
    }
}

/// Log the outcome of a completion request.
pub fn log_api_response(endpoint: &str, status_code: Option<u16>, duration_ms: u64, error: Option<&str>) {
    let status = match error {
        None => NetworkStatus::Success,
        Some(e) => NetworkStatus::Failed {
            error: e.to_string(),
        },
    };

    log_event(LogEvent::Network {
        operation: "AI_COMPLETION".to_string(),
        status,
        duration_ms,
        details: Some(NetworkDetails {
            endpoint: endpoint.to_string(),
            method: "POST".to_string(),
            status_code,
        }),
    });
}

pub fn log_operation(name: &str, phase: OperationPhase, context: Option<LogContext>) {
    log_event(LogEvent::Operation {
        name: name.to_string(),
        phase,
        context,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder_collects_fields() {
        let ctx = LogContext::default()
            .with("platform", "jike")
            .with("model", "gpt-4o-mini");
        assert_eq!(ctx.fields.get("platform").map(String::as_str), Some("jike"));
        assert_eq!(ctx.fields.len(), 2);
    }

    #[test]
    fn test_events_serialize() {
        let event = LogEvent::Operation {
            name: "AI_TRANSFORM".to_string(),
            phase: OperationPhase::Degraded {
                reason: "disabled".to_string(),
            },
            context: Some(LogContext::default().with("platform", "x")),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Degraded"));
        assert!(json.contains("\"platform\":\"x\""));

        // Logging without an installed logger is a no-op
        log_event(event);
        log_api_response("http://localhost/v1/chat/completions", Some(500), 12, Some("HTTP 500"));
    }

    #[test]
    fn test_every_phase_is_emitted() {
        let phases = [
            OperationPhase::Start,
            OperationPhase::Complete { duration_ms: 3 },
            OperationPhase::Degraded {
                reason: "missing API key".to_string(),
            },
        ];
        let names: Vec<String> = phases
            .iter()
            .map(|phase| match phase {
                OperationPhase::Start => "Start",
                OperationPhase::Complete { .. } => "Complete",
                OperationPhase::Degraded { .. } => "Degraded",
            })
            .map(str::to_string)
            .collect();
        for (phase, name) in phases.into_iter().zip(&names) {
            assert!(serde_json::to_string(&phase).unwrap().contains(name.as_str()));
            log_operation("AI_TRANSFORM", phase, None);
        }
    }
}
