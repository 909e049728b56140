use super::clipboard::ClipboardSink;
use super::settings::Settings;
use crate::ai::{self, CompletionTransport};
use crate::platforms;
use std::fmt;

/// Non-fatal conditions the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    ClipboardFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyInput => write!(f, "请输入要转换的内容 (input is empty, nothing to do)"),
            Notice::ClipboardFailed(e) => write!(f, "复制失败 (could not copy to clipboard): {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub platform_id: String,
    /// `None` when there was nothing to transform
    pub text: Option<String>,
    pub copied: bool,
    pub notices: Vec<Notice>,
}

impl CommandOutcome {
    fn empty(platform_id: String) -> Self {
        Self {
            platform_id,
            text: None,
            copied: false,
            notices: vec![Notice::EmptyInput],
        }
    }

    fn with_text(platform_id: String, text: String) -> Self {
        Self {
            platform_id,
            text: Some(text),
            copied: false,
            notices: Vec::new(),
        }
    }

    fn copy_with(mut self, sink: &dyn ClipboardSink) -> Self {
        if let Some(text) = &self.text {
            match sink.copy_text(text) {
                Ok(()) => self.copied = true,
                Err(e) => {
                    log::warn!("Clipboard write failed: {}", e);
                    self.notices.push(Notice::ClipboardFailed(e));
                }
            }
        }
        self
    }
}

/// Pick the platform for this run. An explicit id must be registered and
/// enabled; otherwise the default is used, or the first enabled platform
/// when the default has been switched off.
pub fn select_platform(settings: &Settings, requested: Option<&str>) -> Result<String, String> {
    if let Some(id) = requested {
        return match settings.platform(id) {
            Some(platform) if platform.enabled => Ok(platform.id.clone()),
            Some(_) => Err(format!(
                "Platform '{}' is disabled. Enable it with `notecast config enable {}`",
                id, id
            )),
            None => Err(format!("Unknown platform: {}", id)),
        };
    }

    if settings
        .platform(&settings.default_platform)
        .is_some_and(|p| p.enabled)
    {
        return Ok(settings.default_platform.clone());
    }

    settings
        .enabled_platforms()
        .next()
        .map(|p| p.id.clone())
        .ok_or_else(|| "No platforms are enabled".to_string())
}

fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Rule-based preview. Never touches the network.
pub fn preview(settings: &Settings, content: &str, platform: Option<&str>) -> Result<CommandOutcome, String> {
    let platform_id = select_platform(settings, platform)?;
    if is_blank(content) {
        return Ok(CommandOutcome::empty(platform_id));
    }

    let text = platforms::format(content, &platform_id);
    Ok(CommandOutcome::with_text(platform_id, text))
}

/// Rule-based preview, copied to the clipboard.
pub fn copy(
    sink: &dyn ClipboardSink,
    settings: &Settings,
    content: &str,
    platform: Option<&str>,
) -> Result<CommandOutcome, String> {
    Ok(preview(settings, content, platform)?.copy_with(sink))
}

/// AI rewrite with rule-based fallback.
pub async fn generate(
    transport: &dyn CompletionTransport,
    settings: &Settings,
    content: &str,
    platform: Option<&str>,
) -> Result<CommandOutcome, String> {
    let platform_id = select_platform(settings, platform)?;
    if is_blank(content) {
        return Ok(CommandOutcome::empty(platform_id));
    }

    let text = ai::transform_with(transport, content, &platform_id, &settings.ai)
        .await
        .into_text();
    Ok(CommandOutcome::with_text(platform_id, text))
}

/// Produce the post (AI when enabled, rules otherwise) and copy it.
pub async fn distribute(
    transport: &dyn CompletionTransport,
    sink: &dyn ClipboardSink,
    settings: &Settings,
    content: &str,
    platform: Option<&str>,
) -> Result<CommandOutcome, String> {
    let outcome = if settings.ai.enabled {
        generate(transport, settings, content, platform).await?
    } else {
        preview(settings, content, platform)?
    };

    Ok(outcome.copy_with(sink))
}
