use serde::{Deserialize, Serialize};

pub mod formatter;

pub use formatter::format;

/// A target platform as shown in the platform picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

impl PlatformConfig {
    fn new(id: &str, name: &str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            enabled,
        }
    }
}

/// Id selected when nothing else has been configured
pub const DEFAULT_PLATFORM_ID: &str = "xiaohongshu";

/// Fixed startup registry. Persisted settings may override `enabled` but
/// never add or remove entries.
pub fn default_platforms() -> Vec<PlatformConfig> {
    vec![
        PlatformConfig::new("xiaohongshu", "小红书", true),
        PlatformConfig::new("jike", "即刻", true),
        PlatformConfig::new("x", "X (Twitter)", true),
        PlatformConfig::new("wechat", "微信公众号", true),
        PlatformConfig::new("weibo", "微博", false),
    ]
}

/// Human-readable label for a platform id, if it has one.
pub fn platform_label(id: &str) -> Option<&'static str> {
    match id {
        "xiaohongshu" => Some("小红书"),
        "jike" => Some("即刻"),
        "x" => Some("X (Twitter)"),
        "wechat" => Some("微信公众号"),
        "weibo" => Some("微博"),
        _ => None,
    }
}

/// Closed set of formatting styles. Every id resolves to exactly one
/// variant; ids without a dedicated style land on `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Xiaohongshu,
    Jike,
    X,
    Wechat,
    Generic,
}

pub type FormatFn = fn(&str) -> String;
pub type PromptFn = fn(&str, &str) -> String;

impl Platform {
    pub fn resolve(id: &str) -> Self {
        match id {
            "xiaohongshu" => Platform::Xiaohongshu,
            "jike" => Platform::Jike,
            "x" => Platform::X,
            "wechat" => Platform::Wechat,
            _ => Platform::Generic,
        }
    }

    /// Rule-based formatter for this style.
    pub fn formatter(self) -> FormatFn {
        match self {
            Platform::Xiaohongshu => formatter::format_xiaohongshu,
            Platform::Jike => formatter::format_jike,
            Platform::X => formatter::format_x,
            Platform::Wechat => formatter::format_wechat,
            Platform::Generic => formatter::passthrough,
        }
    }

    /// Prompt builder for this style. Takes `(content, platform_id)`; only
    /// the generic builder looks at the id.
    pub fn prompt_builder(self) -> PromptFn {
        use crate::ai::prompts;

        match self {
            Platform::Xiaohongshu => prompts::xiaohongshu_prompt,
            Platform::Jike => prompts::jike_prompt,
            Platform::X => prompts::x_prompt,
            Platform::Wechat => prompts::wechat_prompt,
            Platform::Generic => prompts::generic_prompt,
        }
    }
}

/// Resolve an id to its `(formatter, prompt builder)` pair.
pub fn resolve(id: &str) -> (FormatFn, PromptFn) {
    let platform = Platform::resolve(id);
    (platform.formatter(), platform.prompt_builder())
}
