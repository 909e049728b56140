/// Configuration constants for the completion request

/// Sampling temperature sent with every request
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Model used when none has been configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI-compatible chat completions endpoint, used verbatim
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// System message for every rewrite
pub const SYSTEM_PROMPT: &str = "You are a professional content creator who adapts content to the style of each social media platform. Return only the rewritten post.";

/// Longest slice of an error body kept in logs and errors
pub const MAX_ERROR_BODY_CHARS: usize = 500;
