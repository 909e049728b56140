use crate::platforms::{platform_label, Platform};

const XIAOHONGSHU_TEMPLATE: &str = r#"请将以下内容改写为小红书风格的笔记：
- 开头用一句吸引眼球的话引出主题
- 分段简短，适当使用 emoji 增加亲和力
- 语气轻松、真诚，像在和朋友分享
- 结尾附上 3-5 个相关话题标签

原始内容："#;

const JIKE_TEMPLATE: &str = r#"请将以下内容改写为即刻风格的动态：
- 简洁有态度，控制在 200 字以内
- 口语化表达，突出一个核心观点
- 结尾附上 1-2 个相关话题标签

原始内容："#;

const X_TEMPLATE: &str = r#"Rewrite the following content as a post for X (Twitter):
- Keep it under 280 characters in total
- Lead with the single most interesting point
- Use a direct, conversational tone
- End with 1-2 relevant hashtags

Original content:"#;

const WECHAT_TEMPLATE: &str = r#"请将以下内容改写为微信公众号文章：
- 使用清晰的标题和小标题组织结构
- 段落完整、逻辑连贯，语言正式但不生硬
- 重点内容可以加粗强调
- 文末加一段简短的总结

原始内容："#;

// {platform} and {content} are filled in by generic_prompt
const GENERIC_TEMPLATE: &str = r#"请将以下内容改写为适合在{platform}平台发布的风格，保持原意并符合该平台的表达习惯。

原始内容：
{content}"#;

/// Build the instruction sent to the language model for `platform_id`.
pub fn build_prompt(content: &str, platform_id: &str) -> String {
    Platform::resolve(platform_id).prompt_builder()(content, platform_id)
}

fn with_content(template: &str, content: &str) -> String {
    format!("{}\n{}", template, content)
}

pub fn xiaohongshu_prompt(content: &str, _platform_id: &str) -> String {
    with_content(XIAOHONGSHU_TEMPLATE, content)
}

pub fn jike_prompt(content: &str, _platform_id: &str) -> String {
    with_content(JIKE_TEMPLATE, content)
}

pub fn x_prompt(content: &str, _platform_id: &str) -> String {
    with_content(X_TEMPLATE, content)
}

pub fn wechat_prompt(content: &str, _platform_id: &str) -> String {
    with_content(WECHAT_TEMPLATE, content)
}

/// Template for ids without a dedicated one. Falls back to the raw id when
/// no label is known.
pub fn generic_prompt(content: &str, platform_id: &str) -> String {
    let label = platform_label(platform_id).unwrap_or(platform_id);
    GENERIC_TEMPLATE
        .replace("{platform}", label)
        .replace("{content}", content)
}
