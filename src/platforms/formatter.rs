//! Rule-based rewriting of note text into per-platform post styles.
//!
//! Everything here is pure and total: any input string and any platform id
//! produce a string. Lengths are counted in `char`s.

use super::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

// Any run of `#` (optionally followed by spaces/tabs) at line start, repeated.
static HEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:#+[ \t]*)+").expect("heading marker pattern"));

pub const ELLIPSIS: &str = "...";

pub const XIAOHONGSHU_INTRO: &str = "✨ 今日分享 ✨\n\n";
pub const XIAOHONGSHU_TAGS: &str = "\n\n#Obsidian #笔记分享 #效率工具 #内容分发";
pub const XIAOHONGSHU_SPARKLE: &str = "✨ ";
/// Paragraphs longer than this get the sparkle prefix
pub const XIAOHONGSHU_HIGHLIGHT_THRESHOLD: usize = 50;

pub const JIKE_INTRO: &str = "💭 随手记录：\n\n";
pub const JIKE_TAGS: &str = "\n\n#Obsidian #内容分发";
pub const JIKE_MAX_LINES: usize = 5;
pub const JIKE_MAX_CHARS: usize = 200;

pub const X_INTRO: &str = "🧵 Thread\n\n";
pub const X_TAGS: &str = "\n\n#Obsidian #PKM";
pub const X_BODY_LIMIT: usize = 240;
/// Hard limit for a whole post. The wrapper above is short enough that a
/// truncated body plus intro and tags never exceeds it.
pub const X_POST_LIMIT: usize = 280;

pub const WECHAT_DEFAULT_HEADING: &str = "# 今日分享\n\n";
pub const WECHAT_SUMMARY: &str = "## 总结\n\n感谢阅读，欢迎在评论区分享你的想法。";

/// Format `content` for `platform_id` using local rules only.
pub fn format(content: &str, platform_id: &str) -> String {
    Platform::resolve(platform_id).formatter()(content)
}

/// Remove heading markers from the start of every line.
pub fn strip_heading_markers(content: &str) -> String {
    HEADING_MARKERS.replace_all(content, "").into_owned()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub fn format_xiaohongshu(content: &str) -> String {
    let stripped = strip_heading_markers(content);

    let body = stripped
        .split("\n\n")
        .map(|paragraph| {
            if char_len(paragraph) > XIAOHONGSHU_HIGHLIGHT_THRESHOLD {
                format!("{}{}", XIAOHONGSHU_SPARKLE, paragraph)
            } else {
                paragraph.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}{}", XIAOHONGSHU_INTRO, body, XIAOHONGSHU_TAGS)
}

pub fn format_jike(content: &str) -> String {
    let stripped = strip_heading_markers(content);

    let mut body = stripped
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(JIKE_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    if char_len(&body) > JIKE_MAX_CHARS {
        body = truncate_chars(&body, JIKE_MAX_CHARS - char_len(ELLIPSIS));
        body.push_str(ELLIPSIS);
    }

    format!("{}{}{}", JIKE_INTRO, body, JIKE_TAGS)
}

pub fn format_x(content: &str) -> String {
    let stripped = strip_heading_markers(content);
    let trimmed = stripped.trim();

    let body = if char_len(trimmed) > X_BODY_LIMIT {
        format!("{}{}", truncate_chars(trimmed, X_BODY_LIMIT), ELLIPSIS)
    } else {
        trimmed.to_string()
    };

    format!("{}{}{}", X_INTRO, body, X_TAGS)
}

pub fn format_wechat(content: &str) -> String {
    let mut body = String::new();
    if !content.trim_start().starts_with('#') {
        body.push_str(WECHAT_DEFAULT_HEADING);
    }

    // Drop any summary the note already carries so it is emitted once.
    // Removing one copy can splice a new one together, so repeat.
    let mut without_summary = content.to_string();
    while without_summary.contains(WECHAT_SUMMARY) {
        without_summary = without_summary.replace(WECHAT_SUMMARY, "");
    }
    body.push_str(without_summary.trim_end());

    format!("{}\n\n{}", body, WECHAT_SUMMARY)
}

pub fn passthrough(content: &str) -> String {
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> Vec<String> {
        vec![
            String::new(),
            " ".to_string(),
            "\n\n\n".to_string(),
            "#".to_string(),
            "# Hello\n\nThis is a short note.".to_string(),
            "## # nested heading\n###no space\ntext with # inside".to_string(),
            "长".repeat(500),
            "line\n".repeat(20),
            "🎉".repeat(300),
            format!("{}\n\n{}", "a".repeat(60), "b".repeat(10)),
            format!("正文\n\n{}", WECHAT_SUMMARY),
            nested_summary(),
        ]
    }

    // A summary wrapped inside a split copy of itself
    fn nested_summary() -> String {
        let split = "## 总".len();
        format!(
            "正文\n\n{}{}{}",
            &WECHAT_SUMMARY[..split],
            WECHAT_SUMMARY,
            &WECHAT_SUMMARY[split..]
        )
    }

    fn embedded<'a>(output: &'a str, intro: &str, tags: &str) -> &'a str {
        output
            .strip_prefix(intro)
            .and_then(|rest| rest.strip_suffix(tags))
            .expect("output should be wrapped")
    }

    #[test]
    fn test_format_is_total() {
        let ids = ["xiaohongshu", "jike", "x", "wechat", "weibo", "", "unknown"];
        for id in ids {
            for input in sample_inputs() {
                let _ = format(&input, id);
            }
        }
    }

    #[test]
    fn test_strip_heading_markers_only_at_line_start() {
        assert_eq!(strip_heading_markers("# Title"), "Title");
        assert_eq!(strip_heading_markers("###Title"), "Title");
        assert_eq!(strip_heading_markers("## # Title"), "Title");
        assert_eq!(
            strip_heading_markers("a # b\n## c\n  # d"),
            "a # b\nc\n  # d"
        );
        // A lone marker line must not swallow the following newline
        assert_eq!(strip_heading_markers("#\nbody"), "\nbody");
    }

    #[test]
    fn test_strip_heading_markers_is_idempotent() {
        for input in sample_inputs() {
            let once = strip_heading_markers(&input);
            assert_eq!(strip_heading_markers(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_xiaohongshu_highlights_long_paragraphs() {
        let long = "x".repeat(51);
        let exact = "y".repeat(50);
        let input = format!("# Title\n\n{}\n\n{}", long, exact);
        let output = format_xiaohongshu(&input);

        assert!(output.starts_with(XIAOHONGSHU_INTRO));
        assert!(output.ends_with(XIAOHONGSHU_TAGS));
        let body = embedded(&output, XIAOHONGSHU_INTRO, XIAOHONGSHU_TAGS);
        assert_eq!(body, format!("Title\n\n✨ {}\n\n{}", long, exact));
    }

    #[test]
    fn test_xiaohongshu_keeps_empty_paragraphs() {
        let output = format_xiaohongshu("a\n\n\n\nb");
        let body = embedded(&output, XIAOHONGSHU_INTRO, XIAOHONGSHU_TAGS);
        assert_eq!(body, "a\n\n\n\nb");
    }

    #[test]
    fn test_xiaohongshu_counts_chars_not_bytes() {
        // 20 CJK chars are 60 bytes but stay under the threshold
        let input = "字".repeat(20);
        let output = format_xiaohongshu(&input);
        assert!(!output.contains(&format!("{}{}", XIAOHONGSHU_SPARKLE, input)));
    }

    #[test]
    fn test_jike_example() {
        let output = format("# Hello\n\nThis is a short note.", "jike");
        assert_eq!(
            output,
            "💭 随手记录：\n\nHello\nThis is a short note.\n\n#Obsidian #内容分发"
        );
        assert!(output.ends_with("#Obsidian #内容分发"));
    }

    #[test]
    fn test_jike_keeps_first_five_lines() {
        let input = (1..=8).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n\n");
        let output = format_jike(&input);
        let body = embedded(&output, JIKE_INTRO, JIKE_TAGS);
        assert_eq!(body, "line 1\nline 2\nline 3\nline 4\nline 5");
    }

    #[test]
    fn test_jike_truncates_to_two_hundred_chars() {
        let output = format_jike(&"长".repeat(500));
        let body = embedded(&output, JIKE_INTRO, JIKE_TAGS);
        assert_eq!(body.chars().count(), JIKE_MAX_CHARS);
        assert!(body.ends_with(ELLIPSIS));

        for input in sample_inputs() {
            let output = format_jike(&input);
            let body = embedded(&output, JIKE_INTRO, JIKE_TAGS);
            assert!(body.chars().count() <= JIKE_MAX_CHARS);
        }
    }

    #[test]
    fn test_jike_short_input_unmodified() {
        let input = "a".repeat(199);
        let output = format_jike(&input);
        assert_eq!(embedded(&output, JIKE_INTRO, JIKE_TAGS), input);

        let input = "a".repeat(200);
        let output = format_jike(&input);
        assert_eq!(embedded(&output, JIKE_INTRO, JIKE_TAGS), input);
    }

    #[test]
    fn test_x_truncates_body() {
        let input = "a".repeat(241);
        let output = format_x(&input);
        let body = embedded(&output, X_INTRO, X_TAGS);
        assert_eq!(body, format!("{}{}", "a".repeat(240), ELLIPSIS));
    }

    #[test]
    fn test_x_short_input_unmodified() {
        let input = "é".repeat(240);
        let output = format_x(&format!("  {}  \n", input));
        assert_eq!(embedded(&output, X_INTRO, X_TAGS), input);
    }

    #[test]
    fn test_x_body_before_ellipsis_is_bounded() {
        for input in sample_inputs() {
            let output = format_x(&input);
            let body = embedded(&output, X_INTRO, X_TAGS);
            let before = body.strip_suffix(ELLIPSIS).unwrap_or(body);
            assert!(before.chars().count() <= X_BODY_LIMIT);
        }
    }

    #[test]
    fn test_x_final_post_fits_limit() {
        for input in sample_inputs() {
            assert!(format_x(&input).chars().count() <= X_POST_LIMIT);
        }
        let worst = X_INTRO.chars().count()
            + X_BODY_LIMIT
            + ELLIPSIS.chars().count()
            + X_TAGS.chars().count();
        assert!(worst <= X_POST_LIMIT);
    }

    #[test]
    fn test_wechat_example() {
        let output = format("Body text only.", "wechat");
        assert!(output.starts_with(WECHAT_DEFAULT_HEADING));
        assert_eq!(
            output,
            format!("{}Body text only.\n\n{}", WECHAT_DEFAULT_HEADING, WECHAT_SUMMARY)
        );
        assert!(output.contains("总结"));
    }

    #[test]
    fn test_wechat_keeps_existing_heading() {
        let output = format_wechat("# 我的标题\n\n正文");
        assert!(output.starts_with("# 我的标题"));
        assert!(!output.contains(WECHAT_DEFAULT_HEADING));
    }

    #[test]
    fn test_wechat_summary_exactly_once() {
        for input in sample_inputs() {
            let output = format_wechat(&input);
            assert_eq!(output.matches(WECHAT_SUMMARY).count(), 1, "input: {:?}", input);
            assert!(output.ends_with(WECHAT_SUMMARY));
        }
    }

    #[test]
    fn test_wechat_nested_summary_is_removed_completely() {
        let output = format_wechat(&nested_summary());
        assert_eq!(output.matches(WECHAT_SUMMARY).count(), 1);
        assert_eq!(
            output,
            format!("{}正文\n\n{}", WECHAT_DEFAULT_HEADING, WECHAT_SUMMARY)
        );
    }

    #[test]
    fn test_wechat_does_not_truncate() {
        let input = "长".repeat(5000);
        assert!(format_wechat(&input).contains(&input));
    }

    #[test]
    fn test_unknown_platform_is_identity() {
        for input in sample_inputs() {
            assert_eq!(format(&input, "mastodon"), input);
            assert_eq!(format(&input, "weibo"), input);
        }
    }
}
