use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static WRAPPING_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[a-zA-Z]*\n([\s\S]*?)\n```$").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Tidy a model's summary for display and download
pub fn clean_summary_text(response: &str) -> String {
    let normalized = response.replace("\r\n", "\n");

    let mut cleaned = THINK_TAG_PATTERN.replace_all(&normalized, "").to_string();
    cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = cleaned.trim().to_string();

    // Some models wrap the whole answer in a markdown fence
    if let Some(inner) = WRAPPING_FENCE_PATTERN
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
    {
        cleaned = inner.as_str().trim().to_string();
    }

    MULTIPLE_NEWLINES_PATTERN
        .replace_all(&cleaned, "\n\n")
        .to_string()
}
