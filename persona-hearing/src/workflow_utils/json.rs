//! JSON extraction from model output

/// Extract JSON content from markdown code blocks or raw text
///
/// Handles:
/// - ```json blocks
/// - Generic ``` blocks
/// - Raw JSON text, with any prose before the first `{` dropped
pub fn extract_json(text: &str) -> String {
    if let Some(block) = fenced_block(text, "```json").or_else(|| fenced_block(text, "```")) {
        return block;
    }

    let trimmed = text.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

fn fenced_block(text: &str, fence: &str) -> Option<String> {
    let start = text.find(fence)? + fence.len();
    // Pairs with the first closing fence, not the last one in the text
    let end = text[start..]
        .find("```")
        .map(|pos| pos + start)
        .unwrap_or(text.len());
    Some(text[start..end].trim().to_string())
}

/// First `limit` characters of `text`, for error previews
pub fn preview(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).collect();
    if text.chars().count() > limit {
        out.push_str("...");
    }
    out
}
