//! Small text helpers for cleaning up model replies.

use crate::DOCSTRING_PLACEHOLDER;

const FENCE: &str = "```";

/// Remove a markdown code fence wrapped around a model reply.
///
/// Drops a first line that opens a fence (with or without a language tag)
/// and a last line that closes one. The result always ends with exactly one
/// newline.
pub fn strip_code_fence(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();

    if lines
        .first()
        .is_some_and(|line| line.trim_start().starts_with(FENCE))
    {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.trim() == FENCE) {
        lines.pop();
    }

    let mut cleaned = lines.join("\n");
    let trimmed_len = cleaned.trim_end_matches('\n').len();
    cleaned.truncate(trimmed_len);
    cleaned.push('\n');
    cleaned
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turn a model reply into a bare triple-quoted docstring.
///
/// Anything before the first or after the last triple quote is discarded.
/// Replies without quotes are wrapped in `"""`.
pub fn normalize_docstring(reply: &str) -> String {
    let stripped = strip_code_fence(reply);
    let body = stripped.trim();

    for quote in ["\"\"\"", "'''"] {
        if let (Some(start), Some(end)) = (body.find(quote), body.rfind(quote)) {
            if end > start {
                return body[start..end + quote.len()].to_string();
            }
        }
    }

    let bare = body.trim_matches(|c| c == '"' || c == '\'').trim();
    if bare.is_empty() {
        return DOCSTRING_PLACEHOLDER.to_string();
    }
    format!("\"\"\"{bare}\"\"\"")
}

/// Re-indent a block of text so it can be spliced into source code.
///
/// The first line is left-trimmed, following lines keep their indentation
/// relative to the least indented of them. Blank lines stay empty.
pub fn indent_block(text: &str, indent: &str) -> Vec<String> {
    let lines: Vec<&str> = text.trim().lines().collect();
    let Some((first, rest)) = lines.split_first() else {
        return Vec::new();
    };

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let mut block = Vec::with_capacity(lines.len());
    block.push(format!("{indent}{}", first.trim_start()));
    for line in rest {
        if line.trim().is_empty() {
            block.push(String::new());
        } else {
            block.push(format!("{indent}{}", &line[margin..]));
        }
    }
    block
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}
