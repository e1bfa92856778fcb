//! Post-processing for markup completions.

const FENCE: &str = "```";

/// Remove a Markdown code fence wrapped around a completion.
///
/// Only the boundary is touched: if the trimmed text starts with a fence,
/// its first line is dropped, and the last line is dropped too when it is
/// exactly a closing fence. Fences elsewhere in the body are left alone.
///
/// # Examples
/// ```ignore
/// strip_code_fence("```html\n<p>hi</p>\n```") => "<p>hi</p>"
/// strip_code_fence("```html\n<p>hi</p>") => "<p>hi</p>"
/// strip_code_fence("<p>hi</p>") => "<p>hi</p>"
/// ```
pub fn strip_code_fence(raw: &str) -> String {
    let text = raw.trim();
    if !text.starts_with(FENCE) {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let body: &[&str] = match lines.as_slice() {
        [_, inner @ .., last] if *last == FENCE => inner,
        [_, rest @ ..] => rest,
        [] => &[],
    };

    body.join("\n")
}
