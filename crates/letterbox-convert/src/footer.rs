//! Footer truncation

/// Line appended when a footer was cut off
pub const FOOTER_TRUNCATED_MARKER: &str = "--- [Footer Truncated] ---";

/// Drop the first line containing `marker` and everything after it.
///
/// Matching is a plain case-sensitive substring test on each line. An empty
/// marker, or a marker found on no line, leaves `text` unchanged. When the
/// very first line matches, the result is the truncation marker alone.
pub fn truncate_footer(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let Some(cut) = lines.iter().position(|line| line.contains(marker)) else {
        return text.to_string();
    };

    let kept = lines[..cut].join("\n");
    let kept = kept.trim_end();
    if kept.is_empty() {
        FOOTER_TRUNCATED_MARKER.to_string()
    } else {
        format!("{}\n\n{}", kept, FOOTER_TRUNCATED_MARKER)
    }
}
