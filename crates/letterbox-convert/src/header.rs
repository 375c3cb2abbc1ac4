//! Document header block

use chrono::NaiveDateTime;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the header that precedes the converted body.
///
/// Subject whitespace (folded header lines included) is collapsed to single
/// spaces; a subject that is empty after folding counts as absent. The
/// timestamp is printed as given, without timezone conversion. Returns an
/// empty string when neither value is present.
pub fn render_header(subject: Option<&str>, delivered_at: Option<NaiveDateTime>) -> String {
    let mut header = String::new();

    let subject = subject
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty());
    if let Some(subject) = subject {
        header.push_str(&format!("# {}\n\n", subject));
    }

    if let Some(date) = delivered_at {
        header.push_str(&format!("Date: {}\n\n", date.format(DATE_FORMAT)));
    }

    if !header.is_empty() {
        header.push_str("---\n\n");
    }
    header
}
