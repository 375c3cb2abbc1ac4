//! Archive filename derivation

use chrono::{DateTime, TimeZone};

/// Characters that are not allowed in archive filenames
pub const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Extension of archived documents
pub const EXTENSION: &str = "md";

/// Strip illegal filename characters and surrounding whitespace
pub fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `YYYYMMDD_{subject}.md`, dated in the message's own offset
pub fn archive_filename<Tz: TimeZone>(subject: &str, delivered_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}.{}",
        delivered_at.format("%Y%m%d"),
        sanitize_subject(subject),
        EXTENSION
    )
}
