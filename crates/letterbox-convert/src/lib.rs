//! # Letterbox Convert
//!
//! Turns the HTML body of a newsletter email into a Markdown document that
//! is safe to archive as plain text.
//!
//! The converter is a pure function of its inputs: it performs no I/O, keeps
//! no state between calls and never fails. Malformed or partial markup is
//! handed to a permissive HTML5 parser and degrades to best-effort text.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use letterbox_convert::ConversionRequest;
//!
//! let delivered = NaiveDate::from_ymd_opt(2026, 2, 28)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let markdown = ConversionRequest::new("<p>Hello <b>there</b></p><p>Unsubscribe</p>")
//!     .with_subject("Weekly digest")
//!     .with_delivered_at(delivered)
//!     .with_footer_marker("Unsubscribe")
//!     .convert();
//!
//! assert!(markdown.starts_with("# Weekly digest\n\nDate: 2026-02-28 10:00:00\n\n---\n\n"));
//! assert!(markdown.contains("Hello **there**"));
//! assert!(markdown.ends_with("--- [Footer Truncated] ---"));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌──────────┐   ┌────────────┐
//! │  Markup  │ ► │ Sanitize tree │ ► │  Render  │ ► │ Normalize  │
//! │  (HTML)  │   │ + line breaks │   │(Markdown)│   │ whitespace │
//! └──────────┘   └───────────────┘   └──────────┘   └────────────┘
//!                                                          │
//!                      ┌────────────┐   ┌──────────┐       │
//!                      │  Document  │ ◄ │  Header  │ ◄ Footer truncation
//!                      └────────────┘   └──────────┘
//! ```
//!
//! Line-break injection mutates the parsed tree before rendering. Rendering
//! first would merge adjacent block content onto a single line.

pub mod footer;
pub mod header;
pub mod normalize;
pub mod render;
pub mod request;
pub mod sanitize;

pub use footer::{truncate_footer, FOOTER_TRUNCATED_MARKER};
pub use header::render_header;
pub use normalize::normalize_whitespace;
pub use request::ConversionRequest;

use chrono::NaiveDateTime;

/// Convert newsletter markup into a Markdown document.
///
/// `subject` and `delivered_at` produce the optional header block.
/// `footer_marker` is a literal, case-sensitive substring; the first line
/// containing it and everything after are replaced by
/// [`FOOTER_TRUNCATED_MARKER`].
pub fn convert(
    markup: &str,
    subject: Option<&str>,
    delivered_at: Option<NaiveDateTime>,
    footer_marker: Option<&str>,
) -> String {
    let document = sanitize::prepare(markup);
    let rendered = render::render(&document);
    let body = normalize_whitespace(&rendered);
    let body = match footer_marker {
        Some(marker) => truncate_footer(&body, marker),
        None => body,
    };

    let mut output = render_header(subject, delivered_at);
    output.push_str(&body);
    output
}
