//! Conversion request value

use chrono::NaiveDateTime;

/// Owned inputs for one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Raw HTML body, possibly malformed
    pub markup: String,

    /// Email subject, rendered as the top-level heading
    pub subject: Option<String>,

    /// Delivery time as seen by the recipient
    pub delivered_at: Option<NaiveDateTime>,

    /// Literal substring marking the start of the footer
    pub footer_marker: Option<String>,
}

impl ConversionRequest {
    /// Create a request with markup only
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Default::default()
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the delivery timestamp
    pub fn with_delivered_at(mut self, delivered_at: NaiveDateTime) -> Self {
        self.delivered_at = Some(delivered_at);
        self
    }

    /// Set the footer marker
    pub fn with_footer_marker(mut self, marker: impl Into<String>) -> Self {
        self.footer_marker = Some(marker.into());
        self
    }

    /// Run the conversion
    pub fn convert(&self) -> String {
        crate::convert(
            &self.markup,
            self.subject.as_deref(),
            self.delivered_at,
            self.footer_marker.as_deref(),
        )
    }
}
