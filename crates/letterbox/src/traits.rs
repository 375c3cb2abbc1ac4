//! Collaborator traits used by the [`Archiver`](crate::Archiver)
//!
//! Each trait covers one external service. The HTTP implementations live in
//! [`crate::gmail`], [`crate::drive`] and [`crate::discord`]; tests plug in
//! in-memory fakes.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A search hit in the mailbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
    #[serde(rename = "threadId", default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl MessageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
        }
    }
}

/// A fetched message with the parts the archive needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub id: String,
    /// Subject header, empty when absent
    pub subject: String,
    /// HTML body, empty when the message has no HTML part
    pub html_body: String,
    /// Delivery time with the sender's offset preserved
    pub delivered_at: DateTime<FixedOffset>,
}

/// Source of newsletter messages
#[async_trait]
pub trait MailSource: Send + Sync {
    /// Messages matching `query`, most recent first
    async fn search(&self, query: &str) -> Result<Vec<MessageRef>>;

    /// Fetch subject, HTML body and delivery time for one message
    async fn fetch(&self, id: &str) -> Result<MailMessage>;
}

/// Destination for archived documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether `filename` already exists in `folder_id`
    async fn exists(&self, filename: &str, folder_id: &str) -> Result<bool>;

    /// Store `content` as `filename` in `folder_id`, returning the new id
    async fn store(&self, filename: &str, content: &str, folder_id: &str) -> Result<String>;
}

/// Sink for run outcome notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report a finished run with the filenames that were archived
    async fn notify_success(&self, processed: &[String]) -> Result<()>;

    /// Report a failed run
    async fn notify_failure(&self, summary: &str, detail: Option<&str>) -> Result<()>;
}
