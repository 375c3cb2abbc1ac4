//! Discord webhook notifier implementing [`Notifier`]

use crate::error::{ensure_success, Result};
use crate::traits::Notifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Detail text longer than this is cut before posting
pub const MAX_DETAIL_CHARS: usize = 1500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Message posted after a successful run
pub fn success_message(processed: &[String]) -> String {
    if processed.is_empty() {
        return "✅ Gmail Uploader: No new emails to process.".to_string();
    }
    let files = processed
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "✅ Gmail Uploader: Uploaded {} emails.\n\n**Processed Files:**\n{}",
        processed.len(),
        files
    )
}

/// Message posted after a failed run
pub fn failure_message(summary: &str, detail: Option<&str>) -> String {
    let mut message = format!(
        "❌ **Gmail Uploader: Execution Error**\n\n**Summary:** {}",
        summary
    );
    if let Some(detail) = detail {
        let cut: String = detail.chars().take(MAX_DETAIL_CHARS).collect();
        message.push_str(&format!("\n\n**Details:**\n```\n{}\n```", cut));
    }
    message
}

/// Posts run notifications to a Discord webhook
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    async fn post(&self, content: &str) -> Result<()> {
        debug!("Posting webhook notification ({} chars)", content.chars().count());
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookPayload { content })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify_success(&self, processed: &[String]) -> Result<()> {
        self.post(&success_message(processed)).await
    }

    async fn notify_failure(&self, summary: &str, detail: Option<&str>) -> Result<()> {
        self.post(&failure_message(summary, detail)).await
    }
}
