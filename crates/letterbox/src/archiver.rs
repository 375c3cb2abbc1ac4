//! Archive run orchestration

use crate::error::{ArchiveError, Result};
use crate::filename::archive_filename;
use crate::traits::{DocumentStore, MailSource, Notifier};
use letterbox_config::NewsletterConfig;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Filenames touched by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Uploaded in this run
    pub processed: Vec<String>,
    /// Already present in the store
    pub skipped: Vec<String>,
}

/// Moves newsletters from a [`MailSource`] into a [`DocumentStore`]
pub struct Archiver {
    mail: Arc<dyn MailSource>,
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    max_messages: usize,
}

impl Archiver {
    pub fn new(
        mail: Arc<dyn MailSource>,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            mail,
            store,
            notifier,
            max_messages: 1,
        }
    }

    /// Messages taken per target from the most recent search hits
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages.max(1);
        self
    }

    /// Archive every target, then notify the outcome.
    ///
    /// The run stops at the first error, including a failed success
    /// notification. A failure notification is then attempted and the
    /// original error is returned even if that fails too.
    pub async fn run(&self, targets: &[NewsletterConfig]) -> Result<RunReport> {
        match self.archive_and_report(targets).await {
            Ok(report) => Ok(report),
            Err(err) => {
                let summary = err.to_string();
                let detail = format!("{:#?}", err);
                error!("Run failed: {}", summary);
                error!("Details: {}", detail);
                if let Err(notify_err) = self
                    .notifier
                    .notify_failure(&summary, Some(&detail))
                    .await
                {
                    warn!("Failed to send failure notification: {}", notify_err);
                }
                Err(err)
            }
        }
    }

    async fn archive_and_report(&self, targets: &[NewsletterConfig]) -> Result<RunReport> {
        let report = self.archive_all(targets).await?;
        info!(
            uploaded = report.processed.len(),
            skipped = report.skipped.len(),
            "Run finished"
        );
        self.notifier.notify_success(&report.processed).await?;
        Ok(report)
    }

    async fn archive_all(&self, targets: &[NewsletterConfig]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for target in targets {
            self.archive_target(target, &mut report)
                .await
                .map_err(|source| ArchiveError::Target {
                    name: target.name.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(report)
    }

    async fn archive_target(
        &self,
        target: &NewsletterConfig,
        report: &mut RunReport,
    ) -> Result<()> {
        info!(newsletter = %target.name, query = %target.query, "Processing newsletter");
        let refs = self.mail.search(&target.query).await?;
        info!(candidates = refs.len(), "Found candidate messages");

        for message_ref in refs.iter().take(self.max_messages) {
            let message = self.mail.fetch(&message_ref.id).await?;
            let filename = archive_filename(&message.subject, &message.delivered_at);

            if self.store.exists(&filename, &target.folder_id).await? {
                info!("Skipping {}: already archived", filename);
                report.skipped.push(filename);
                continue;
            }

            let subject = (!message.subject.is_empty()).then_some(message.subject.as_str());
            let markdown = letterbox_convert::convert(
                &message.html_body,
                subject,
                Some(message.delivered_at.naive_local()),
                target.footer_starts_with.as_deref(),
            );

            let file_id = self
                .store
                .store(&filename, &markdown, &target.folder_id)
                .await?;
            info!(file_id = %file_id, "Uploaded {}", filename);
            report.processed.push(filename);
        }
        Ok(())
    }
}
