//! # letterbox
//!
//! Archives newsletter emails from Gmail into Google Drive as sanitized
//! Markdown and reports each run to a Discord webhook.
//!
//! ```text
//! NewsletterConfig ─► MailSource::search ─► MailSource::fetch
//!                                                │
//!                         archive_filename ◄─────┘
//!                                │
//!        DocumentStore::exists ──┤ (skip when present)
//!                                ▼
//!           letterbox_convert::convert ─► DocumentStore::store
//!                                │
//!                                ▼
//!                 Notifier::notify_success / notify_failure
//! ```
//!
//! [`Archiver`] depends only on the traits in [`traits`], so any mail
//! source, store or notifier can be plugged in.

pub mod archiver;
pub mod discord;
pub mod drive;
pub mod error;
pub mod filename;
pub mod gmail;
pub mod traits;

pub use archiver::{Archiver, RunReport};
pub use discord::DiscordNotifier;
pub use drive::DriveClient;
pub use error::{ArchiveError, Result};
pub use filename::archive_filename;
pub use gmail::GmailClient;
pub use traits::{DocumentStore, MailMessage, MailSource, MessageRef, Notifier};
