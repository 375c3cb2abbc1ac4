//! Runtime settings read from the environment

use crate::error::{ConfigError, Result};

pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";
pub const MAX_MESSAGES_ENV: &str = "LETTERBOX_MAX_MESSAGES";

/// Settings the orchestrator needs besides the newsletter list
#[derive(Clone)]
pub struct RuntimeSettings {
    /// OAuth bearer token for the mail and file-store APIs, minted elsewhere
    pub access_token: String,
    /// Webhook receiving run notifications
    pub webhook_url: String,
    /// Messages processed per target, most recent first
    pub max_messages_per_target: usize,
}

impl std::fmt::Debug for RuntimeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeSettings")
            .field("access_token", &"<redacted>")
            .field("webhook_url", &"<redacted>")
            .field("max_messages_per_target", &self.max_messages_per_target)
            .finish()
    }
}

impl RuntimeSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        let access_token = required(ACCESS_TOKEN_ENV)?;
        let webhook_url = required(WEBHOOK_URL_ENV)?;

        let max_messages_per_target = match lookup(MAX_MESSAGES_ENV) {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be a positive integer, got {:?}",
                        MAX_MESSAGES_ENV, raw
                    )))
                }
            },
            _ => 1,
        };

        Ok(Self {
            access_token,
            webhook_url,
            max_messages_per_target,
        })
    }
}
