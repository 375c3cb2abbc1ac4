//! Gmail REST client implementing [`MailSource`]

use crate::error::{ensure_success, ArchiveError, Result};
use crate::traits::{MailMessage, MailSource, MessageRef};
use async_trait::async_trait;
use base64::alphabet;
use base64::engine::{self, general_purpose::GeneralPurpose, DecodePaddingMode, Engine as _};
use chrono::{DateTime, FixedOffset, Local};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// URL-safe alphabet, padding optional. Gmail omits it on some parts.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    engine::GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    payload: Option<MessagePart>,
}

#[derive(Debug, Default, Deserialize)]
struct MessagePart {
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    #[serde(default)]
    headers: Vec<Header>,
    #[serde(default)]
    body: Option<PartBody>,
    #[serde(default)]
    parts: Vec<MessagePart>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct PartBody {
    data: Option<String>,
}

impl MessagePart {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    fn data(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.data.as_deref())
    }

    /// First `text/html` part with data, depth-first
    fn find_html(&self) -> Option<&str> {
        if self.mime_type.eq_ignore_ascii_case("text/html") {
            if let Some(data) = self.data() {
                return Some(data);
            }
        }
        self.parts.iter().find_map(MessagePart::find_html)
    }

    /// HTML data for the message, falling back to the top-level body of a
    /// single-part message
    fn html_data(&self) -> Option<&str> {
        if self.parts.is_empty() {
            self.data()
        } else {
            self.find_html()
        }
    }
}

/// Decode a Gmail body payload into text
pub fn decode_body(data: &str) -> Result<String> {
    let bytes = BODY_ENGINE
        .decode(data.trim())
        .map_err(|e| ArchiveError::Decode(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an RFC 2822 `Date` header, ignoring a trailing `(comment)`
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    let value = match value.rfind('(') {
        Some(idx) if value.ends_with(')') => value[..idx].trim_end(),
        _ => value,
    };
    DateTime::parse_from_rfc2822(value).ok()
}

/// Gmail client authenticated with a bearer token
pub struct GmailClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GmailClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Point the client at another host, e.g. a mock server
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/gmail/v1/users/me/{}", self.base_url, path)
    }
}

#[async_trait]
impl MailSource for GmailClient {
    async fn search(&self, query: &str) -> Result<Vec<MessageRef>> {
        debug!("Searching mailbox: {}", query);
        let response = self
            .client
            .get(self.url("messages"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query)])
            .send()
            .await?;
        let list: ListResponse = ensure_success(response).await?.json().await?;
        Ok(list.messages)
    }

    async fn fetch(&self, id: &str) -> Result<MailMessage> {
        debug!("Fetching message {}", id);
        let response = self
            .client
            .get(self.url(&format!("messages/{}", id)))
            .bearer_auth(&self.access_token)
            .query(&[("format", "full")])
            .send()
            .await?;
        let message: MessageResponse = ensure_success(response).await?.json().await?;
        let payload = message.payload.unwrap_or_default();

        let subject = payload.header("Subject").unwrap_or_default().to_string();

        let html_body = match payload.html_data() {
            Some(data) => decode_body(data)?,
            None => String::new(),
        };

        let delivered_at = match payload.header("Date").map(str::trim) {
            None | Some("") => DateTime::<FixedOffset>::from(Local::now()),
            Some(raw) => parse_date(raw).ok_or_else(|| ArchiveError::InvalidMessage {
                id: message.id.clone(),
                reason: format!("unparseable Date header {:?}", raw),
            })?,
        };

        Ok(MailMessage {
            id: message.id,
            subject,
            html_body,
            delivered_at,
        })
    }
}
