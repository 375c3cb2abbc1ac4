//! Google Drive REST client implementing [`DocumentStore`]

use crate::error::{ensure_success, Result};
use crate::traits::DocumentStore;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// MIME type of uploaded archive documents
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    parents: [&'a str; 1],
    mime_type: &'a str,
}

/// Escape a value for use inside a single-quoted Drive query literal
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Query matching a live file called `filename` directly under `folder_id`
pub fn exists_query(filename: &str, folder_id: &str) -> String {
    format!(
        "name = '{}' and '{}' in parents and trashed = false",
        escape_query_value(filename),
        escape_query_value(folder_id)
    )
}

/// Build a `multipart/related` body with JSON metadata and the document
fn multipart_body(boundary: &str, metadata: &str, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
         --{b}\r\nContent-Type: {mime}; charset=UTF-8\r\n\r\n{content}\r\n\
         --{b}--\r\n",
        b = boundary,
        metadata = metadata,
        mime = MARKDOWN_MIME_TYPE,
        content = content,
    )
}

/// Drive client authenticated with a bearer token
pub struct DriveClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl DriveClient {
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
}

#[async_trait]
impl DocumentStore for DriveClient {
    async fn exists(&self, filename: &str, folder_id: &str) -> Result<bool> {
        let query = exists_query(filename, folder_id);
        debug!("Drive lookup: {}", query);
        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str()), ("fields", "files(id)")])
            .send()
            .await?;
        let list: FileList = ensure_success(response).await?.json().await?;
        Ok(!list.files.is_empty())
    }

    async fn store(&self, filename: &str, content: &str, folder_id: &str) -> Result<String> {
        let metadata = serde_json::to_string(&FileMetadata {
            name: filename,
            parents: [folder_id],
            mime_type: MARKDOWN_MIME_TYPE,
        })?;
        let boundary = format!("letterbox-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_body(&boundary, &metadata, content);

        let response = self
            .client
            .post(format!("{}/upload/drive/v3/files", self.base_url))
            .bearer_auth(&self.access_token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;
        let created: FileEntry = ensure_success(response).await?.json().await?;
        Ok(created.id)
    }
}
