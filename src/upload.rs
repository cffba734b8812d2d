//! Loading uploaded email files
//!
//! Reading the file is an explicit async step; parsing stays a pure
//! function over the decoded text. This module also decides whether a
//! parse counts as a success, which the parser itself never does.

use crate::error::{Error, Result};
use crate::parser::parse_email_source;
use crate::types::{ParsedEmail, SourceFormat};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// How a loaded file should be reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    /// Structured file with at least one extracted field
    Parsed,
    /// Plain-text file taken as the body
    Loaded,
    /// Structured file that yielded nothing
    Unparsed,
}

impl LoadStatus {
    #[must_use]
    pub const fn is_success(self) -> bool {
        !matches!(self, Self::Unparsed)
    }
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// A file that was read and parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedEmail {
    pub file_name: String,
    pub format: SourceFormat,
    pub email: ParsedEmail,
    pub status: LoadStatus,
}

impl LoadedEmail {
    /// Notice describing the outcome of the load
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self.status {
            LoadStatus::Parsed => {
                let mut message = String::from("Email parsed successfully!");
                if !self.email.from.is_empty() {
                    message.push_str(" From: ");
                    message.push_str(&self.email.from);
                }
                if !self.email.subject.is_empty() {
                    message.push_str(" Subject: ");
                    message.push_str(&self.email.subject);
                }
                Notice::success(message)
            }
            LoadStatus::Loaded => Notice::success("File loaded successfully!"),
            LoadStatus::Unparsed => {
                Notice::error("Could not parse email file. Please check the file format.")
            }
        }
    }
}

/// Parse already-decoded file content and classify the result.
///
/// Content that is empty after trimming is rejected before parsing.
pub fn load_from_text(content: &str, file_name: &str) -> Result<LoadedEmail> {
    if content.trim().is_empty() {
        return Err(Error::EmptyFile);
    }

    let format = SourceFormat::from_file_name(file_name);
    let email = parse_email_source(content, file_name);
    let status = match format {
        SourceFormat::Structured if email.is_empty() => LoadStatus::Unparsed,
        SourceFormat::Structured => LoadStatus::Parsed,
        SourceFormat::PlainText => LoadStatus::Loaded,
    };

    if status == LoadStatus::Unparsed {
        warn!(file = file_name, "No fields extracted from structured email");
    } else {
        debug!(file = file_name, ?status, "Loaded email file");
    }

    Ok(LoadedEmail {
        file_name: file_name.to_string(),
        format,
        email,
        status,
    })
}

/// Read a file from disk and load it.
///
/// Bytes are decoded as UTF-8 lossily, so binary content still produces a
/// (likely empty) result rather than an error.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<LoadedEmail> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    load_from_text(&content, &file_name)
}
