// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! PhishGuard client
//!
//! Email source parsing and a client for the phishing-detection service.
//!
//! # Features
//!
//! - `.eml` header/body extraction with folded headers and encoded subjects
//! - Plain-text sources taken verbatim as the body
//! - Async file loading with parse-outcome classification
//! - Detection, analytics and health calls against the remote API
//! - An explicit state record for the detection workspace
//!
//! # Example
//!
//! ```rust
//! use phishguard::parse_email_source;
//!
//! let raw = "From: Jane Doe <jane@example.com>\r\nSubject: Hello\r\n\r\nBody text";
//! let email = parse_email_source(raw, "message.eml");
//!
//! assert_eq!(email.from, "jane@example.com");
//! assert_eq!(email.subject, "Hello");
//! assert_eq!(email.body, "Body text");
//! ```

mod analytics;
mod client;
mod config;
mod error;
mod parser;
mod types;
mod upload;
mod workspace;

pub use analytics::*;
pub use client::{DetectionClient, EMAIL_FALLBACK_CONFIDENCE, URL_FALLBACK_CONFIDENCE};
pub use config::*;
pub use error::{Error, Result};
pub use parser::{decode_subject, normalize_sender, parse_email_source, parse_structured};
pub use types::*;
pub use upload::{LoadStatus, LoadedEmail, Notice, NoticeKind, load_from_path, load_from_text};
pub use workspace::{Action, Request, Tab, Workspace};
