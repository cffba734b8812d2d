//! Core types: email sources, parsed emails and detection verdicts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Extensions offered to the user when picking a file to upload
pub const ACCEPTED_EXTENSIONS: &[&str] = &["eml", "txt", "msg"];

/// Parsing strategy chosen from a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// RFC 5322-style header block, blank line, body (`.eml`)
    Structured,
    /// Anything else; the whole content is the body
    PlainText,
}

impl SourceFormat {
    /// Pick the format from a file name hint. Only `.eml` (any case) is
    /// structured.
    #[must_use]
    #[allow(clippy::case_sensitive_file_extension_comparisons)]
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.to_lowercase().ends_with(".eml") {
            Self::Structured
        } else {
            Self::PlainText
        }
    }

    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Structured)
    }
}

/// Raw email source text together with the file name it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSource {
    /// Decoded text content
    pub content: String,

    /// File name hint, only used to pick the format
    pub file_name: String,
}

impl EmailSource {
    pub fn new(content: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            file_name: file_name.into(),
        }
    }

    #[must_use]
    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_file_name(&self.file_name)
    }

    /// Parse this source into sender, subject and body
    #[must_use]
    pub fn parse(&self) -> ParsedEmail {
        crate::parser::parse_email_source(&self.content, &self.file_name)
    }
}

/// Sender, subject and body extracted from an email source.
///
/// This is also the request body of the email detection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    /// Sender address, or the raw `From` value when no address was found
    #[serde(default)]
    pub from: String,

    /// Subject with quoted-printable encoded words decoded
    #[serde(default)]
    pub subject: String,

    /// Message body
    #[serde(default)]
    pub body: String,
}

impl ParsedEmail {
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// A record carrying only a body, as produced for plain-text sources
    pub fn body_only(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// True when no field carries any text
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from.is_empty() && self.subject.is_empty() && self.body.is_empty()
    }
}

/// Verdict category returned by the detection service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DetectionStatus {
    Safe,
    #[default]
    Suspicious,
    Phishing,
}

impl DetectionStatus {
    /// Lenient parse of the wire value; unknown values are `None`
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "SAFE" => Some(Self::Safe),
            "SUSPICIOUS" => Some(Self::Suspicious),
            "PHISHING" => Some(Self::Phishing),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Suspicious => "SUSPICIOUS",
            Self::Phishing => "PHISHING",
        }
    }

    /// Anything that is not `SAFE` counts as a threat
    #[must_use]
    pub const fn is_threat(self) -> bool {
        !matches!(self, Self::Safe)
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DEFAULT_CONFIDENCE: u8 = 50;
const DEFAULT_LABEL: &str = "Analysis Complete";
const DEFAULT_MESSAGE: &str = "Detection analysis completed";
const DEFAULT_INDICATOR: &str = "AI analysis performed";
const UNAVAILABLE_INDICATOR: &str = "Analysis indicators unavailable";

/// Verdict for a submitted email or URL.
///
/// Deserialization is lenient: missing or out-of-range fields are replaced
/// with defaults so a partially filled response still yields a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireVerdict")]
pub struct DetectionResult {
    pub status: DetectionStatus,

    /// Confidence in percent, `0..=100`
    pub confidence: u8,

    /// Short classification
    pub label: String,

    /// Detailed explanation
    pub message: String,

    /// Warning signs found
    pub indicators: Vec<String>,
}

impl DetectionResult {
    /// Fallback verdict used when the detection service is unreachable
    #[must_use]
    pub fn connection_error(confidence: u8) -> Self {
        Self {
            status: DetectionStatus::Suspicious,
            confidence: confidence.min(100),
            label: "Connection Error".into(),
            message: "Unable to connect to detection service. \
                      Please ensure the backend is running."
                .into(),
            indicators: vec!["Backend connection failed".into()],
        }
    }
}

/// Raw shape of a verdict on the wire, before normalization
#[derive(Debug, Default, Deserialize)]
struct WireVerdict {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    indicators: Option<Value>,
}

impl From<WireVerdict> for DetectionResult {
    fn from(wire: WireVerdict) -> Self {
        let status = wire
            .status
            .as_deref()
            .and_then(DetectionStatus::from_wire)
            .unwrap_or_default();

        let indicators = match wire.indicators {
            None | Some(Value::Null) => vec![DEFAULT_INDICATOR.to_string()],
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            Some(_) => vec![UNAVAILABLE_INDICATOR.to_string()],
        };

        Self {
            status,
            confidence: wire
                .confidence
                .as_ref()
                .and_then(confidence_from_value)
                .unwrap_or(DEFAULT_CONFIDENCE),
            label: wire.label.unwrap_or_else(|| DEFAULT_LABEL.into()),
            message: wire.message.unwrap_or_else(|| DEFAULT_MESSAGE.into()),
            indicators,
        }
    }
}

/// Truncate a numeric (or numeric string) confidence and clamp it to a
/// percentage
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence_from_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if raw.is_nan() {
        return None;
    }
    Some(raw.trunc().clamp(0.0, 100.0) as u8)
}

/// Response of the service health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
