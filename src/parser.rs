//! Email source parser
//!
//! Turns the text of an uploaded file into a [`ParsedEmail`]. Structured
//! (`.eml`) sources go through a single forward pass over their lines;
//! anything else is taken as the body verbatim.

use crate::types::{ParsedEmail, SourceFormat};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

static LINE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z-]+:").unwrap());

static ANGLE_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^>]+)>").unwrap());

static BARE_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
});

static ENCODED_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)=\?([^?]+)\?([QB])\?([^?]+)\?=").unwrap());

static QP_ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=([0-9A-Fa-f]{2})").unwrap());

/// The only headers whose values are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedHeader {
    From,
    Subject,
}

impl TrackedHeader {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "from" => Some(Self::From),
            "subject" => Some(Self::Subject),
            _ => None,
        }
    }
}

/// Parse raw email source text, choosing the strategy from `file_name`.
///
/// Never fails: malformed input degrades to empty fields.
#[must_use]
pub fn parse_email_source(content: &str, file_name: &str) -> ParsedEmail {
    match SourceFormat::from_file_name(file_name) {
        SourceFormat::Structured => parse_structured(content),
        SourceFormat::PlainText => ParsedEmail::body_only(content),
    }
}

/// Parse `.eml`-style content: headers, a blank line, then the body.
#[must_use]
pub fn parse_structured(content: &str) -> ParsedEmail {
    let mut from = String::new();
    let mut subject = String::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;
    let mut current: Option<TrackedHeader> = None;

    for line in LINE_BREAK_REGEX.split(content) {
        if in_body {
            body_lines.push(line);
            continue;
        }

        // A truly empty line always closes the header block; a
        // whitespace-only one only does when no header is being folded.
        if line.is_empty() || (line.trim().is_empty() && current.is_none()) {
            in_body = true;
            continue;
        }

        if HEADER_REGEX.is_match(line) {
            let (name, value) = line.split_once(':').unwrap_or((line, ""));
            let value = value.trim();
            current = TrackedHeader::from_name(name);
            match current {
                Some(TrackedHeader::From) => from = value.to_string(),
                Some(TrackedHeader::Subject) => subject = value.to_string(),
                None => {}
            }
        } else if line.starts_with([' ', '\t'])
            && let Some(header) = current
        {
            let continuation = line.trim();
            if !continuation.is_empty() {
                let target = match header {
                    TrackedHeader::From => &mut from,
                    TrackedHeader::Subject => &mut subject,
                };
                target.push(' ');
                target.push_str(continuation);
            }
        } else {
            current = None;
        }
    }

    let body = body_lines.join("\n").trim().to_string();
    let from = normalize_sender(&from);
    let subject = decode_subject(&subject);

    debug!(
        from = %from,
        subject = %subject,
        body_len = body.len(),
        "Parsed structured email source"
    );

    ParsedEmail {
        from,
        subject,
        body,
    }
}

/// Reduce a `From` value to its address.
///
/// `Name <addr>` yields `addr`; otherwise the first bare address in the
/// value; otherwise the trimmed value itself.
#[must_use]
pub fn normalize_sender(raw: &str) -> String {
    if let Some(caps) = ANGLE_ADDRESS_REGEX.captures(raw) {
        return caps[1].trim().to_string();
    }
    if let Some(found) = BARE_ADDRESS_REGEX.find(raw) {
        return found.as_str().to_string();
    }
    raw.trim().to_string()
}

/// Decode encoded words in a subject line.
///
/// Quoted-printable (`Q`) words have their `=XX` escapes replaced by the
/// byte they name, taken as a single character. Base64 (`B`) words are
/// unwrapped but their payload is left encoded.
#[must_use]
pub fn decode_subject(raw: &str) -> String {
    ENCODED_WORD_REGEX
        .replace_all(raw, |caps: &Captures<'_>| {
            let text = &caps[3];
            if caps[2].eq_ignore_ascii_case("q") {
                decode_q_escapes(text)
            } else {
                text.to_string()
            }
        })
        .into_owned()
}

fn decode_q_escapes(text: &str) -> String {
    QP_ESCAPE_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            u8::from_str_radix(&caps[1], 16)
                .map_or_else(|_| caps[0].to_string(), |byte| char::from(byte).to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_header_names_ignore_case() {
        assert_eq!(TrackedHeader::from_name("FROM"), Some(TrackedHeader::From));
        assert_eq!(
            TrackedHeader::from_name("sUbJeCt"),
            Some(TrackedHeader::Subject)
        );
        assert_eq!(TrackedHeader::from_name("Reply-To"), None);
    }

    #[test]
    fn q_escapes_map_bytes_to_chars() {
        assert_eq!(decode_q_escapes("a=41=62"), "aAb");
        assert_eq!(decode_q_escapes("caf=E9"), "caf\u{e9}");
        assert_eq!(decode_q_escapes("bad=G1"), "bad=G1");
    }

    #[test]
    fn line_breaks_split_lf_and_crlf() {
        let lines: Vec<&str> = LINE_BREAK_REGEX.split("a\r\nb\nc\r").collect();
        assert_eq!(lines, vec!["a", "b", "c\r"]);
    }
}
