//! Analytics returned by the detection service dashboard endpoints

use crate::types::DetectionStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Per-day scan counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Day the counters belong to (absent for an empty "today")
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_scans: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub safe_count: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub suspicious_count: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub phishing_count: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub email_scans: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub url_scans: u64,

    #[serde(default, deserialize_with = "lenient_float")]
    pub avg_confidence: f64,
}

impl DailySummary {
    #[must_use]
    pub const fn threats(&self) -> u64 {
        self.phishing_count.saturating_add(self.suspicious_count)
    }
}

/// All-time counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_detections: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_safe: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_suspicious: u64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_phishing: u64,

    #[serde(default, deserialize_with = "lenient_float")]
    pub avg_confidence: f64,
}

/// Dashboard payload: today, the trailing week and all-time totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub today: DailySummary,

    #[serde(default, deserialize_with = "null_as_default")]
    pub week_trend: Vec<DailySummary>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub totals: Totals,
}

impl DashboardAnalytics {
    /// Phishing plus suspicious verdicts, all time
    #[must_use]
    pub const fn threats_detected(&self) -> u64 {
        self.totals
            .total_phishing
            .saturating_add(self.totals.total_suspicious)
    }

    #[must_use]
    pub const fn threats_today(&self) -> u64 {
        self.today.threats()
    }

    /// Threats recorded before today, used to express today's change
    #[must_use]
    pub const fn threats_before_today(&self) -> u64 {
        self.threats_detected().saturating_sub(self.threats_today())
    }
}

/// Kind of input a detection was run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Email,
    Url,
}

/// One row of the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentDetection {
    pub id: u64,

    pub detection_type: DetectionKind,

    /// Unknown statuses are read as `SUSPICIOUS`, as for verdicts
    #[serde(deserialize_with = "lenient_status")]
    pub status: DetectionStatus,

    #[serde(default)]
    pub confidence: u8,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    /// Email subject, or the first characters of the URL
    #[serde(default)]
    pub display_text: Option<String>,
}

// SQL aggregates come back as numbers, decimal strings or null.

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value).filter(|v| v.is_finite()).unwrap_or(0.0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    Ok(value_as_f64(&value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v.trunc() as u64))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<DetectionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .and_then(DetectionStatus::from_wire)
        .unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(s).map(|dt| dt.date_naive()))
    }))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept HTTP-date (RFC 2822 style) or RFC 3339 timestamps
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
