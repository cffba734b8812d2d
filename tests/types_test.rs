use phishguard::*;
use serde_json::json;

// --- SourceFormat / EmailSource ---

#[test]
fn test_source_format_from_file_name() {
    assert_eq!(SourceFormat::from_file_name("mail.eml"), SourceFormat::Structured);
    assert_eq!(SourceFormat::from_file_name("MAIL.EML"), SourceFormat::Structured);
    assert_eq!(SourceFormat::from_file_name("mail.txt"), SourceFormat::PlainText);
    assert_eq!(SourceFormat::from_file_name("mail.msg"), SourceFormat::PlainText);
    assert_eq!(SourceFormat::from_file_name(""), SourceFormat::PlainText);
    assert!(SourceFormat::Structured.is_structured());
}

#[test]
fn test_email_source_parse_delegates() {
    let source = EmailSource::new("Subject: Hi\n\nThere", "hi.eml");
    assert_eq!(source.format(), SourceFormat::Structured);
    assert_eq!(source.parse(), ParsedEmail::new("", "Hi", "There"));
}

#[test]
fn test_accepted_extensions() {
    assert!(ACCEPTED_EXTENSIONS.contains(&"eml"));
    assert!(ACCEPTED_EXTENSIONS.contains(&"txt"));
}

// --- ParsedEmail ---

#[test]
fn test_parsed_email_json_shape() {
    let email = ParsedEmail::new("a@x.com", "Hello", "Body");
    let value = serde_json::to_value(&email).unwrap();
    assert_eq!(value, json!({"from": "a@x.com", "subject": "Hello", "body": "Body"}));
}

#[test]
fn test_parsed_email_is_empty() {
    assert!(ParsedEmail::default().is_empty());
    assert!(!ParsedEmail::body_only("x").is_empty());
    assert!(!ParsedEmail::new("a@x.com", "", "").is_empty());
}

// --- DetectionStatus ---

#[test]
fn test_status_wire_values() {
    assert_eq!(DetectionStatus::from_wire("SAFE"), Some(DetectionStatus::Safe));
    assert_eq!(DetectionStatus::from_wire(" phishing "), Some(DetectionStatus::Phishing));
    assert_eq!(DetectionStatus::from_wire("MALWARE"), None);
    assert_eq!(DetectionStatus::Suspicious.to_string(), "SUSPICIOUS");
    assert_eq!(serde_json::to_value(DetectionStatus::Safe).unwrap(), json!("SAFE"));
}

#[test]
fn test_status_is_threat() {
    assert!(!DetectionStatus::Safe.is_threat());
    assert!(DetectionStatus::Suspicious.is_threat());
    assert!(DetectionStatus::Phishing.is_threat());
}

// --- DetectionResult ---

#[test]
fn test_detection_result_full() {
    let result: DetectionResult = serde_json::from_value(json!({
        "status": "PHISHING",
        "confidence": 92,
        "label": "Credential Harvesting",
        "message": "Sender spoofs a bank",
        "indicators": ["Spoofed domain", "Urgent language"]
    }))
    .unwrap();

    assert_eq!(result.status, DetectionStatus::Phishing);
    assert_eq!(result.confidence, 92);
    assert_eq!(result.label, "Credential Harvesting");
    assert_eq!(result.indicators.len(), 2);
}

#[test]
fn test_detection_result_defaults() {
    let result: DetectionResult = serde_json::from_value(json!({})).unwrap();

    assert_eq!(result.status, DetectionStatus::Suspicious);
    assert_eq!(result.confidence, 50);
    assert_eq!(result.label, "Analysis Complete");
    assert_eq!(result.message, "Detection analysis completed");
    assert_eq!(result.indicators, vec!["AI analysis performed".to_string()]);
}

#[test]
fn test_detection_result_normalizes_bad_values() {
    let result: DetectionResult = serde_json::from_value(json!({
        "status": "DANGEROUS",
        "confidence": 250,
        "indicators": "not a list"
    }))
    .unwrap();

    assert_eq!(result.status, DetectionStatus::Suspicious);
    assert_eq!(result.confidence, 100);
    assert_eq!(
        result.indicators,
        vec!["Analysis indicators unavailable".to_string()]
    );

    let result: DetectionResult =
        serde_json::from_value(json!({"status": "safe", "confidence": -3})).unwrap();
    assert_eq!(result.status, DetectionStatus::Safe);
    assert_eq!(result.confidence, 0);

    let result: DetectionResult =
        serde_json::from_value(json!({"confidence": "77.9"})).unwrap();
    assert_eq!(result.confidence, 77);
}

#[test]
fn test_detection_result_serializes_plainly() {
    let result = DetectionResult::connection_error(45);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["status"], "SUSPICIOUS");
    assert_eq!(value["confidence"], 45);
    assert_eq!(value["label"], "Connection Error");
    assert_eq!(value["indicators"], json!(["Backend connection failed"]));

    let back: DetectionResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}

// --- HealthStatus ---

#[test]
fn test_health_status() {
    let health: HealthStatus = serde_json::from_value(json!({
        "status": "healthy",
        "timestamp": "2025-01-01T12:00:00",
        "service": "PhishGuard AI Backend"
    }))
    .unwrap();
    assert!(health.is_healthy());

    let health: HealthStatus = serde_json::from_value(json!({"status": "degraded"})).unwrap();
    assert!(!health.is_healthy());
    assert!(health.service.is_none());
}

// --- Analytics ---

#[test]
fn test_dashboard_analytics_lenient_numbers() {
    let analytics: DashboardAnalytics = serde_json::from_value(json!({
        "today": {
            "id": 3,
            "date": "Wed, 01 Jan 2025 00:00:00 GMT",
            "total_scans": 4,
            "safe_count": 1,
            "suspicious_count": 1,
            "phishing_count": 2,
            "email_scans": 3,
            "url_scans": 1,
            "avg_confidence": "81.25"
        },
        "week_trend": [],
        "totals": {
            "total_detections": 40,
            "total_safe": "20",
            "total_suspicious": "8",
            "total_phishing": "12",
            "avg_confidence": "74.5000"
        }
    }))
    .unwrap();

    assert_eq!(
        analytics.today.date,
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
    );
    assert!((analytics.today.avg_confidence - 81.25).abs() < f64::EPSILON);
    assert_eq!(analytics.totals.total_safe, 20);
    assert_eq!(analytics.threats_detected(), 20);
    assert_eq!(analytics.threats_today(), 3);
    assert_eq!(analytics.threats_before_today(), 17);
}

#[test]
fn test_dashboard_analytics_empty_database() {
    let analytics: DashboardAnalytics = serde_json::from_value(json!({
        "today": {"total_scans": 0, "safe_count": 0, "suspicious_count": 0,
                  "phishing_count": 0, "email_scans": 0, "url_scans": 0, "avg_confidence": 0},
        "week_trend": [],
        "totals": {"total_detections": 0, "total_safe": null, "total_suspicious": null,
                   "total_phishing": null, "avg_confidence": null}
    }))
    .unwrap();

    assert_eq!(analytics, DashboardAnalytics::default());
    assert_eq!(analytics.threats_before_today(), 0);
}

#[test]
fn test_dashboard_analytics_null_sections() {
    let analytics: DashboardAnalytics =
        serde_json::from_value(json!({"today": null, "week_trend": null})).unwrap();
    assert_eq!(analytics, DashboardAnalytics::default());
}

#[test]
fn test_recent_detection() {
    let rows: Vec<RecentDetection> = serde_json::from_value(json!([
        {
            "id": 7,
            "detection_type": "email",
            "status": "PHISHING",
            "confidence": 88,
            "created_at": "Thu, 02 Jan 2025 09:30:00 GMT",
            "display_text": "Verify your account"
        },
        {
            "id": 6,
            "detection_type": "url",
            "status": "SAFE",
            "confidence": 95,
            "created_at": "not a date",
            "display_text": null
        }
    ]))
    .unwrap();

    assert_eq!(rows[0].detection_type, DetectionKind::Email);
    assert_eq!(rows[0].status, DetectionStatus::Phishing);
    assert_eq!(
        rows[0].created_at.map(|t| t.to_rfc3339()),
        Some("2025-01-02T09:30:00+00:00".to_string())
    );
    assert_eq!(rows[1].detection_type, DetectionKind::Url);
    assert!(rows[1].created_at.is_none());
    assert!(rows[1].display_text.is_none());
}

#[test]
fn test_threat_counts_saturate_on_huge_counters() {
    let analytics: DashboardAnalytics = serde_json::from_value(json!({
        "today": {"phishing_count": "18446744073709551615", "suspicious_count": 1},
        "totals": {"total_phishing": "18446744073709551615", "total_suspicious": 1}
    }))
    .unwrap();

    assert_eq!(analytics.threats_detected(), u64::MAX);
    assert_eq!(analytics.threats_today(), u64::MAX);
    assert_eq!(analytics.threats_before_today(), 0);
}

#[test]
fn test_recent_detection_unknown_status_is_suspicious() {
    let rows: Vec<RecentDetection> = serde_json::from_value(json!([
        {"id": 2, "detection_type": "email", "status": "UNKNOWN", "confidence": 10},
        {"id": 1, "detection_type": "url", "status": "safe", "confidence": 99}
    ]))
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status, DetectionStatus::Suspicious);
    assert_eq!(rows[1].status, DetectionStatus::Safe);
}
