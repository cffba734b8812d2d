use phishguard::*;

fn loaded(content: &str, file_name: &str) -> LoadedEmail {
    load_from_text(content, file_name).unwrap()
}

#[test]
fn test_new_workspace_defaults() {
    let ws = Workspace::new();

    assert_eq!(ws.tab, Tab::Email);
    assert!(ws.email.is_empty());
    assert!(!ws.loading);
    assert!(ws.result.is_none());
    assert!(!ws.can_submit());
}

#[test]
fn test_email_submit_requires_body() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::EditFrom("a@x.com".into()));
    ws.dispatch(Action::EditSubject("Hi".into()));

    assert_eq!(ws.dispatch(Action::Submit), None);
    assert!(!ws.loading);

    ws.dispatch(Action::EditBody("Body".into()));
    let request = ws.dispatch(Action::Submit);

    assert_eq!(
        request,
        Some(Request::Email(ParsedEmail::new("a@x.com", "Hi", "Body")))
    );
    assert!(ws.loading);
}

#[test]
fn test_no_double_submit_while_loading() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::EditBody("Body".into()));

    assert!(ws.dispatch(Action::Submit).is_some());
    assert!(ws.dispatch(Action::Submit).is_none());

    ws.dispatch(Action::VerdictReceived(DetectionResult::connection_error(50)));
    assert!(!ws.loading);
    assert_eq!(ws.result.as_ref().map(|r| r.confidence), Some(50));
    assert!(ws.can_submit());
}

#[test]
fn test_submit_clears_previous_result() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::EditBody("Body".into()));
    ws.dispatch(Action::Submit);
    ws.dispatch(Action::VerdictReceived(DetectionResult::connection_error(50)));

    ws.dispatch(Action::Submit);
    assert!(ws.result.is_none());
}

#[test]
fn test_url_tab_submit() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::SelectTab(Tab::Url));
    assert!(ws.dispatch(Action::Submit).is_none());

    ws.dispatch(Action::EditUrl("http://example.com".into()));
    assert_eq!(
        ws.dispatch(Action::Submit),
        Some(Request::Url("http://example.com".into()))
    );
}

#[test]
fn test_switching_tabs_discards_forms() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::FileLoaded(loaded("Subject: S\n\nBody", "a.eml")));
    ws.dispatch(Action::TogglePreview);
    ws.dispatch(Action::EditBody("Body".into()));
    ws.dispatch(Action::Submit);
    ws.dispatch(Action::VerdictReceived(DetectionResult::connection_error(50)));

    ws.dispatch(Action::SelectTab(Tab::Url));

    assert_eq!(ws.tab, Tab::Url);
    assert!(ws.email.is_empty());
    assert!(ws.result.is_none());
    assert!(ws.uploaded_file.is_none());
    assert!(!ws.parse_success);
    assert!(!ws.show_preview);
}

#[test]
fn test_file_loaded_fills_form_and_notifies() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::FileLoaded(loaded(
        "From: Bank <alerts@bank.example>\nSubject: Verify\n\nClick",
        "alert.eml",
    )));

    assert_eq!(ws.email.from, "alerts@bank.example");
    assert_eq!(ws.email.body, "Click");
    assert_eq!(ws.uploaded_file.as_deref(), Some("alert.eml"));
    assert!(ws.parse_success);
    assert_eq!(ws.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Success));

    ws.dispatch(Action::DismissNotice);
    assert!(ws.notice.is_none());
}

#[test]
fn test_unparsed_file_warns() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::FileLoaded(loaded("X-Foo: bar", "weird.eml")));

    assert!(!ws.parse_success);
    assert_eq!(ws.uploaded_file.as_deref(), Some("weird.eml"));
    assert_eq!(ws.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
}

#[test]
fn test_file_failure() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::FileLoaded(loaded("plain", "a.txt")));
    ws.dispatch(Action::FileFailed(Error::EmptyFile.to_string()));

    assert!(ws.uploaded_file.is_none());
    assert!(!ws.parse_success);
    assert_eq!(
        ws.notice,
        Some(Notice::error("Error reading file: File is empty"))
    );
}

#[test]
fn test_clear_and_toggles() {
    let mut ws = Workspace::new();
    ws.dispatch(Action::SetTraining(true));
    ws.dispatch(Action::TogglePreview);
    ws.dispatch(Action::EditBody("x".into()));
    assert!(ws.show_preview);

    ws.dispatch(Action::Clear);

    assert!(ws.email.is_empty());
    assert!(!ws.show_preview);
    assert!(ws.use_for_training);
    assert_eq!(ws.tab, Tab::Email);
}
