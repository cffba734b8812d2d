//! Detection workspace state
//!
//! Everything the detection screen keeps between user actions lives in
//! one [`Workspace`] record, changed only through [`Workspace::dispatch`].
//! Network calls stay with the caller: submitting returns a [`Request`]
//! and the verdict comes back as another action.

use crate::types::{DetectionResult, ParsedEmail};
use crate::upload::{LoadStatus, LoadedEmail, Notice};
use tracing::debug;

/// Which input the user is working on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Email,
    Url,
}

/// User or system event applied to the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    EditFrom(String),
    EditSubject(String),
    EditBody(String),
    EditUrl(String),
    /// A file was read and parsed
    FileLoaded(LoadedEmail),
    /// Reading a file failed
    FileFailed(String),
    Submit,
    VerdictReceived(DetectionResult),
    Clear,
    TogglePreview,
    SetTraining(bool),
    DismissNotice,
}

/// Detection request the caller has to perform after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Email(ParsedEmail),
    Url(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub tab: Tab,
    pub email: ParsedEmail,
    pub url: String,
    pub loading: bool,
    pub result: Option<DetectionResult>,
    pub uploaded_file: Option<String>,
    pub parse_success: bool,
    pub show_preview: bool,
    pub use_for_training: bool,
    pub notice: Option<Notice>,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submit would currently produce a request
    #[must_use]
    pub fn can_submit(&self) -> bool {
        if self.loading {
            return false;
        }
        match self.tab {
            Tab::Email => !self.email.body.is_empty(),
            Tab::Url => !self.url.is_empty(),
        }
    }

    /// Apply an action. Returns the request to send when the action is an
    /// accepted submit.
    pub fn dispatch(&mut self, action: Action) -> Option<Request> {
        debug!(?action, "Workspace action");
        match action {
            Action::SelectTab(tab) => {
                self.tab = tab;
                self.reset_inputs();
            }
            Action::EditFrom(from) => self.email.from = from,
            Action::EditSubject(subject) => self.email.subject = subject,
            Action::EditBody(body) => self.email.body = body,
            Action::EditUrl(url) => self.url = url,
            Action::FileLoaded(loaded) => {
                self.notice = Some(loaded.notice());
                self.parse_success = loaded.status != LoadStatus::Unparsed;
                self.uploaded_file = Some(loaded.file_name);
                self.email = loaded.email;
            }
            Action::FileFailed(reason) => {
                self.uploaded_file = None;
                self.parse_success = false;
                self.notice = Some(Notice::error(format!("Error reading file: {reason}")));
            }
            Action::Submit => return self.submit(),
            Action::VerdictReceived(result) => {
                self.loading = false;
                self.result = Some(result);
            }
            Action::Clear => self.reset_inputs(),
            Action::TogglePreview => self.show_preview = !self.show_preview,
            Action::SetTraining(enabled) => self.use_for_training = enabled,
            Action::DismissNotice => self.notice = None,
        }
        None
    }

    fn submit(&mut self) -> Option<Request> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        self.result = None;
        Some(match self.tab {
            Tab::Email => Request::Email(self.email.clone()),
            Tab::Url => Request::Url(self.url.clone()),
        })
    }

    fn reset_inputs(&mut self) {
        self.email = ParsedEmail::default();
        self.url.clear();
        self.result = None;
        self.uploaded_file = None;
        self.parse_success = false;
        self.show_preview = false;
    }
}
