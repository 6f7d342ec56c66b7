//! Visual feedback collaborator
//!
//! The save action only decides which signal to raise; rendering is up to
//! the implementation. [`LogFeedback`] writes every signal to the log,
//! [`RecordingFeedback`] keeps them for an embedding UI to replay.

use std::sync::Mutex;

use watcher_settings::{Category, FieldRef};

pub const SAVED_MESSAGE: &str = "Settings Saved";
pub const FAILED_MESSAGE: &str = "Unable to save settings. Check log for more information.";

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Warning,
    Success,
    Error,
}

pub trait Feedback {
    /// Flash an offending field
    fn highlight(&self, field: &FieldRef);

    /// Switch the save control's in-flight indicator
    fn set_pending(&self, category: Category, pending: bool);

    /// Show a toast
    fn notify(&self, notice: Notice, message: &str);
}

/// Feedback written to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn highlight(&self, field: &FieldRef) {
        tracing::warn!(field = %field, "Field needs attention");
    }

    fn set_pending(&self, category: Category, pending: bool) {
        tracing::debug!(%category, pending, "Save indicator");
    }

    fn notify(&self, notice: Notice, message: &str) {
        match notice {
            Notice::Warning => tracing::warn!("{}", message),
            Notice::Success => tracing::info!("{}", message),
            Notice::Error => tracing::error!("{}", message),
        }
    }
}

/// One raised signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackEvent {
    Highlight(FieldRef),
    Pending(Category, bool),
    Notice(Notice, String),
}

/// Feedback that keeps every signal in order
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals raised so far, oldest first
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, event: FeedbackEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

impl Feedback for RecordingFeedback {
    fn highlight(&self, field: &FieldRef) {
        self.push(FeedbackEvent::Highlight(field.clone()));
    }

    fn set_pending(&self, category: Category, pending: bool) {
        self.push(FeedbackEvent::Pending(category, pending));
    }

    fn notify(&self, notice: Notice, message: &str) {
        self.push(FeedbackEvent::Notice(notice, message.to_string()));
    }
}
