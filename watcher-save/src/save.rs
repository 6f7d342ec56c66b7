//! Save action
//!
//! What a click on a category's save control does: assemble the document,
//! stop with warnings if the form is invalid, otherwise post it with the
//! pending indicator on and report the server's verdict. Nothing is retried
//! and a second click while a save is in flight is not guarded against.

use std::fmt;
use tracing::{info, warn};

use watcher_settings::{assemble, Category, Error, FormRules, Rejection, SettingsForm};

use crate::client::{SaveOutcome, SettingsClient};
use crate::feedback::{Feedback, Notice, FAILED_MESSAGE, SAVED_MESSAGE};

/// How a save attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveReport {
    /// Form invalid; nothing was sent
    Cancelled(Rejection),
    /// Server accepted the settings
    Saved,
    /// Server answered with a failure
    ServerFailed,
    /// Request could not be completed
    SubmitFailed(String),
}

impl SaveReport {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveReport::Saved)
    }
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveReport::Cancelled(rejection) => write!(f, "cancelled: {}", rejection),
            SaveReport::Saved => write!(f, "saved"),
            SaveReport::ServerFailed => write!(f, "server reported failure"),
            SaveReport::SubmitFailed(reason) => write!(f, "submit failed: {}", reason),
        }
    }
}

/// Run one save for `category`
pub async fn save(
    category: Category,
    form: &SettingsForm,
    rules: &FormRules,
    client: &SettingsClient,
    feedback: &dyn Feedback,
) -> SaveReport {
    let document = match assemble(category, form, rules) {
        Ok(document) => document,
        Err(Error::Rejected(rejection)) => {
            for field in rejection.highlights() {
                feedback.highlight(field);
            }
            for warning in rejection.warnings() {
                feedback.notify(Notice::Warning, warning);
            }
            return SaveReport::Cancelled(rejection);
        }
        Err(e) => {
            warn!(%category, error = %e, "Could not assemble settings");
            feedback.notify(Notice::Error, FAILED_MESSAGE);
            return SaveReport::SubmitFailed(e.to_string());
        }
    };

    feedback.set_pending(category, true);
    let outcome = client.submit(&document).await;
    feedback.set_pending(category, false);

    match outcome {
        Ok(SaveOutcome::Saved) => {
            info!(%category, "Settings saved");
            feedback.notify(Notice::Success, SAVED_MESSAGE);
            SaveReport::Saved
        }
        Ok(SaveOutcome::Rejected) => {
            warn!(%category, "Server failed to save settings");
            feedback.notify(Notice::Error, FAILED_MESSAGE);
            SaveReport::ServerFailed
        }
        Err(e) => {
            warn!(%category, error = %e, "Settings submission failed");
            feedback.notify(Notice::Error, FAILED_MESSAGE);
            SaveReport::SubmitFailed(e.to_string())
        }
    }
}

/// The exact `data` payload a save would post, without sending it
pub fn preview(category: Category, form: &SettingsForm, rules: &FormRules) -> watcher_settings::Result<String> {
    assemble(category, form, rules)?.to_json()
}
