//! watcher-save library - settings submission
//!
//! Ties a save trigger to the settings library: assembles the document for
//! the triggering category, posts it to the server's settings endpoint and
//! reports the outcome through a [`Feedback`] collaborator.

pub mod client;
pub mod config;
pub mod feedback;
pub mod save;

pub use client::{SaveOutcome, SettingsClient, SubmitError};
pub use config::SaveConfig;
pub use feedback::{Feedback, LogFeedback, Notice};
pub use save::{preview, save, SaveReport};
