//! # Watcher Settings Library
//!
//! Turns the state of the multi-section settings form into the nested
//! settings document posted to the server:
//! - Form state model (controls, toggles, ordered lists)
//! - Field collection and validation
//! - Per-section builders
//! - Category dispatch (aggregator)

pub mod aggregator;
pub mod builders;
pub mod category;
pub mod collector;
pub mod document;
pub mod error;
pub mod form;
pub mod rules;
pub mod validator;

pub use aggregator::assemble;
pub use category::Category;
pub use document::{SectionName, SectionObject, SettingsDocument};
pub use error::{Error, Result};
pub use form::SettingsForm;
pub use rules::FormRules;
pub use validator::{FieldRef, Rejection, Violation};
