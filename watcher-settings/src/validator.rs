//! Form validation
//!
//! Validation never stops a scan: every problem is recorded as a
//! [`Violation`] and collection carries on, so all offending fields can be
//! highlighted at once. A builder that recorded anything returns a
//! [`Rejection`] instead of its section, and the submission is cancelled
//! before any request is made.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::collector::Collected;
use crate::document::SectionName;
use crate::form::{Backend, DownloaderForm};

/// Location of an offending field, handed to the highlight collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldRef {
    pub section: SectionName,
    /// Path inside the section, outermost first
    pub path: Vec<String>,
}

impl FieldRef {
    pub fn new(section: SectionName, id: impl Into<String>) -> Self {
        Self {
            section,
            path: vec![id.into()],
        }
    }

    pub fn child(mut self, id: impl Into<String>) -> Self {
        self.path.push(id.into());
        self
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section)?;
        for part in &self.path {
            write!(f, "/{}", part)?;
        }
        Ok(())
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Required field left empty
    #[error("{field} is blank")]
    BlankField { field: FieldRef },

    /// Quality profile with an empty name (1-based position)
    #[error("quality profile #{position} has no name")]
    EmptyProfileName { position: usize },

    /// Quality profile name already used by an earlier profile
    #[error("quality profile #{position} reuses the name {name:?}")]
    DuplicateProfileName { name: String, position: usize },

    /// Indexer with exactly one of url / api key filled in
    #[error("{provider} entry #{position} is missing its {}", leaf(.missing))]
    PartialCredentials {
        provider: SectionName,
        position: usize,
        missing: FieldRef,
    },

    /// More than one download client switched on
    #[error("multiple downloaders enabled: {}", backend_list(.enabled))]
    MultipleDownloaders { enabled: Vec<Backend> },
}

fn leaf(field: &FieldRef) -> &str {
    field.path.last().map(String::as_str).unwrap_or("value")
}

fn backend_list(backends: &[Backend]) -> String {
    backends
        .iter()
        .map(Backend::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Violation {
    /// Fixed warning text shown to the user
    pub fn warning(&self) -> &'static str {
        match self {
            Violation::BlankField { .. } => "Please fill in all required fields.",
            Violation::EmptyProfileName { .. } => "Please enter a name for each profile.",
            Violation::DuplicateProfileName { .. } => "Please enter a unique name for each profile.",
            Violation::PartialCredentials { .. } => {
                "Please complete or clear out incomplete providers."
            }
            Violation::MultipleDownloaders { .. } => "Please enable only one downloader.",
        }
    }

    /// Field to highlight, if the violation points at one
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Violation::BlankField { field } => Some(field),
            Violation::PartialCredentials { missing, .. } => Some(missing),
            Violation::EmptyProfileName { .. }
            | Violation::DuplicateProfileName { .. }
            | Violation::MultipleDownloaders { .. } => None,
        }
    }
}

/// Failure signal: the form may not be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    violations: Vec<Violation>,
}

impl Rejection {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Distinct warning texts, in first-seen order
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        for violation in &self.violations {
            let warning = violation.warning();
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        warnings
    }

    /// Every field that should be highlighted
    pub fn highlights(&self) -> impl Iterator<Item = &FieldRef> {
        self.violations.iter().filter_map(Violation::field)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for Rejection {}

/// Non-halting violation accumulator
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation and keep going
    pub fn flag(&mut self, violation: Violation) {
        tracing::debug!(violation = %violation, "Validation failure");
        self.violations.push(violation);
    }

    /// Flag every blank value control of `collected` not listed in `allowed`
    pub fn require_values(&mut self, section: SectionName, collected: &Collected, allowed: &[String]) {
        for id in &collected.blanks {
            if !allowed.contains(id) {
                self.flag(Violation::BlankField {
                    field: FieldRef::new(section, id.clone()),
                });
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Hand back `value` when nothing was flagged
    pub fn finish<T>(self, value: T) -> std::result::Result<T, Rejection> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(Rejection {
                violations: self.violations,
            })
        }
    }
}

/// At most one download client may be enabled across the downloader form
pub fn check_downloader_exclusivity(form: &DownloaderForm) -> std::result::Result<(), Rejection> {
    let enabled: Vec<Backend> = form
        .backends
        .iter()
        .filter(|block| block.enabled.is_on())
        .map(|block| block.backend)
        .collect();

    let mut validator = Validator::new();
    if enabled.len() > 1 {
        validator.flag(Violation::MultipleDownloaders { enabled });
    }
    validator.finish(())
}
