//! Field collector
//!
//! Reads the controls of one section root into a flat field map. Toggles
//! contribute their explicit `"true"`/`"false"` value, text and select
//! controls their current value. Collection never fails; blank value
//! controls are reported alongside the fields so a validator can flag all
//! of them in one pass.

use crate::document::SectionObject;
use crate::form::{Control, ControlKind};

/// Which controls of a scope to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Toggle controls only
    Toggles,
    /// Text and select controls only
    Values,
    /// Toggles first, then text and select controls
    All,
}

/// Result of one collection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub fields: SectionObject,
    /// Ids of captured value controls that were empty, in scan order
    pub blanks: Vec<String>,
}

/// Capture the selected controls, skipping every id in `exclude`
pub fn collect(controls: &[Control], selection: Selection, exclude: &[String]) -> Collected {
    let mut collected = Collected::default();
    let included = |control: &&Control| !exclude.iter().any(|id| id == &control.id);

    if matches!(selection, Selection::Toggles | Selection::All) {
        for control in controls.iter().filter(included) {
            if let ControlKind::Toggle(toggle) = control.kind {
                if let Some(value) = toggle.as_value() {
                    collected.fields.insert(control.id.clone(), value);
                }
            }
        }
    }

    if matches!(selection, Selection::Values | Selection::All) {
        for control in controls.iter().filter(included) {
            match &control.kind {
                ControlKind::Text(value) | ControlKind::Select(value) => {
                    if value.is_empty() {
                        collected.blanks.push(control.id.clone());
                    }
                    collected.fields.insert(control.id.clone(), value.clone());
                }
                ControlKind::Toggle(_) | ControlKind::Button(_) => {}
            }
        }
    }

    tracing::trace!(
        fields = collected.fields.len(),
        blanks = collected.blanks.len(),
        "Collected section controls"
    );

    collected
}
