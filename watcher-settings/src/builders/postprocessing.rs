//! Postprocessing section

use crate::collector::{collect, Selection};
use crate::document::{SectionName, SettingsDocument};
use crate::form::Scope;
use crate::rules::FormRules;
use crate::Result;

/// Turn a human-entered `"mkv, avi"` list into the stored `"mkv,avi"` form
pub fn canonical_extensions(value: &str) -> String {
    value.replace(", ", ",")
}

/// Build the `Postprocessing` section
///
/// All fields pass through unchanged except the move-extensions list.
pub fn build(scope: &Scope, rules: &FormRules) -> Result<SettingsDocument> {
    let mut section = collect(&scope.controls, Selection::All, &[]).fields;

    let field = rules.move_extensions_field.as_str();
    if let Some(value) = section.get(field) {
        let canonical = canonical_extensions(value);
        section.insert(field, canonical);
    }

    Ok(SettingsDocument::single(SectionName::Postprocessing, section))
}
