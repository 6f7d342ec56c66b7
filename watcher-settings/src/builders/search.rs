//! Search section

use crate::collector::{collect, Selection};
use crate::document::{SectionName, SettingsDocument};
use crate::form::Scope;
use crate::rules::FormRules;
use crate::validator::Validator;
use crate::Result;

/// Build the `Search` section
///
/// Blank values are violations except for the ids in
/// [`FormRules::search_blank_allowed`], which are still captured.
pub fn build(scope: &Scope, rules: &FormRules) -> Result<SettingsDocument> {
    let collected = collect(&scope.controls, Selection::All, &[]);

    let mut validator = Validator::new();
    validator.require_values(SectionName::Search, &collected, &rules.search_blank_allowed);

    let document = SettingsDocument::single(SectionName::Search, collected.fields);
    Ok(validator.finish(document)?)
}
