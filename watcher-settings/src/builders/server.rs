//! Server section

use crate::collector::{collect, Selection};
use crate::document::{SectionName, SettingsDocument};
use crate::form::Scope;
use crate::rules::FormRules;
use crate::validator::Validator;
use crate::Result;

/// Build the `Server` section
///
/// Every captured text or select control is required. Controls listed in
/// [`FormRules::server_exclude`] are skipped entirely.
pub fn build(scope: &Scope, rules: &FormRules) -> Result<SettingsDocument> {
    let collected = collect(&scope.controls, Selection::All, &rules.server_exclude);

    let mut validator = Validator::new();
    validator.require_values(SectionName::Server, &collected, &[]);

    let document = SettingsDocument::single(SectionName::Server, collected.fields);
    Ok(validator.finish(document)?)
}
