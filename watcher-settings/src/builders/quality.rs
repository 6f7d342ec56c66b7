//! Quality section
//!
//! Each profile becomes a [`QualityProfile`], encoded to a JSON string and
//! stored under the profile's name. Quality toggles that sit outside every
//! profile are stored as plain flags next to the profiles.
//!
//! Encoded profile layout:
//!
//! ```text
//! {"4K":["false",0,"0","10000"],"1080P":["true",1,"0","10000"],...,"requiredwords":"..."}
//! ```
//!
//! Resolution entries come first in display order as
//! `[enabled, rank, min, max]`, followed by the filter word lists.

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

use crate::collector::{collect, Selection};
use crate::document::{encode, SectionName, SectionObject, SettingsDocument};
use crate::form::{ProfileForm, QualityForm, Toggle};
use crate::rules::FormRules;
use crate::validator::{FieldRef, Validator, Violation};
use crate::Result;

/// One resolution of a profile with its display rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    pub id: String,
    pub enabled: Toggle,
    /// 0-based position below the list header
    pub rank: usize,
    pub min: String,
    pub max: String,
}

impl Serialize for ResolutionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.enabled.as_value())?;
        tuple.serialize_element(&self.rank)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}

/// Typed quality profile, kept structured until stored in the section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityProfile {
    pub name: String,
    pub resolutions: Vec<ResolutionEntry>,
    /// Filter word lists, stored beside (not inside) the resolutions
    pub filters: SectionObject,
}

impl QualityProfile {
    pub fn resolution(&self, id: &str) -> Option<&ResolutionEntry> {
        self.resolutions.iter().find(|entry| entry.id == id)
    }
}

impl Serialize for QualityProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        // A filter sharing a resolution id replaces that entry in place.
        for entry in &self.resolutions {
            match self.filters.get(&entry.id) {
                Some(words) => map.serialize_entry(&entry.id, words)?,
                None => map.serialize_entry(&entry.id, entry)?,
            }
        }
        for (id, words) in &self.filters {
            if self.resolution(id).is_none() {
                map.serialize_entry(id, words)?;
            }
        }
        map.end()
    }
}

/// Shape one profile, flagging blank size bounds without stopping
pub fn shape_profile(name: String, form: &ProfileForm, validator: &mut Validator) -> QualityProfile {
    let mut resolutions = Vec::with_capacity(form.resolutions.len());

    for (rank, row) in form.resolutions.iter().enumerate() {
        for (bound, value) in [("min", &row.min), ("max", &row.max)] {
            if value.is_empty() {
                validator.flag(Violation::BlankField {
                    field: FieldRef::new(SectionName::Quality, name.clone())
                        .child(row.id.clone())
                        .child(bound),
                });
            }
        }

        resolutions.push(ResolutionEntry {
            id: row.id.clone(),
            enabled: row.enabled,
            rank,
            min: row.min.clone(),
            max: row.max.clone(),
        });
    }

    let filters = collect(&form.filters, Selection::Values, &[]).fields;

    QualityProfile {
        name,
        resolutions,
        filters,
    }
}

/// Build the `Quality` section
///
/// Profile names must be non-empty and unique (case-sensitive). The first
/// bad name stops the profile scan; blank size bounds are all reported.
pub fn build(form: &QualityForm, rules: &FormRules) -> Result<SettingsDocument> {
    let mut validator = Validator::new();
    let mut section = SectionObject::new();
    let mut names: HashSet<&str> = HashSet::new();

    for (index, profile_form) in form.profiles.iter().enumerate() {
        let position = index + 1;
        let name = profile_form
            .name
            .as_deref()
            .unwrap_or(&rules.default_profile_name);

        if name.is_empty() {
            validator.flag(Violation::EmptyProfileName { position });
            break;
        }

        if !names.insert(name) {
            validator.flag(Violation::DuplicateProfileName {
                name: name.to_string(),
                position,
            });
            break;
        }

        let profile = shape_profile(name.to_string(), profile_form, &mut validator);
        tracing::debug!(
            profile = %profile.name,
            resolutions = profile.resolutions.len(),
            "Shaped quality profile"
        );
        section.insert(profile.name.clone(), encode(&profile)?);
    }

    validator.finish(())?;

    section.merge(collect(&form.toggles, Selection::Toggles, &[]).fields);

    Ok(SettingsDocument::single(SectionName::Quality, section))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Control, ResolutionRow};
    use crate::Error;
    use serde_json::{json, Value};

    fn profile(name: Option<&str>) -> ProfileForm {
        ProfileForm {
            name: name.map(str::to_string),
            resolutions: vec![
                ResolutionRow::new("1080P", true, "0", "10000"),
                ResolutionRow::new("4K", false, "0", "20000"),
                ResolutionRow::new("720P", true, "0", "5000"),
            ],
            filters: vec![
                Control::text("requiredwords", ""),
                Control::text("ignoredwords", "subs,german"),
            ],
        }
    }

    fn decoded(document: &SettingsDocument, name: &str) -> Value {
        let section = document.section(SectionName::Quality).unwrap();
        serde_json::from_str(section.get(name).unwrap()).unwrap()
    }

    #[test]
    fn test_profile_encoding_ranks_follow_display_order() {
        let form = QualityForm {
            profiles: vec![profile(Some("HD"))],
            toggles: vec![Control::toggle("scoreres", true)],
        };

        let document = build(&form, &FormRules::default()).unwrap();

        assert_eq!(
            decoded(&document, "HD"),
            json!({
                "1080P": ["true", 0, "0", "10000"],
                "4K": ["false", 1, "0", "20000"],
                "720P": ["true", 2, "0", "5000"],
                "requiredwords": "",
                "ignoredwords": "subs,german"
            })
        );
        let section = document.section(SectionName::Quality).unwrap();
        assert_eq!(section.get("scoreres"), Some("true"));
    }

    #[test]
    fn test_encoded_profile_keeps_display_order() {
        let mut form = profile(Some("HD"));
        form.filters.clear();
        let profile = shape_profile("HD".into(), &form, &mut Validator::new());

        assert_eq!(
            encode(&profile).unwrap(),
            r#"{"1080P":["true",0,"0","10000"],"4K":["false",1,"0","20000"],"720P":["true",2,"0","5000"]}"#
        );
    }

    #[test]
    fn test_unnamed_profile_uses_default_name() {
        let form = QualityForm {
            profiles: vec![profile(None)],
            ..Default::default()
        };

        let document = build(&form, &FormRules::default()).unwrap();
        assert!(document.section(SectionName::Quality).unwrap().contains_key("Default"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let form = QualityForm {
            profiles: vec![profile(Some("X")), profile(Some("X"))],
            ..Default::default()
        };

        let err = build(&form, &FormRules::default()).unwrap_err();
        let Error::Rejected(rejection) = err else {
            panic!("expected rejection, got {err:?}");
        };
        assert_eq!(
            rejection.violations(),
            &[Violation::DuplicateProfileName {
                name: "X".into(),
                position: 2
            }]
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let form = QualityForm {
            profiles: vec![profile(Some("x")), profile(Some("X"))],
            ..Default::default()
        };
        let document = build(&form, &FormRules::default()).unwrap();
        assert_eq!(document.section(SectionName::Quality).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let form = QualityForm {
            profiles: vec![profile(Some(""))],
            ..Default::default()
        };
        let err = build(&form, &FormRules::default()).unwrap_err();
        assert!(matches!(
            err.rejection().map(|r| r.violations().to_vec()).as_deref(),
            Some([Violation::EmptyProfileName { position: 1 }])
        ));
    }

    #[test]
    fn test_blank_sizes_all_reported() {
        let mut form = profile(Some("HD"));
        form.resolutions[0].max.clear();
        form.resolutions[2].min.clear();
        let form = QualityForm {
            profiles: vec![form],
            ..Default::default()
        };

        let err = build(&form, &FormRules::default()).unwrap_err();
        let rejection = err.rejection().unwrap();
        let fields: Vec<String> = rejection.highlights().map(|f| f.to_string()).collect();
        assert_eq!(fields, vec!["Quality/HD/1080P/max", "Quality/HD/720P/min"]);
    }
}
