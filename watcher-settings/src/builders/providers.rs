//! Providers: Newznab, Potato and torrent indexers
//!
//! Newznab and Potato entries are numbered from 1 in display order, skipping
//! rows with both url and api key empty. Each provider type is all or
//! nothing: once one row has only half of its credentials, every entry of
//! that type collected so far is dropped, the type stays empty for the rest
//! of the scan and the submission is cancelled. Later rows are still
//! checked so each incomplete row gets reported.

use crate::document::{SectionName, SectionObject, SettingsDocument};
use crate::form::{IndexerRow, ProvidersForm, Toggle, TorrentIndexerRow};
use crate::validator::{FieldRef, Validator, Violation};
use crate::Result;

/// Complete Newznab / Potato indexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerEntry {
    pub url: String,
    pub api_key: String,
    pub enabled: Toggle,
}

impl IndexerEntry {
    /// `url,api_key,enabled`, lower-cased, as the server parses it
    pub fn encode(&self) -> String {
        format!(
            "{},{},{}",
            self.url,
            self.api_key,
            self.enabled.as_value().unwrap_or_default()
        )
        .to_lowercase()
    }
}

/// Number the complete rows of one provider type
///
/// Returns an empty object as soon as any row is incomplete.
pub fn scan_indexers(provider: SectionName, rows: &[IndexerRow], validator: &mut Validator) -> SectionObject {
    let mut entries = SectionObject::new();
    let mut poisoned = false;
    let mut index = 1;

    for (offset, row) in rows.iter().enumerate() {
        match (row.url.is_empty(), row.api_key.is_empty()) {
            (true, true) => continue,
            (false, false) => {
                if poisoned {
                    continue;
                }
                let entry = IndexerEntry {
                    url: row.url.clone(),
                    api_key: row.api_key.clone(),
                    enabled: row.enabled,
                };
                entries.insert(index.to_string(), entry.encode());
                index += 1;
            }
            (url_blank, _) => {
                let position = offset + 1;
                let missing = if url_blank { "url" } else { "api_key" };
                validator.flag(Violation::PartialCredentials {
                    provider,
                    position,
                    missing: FieldRef::new(provider, position.to_string()).child(missing),
                });
                if !entries.is_empty() {
                    tracing::debug!(
                        provider = %provider,
                        discarded = entries.len(),
                        "Discarding indexers after incomplete entry"
                    );
                }
                entries.clear();
                poisoned = true;
            }
        }
    }

    entries
}

/// Torrent indexer id → enabled flag
pub fn collect_torrent_indexers(rows: &[TorrentIndexerRow]) -> SectionObject {
    rows.iter()
        .filter_map(|row| row.enabled.as_value().map(|value| (row.id.clone(), value)))
        .collect()
}

/// Build `Indexers`, `PotatoIndexers` and `TorrentIndexers`
pub fn build(form: &ProvidersForm) -> Result<SettingsDocument> {
    let mut validator = Validator::new();
    let mut document = SettingsDocument::new();

    let newznab = scan_indexers(SectionName::Indexers, &form.newznab, &mut validator);
    document.insert(SectionName::Indexers, newznab);

    let potato = scan_indexers(SectionName::PotatoIndexers, &form.potato, &mut validator);
    document.insert(SectionName::PotatoIndexers, potato);

    document.insert(
        SectionName::TorrentIndexers,
        collect_torrent_indexers(&form.torrent),
    );

    Ok(validator.finish(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_entries_numbered_from_one() {
        let rows = vec![
            IndexerRow::new("https://Nzb.example/api", "ABC", true),
            IndexerRow::new("", "", true),
            IndexerRow::new("https://other.example", "def", false),
        ];
        let mut validator = Validator::new();

        let entries = scan_indexers(SectionName::Indexers, &rows, &mut validator);

        assert!(validator.is_clean());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("1"), Some("https://nzb.example/api,abc,true"));
        assert_eq!(entries.get("2"), Some("https://other.example,def,false"));
    }

    #[test]
    fn test_incomplete_entry_discards_earlier_valid_entries() {
        let rows = vec![
            IndexerRow::new("http://good", "key", true),
            IndexerRow::new("http://a", "", true),
            IndexerRow::new("http://later", "key", true),
        ];
        let mut validator = Validator::new();

        let entries = scan_indexers(SectionName::Indexers, &rows, &mut validator);

        assert!(entries.is_empty());
        let rejection = validator.finish(()).unwrap_err();
        assert_eq!(
            rejection.violations(),
            &[Violation::PartialCredentials {
                provider: SectionName::Indexers,
                position: 2,
                missing: FieldRef::new(SectionName::Indexers, "2").child("api_key"),
            }]
        );
    }

    #[test]
    fn test_every_incomplete_row_reported() {
        let rows = vec![
            IndexerRow::new("", "key", true),
            IndexerRow::new("http://a", "", true),
        ];
        let mut validator = Validator::new();
        scan_indexers(SectionName::PotatoIndexers, &rows, &mut validator);

        let rejection = validator.finish(()).unwrap_err();
        assert_eq!(rejection.violations().len(), 2);
        assert_eq!(
            rejection.warnings(),
            vec!["Please complete or clear out incomplete providers."]
        );
    }

    #[test]
    fn test_build_cancels_whole_submission() {
        let form = ProvidersForm {
            newznab: vec![IndexerRow::new("http://ok", "key", true)],
            potato: vec![IndexerRow::new("http://a", "", true)],
            torrent: vec![],
        };

        let err = build(&form).unwrap_err();
        assert!(err.rejection().is_some());
    }

    #[test]
    fn test_build_all_provider_sections() {
        let form = ProvidersForm {
            newznab: vec![IndexerRow::new("", "", false)],
            potato: vec![IndexerRow::new("http://cp", "k", Toggle::Unset)],
            torrent: vec![
                TorrentIndexerRow {
                    id: "rarbg".into(),
                    enabled: Toggle::On,
                },
                TorrentIndexerRow {
                    id: "limetorrents".into(),
                    enabled: Toggle::Off,
                },
            ],
        };

        let document = build(&form).unwrap();

        assert!(document.section(SectionName::Indexers).unwrap().is_empty());
        assert_eq!(
            document.section(SectionName::PotatoIndexers).unwrap().get("1"),
            Some("http://cp,k,")
        );
        let torrent = document.section(SectionName::TorrentIndexers).unwrap();
        assert_eq!(torrent.get("rarbg"), Some("true"));
        assert_eq!(torrent.get("limetorrents"), Some("false"));
    }
}
