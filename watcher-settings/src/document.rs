//! Settings document sent to the server
//!
//! The document maps section names to flat section objects. Every value in
//! a section object is a string; nested sub-documents (quality profiles,
//! plugin stages) are typed until they are encoded into a section with
//! [`encode`].

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::Result;

/// Top-level section of the settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Server,
    Search,
    Quality,
    Indexers,
    PotatoIndexers,
    TorrentIndexers,
    Sources,
    Sabnzbd,
    NzbGet,
    Transmission,
    #[serde(rename = "DelugeRPC")]
    DelugeRpc,
    DelugeWeb,
    QBittorrent,
    Postprocessing,
    Plugins,
}

impl SectionName {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Server => "Server",
            SectionName::Search => "Search",
            SectionName::Quality => "Quality",
            SectionName::Indexers => "Indexers",
            SectionName::PotatoIndexers => "PotatoIndexers",
            SectionName::TorrentIndexers => "TorrentIndexers",
            SectionName::Sources => "Sources",
            SectionName::Sabnzbd => "Sabnzbd",
            SectionName::NzbGet => "NzbGet",
            SectionName::Transmission => "Transmission",
            SectionName::DelugeRpc => "DelugeRPC",
            SectionName::DelugeWeb => "DelugeWeb",
            SectionName::QBittorrent => "QBittorrent",
            SectionName::Postprocessing => "Postprocessing",
            SectionName::Plugins => "Plugins",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field key → string value map for one section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionObject(BTreeMap<String, String>);

impl SectionObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Merge another section's fields over this one
    pub fn merge(&mut self, other: SectionObject) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectionObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a SectionObject {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Section name → section object map, one submission's payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument(BTreeMap<SectionName, SectionObject>);

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding a single section
    pub fn single(name: SectionName, section: SectionObject) -> Self {
        let mut document = Self::new();
        document.insert(name, section);
        document
    }

    /// Store a section under its canonical name
    pub fn insert(&mut self, name: SectionName, section: SectionObject) {
        self.0.insert(name, section);
    }

    pub fn section(&self, name: SectionName) -> Option<&SectionObject> {
        self.0.get(&name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = SectionName> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON text posted as the request's `data` field
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Encode a nested sub-document into the string stored in its section
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
