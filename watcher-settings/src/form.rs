//! Settings form state
//!
//! A snapshot of everything the settings page shows, read fresh on every
//! save. Lists are kept in display order; an entry's position in its
//! vector is its position on screen.

use serde::{Deserialize, Serialize};

use crate::document::SectionName;

/// Toggle control value
///
/// Toggles carry an explicit value attribute rather than a native checked
/// state. A toggle without the attribute is `Unset` and is left out of the
/// collected section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toggle {
    #[serde(rename = "true")]
    On,
    #[serde(rename = "false")]
    Off,
    #[default]
    #[serde(rename = "unset")]
    Unset,
}

impl Toggle {
    /// Wire value of the toggle, `None` when unset
    pub fn as_value(self) -> Option<&'static str> {
        match self {
            Toggle::On => Some("true"),
            Toggle::Off => Some("false"),
            Toggle::Unset => None,
        }
    }

    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Toggle::On
        } else {
            Toggle::Off
        }
    }
}

/// What a control holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Free text input
    Text(String),
    /// Drop-down selection
    Select(String),
    /// Icon toggle with an explicit value attribute
    Toggle(Toggle),
    /// Action button (label only, never captured)
    Button(String),
}

/// One input-like element inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl Control {
    pub fn text(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ControlKind::Text(value.into()),
        }
    }

    pub fn select(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ControlKind::Select(value.into()),
        }
    }

    pub fn toggle(id: impl Into<String>, value: impl Into<Toggle>) -> Self {
        Self {
            id: id.into(),
            kind: ControlKind::Toggle(value.into()),
        }
    }

    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ControlKind::Button(label.into()),
        }
    }
}

/// Section root holding a flat list of controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope {
    pub controls: Vec<Control>,
}

impl Scope {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }
}

/// One resolution line of a quality profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRow {
    pub id: String,
    #[serde(default)]
    pub enabled: Toggle,
    /// Minimum size bound (MB), as typed
    #[serde(default)]
    pub min: String,
    /// Maximum size bound (MB), as typed
    #[serde(default)]
    pub max: String,
}

impl ResolutionRow {
    pub fn new(
        id: impl Into<String>,
        enabled: impl Into<Toggle>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            enabled: enabled.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

/// One quality profile as displayed
///
/// `resolutions` is the sortable list below its header, in current display
/// order. `name` is `None` when the profile has no name input at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub resolutions: Vec<ResolutionRow>,
    /// Required/preferred/ignored word lists
    pub filters: Vec<Control>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityForm {
    pub profiles: Vec<ProfileForm>,
    /// Quality toggles outside any profile
    pub toggles: Vec<Control>,
}

/// Newznab or Potato indexer line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerRow {
    pub url: String,
    pub api_key: String,
    pub enabled: Toggle,
}

impl IndexerRow {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, enabled: impl Into<Toggle>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            enabled: enabled.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentIndexerRow {
    pub id: String,
    #[serde(default)]
    pub enabled: Toggle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersForm {
    pub newznab: Vec<IndexerRow>,
    pub potato: Vec<IndexerRow>,
    pub torrent: Vec<TorrentIndexerRow>,
}

/// Supported download clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sabnzbd,
    NzbGet,
    Transmission,
    DelugeRpc,
    DelugeWeb,
    QBittorrent,
}

impl Backend {
    pub const ALL: [Backend; 6] = [
        Backend::Sabnzbd,
        Backend::NzbGet,
        Backend::Transmission,
        Backend::DelugeRpc,
        Backend::DelugeWeb,
        Backend::QBittorrent,
    ];

    /// Document section the backend's block is stored under
    pub fn section(self) -> SectionName {
        match self {
            Backend::Sabnzbd => SectionName::Sabnzbd,
            Backend::NzbGet => SectionName::NzbGet,
            Backend::Transmission => SectionName::Transmission,
            Backend::DelugeRpc => SectionName::DelugeRpc,
            Backend::DelugeWeb => SectionName::DelugeWeb,
            Backend::QBittorrent => SectionName::QBittorrent,
        }
    }

    /// Key of the block's own enabled flag
    pub fn enabled_key(self) -> &'static str {
        match self {
            Backend::Sabnzbd => "sabenabled",
            Backend::NzbGet => "nzbgenabled",
            Backend::Transmission => "transmissionenabled",
            Backend::DelugeRpc => "delugerpcenabled",
            Backend::DelugeWeb => "delugewebenabled",
            Backend::QBittorrent => "qbittorrentenabled",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section().as_str())
    }
}

/// Transport families (usenet / torrent) switched on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesForm {
    pub usenet: Toggle,
    pub torrent: Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendForm {
    pub backend: Backend,
    #[serde(default)]
    pub enabled: Toggle,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl BackendForm {
    pub fn new(backend: Backend, enabled: impl Into<Toggle>, controls: Vec<Control>) -> Self {
        Self {
            backend,
            enabled: enabled.into(),
            controls,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloaderForm {
    pub sources: SourcesForm,
    pub backends: Vec<BackendForm>,
}

/// One plugin line in a pipeline stage list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRow {
    pub plugin: String,
    #[serde(default)]
    pub enabled: Toggle,
}

impl PluginRow {
    pub fn new(plugin: impl Into<String>, enabled: impl Into<Toggle>) -> Self {
        Self {
            plugin: plugin.into(),
            enabled: enabled.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsForm {
    pub added: Vec<PluginRow>,
    pub snatched: Vec<PluginRow>,
    pub finished: Vec<PluginRow>,
}

/// Whole settings page
///
/// Categories not shown on the current page stay at their empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub server: Scope,
    pub search: Scope,
    pub quality: QualityForm,
    pub providers: ProvidersForm,
    pub downloader: DownloaderForm,
    pub postprocessing: Scope,
    pub plugins: PluginsForm,
}

impl SettingsForm {
    /// Parse a JSON form snapshot
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
