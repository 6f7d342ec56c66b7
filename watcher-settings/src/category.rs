//! Settings categories
//!
//! Each save button on the settings page is annotated with one category;
//! the category picks the section builder that runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::SectionName;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Server,
    Search,
    Quality,
    Providers,
    Downloader,
    Postprocessing,
    Plugins,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Server,
        Category::Search,
        Category::Quality,
        Category::Providers,
        Category::Downloader,
        Category::Postprocessing,
        Category::Plugins,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Server => "server",
            Category::Search => "search",
            Category::Quality => "quality",
            Category::Providers => "providers",
            Category::Downloader => "downloader",
            Category::Postprocessing => "postprocessing",
            Category::Plugins => "plugins",
        }
    }

    /// Document sections a successful save of this category produces
    pub fn sections(self) -> &'static [SectionName] {
        match self {
            Category::Server => &[SectionName::Server],
            Category::Search => &[SectionName::Search],
            Category::Quality => &[SectionName::Quality],
            Category::Providers => &[
                SectionName::Indexers,
                SectionName::PotatoIndexers,
                SectionName::TorrentIndexers,
            ],
            Category::Downloader => &[
                SectionName::Sources,
                SectionName::Sabnzbd,
                SectionName::NzbGet,
                SectionName::Transmission,
                SectionName::DelugeRpc,
                SectionName::DelugeWeb,
                SectionName::QBittorrent,
            ],
            Category::Postprocessing => &[SectionName::Postprocessing],
            Category::Plugins => &[SectionName::Plugins],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "indexers".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(ref s) if s == "indexers"));
        assert!("Server".parse::<Category>().is_err());
    }
}
