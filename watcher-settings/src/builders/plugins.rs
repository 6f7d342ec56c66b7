//! Plugins section
//!
//! Each pipeline stage lists its plugins in display order. Only enabled
//! plugins are kept, ranked densely from 0; disabled ones take no rank.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::document::{encode, SectionName, SectionObject, SettingsDocument};
use crate::form::{PluginRow, PluginsForm};
use crate::Result;

/// Pipeline stage a plugin runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Added,
    Snatched,
    Finished,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Added, Stage::Snatched, Stage::Finished];

    pub fn key(self) -> &'static str {
        match self {
            Stage::Added => "added",
            Stage::Snatched => "snatched",
            Stage::Finished => "finished",
        }
    }

    fn rows(self, form: &PluginsForm) -> &[PluginRow] {
        match self {
            Stage::Added => &form.added,
            Stage::Snatched => &form.snatched,
            Stage::Finished => &form.finished,
        }
    }
}

/// Enabled plugins of one stage with their ranks, in rank order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageAssignment {
    entries: Vec<(String, usize)>,
}

impl StageAssignment {
    pub fn from_rows(rows: &[PluginRow]) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut next_rank = 0;

        for row in rows.iter().filter(|row| row.enabled.is_on()) {
            // A plugin listed twice keeps its first slot and takes the later rank.
            match entries.iter_mut().find(|(plugin, _)| plugin == &row.plugin) {
                Some(entry) => entry.1 = next_rank,
                None => entries.push((row.plugin.clone(), next_rank)),
            }
            next_rank += 1;
        }

        Self { entries }
    }

    pub fn rank_of(&self, plugin: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(id, _)| id == plugin)
            .map(|(_, rank)| *rank)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StageAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (plugin, rank) in &self.entries {
            map.serialize_entry(plugin, &("true", rank))?;
        }
        map.end()
    }
}

/// Build the `Plugins` section, one encoded map per stage
pub fn build(form: &PluginsForm) -> Result<SettingsDocument> {
    let mut section = SectionObject::new();

    for stage in Stage::ALL {
        let assignment = StageAssignment::from_rows(stage.rows(form));
        tracing::debug!(stage = stage.key(), enabled = assignment.len(), "Ranked plugins");
        section.insert(stage.key(), encode(&assignment)?);
    }

    Ok(SettingsDocument::single(SectionName::Plugins, section))
}
