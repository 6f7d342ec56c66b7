//! Downloader section: transport sources plus one block per download client

use crate::collector::{collect, Selection};
use crate::document::{SectionName, SectionObject, SettingsDocument};
use crate::form::{BackendForm, DownloaderForm, SourcesForm};
use crate::validator::check_downloader_exclusivity;
use crate::Result;

fn sources_block(sources: &SourcesForm) -> SectionObject {
    let mut block = SectionObject::new();
    for (key, toggle) in [("usenetenabled", sources.usenet), ("torrentenabled", sources.torrent)] {
        if let Some(value) = toggle.as_value() {
            block.insert(key, value);
        }
    }
    block
}

fn backend_block(form: &BackendForm) -> SectionObject {
    let mut block = SectionObject::new();
    if let Some(value) = form.enabled.as_value() {
        block.insert(form.backend.enabled_key(), value);
    }
    block.merge(collect(&form.controls, Selection::All, &[]).fields);
    block
}

/// Build `Sources` and the block of every download client on the form
///
/// Fails without building anything when more than one client is enabled.
pub fn build(form: &DownloaderForm) -> Result<SettingsDocument> {
    check_downloader_exclusivity(form)?;

    let mut document = SettingsDocument::new();
    document.insert(SectionName::Sources, sources_block(&form.sources));

    for backend in &form.backends {
        let block = backend_block(backend);
        tracing::debug!(backend = %backend.backend, fields = block.len(), "Collected downloader block");
        document.insert(backend.backend.section(), block);
    }

    Ok(document)
}
