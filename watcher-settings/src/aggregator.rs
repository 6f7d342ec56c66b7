//! Aggregator: category dispatch
//!
//! Picks exactly one section builder for the triggering category. The
//! downloader exclusivity check runs first for every category, so a form
//! with two enabled download clients cannot be saved from any button. Any
//! failure cancels the whole save; no partial document is ever returned.

use tracing::{debug, info, warn};

use crate::builders;
use crate::category::Category;
use crate::document::SettingsDocument;
use crate::form::SettingsForm;
use crate::rules::FormRules;
use crate::validator::check_downloader_exclusivity;
use crate::{Error, Result};

/// Build the document a save of `category` would submit
pub fn assemble(category: Category, form: &SettingsForm, rules: &FormRules) -> Result<SettingsDocument> {
    debug!(%category, "Assembling settings document");

    if let Err(rejection) = check_downloader_exclusivity(&form.downloader) {
        warn!(%category, reason = %rejection, "Save blocked before any section was built");
        return Err(Error::Rejected(rejection));
    }

    let result = match category {
        Category::Server => builders::server::build(&form.server, rules),
        Category::Search => builders::search::build(&form.search, rules),
        Category::Quality => builders::quality::build(&form.quality, rules),
        Category::Providers => builders::providers::build(&form.providers),
        Category::Downloader => builders::downloader::build(&form.downloader),
        Category::Postprocessing => builders::postprocessing::build(&form.postprocessing, rules),
        Category::Plugins => builders::plugins::build(&form.plugins),
    };

    match &result {
        Ok(document) => info!(
            %category,
            sections = ?document.section_names().collect::<Vec<_>>(),
            "Settings document assembled"
        ),
        Err(e) => warn!(%category, error = %e, "Settings rejected"),
    }

    result
}
