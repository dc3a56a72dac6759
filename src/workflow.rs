use anyhow::{Context, Result};
use tracing::warn;

use veduta::{Action, CollectionFilter, Store, YearRange, corpus};

use crate::settings::Settings;

/// Drives a [`Store`] from resolved settings: load the corpus, apply each
/// query dimension as an action, and hand the store back for printing.
pub(crate) struct SearchWorkflow {
    settings: Settings,
}

impl SearchWorkflow {
    pub(crate) fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the workflow.
    ///
    /// # Errors
    ///
    /// Fails when no corpus file is configured or the file cannot be loaded.
    pub(crate) fn run(&self) -> Result<Store> {
        let path = self
            .settings
            .corpus
            .as_ref()
            .context("no corpus file given; pass one as the first argument")?;
        let records = corpus::from_json_file(path)
            .with_context(|| format!("failed to load corpus from {}", path.display()))?;

        let mut store = Store::with_config(self.settings.store);
        store.dispatch(Action::SetCorpus(records));

        if let Some(query) = &self.settings.query {
            store.dispatch(Action::SetQuery(query.clone()));
        }
        if self.settings.from.is_some() || self.settings.to.is_some() {
            let defaults = store.state().dates;
            store.dispatch(Action::SetDates(YearRange::new(
                self.settings.from.unwrap_or(defaults.start),
                self.settings.to.unwrap_or(defaults.end),
            )));
        }
        if let Some(collection) = &self.settings.collection {
            store.dispatch(Action::SetCollection(CollectionFilter::from_tag(collection)));
        }
        if let Some(bounds) = self.settings.bounds {
            store.dispatch(Action::SetBounds(Some(bounds)));
        }
        if let Some(sort) = self.settings.sort {
            store.dispatch(Action::SetSort(Some(sort)));
        }
        if self.settings.descending {
            store.dispatch(Action::ToggleDirection);
        }

        if let Some(ssid) = &self.settings.select {
            match store.state().corpus.iter().position(|r| &r.ssid == ssid) {
                Some(index) => store.dispatch(Action::SetSelected(Some(index))),
                None => warn!(%ssid, "no record with this ssid; nothing selected"),
            }
        }

        Ok(store)
    }
}
