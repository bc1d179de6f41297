//! Memoized page views for the interactive session

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::pipeline::{Dataset, FilterSelection, LoadError};

use super::pages::{build_page, Page, PageView};

/// Page views keyed by page and the full filter selection.
///
/// Every view embeds the selection it was built for, so two selections never
/// share an entry even when the page ignores the dimension that differs.
/// The dataset never changes while the process runs, so entries are never
/// invalidated.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<(Page, FilterSelection), Arc<PageView>>,
    hits: usize,
    misses: usize,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for this page and selection, building it on first use
    pub fn get_or_build(
        &mut self,
        dataset: &Dataset,
        page: Page,
        selection: &FilterSelection,
        map_path: &Path,
    ) -> Result<Arc<PageView>, LoadError> {
        let key = (page, selection.clone());
        if let Some(view) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(view));
        }

        self.misses += 1;
        let view = Arc::new(build_page(dataset, page, selection, map_path)?);
        self.entries.insert(key, Arc::clone(&view));
        Ok(view)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
