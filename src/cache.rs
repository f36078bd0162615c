//! Compile-once cache of templates keyed by source identifier.

use crate::render::Template;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe map from source identifier to compiled template.
///
/// Entries are inserted once, fully built, and never updated in place.
/// There is no staleness check: a changed source is only picked up after
/// [`TemplateCache::evict`] or [`TemplateCache::clear`].
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: DashMap<String, Arc<Template>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the template cached for `id`, compiling the text from
    /// `provider` on first use.
    ///
    /// `provider` runs and the text compiles outside any map lock. When
    /// concurrent first requests race, each may compile, but only the first
    /// finished template is stored and every caller gets that same `Arc`.
    /// A failed `provider` leaves the cache untouched.
    pub fn get_or_compile<F, E>(&self, id: &str, provider: F) -> Result<Arc<Template>, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(hit) = self.templates.get(id) {
            return Ok(Arc::clone(hit.value()));
        }

        let raw = provider()?;
        debug!(source = id, bytes = raw.len(), "compiling template");
        let compiled = Arc::new(Template::compile(&raw));

        let entry = self.templates.entry(id.to_owned()).or_insert(compiled);
        Ok(Arc::clone(entry.value()))
    }

    /// Drop the cached template for `id`, if any.
    pub fn evict(&self, id: &str) -> Option<Arc<Template>> {
        let removed = self.templates.remove(id).map(|(_, t)| t);
        if removed.is_some() {
            debug!(source = id, "evicted template");
        }
        removed
    }

    pub fn clear(&self) {
        self.templates.clear();
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
