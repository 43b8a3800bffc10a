//! Layout Cache
//!
//! Caches laid out lines to avoid re-wrapping on every frame.

use std::collections::HashMap;
use std::sync::Arc;

use mdspan_core::RenderedDocument;

use super::layout::{layout, Layout};

/// Cache key: (content_hash, wrap_width)
type CacheKey = (u64, usize);

pub struct LayoutCache {
    cache: HashMap<CacheKey, Arc<Layout>>,
    /// Last render width to invalidate on resize
    last_width: usize,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            last_width: 0,
        }
    }

    /// Check if width changed and invalidate if needed
    /// Returns true if cache was invalidated
    pub fn check_width(&mut self, width: usize) -> bool {
        if self.last_width != width {
            self.cache.clear();
            self.last_width = width;
            true
        } else {
            false
        }
    }

    /// Get or lay out a document, caching the result
    pub fn get_or_layout(
        &mut self,
        document: &RenderedDocument,
        content_hash: u64,
        width: usize,
    ) -> Arc<Layout> {
        let key = (content_hash, width);

        if let Some(cached) = self.cache.get(&key) {
            Arc::clone(cached)
        } else {
            let laid_out = Arc::new(layout(document, width));
            tracing::debug!(width, lines = laid_out.lines.len(), "Laid out document");
            self.cache.insert(key, Arc::clone(&laid_out));
            laid_out
        }
    }
}
