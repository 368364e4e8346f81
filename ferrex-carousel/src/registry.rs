//! Registry for the rows of one browse page, keyed by [`RowKey`]

use std::collections::HashMap;

use tracing::debug;

use crate::driver::{CarouselRow, CommitTrigger};
use crate::error::{CarouselError, Result};
use crate::responsive::ResponsiveCount;
use crate::types::RowKey;

/// Owns every row on a page plus the responsive provider they follow.
#[derive(Debug)]
pub struct RowRegistry<T> {
    rows: HashMap<RowKey, CarouselRow<T>>,
    responsive: ResponsiveCount,
    trigger: CommitTrigger,
}

impl<T> RowRegistry<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(responsive: ResponsiveCount, trigger: CommitTrigger) -> Self {
        Self {
            rows: HashMap::new(),
            responsive,
            trigger,
        }
    }

    pub fn responsive(&self) -> &ResponsiveCount {
        &self.responsive
    }

    /// Forward a viewport resize to every row.
    pub fn observe_width(&self, width: f32) -> bool {
        self.responsive.observe_width(width)
    }

    /// Get the row for `key`, creating it from `init` when absent.
    pub fn ensure_row<F>(
        &mut self,
        key: RowKey,
        init: F,
    ) -> Result<&CarouselRow<T>>
    where
        F: FnOnce() -> Vec<T>,
    {
        if !self.rows.contains_key(&key) {
            let row = CarouselRow::with_responsive(
                key.clone(),
                init(),
                self.responsive.subscribe(),
                self.trigger,
            )?;
            self.rows.insert(key.clone(), row);
        }
        self.rows.get(&key).ok_or(CarouselError::Detached)
    }

    /// Swap in a refreshed item list for an existing row.
    pub fn replace_items(&self, key: &RowKey, items: Vec<T>) -> Result<()> {
        self.rows
            .get(key)
            .ok_or(CarouselError::Detached)?
            .set_items(items)
    }

    pub fn get(&self, key: &RowKey) -> Option<&CarouselRow<T>> {
        self.rows.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.keys()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tear down and drop one row. Returns false when it did not exist.
    pub fn remove(&mut self, key: &RowKey) -> bool {
        match self.rows.remove(key) {
            Some(row) => {
                row.shutdown();
                true
            }
            None => false,
        }
    }

    /// Tear down every row, e.g. when the page is left.
    pub fn shutdown_all(&mut self) {
        for (key, row) in self.rows.drain() {
            row.shutdown();
            debug!(row = %key, "row removed from registry");
        }
    }
}
