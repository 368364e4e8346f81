//! Shared types for the carousel engine

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of the in-flight or most recent transition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
        }
    }
}

/// Unique key for a row on a browse page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Trending,
    ContinueWatching,
    MyList,
    Genre(String),
    LibraryMovies(Uuid), // library_id
    LibrarySeries(Uuid), // library_id
    Custom(&'static str),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trending => write!(f, "trending"),
            Self::ContinueWatching => write!(f, "continue-watching"),
            Self::MyList => write!(f, "my-list"),
            Self::Genre(name) => write!(f, "genre:{name}"),
            Self::LibraryMovies(id) => write!(f, "library-movies:{id}"),
            Self::LibrarySeries(id) => write!(f, "library-series:{id}"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// One renderable slot of a content window.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSlot<T> {
    /// Index into the row's item list this slot renders.
    pub index: usize,
    pub item: T,
    /// Slot width as a percentage of the visible track width.
    pub width_percent: f32,
}

/// Ordered slots to render, including peek neighbours.
///
/// Cloning is cheap and clones share storage, so a cached window can be
/// compared by identity with [`ContentWindow::ptr_eq`].
#[derive(Debug)]
pub struct ContentWindow<T> {
    slots: Arc<[ContentSlot<T>]>,
}

impl<T> ContentWindow<T> {
    pub fn new(slots: Vec<ContentSlot<T>>) -> Self {
        Self {
            slots: slots.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn slots(&self) -> &[ContentSlot<T>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Source indices in render order.
    pub fn indices(&self) -> Vec<usize> {
        self.slots.iter().map(|slot| slot.index).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentSlot<T>> {
        self.slots.iter()
    }

    /// True when both windows share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

impl<T> Clone for ContentWindow<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for ContentWindow<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a ContentWindow<T> {
    type Item = &'a ContentSlot<T>;
    type IntoIter = std::slice::Iter<'a, ContentSlot<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Width of a single slot for the given page size, in percent of the track.
pub fn item_width_percent(items_per_page: usize) -> f32 {
    100.0 / items_per_page.max(1) as f32
}
