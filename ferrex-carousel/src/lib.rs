//! # Ferrex Carousel
//!
//! Row slider engine for the Ferrex browse UI. Given an ordered list of
//! opaque catalog items and a responsive items-per-page count, it decides
//! which items are materialized, how far the track travels between pages,
//! how paging wraps around, and keeps the page indicators and edge peeks
//! consistent while a transition animates.
//!
//! ## Architecture
//!
//! - [`index`]: pure window arithmetic (next start index, travel
//!   percentage, window and peek indices)
//! - [`windowing`]: turns a position into renderable content slots
//! - [`pagination`]: page count and circular page index bookkeeping
//! - [`state`]: the [`Carousel`] state machine and its derived projection
//! - [`driver`]: tokio-backed [`CarouselRow`] scheduling commits and
//!   following the responsive count
//! - [`responsive`]: viewport width to items-per-page broadcast
//! - [`registry`]: the rows of a browse page
//! - [`transform`], [`hover`], [`positioning`], [`swipe`]: helpers for the
//!   rendering and input layers
//!
//! ## Example
//!
//! ```
//! use ferrex_carousel::Carousel;
//!
//! let mut row = Carousel::new((0..17).collect::<Vec<u32>>(), 5)?;
//! let transition = row.move_next()?;
//! assert_eq!(transition.to_index, 5);
//!
//! // The window stays frozen until the transition commits.
//! let frozen = row.derived().window;
//! assert!(row.derived().window.ptr_eq(&frozen));
//!
//! row.commit(&transition)?;
//! assert_eq!(row.state().lowest_visible_index, 5);
//! # Ok::<(), ferrex_carousel::CarouselError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Tokio driver for rows: commit scheduling, cancellation, resize stream
pub mod driver;

/// Error types for the carousel engine
pub mod error;

/// Hover expansion of the visible page
pub mod hover;

/// Window and index arithmetic
pub mod index;

/// Page indicator bookkeeping
pub mod pagination;

/// Placement contract for preview panels
pub mod positioning;

/// Row registry for a browse page
pub mod registry;

/// Viewport width to items-per-page provider
pub mod responsive;

/// Row state machine
pub mod state;

/// Swipe gesture detection
pub mod swipe;

/// Track translation for the renderer
pub mod transform;

/// Shared types
pub mod types;

/// Content windowing
pub mod windowing;

pub use driver::{CarouselRow, CommitTrigger, DEFAULT_ANIMATION_MS};
pub use error::{CarouselError, Result};
pub use index::RowPosition;
pub use pagination::PaginationIndicator;
pub use registry::RowRegistry;
pub use responsive::{Breakpoint, Breakpoints, ResponsiveCount};
pub use state::{Carousel, CarouselState, DerivedView, Transition};
pub use transform::TrackTransform;
pub use types::{ContentSlot, ContentWindow, Direction, RowKey};
