use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("Invalid page size: {0} (items per page must be at least 1)")]
    InvalidPageSize(usize),

    #[error("Transition {transition} still in flight")]
    Busy { transition: u64 },

    #[error(
        "Nothing to scroll: {total_items} item(s) fit on a page of {items_per_page}"
    )]
    NothingToScroll {
        total_items: usize,
        items_per_page: usize,
    },

    #[error("Cannot move back before the row has moved forward once")]
    PrevUnavailable,

    #[error("No transition in flight")]
    NoTransition,

    #[error("Stale transition: expected {expected}, got {got}")]
    StaleTransition { expected: u64, got: u64 },

    #[error("Row has been torn down")]
    Detached,
}

pub type Result<T> = std::result::Result<T, CarouselError>;
