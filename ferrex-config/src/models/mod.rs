pub mod carousel;

pub use carousel::{CarouselSettings, CarouselSettingsSource, CommitMode};
