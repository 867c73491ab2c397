//! Heading classification and outline structuring.
//!
//! This is the heart of the crate: a document-wide [`SizeRankMap`] assigns
//! the four largest font sizes to title, h1, h2 and h3, the
//! [`BulletDetector`] recognizes list items, and the [`OutlineBuilder`]
//! folds the classified run stream into a nested [`Outline`] in one pass.
//!
//! Nothing here can fail. Content that has nowhere to go is dropped (or
//! re-homed under [`OrphanPolicy::Attach`]).
//!
//! [`Outline`]: crate::model::Outline

mod bullet;
mod builder;
mod classify;
mod options;

pub use bullet::{is_bullet, BulletDetector};
pub use builder::{build_outline, build_outline_with_options, OutlineBuilder, Placement};
pub use classify::{classify_sizes, Rank, SizeRankMap, SizeStatistics};
pub use options::{OrphanPolicy, OutlineOptions};
