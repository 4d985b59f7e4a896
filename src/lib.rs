//! An in-memory skip list over unique, totally ordered keys.

mod cmp;
#[cfg(test)]
mod datadriven;
mod error;
mod index;
mod options;
mod skiplist;

pub use cmp::{Comparator, OrdComparator};
pub use error::{Error, Result};
pub use index::OrderedIndex;
pub use options::{Options, DEFAULT_BRANCHING_FACTOR, DEFAULT_MAX_LEVEL, MAX_LEVEL_LIMIT};
pub use skiplist::SkipList;
