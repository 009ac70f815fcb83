//! Tabular record store: build, deduplicate, rank, persist.
//!
//! A [`PaperTable`] holds enriched records in input order plus an optional
//! `score` column that only exists after [`PaperTable::rank`]. Persistence is
//! column oriented (one vector per field) and archived with `rkyv`.

pub mod columnar;
pub mod error;
pub mod model;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use model::{PaperRecord, RawPaperRecord};
pub use table::{PaperTable, UNSCORED_SENTINEL};
