//! Column-oriented on-disk layout for [`PaperTable`].
//!
//! Each field is stored as one vector; row `i` is the `i`-th element of every
//! column. The archive is written to a sibling temp file and renamed into
//! place, then read back through a read-only memory map.

use std::fs::{self, File};
use std::io::Write;
use std::mem::take;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use memmap2::Mmap;
use rkyv::{Archive, Deserialize, Serialize, rancor::Error as RkyvError};
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::model::PaperRecord;
use super::table::PaperTable;

/// Layout version written into every archive.
pub const COLUMNAR_VERSION: u32 = 1;

const TEMP_SUFFIX: &str = "tmp";

#[derive(Archive, Serialize, Deserialize, Debug, Default, PartialEq)]
#[rkyv(derive(Debug))]
pub(crate) struct TableColumns {
    pub version: u32,
    pub title: Vec<String>,
    pub authors: Vec<String>,
    pub canonical_id: Vec<String>,
    pub abstract_text: Vec<String>,
    pub categories: Vec<Vec<String>>,
    pub pdf_url: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub published_ms: Vec<Option<i64>>,
    pub venue: Vec<Option<String>>,
    pub url: Vec<Option<String>>,
    pub source_timestamp: Vec<Option<String>>,
    pub source_relevance: Vec<Option<i64>>,
    pub score: Option<Vec<f64>>,
}

impl TableColumns {
    pub(crate) fn from_table(table: &PaperTable) -> Self {
        let mut cols = Self {
            version: COLUMNAR_VERSION,
            score: table.scores().map(<[f64]>::to_vec),
            ..Self::default()
        };
        for row in table.rows() {
            cols.title.push(row.title.clone());
            cols.authors.push(row.authors.clone());
            cols.canonical_id.push(row.canonical_id.clone());
            cols.abstract_text.push(row.abstract_text.clone());
            cols.categories.push(row.categories.clone());
            cols.pdf_url.push(row.pdf_url.clone());
            cols.published_ms
                .push(row.published.map(|p| p.timestamp_millis()));
            cols.venue.push(row.venue.clone());
            cols.url.push(row.url.clone());
            cols.source_timestamp.push(row.source_timestamp.clone());
            cols.source_relevance.push(row.source_relevance);
        }
        cols
    }

    fn row_count(&self) -> usize {
        self.title.len()
    }

    fn check_lengths(&self) -> Result<(), String> {
        let n = self.row_count();
        let lengths = [
            ("authors", self.authors.len()),
            ("canonical_id", self.canonical_id.len()),
            ("abstract_text", self.abstract_text.len()),
            ("categories", self.categories.len()),
            ("pdf_url", self.pdf_url.len()),
            ("published", self.published_ms.len()),
            ("venue", self.venue.len()),
            ("url", self.url.len()),
            ("source_timestamp", self.source_timestamp.len()),
            ("source_relevance", self.source_relevance.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(format!("column '{name}' has {len} rows, expected {n}"));
            }
        }
        if let Some(score) = &self.score
            && score.len() != n
        {
            return Err(format!("column 'score' has {} rows, expected {n}", score.len()));
        }
        Ok(())
    }

    fn into_table(self, path: &Path) -> StoreResult<PaperTable> {
        let corrupt = |reason: String| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason,
        };

        if self.version != COLUMNAR_VERSION {
            return Err(corrupt(format!(
                "unsupported layout version {}",
                self.version
            )));
        }
        self.check_lengths().map_err(corrupt)?;

        let mut cols = self;
        let n = cols.row_count();
        let mut rows = Vec::with_capacity(n);
        for i in 0..n {
            let published = match cols.published_ms[i] {
                Some(ms) => Some(
                    DateTime::<Utc>::from_timestamp_millis(ms)
                        .ok_or_else(|| corrupt(format!("timestamp {ms} out of range")))?,
                ),
                None => None,
            };
            rows.push(PaperRecord {
                title: take(&mut cols.title[i]),
                authors: take(&mut cols.authors[i]),
                canonical_id: take(&mut cols.canonical_id[i]),
                abstract_text: take(&mut cols.abstract_text[i]),
                categories: take(&mut cols.categories[i]),
                pdf_url: take(&mut cols.pdf_url[i]),
                published,
                venue: cols.venue[i].take(),
                url: cols.url[i].take(),
                source_timestamp: cols.source_timestamp[i].take(),
                source_relevance: cols.source_relevance[i],
            });
        }

        Ok(PaperTable::from_parts(rows, cols.score))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

/// Archives `table` to `path`, creating parent directories as needed.
pub(crate) fn write_table(table: &PaperTable, path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let columns = TableColumns::from_table(table);
    let bytes = rkyv::to_bytes::<RkyvError>(&columns)
        .map_err(|e| StoreError::Serialization(format!("{:?}", e)))?;

    let temp_path = temp_path_for(path);
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;

    debug!(path = %path.display(), rows = table.len(), bytes = bytes.len(), "Table saved");
    Ok(())
}

/// Reads a table archived by [`write_table`]. A missing file yields `Ok(None)`.
pub(crate) fn read_table(path: &Path) -> StoreResult<Option<PaperTable>> {
    if !path.exists() {
        debug!(path = %path.display(), "No saved table");
        return Ok(None);
    }

    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }

    // SAFETY: the mapping is read-only and dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file)? };
    let columns = rkyv::from_bytes::<TableColumns, RkyvError>(&mmap[..]).map_err(|e| {
        StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("{:?}", e),
        }
    })?;
    drop(mmap);

    let table = columns.into_table(path)?;
    debug!(path = %path.display(), rows = table.len(), "Table loaded");
    Ok(Some(table))
}
