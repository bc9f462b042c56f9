//! Append-only essay record store.
//!
//! One JSON Lines file on disk, one `StoredEssay` per line. The whole file is
//! replayed into memory on open, reads are served from the in-memory index,
//! and every append is written through and flushed before the new id is
//! returned. There is no update or delete; ids are a monotonically
//! increasing sequence starting after the highest replayed id.

use crate::model::{AnalysisResult, StoredEssay};
use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct EssayStore {
    path: PathBuf,
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    records: Vec<StoredEssay>,
    writer: BufWriter<File>,
    next_id: u64,
}

impl EssayStore {
    /// Open the store at `path`, creating the parent directory and replaying
    /// any existing records. Lines that fail to parse are skipped with a
    /// warning rather than poisoning the whole store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data directory {:?}", parent))?;
        }

        let records = if path.exists() {
            replay(&path)?
        } else {
            Vec::new()
        };

        let next_id = records.iter().map(|r| r.id).max().map_or(1, |id| id + 1);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open data file {:?}", path))?;

        info!(
            path = %path.display(),
            records = records.len(),
            next_id,
            "essay store opened"
        );

        Ok(Self {
            path,
            inner: RwLock::new(StoreInner {
                records,
                writer: BufWriter::new(file),
                next_id,
            }),
        })
    }

    /// Append one submission and return its id. The record is flushed to
    /// disk before the id is handed back.
    pub fn append(&self, text: String, result: Option<AnalysisResult>) -> Result<u64> {
        let mut inner = self.inner.write();
        let record = StoredEssay {
            id: inner.next_id,
            text,
            result,
            created_at: Utc::now(),
        };

        let line = serde_json::to_string(&record).context("failed to serialize essay record")?;
        inner.writer.write_all(line.as_bytes())?;
        inner.writer.write_all(b"\n")?;
        inner
            .writer
            .flush()
            .with_context(|| format!("failed to flush data file {:?}", self.path))?;

        let id = record.id;
        inner.next_id += 1;
        inner.records.push(record);
        Ok(id)
    }

    /// Most recent first, capped at `limit`.
    pub fn list_recent(&self, limit: usize) -> Vec<StoredEssay> {
        let inner = self.inner.read();
        inner.records.iter().rev().take(limit).cloned().collect()
    }

    /// Every stored result slot in insertion order, including absent ones.
    /// Feeds the aggregator, which decides what counts.
    pub fn results(&self) -> Vec<Option<AnalysisResult>> {
        let inner = self.inner.read();
        inner.records.iter().map(|r| r.result.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> Result<()> {
        self.inner
            .write()
            .writer
            .flush()
            .with_context(|| format!("failed to flush data file {:?}", self.path))
    }
}

fn replay(path: &Path) -> Result<Vec<StoredEssay>> {
    let file =
        File::open(path).with_context(|| format!("failed to open data file {:?}", path))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read data file {:?}", path))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<StoredEssay>(&line) {
            Ok(record) => records.push(record),
            Err(error) => {
                skipped += 1;
                warn!(line = line_no + 1, %error, "skipping corrupt essay record");
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "data file contained corrupt records");
    }
    Ok(records)
}
