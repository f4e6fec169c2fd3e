//! File-backed pattern library.
//!
//! [`PatternLibrary`] persists [`PatternRecord`]s in a directory, one binary
//! file per record, keyed by a numeric id (`<id>.stitch`). Records are
//! framed with magic bytes and a format version ahead of the bincode body.
//!
//! Saving never touches in-memory editor state, and writes go through a
//! temp file + rename, so a failed save leaves both the library and the
//! live session exactly as they were.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::model::{Difficulty, GridSnapshot, Placement};

/// File extension of library records.
pub const RECORD_EXTENSION: &str = "stitch";

const MAGIC: &[u8; 10] = b"STITCHGRID";
const BINARY_VERSION: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// PatternRecord
// ────────────────────────────────────────────────────────────────────────────

/// One persisted pattern: the save-dialog metadata, an optional rendered
/// preview, and the grid state (primary placements plus sizing). Occupied
/// markers are never stored; they are rebuilt from placement widths when
/// the record is loaded into a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Assigned by the library on first save.
    pub id: Option<u64>,
    pub title: String,
    pub description: Option<String>,
    pub hook_size: String,
    pub yarn_weight: String,
    pub difficulty: Difficulty,
    /// Opaque rendered chart image (PNG bytes, typically).
    pub canvas_image: Option<Vec<u8>>,
    pub placements: Vec<Placement>,
    pub rows: i32,
    pub cols: i32,
    pub grid_size: u32,
    pub start_col: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PatternRecord {
    /// The grid state carried by this record.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            placements: self.placements.clone(),
            rows: self.rows,
            cols: self.cols,
            cell_size: self.grid_size,
            column_origin: self.start_col,
        }
    }

    /// Save the record to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, MAGIC)?;
        std::io::Write::write_all(&mut writer, &BINARY_VERSION.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        Ok(())
    }

    /// Load a record from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 10];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != MAGIC {
            anyhow::bail!("Invalid magic bytes: expected 'STITCHGRID'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != BINARY_VERSION {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let record: PatternRecord =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(record)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PatternLibrary
// ────────────────────────────────────────────────────────────────────────────

/// A directory of pattern records with IndexedDB-style CRUD operations.
pub struct PatternLibrary {
    root: Utf8PathBuf,
}

impl PatternLibrary {
    /// Open (creating if needed) a library rooted at the given directory.
    pub fn open(root: impl Into<Utf8PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(root.as_std_path())
            .with_context(|| format!("create pattern library at {root}"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn record_path(&self, id: u64) -> Utf8PathBuf {
        self.root.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    /// Store a new record, assigning the next free id and stamping both
    /// timestamps. Returns the assigned id.
    pub fn save_pattern(&self, record: &PatternRecord) -> Result<u64> {
        let id = self.next_id()?;
        let now = Utc::now();
        let mut stored = record.clone();
        stored.id = Some(id);
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        self.write_record(&stored)?;
        debug!("saved pattern {id} ({:?})", stored.title);
        Ok(id)
    }

    /// Replace an existing record, preserving its creation time and
    /// restamping the update time. Errors if the id is unknown.
    pub fn update_pattern(&self, id: u64, record: &PatternRecord) -> Result<()> {
        let existing = self
            .get_pattern(id)?
            .with_context(|| format!("pattern {id} not found"))?;
        let mut stored = record.clone();
        stored.id = Some(id);
        stored.created_at = existing.created_at;
        stored.updated_at = Some(Utc::now());
        self.write_record(&stored)?;
        debug!("updated pattern {id}");
        Ok(())
    }

    /// Fetch a record by id; `Ok(None)` when it does not exist.
    pub fn get_pattern(&self, id: u64) -> Result<Option<PatternRecord>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let record = PatternRecord::load_from_binary(path.as_std_path())
            .with_context(|| format!("load pattern record {path}"))?;
        Ok(Some(record))
    }

    /// All records in the library, sorted by id.
    pub fn list_patterns(&self) -> Result<Vec<PatternRecord>> {
        let mut records = Vec::new();
        for entry in WalkDir::new(self.root.as_std_path())
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || record_id_of(entry.path()).is_none() {
                continue;
            }
            let record = PatternRecord::load_from_binary(entry.path())
                .with_context(|| format!("load pattern record {}", entry.path().display()))?;
            records.push(record);
        }
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    /// Delete a record. Returns whether it existed.
    pub fn delete_pattern(&self, id: u64) -> Result<bool> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path.as_std_path())
            .with_context(|| format!("delete pattern record {path}"))?;
        debug!("deleted pattern {id}");
        Ok(true)
    }

    /// Delete every record in the library.
    pub fn clear_all(&self) -> Result<()> {
        for entry in WalkDir::new(self.root.as_std_path())
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && record_id_of(entry.path()).is_some() {
                std::fs::remove_file(entry.path())
                    .with_context(|| format!("delete {}", entry.path().display()))?;
            }
        }
        debug!("cleared pattern library at {}", self.root);
        Ok(())
    }

    fn next_id(&self) -> Result<u64> {
        let mut max_id = 0;
        for entry in WalkDir::new(self.root.as_std_path())
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if let Some(id) = record_id_of(entry.path()) {
                max_id = max_id.max(id);
            }
        }
        Ok(max_id + 1)
    }

    fn write_record(&self, record: &PatternRecord) -> Result<()> {
        let id = record.id.context("record must carry an id before writing")?;
        let path = self.record_path(id);
        // Stage into a temp file so a failed write never clobbers an
        // existing record.
        let staging = self.root.join(format!("{id}.{RECORD_EXTENSION}.tmp"));
        record
            .save_to_binary(staging.as_std_path())
            .with_context(|| format!("write pattern record {staging}"))?;
        std::fs::rename(staging.as_std_path(), path.as_std_path())
            .with_context(|| format!("commit pattern record {path}"))?;
        Ok(())
    }
}

fn record_id_of(path: &std::path::Path) -> Option<u64> {
    if path.extension()?.to_str()? != RECORD_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
