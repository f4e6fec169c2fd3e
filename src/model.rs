//! Core value types for stitch chart patterns.
//!
//! Serialized field names follow the interchange document format
//! (`symbols`, `gridSize`, `startCol`, …) so snapshots embed directly in
//! exported JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::symbol::StitchKind;

// ────────────────────────────────────────────────────────────────────────────
// Cell – composite grid coordinate
// ────────────────────────────────────────────────────────────────────────────

/// A (row, column) grid coordinate, used as the key of the sparse cell map.
///
/// Rows are never negative. Columns may go negative transiently at the API
/// boundary (a placement left of the current origin); the grid store resolves
/// that by growing leftward, so stored cells always have `col >= 0`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

fn default_width() -> i32 {
    1
}

/// A primary symbol placement, as exported and persisted.
///
/// `col` is the left edge of the span; a multi-cell symbol covers
/// `[col, col + width)` on its row. Occupied-cell markers are never
/// serialized; they are derived from the symbol's width on import.
///
/// The `width` field is redundant with `symbol` and kept for document
/// compatibility; readers must trust the kind, not the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    #[serde(rename = "symbol")]
    pub kind: StitchKind,
    pub color: String,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mirrored: bool,
}

impl Placement {
    pub fn new(row: i32, col: i32, kind: StitchKind, color: impl Into<String>) -> Self {
        Self {
            row,
            col,
            kind,
            color: color.into(),
            width: kind.width(),
            mirrored: false,
        }
    }

    /// Same placement with the mirrored flag set (meaningful for decreases).
    pub fn mirrored(mut self) -> Self {
        self.mirrored = self.kind.is_decrease();
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GridSnapshot
// ────────────────────────────────────────────────────────────────────────────

/// Value-type snapshot of the whole grid: primary placements plus sizing
/// metadata. This is the unit of history checkpoints, persistence records
/// and interchange documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    #[serde(rename = "symbols")]
    pub placements: Vec<Placement>,
    pub rows: i32,
    pub cols: i32,
    #[serde(rename = "gridSize")]
    pub cell_size: u32,
    #[serde(rename = "startCol", default)]
    pub column_origin: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Pattern metadata
// ────────────────────────────────────────────────────────────────────────────

/// Skill level of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(anyhow::anyhow!("unknown difficulty: {other:?}")),
        }
    }
}

/// User-facing metadata attached to a chart document (the save-dialog
/// fields): title, hook, yarn, gauge, difficulty, free-form notes and the
/// materials list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMeta {
    pub title: String,
    pub description: Option<String>,
    pub hook_size: String,
    pub yarn_weight: String,
    pub gauge: Option<String>,
    pub difficulty: Difficulty,
    pub notes: Option<String>,
    pub materials: Vec<String>,
}

impl Default for PatternMeta {
    fn default() -> Self {
        Self {
            title: "Untitled Pattern".to_string(),
            description: None,
            hook_size: "5.0mm (H)".to_string(),
            yarn_weight: "Medium (4)".to_string(),
            gauge: None,
            difficulty: Difficulty::Intermediate,
            notes: None,
            materials: Vec::new(),
        }
    }
}
