//! JSON interchange documents.
//!
//! A pattern file is a single JSON document with three sections: `metadata`
//! (title, hook, yarn, difficulty, …), `pattern` (grid dimensions and the
//! primary placements) and `settings` (grid visibility, grid style, zoom).
//! Only primary placements serialize; occupied-cell markers are derived
//! state and are reconstructed by [`PatternGrid::import_state`] on load.
//!
//! [`import_json`] validates a document before anything is accepted: a
//! malformed document is rejected with a descriptive error and no partial
//! state escapes.
//!
//! [`PatternGrid::import_state`]: crate::editor::grid::PatternGrid::import_state

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::normalize_color;
use crate::editor::grid::DEFAULT_CELL_SIZE;
use crate::model::{Difficulty, GridSnapshot, PatternMeta, Placement};

/// Version string written into exported documents.
pub const FORMAT_VERSION: &str = "1.0.0";

fn default_title() -> String {
    "Untitled Pattern".to_string()
}

fn default_hook_size() -> String {
    "5.0mm (H)".to_string()
}

fn default_yarn_weight() -> String {
    "Medium (4)".to_string()
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

fn default_show_grid() -> bool {
    true
}

fn default_zoom() -> u32 {
    100
}

fn timestamp_now() -> DateTime<Utc> {
    Utc::now()
}

// ────────────────────────────────────────────────────────────────────────────
// Document sections
// ────────────────────────────────────────────────────────────────────────────

/// The `metadata` section of a pattern file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_hook_size")]
    pub hook_size: String,
    #[serde(default = "default_yarn_weight")]
    pub yarn_weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default = "timestamp_now")]
    pub exported_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
}

/// The `pattern` section: grid sizing plus the primary placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSection {
    pub rows: i32,
    pub cols: i32,
    #[serde(default)]
    pub start_col: i32,
    #[serde(default = "default_cell_size")]
    pub grid_size: u32,
    pub symbols: Vec<Placement>,
    /// Optional base64-encoded rendered preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_data: Option<String>,
}

/// Grid-line rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    #[default]
    Basic,
    Every10,
    Every50,
}

/// The `settings` section: view preferences carried along with a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
    #[serde(default)]
    pub grid_style: GridStyle,
    #[serde(default = "default_zoom")]
    pub zoom: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_style: GridStyle::Basic,
            zoom: 100,
        }
    }
}

/// A complete interchange document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFile {
    pub metadata: FileMetadata,
    pub pattern: PatternSection,
    #[serde(default)]
    pub settings: ViewSettings,
}

impl PatternFile {
    /// The grid state carried by this document.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            placements: self.pattern.symbols.clone(),
            rows: self.pattern.rows,
            cols: self.pattern.cols,
            cell_size: self.pattern.grid_size,
            column_origin: self.pattern.start_col,
        }
    }

    /// The session metadata carried by this document.
    pub fn meta(&self) -> PatternMeta {
        PatternMeta {
            title: self.metadata.title.clone(),
            description: self.metadata.description.clone(),
            hook_size: self.metadata.hook_size.clone(),
            yarn_weight: self.metadata.yarn_weight.clone(),
            gauge: self.metadata.gauge.clone(),
            difficulty: self.metadata.difficulty,
            notes: self.metadata.notes.clone(),
            materials: self.metadata.materials.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export / import
// ────────────────────────────────────────────────────────────────────────────

/// Assemble an interchange document from session metadata, a grid snapshot
/// and view settings, stamped with the current time and format version.
pub fn build_file(
    meta: &PatternMeta,
    snapshot: &GridSnapshot,
    settings: &ViewSettings,
    canvas_data: Option<String>,
) -> PatternFile {
    PatternFile {
        metadata: FileMetadata {
            title: meta.title.clone(),
            description: meta.description.clone(),
            hook_size: meta.hook_size.clone(),
            yarn_weight: meta.yarn_weight.clone(),
            gauge: meta.gauge.clone(),
            difficulty: meta.difficulty,
            notes: meta.notes.clone(),
            materials: meta.materials.clone(),
            exported_at: Utc::now(),
            version: FORMAT_VERSION.to_string(),
        },
        pattern: PatternSection {
            rows: snapshot.rows,
            cols: snapshot.cols,
            start_col: snapshot.column_origin,
            grid_size: snapshot.cell_size,
            symbols: snapshot.placements.clone(),
            canvas_data,
        },
        settings: settings.clone(),
    }
}

/// Serialize a document as pretty-printed JSON.
pub fn export_json(file: &PatternFile) -> Result<String> {
    serde_json::to_string_pretty(file).context("serialize pattern document")
}

/// Parse and validate an interchange document.
///
/// Rejects documents that are not JSON objects, lack a `metadata` or
/// `pattern.symbols` section, use unknown stitch ids, carry negative rows,
/// or carry colors that cannot be normalized. Nothing is applied to any
/// session state until validation has passed in full.
pub fn import_json(input: &str) -> Result<PatternFile> {
    let value: serde_json::Value =
        serde_json::from_str(input).context("pattern document is not valid JSON")?;
    let Some(root) = value.as_object() else {
        bail!("pattern document must be a JSON object");
    };
    if !root.contains_key("metadata") {
        bail!("pattern document is missing its `metadata` section");
    }
    let Some(pattern) = root.get("pattern") else {
        bail!("pattern document is missing its `pattern` section");
    };
    if pattern.get("symbols").is_none() {
        bail!("pattern document is missing `pattern.symbols`");
    }

    let mut file: PatternFile =
        serde_json::from_value(value).context("malformed pattern document")?;
    for p in &mut file.pattern.symbols {
        if p.row < 0 {
            bail!("placement at ({}, {}) has a negative row", p.row, p.col);
        }
        p.color = normalize_color(&p.color)
            .with_context(|| format!("unrecognized color {:?} at ({}, {})", p.color, p.row, p.col))?;
        // serialized widths are not trusted
        p.width = p.kind.width();
    }
    debug!(
        "imported pattern {:?} ({} placements, {}x{})",
        file.metadata.title,
        file.pattern.symbols.len(),
        file.pattern.rows,
        file.pattern.cols
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::StitchKind;

    fn sample_file() -> PatternFile {
        let snapshot = GridSnapshot {
            placements: vec![
                Placement::new(0, 2, StitchKind::Single, "#ff0000"),
                Placement::new(1, 3, StitchKind::Dc2Tog, "#000000").mirrored(),
            ],
            rows: 3,
            cols: 40,
            cell_size: 20,
            column_origin: -1,
        };
        build_file(
            &PatternMeta::default(),
            &snapshot,
            &ViewSettings::default(),
            None,
        )
    }

    #[test]
    fn test_round_trip() {
        let file = sample_file();
        let json = export_json(&file).unwrap();
        let parsed = import_json(&json).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_export_uses_original_field_names() {
        let json = export_json(&sample_file()).unwrap();
        assert!(json.contains("\"hookSize\""), "{json}");
        assert!(json.contains("\"startCol\""), "{json}");
        assert!(json.contains("\"gridSize\""), "{json}");
        assert!(json.contains("\"showGrid\""), "{json}");
        assert!(json.contains("\"2dctog\""), "{json}");
    }

    #[test]
    fn test_import_rejects_non_object() {
        assert!(import_json("[1, 2, 3]").is_err());
        assert!(import_json("not json").is_err());
    }

    #[test]
    fn test_import_rejects_missing_sections() {
        let err = import_json(r#"{"pattern": {"symbols": []}}"#).unwrap_err();
        assert!(err.to_string().contains("metadata"), "{err}");

        let err = import_json(r#"{"metadata": {}}"#).unwrap_err();
        assert!(err.to_string().contains("`pattern`"), "{err}");

        let err = import_json(r#"{"metadata": {}, "pattern": {"rows": 3, "cols": 4}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("pattern.symbols"), "{err}");
    }

    #[test]
    fn test_import_rejects_unknown_symbol() {
        let doc = r##"{
            "metadata": {"title": "x"},
            "pattern": {
                "rows": 3, "cols": 4,
                "symbols": [{"row": 0, "col": 0, "symbol": "occupied", "color": "#000000"}]
            }
        }"##;
        assert!(import_json(doc).is_err());
    }

    #[test]
    fn test_import_rejects_bad_color_and_negative_row() {
        let doc = r##"{
            "metadata": {},
            "pattern": {
                "rows": 3, "cols": 4,
                "symbols": [{"row": 0, "col": 0, "symbol": "sc", "color": "blurple"}]
            }
        }"##;
        let err = import_json(doc).unwrap_err();
        assert!(format!("{err:#}").contains("blurple"), "{err:#}");

        let doc = r##"{
            "metadata": {},
            "pattern": {
                "rows": 3, "cols": 4,
                "symbols": [{"row": -1, "col": 0, "symbol": "sc", "color": "#000000"}]
            }
        }"##;
        assert!(import_json(doc).is_err());
    }

    #[test]
    fn test_import_applies_defaults() {
        let doc = r#"{
            "metadata": {},
            "pattern": {"rows": 5, "cols": 10, "symbols": []}
        }"#;
        let file = import_json(doc).unwrap();
        assert_eq!(file.metadata.title, "Untitled Pattern");
        assert_eq!(file.metadata.hook_size, "5.0mm (H)");
        assert_eq!(file.metadata.difficulty, Difficulty::Intermediate);
        assert_eq!(file.pattern.grid_size, 20);
        assert!(file.settings.show_grid);
        assert_eq!(file.settings.zoom, 100);
    }

    #[test]
    fn test_import_normalizes_colors_and_widths() {
        let doc = r##"{
            "metadata": {},
            "pattern": {
                "rows": 3, "cols": 10,
                "symbols": [
                    {"row": 0, "col": 0, "symbol": "3dctog", "color": "RED", "width": 1},
                    {"row": 1, "col": 0, "symbol": "sc", "color": "#ABCDEF", "width": 9}
                ]
            }
        }"##;
        let file = import_json(doc).unwrap();
        assert_eq!(file.pattern.symbols[0].color, "#ff0000");
        assert_eq!(file.pattern.symbols[0].width, 3);
        assert_eq!(file.pattern.symbols[1].color, "#abcdef");
        assert_eq!(file.pattern.symbols[1].width, 1);
    }
}
