//! Pattern grid store.
//!
//! [`PatternGrid`] is the sole authority over symbol placement state and grid
//! sizing. Every public operation leaves the grid consistent: at most one
//! symbol claims any cell, every occupied-cell marker resolves to a live
//! multi-cell primary, and every placement lies inside the current bounds.
//!
//! The grid never rejects in-range input: placements outside the current
//! bounds grow the grid instead. Growing leftward renumbers the column
//! origin and shifts existing placements so their visual position is
//! preserved under the new coordinate system.

use indexmap::IndexMap;

use crate::model::{Cell, GridSnapshot, Placement};
use crate::symbol::StitchKind;

/// Charts never shrink below this many rows, even when empty.
pub const MIN_ROWS: i32 = 3;
/// Minimum column count for the explicit column-removal operations.
pub const MIN_COLS: i32 = 1;

pub const DEFAULT_ROWS: i32 = 3;
pub const DEFAULT_COLS: i32 = 40;
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Valid range for the rendering cell size.
pub const CELL_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

// ────────────────────────────────────────────────────────────────────────────
// Cell contents
// ────────────────────────────────────────────────────────────────────────────

/// Contents of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEntry {
    /// A primary placement; spans `[cell.col, cell.col + kind.width())`.
    Stitch {
        kind: StitchKind,
        color: String,
        mirrored: bool,
    },
    /// A cell covered by a multi-cell symbol anchored at `anchor`. Holds no
    /// data of its own, only the back-reference.
    Occupied { anchor: Cell },
}

// ────────────────────────────────────────────────────────────────────────────
// PatternGrid
// ────────────────────────────────────────────────────────────────────────────

/// The sparse map of placed symbols plus the logical grid dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGrid {
    cells: IndexMap<Cell, CellEntry>,
    rows: i32,
    cols: i32,
    /// Logical number of the leftmost column; goes negative as the grid
    /// grows leftward so existing stitch numbering is preserved.
    column_origin: i32,
    /// Rendering-only cell edge length in pixels.
    cell_size: u32,
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGrid {
    /// Create an empty grid at the default chart size.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_CELL_SIZE)
    }

    /// Create an empty grid with explicit dimensions, clamped to the floors.
    pub fn with_size(rows: i32, cols: i32, cell_size: u32) -> Self {
        Self {
            cells: IndexMap::new(),
            rows: rows.max(MIN_ROWS),
            cols: cols.max(MIN_COLS),
            column_origin: 0,
            cell_size: if CELL_SIZE_RANGE.contains(&cell_size) {
                cell_size
            } else {
                DEFAULT_CELL_SIZE
            },
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn column_origin(&self) -> i32 {
        self.column_origin
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Contents of the cell at (row, col), if any.
    pub fn entry_at(&self, row: i32, col: i32) -> Option<&CellEntry> {
        self.cells.get(&Cell::new(row, col))
    }

    /// Number of primary placements (occupied markers excluded).
    pub fn primary_count(&self) -> usize {
        self.cells
            .values()
            .filter(|e| matches!(e, CellEntry::Stitch { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Left-edge column of a symbol placed by clicking `col`.
    ///
    /// Non-mirrored decreases anchor the clicked cell as their rightmost
    /// cell, so the span starts `width - 1` columns further left; mirrored
    /// decreases (and all single-cell symbols) start at the clicked cell.
    fn anchor_col(col: i32, kind: StitchKind, mirrored: bool) -> i32 {
        if kind.width() > 1 && !mirrored {
            col - (kind.width() - 1)
        } else {
            col
        }
    }

    // ── placement ───────────────────────────────────────────────────────────

    /// Place a symbol at the clicked cell, growing the grid as needed and
    /// evicting anything the new span overlaps.
    ///
    /// `row` must be non-negative; negative columns grow the grid leftward.
    pub fn place(&mut self, row: i32, col: i32, kind: StitchKind, color: &str, mirrored: bool) {
        assert!(row >= 0, "placement row must be non-negative, got {row}");
        let width = kind.width();
        let mut actual_col = Self::anchor_col(col, kind, mirrored);

        if row >= self.rows {
            self.rows = row + 1;
        }
        if actual_col + width > self.cols {
            self.cols = actual_col + width;
        }
        if actual_col < 0 {
            let deficit = -actual_col;
            self.grow_left(deficit);
            actual_col = 0;
        }

        // Evict whatever the new span overlaps, whole symbols at a time.
        for i in 0..width {
            self.remove(row, actual_col + i);
        }

        let anchor = Cell::new(row, actual_col);
        self.cells.insert(
            anchor,
            CellEntry::Stitch {
                kind,
                color: color.to_string(),
                mirrored: mirrored && kind.is_decrease(),
            },
        );
        for i in 1..width {
            self.cells
                .insert(Cell::new(row, actual_col + i), CellEntry::Occupied { anchor });
        }
    }

    /// Remove the symbol claiming (row, col), cascading from any cell of a
    /// multi-cell symbol to the whole symbol. Returns whether anything was
    /// removed. Never contracts the grid.
    pub fn remove(&mut self, row: i32, col: i32) -> bool {
        let cell = Cell::new(row, col);
        let anchor = match self.cells.get(&cell) {
            Some(CellEntry::Occupied { anchor }) => *anchor,
            Some(CellEntry::Stitch { .. }) => cell,
            None => return false,
        };
        let Some(CellEntry::Stitch { kind, .. }) = self.cells.get(&anchor) else {
            // Stray marker with no primary; drop just this cell.
            return self.cells.shift_remove(&cell).is_some();
        };
        let width = kind.width();
        for i in 0..width {
            self.cells.shift_remove(&Cell::new(anchor.row, anchor.col + i));
        }
        true
    }

    /// Fill the normalized rectangle with a symbol, one placement per cell.
    ///
    /// Required growth is computed up front so every placement happens in a
    /// single coordinate space; cells are then filled in row-major order.
    pub fn fill_rectangle(
        &mut self,
        start_row: i32,
        start_col: i32,
        end_row: i32,
        end_col: i32,
        kind: StitchKind,
        color: &str,
    ) {
        assert!(
            start_row >= 0 && end_row >= 0,
            "fill rows must be non-negative"
        );
        let (min_row, max_row) = (start_row.min(end_row), start_row.max(end_row));
        let (mut min_col, mut max_col) = (start_col.min(end_col), start_col.max(end_col));

        let left_edge = Self::anchor_col(min_col, kind, false);
        if left_edge < 0 {
            let deficit = -left_edge;
            self.grow_left(deficit);
            min_col += deficit;
            max_col += deficit;
        }
        if max_row >= self.rows {
            self.rows = max_row + 1;
        }
        if max_col + 1 > self.cols {
            self.cols = max_col + 1;
        }

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.place(row, col, kind, color, false);
            }
        }
    }

    /// Recolor every primary placement whose anchor cell falls inside the
    /// normalized rectangle. Occupied markers carry no color, so multi-cell
    /// symbols recolor exactly once, via their anchor.
    pub fn change_color(
        &mut self,
        start_row: i32,
        start_col: i32,
        end_row: i32,
        end_col: i32,
        color: &str,
    ) {
        let (min_row, max_row) = (start_row.min(end_row), start_row.max(end_row));
        let (min_col, max_col) = (start_col.min(end_col), start_col.max(end_col));
        for (cell, entry) in self.cells.iter_mut() {
            if let CellEntry::Stitch { color: c, .. } = entry {
                if cell.row >= min_row
                    && cell.row <= max_row
                    && cell.col >= min_col
                    && cell.col <= max_col
                {
                    *c = color.to_string();
                }
            }
        }
    }

    // ── resizing ────────────────────────────────────────────────────────────

    /// Insert a row above the chart, shifting every placement down.
    pub fn add_row_top(&mut self) {
        self.shift_all(1, 0);
        self.rows += 1;
    }

    pub fn add_row_bottom(&mut self) {
        self.rows += 1;
    }

    /// Delete the top row and renumber. Refuses at the row floor.
    pub fn remove_row_top(&mut self) -> bool {
        if self.rows <= MIN_ROWS {
            return false;
        }
        self.cells.retain(|cell, _| cell.row != 0);
        self.shift_all(-1, 0);
        self.rows -= 1;
        true
    }

    /// Delete the bottom row. Refuses at the row floor.
    pub fn remove_row_bottom(&mut self) -> bool {
        if self.rows <= MIN_ROWS {
            return false;
        }
        let last = self.rows - 1;
        self.cells.retain(|cell, _| cell.row != last);
        self.rows -= 1;
        true
    }

    /// Insert a column on the left, shifting placements right and moving the
    /// column origin down so stitch numbering is preserved.
    pub fn add_column_left(&mut self) {
        self.shift_all(0, 1);
        self.column_origin -= 1;
        self.cols += 1;
    }

    pub fn add_column_right(&mut self) {
        self.cols += 1;
    }

    /// Delete the leftmost column. Any multi-cell symbol reaching into it is
    /// removed whole. Refuses at the column floor.
    pub fn remove_column_left(&mut self) -> bool {
        if self.cols <= MIN_COLS {
            return false;
        }
        self.remove_symbols_in_column(0);
        self.shift_all(0, -1);
        self.column_origin += 1;
        self.cols -= 1;
        true
    }

    /// Delete the rightmost column. Any multi-cell symbol reaching into it
    /// is removed whole. Refuses at the column floor.
    pub fn remove_column_right(&mut self) -> bool {
        if self.cols <= MIN_COLS {
            return false;
        }
        self.remove_symbols_in_column(self.cols - 1);
        self.cols -= 1;
        true
    }

    /// Hard-set the row count, discarding placements now out of bounds.
    /// Values below the row floor are refused.
    pub fn set_rows(&mut self, rows: i32) -> bool {
        if rows < MIN_ROWS {
            return false;
        }
        self.rows = rows;
        self.cells.retain(|cell, _| cell.row < rows);
        true
    }

    /// Hard-set the column count. Symbols whose span no longer fits are
    /// discarded whole. Values below the column floor are refused.
    pub fn set_cols(&mut self, cols: i32) -> bool {
        if cols < MIN_COLS {
            return false;
        }
        self.cols = cols;
        let doomed: Vec<Cell> = self
            .cells
            .keys()
            .filter(|cell| cell.col >= cols)
            .copied()
            .collect();
        for cell in doomed {
            self.remove(cell.row, cell.col);
        }
        true
    }

    /// Set the rendering cell size; out-of-range values are refused.
    pub fn set_cell_size(&mut self, cell_size: u32) -> bool {
        if CELL_SIZE_RANGE.contains(&cell_size) {
            self.cell_size = cell_size;
            return true;
        }
        false
    }

    /// Reset to an empty chart: minimum rows, origin 0, column count and
    /// cell size preserved.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.rows = MIN_ROWS;
        self.column_origin = 0;
    }

    // ── snapshots ───────────────────────────────────────────────────────────

    /// Export a value snapshot: primaries only (occupied markers are
    /// derived, not stored), in (row, col) order.
    pub fn export_state(&self) -> GridSnapshot {
        let mut placements: Vec<Placement> = self
            .cells
            .iter()
            .filter_map(|(cell, entry)| match entry {
                CellEntry::Stitch {
                    kind,
                    color,
                    mirrored,
                } => Some(Placement {
                    row: cell.row,
                    col: cell.col,
                    kind: *kind,
                    color: color.clone(),
                    width: kind.width(),
                    mirrored: *mirrored,
                }),
                CellEntry::Occupied { .. } => None,
            })
            .collect();
        placements.sort_by_key(|p| (p.row, p.col));
        GridSnapshot {
            placements,
            rows: self.rows,
            cols: self.cols,
            cell_size: self.cell_size,
            column_origin: self.column_origin,
        }
    }

    /// Replace the grid with a snapshot's state.
    ///
    /// Occupancy is reconstructed from each primary's kind-derived width;
    /// serialized widths and markers are never trusted. Placements outside
    /// the snapshot's own bounds grow the grid to stay consistent.
    pub fn import_state(&mut self, snapshot: &GridSnapshot) {
        self.cells.clear();
        self.rows = snapshot.rows.max(MIN_ROWS);
        self.cols = snapshot.cols.max(MIN_COLS);
        self.column_origin = snapshot.column_origin;
        if CELL_SIZE_RANGE.contains(&snapshot.cell_size) {
            self.cell_size = snapshot.cell_size;
        }
        for p in &snapshot.placements {
            if p.row < 0 || p.col < 0 {
                continue;
            }
            let width = p.kind.width();
            if p.row >= self.rows {
                self.rows = p.row + 1;
            }
            if p.col + width > self.cols {
                self.cols = p.col + width;
            }
            // last-wins on overlapping input, whole symbols at a time
            for i in 0..width {
                self.remove(p.row, p.col + i);
            }
            let anchor = Cell::new(p.row, p.col);
            self.cells.insert(
                anchor,
                CellEntry::Stitch {
                    kind: p.kind,
                    color: p.color.clone(),
                    mirrored: p.mirrored && p.kind.is_decrease(),
                },
            );
            for i in 1..width {
                self.cells
                    .insert(Cell::new(p.row, p.col + i), CellEntry::Occupied { anchor });
            }
        }
    }

    // ── internals ───────────────────────────────────────────────────────────

    /// Remove (whole) every symbol with a cell in the given column.
    fn remove_symbols_in_column(&mut self, col: i32) {
        let hits: Vec<Cell> = self
            .cells
            .keys()
            .filter(|cell| cell.col == col)
            .copied()
            .collect();
        for cell in hits {
            self.remove(cell.row, cell.col);
        }
    }

    /// Translate every cell (and every marker back-reference) by a delta.
    fn shift_all(&mut self, d_row: i32, d_col: i32) {
        let shifted: IndexMap<Cell, CellEntry> = self
            .cells
            .drain(..)
            .map(|(cell, entry)| {
                let entry = match entry {
                    CellEntry::Occupied { anchor } => CellEntry::Occupied {
                        anchor: Cell::new(anchor.row + d_row, anchor.col + d_col),
                    },
                    other => other,
                };
                (Cell::new(cell.row + d_row, cell.col + d_col), entry)
            })
            .collect();
        self.cells = shifted;
    }

    /// Grow the grid leftward: widen, renumber the origin, and shift every
    /// existing placement right so visual positions are unchanged.
    fn grow_left(&mut self, by: i32) {
        self.column_origin -= by;
        self.cols += by;
        self.shift_all(0, by);
    }
}
