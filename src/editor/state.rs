//! Editor session state.
//!
//! [`EditorState`] wraps the [`PatternGrid`] with everything a chart editing
//! session needs: undo/redo history, the active tool and brush, selection,
//! clipboard, pattern metadata, a dirty flag, and change notification.
//!
//! The state is an explicit object owned by the application controller and
//! passed to whatever needs it; there is no global instance. The presentation
//! layer converts pointer input to grid coordinates and drives the
//! `pointer_*` methods; pixel math never enters this module.
//!
//! Checkpoint discipline lives here: every discrete user-visible edit takes
//! exactly one history checkpoint. A drag-paint stroke mutates the grid cell
//! by cell but checkpoints once, at release.

use crate::editor::grid::PatternGrid;
use crate::editor::history::History;
use crate::editor::selection::{Clipboard, Selection};
use crate::interchange::{self, PatternFile, ViewSettings};
use crate::model::{GridSnapshot, PatternMeta};
use crate::storage::PatternRecord;
use crate::symbol::StitchKind;

// ────────────────────────────────────────────────────────────────────────────
// Tools and brush
// ────────────────────────────────────────────────────────────────────────────

/// The active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Place the brush symbol cell by cell.
    #[default]
    Pen,
    /// Remove symbols cell by cell.
    Eraser,
    /// Fill a dragged rectangle with the brush symbol.
    Fill,
    /// Drag a selection rectangle.
    Select,
}

/// The symbol the pen and fill tools paint with.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub kind: StitchKind,
    pub color: String,
    /// Mirror multi-cell decreases (left-edge anchored instead of right).
    pub mirrored: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: StitchKind::Chain,
            color: "#000000".to_string(),
            mirrored: false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Change notification
// ────────────────────────────────────────────────────────────────────────────

/// What kind of mutation a change notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The pattern was edited (placement, erase, fill, recolor, resize).
    Edited,
    /// Undo or redo replaced the live grid with a history entry.
    Restored,
    /// The chart was reset to empty.
    Cleared,
    /// A document or record was loaded into the session.
    Loaded,
}

/// Handle returned by [`EditorState::subscribe`]; pass to
/// [`EditorState::unsubscribe`] to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(ChangeEvent)>;

/// The in-flight pointer gesture, if any.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    None,
    /// A pen or eraser stroke; `changed` tracks whether anything mutated.
    Stroke { changed: bool },
    /// A fill drag, remembering the press cell.
    Fill { start_row: i32, start_col: i32 },
    /// A selection drag.
    Select,
}

// ────────────────────────────────────────────────────────────────────────────
// EditorState
// ────────────────────────────────────────────────────────────────────────────

/// The complete state of one chart editing session.
pub struct EditorState {
    grid: PatternGrid,
    history: History,
    pub selection: Selection,
    pub clipboard: Clipboard,
    pub brush: Brush,
    pub meta: PatternMeta,
    tool: Tool,
    gesture: Gesture,
    dirty: bool,
    listeners: Vec<(u64, Listener)>,
    next_subscription: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Create a session over an empty default-sized grid.
    pub fn new() -> Self {
        Self::with_grid(PatternGrid::new())
    }

    /// Create a session over an existing grid; the history is seeded with
    /// its current state.
    pub fn with_grid(grid: PatternGrid) -> Self {
        let history = History::new(grid.export_state());
        Self {
            grid,
            history,
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            brush: Brush::default(),
            meta: PatternMeta::default(),
            tool: Tool::Pen,
            gesture: Gesture::None,
            dirty: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    /// Snapshot of the live grid (what a renderer reads).
    pub fn export_state(&self) -> GridSnapshot {
        self.grid.export_state()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (e.g., after saving).
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ── change notification ─────────────────────────────────────────────────

    /// Register a listener invoked synchronously after every mutating call.
    pub fn subscribe(&mut self, listener: impl FnMut(ChangeEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    /// Detach a listener. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(key, _)| *key != id.0);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: ChangeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Checkpoint the live grid and notify listeners.
    fn commit(&mut self, event: ChangeEvent) {
        self.history.checkpoint(self.grid.export_state());
        self.dirty = true;
        self.emit(event);
    }

    // ── tool handling ───────────────────────────────────────────────────────

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Leaving the select tool clears the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == Tool::Select && tool != Tool::Select {
            self.selection.clear();
        }
        self.tool = tool;
        self.gesture = Gesture::None;
    }

    /// Explicitly drop the selection rectangle (escape action).
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── pointer gestures ────────────────────────────────────────────────────

    /// Pointer down at a grid cell, dispatched on the active tool.
    pub fn pointer_pressed(&mut self, row: i32, col: i32) {
        match self.tool {
            Tool::Pen => {
                self.paint(row, col);
                self.gesture = Gesture::Stroke { changed: true };
            }
            Tool::Eraser => {
                let changed = self.grid.remove(row, col);
                if changed {
                    self.dirty = true;
                    self.emit(ChangeEvent::Edited);
                }
                self.gesture = Gesture::Stroke { changed };
            }
            Tool::Fill => {
                self.gesture = Gesture::Fill {
                    start_row: row,
                    start_col: col,
                };
            }
            Tool::Select => {
                self.selection.begin(row, col);
                self.gesture = Gesture::Select;
            }
        }
    }

    /// Pointer moved to a grid cell while held.
    pub fn pointer_dragged(&mut self, row: i32, col: i32) {
        match (self.tool, self.gesture) {
            (Tool::Pen, Gesture::Stroke { .. }) => self.paint(row, col),
            (Tool::Eraser, Gesture::Stroke { changed }) => {
                let removed = self.grid.remove(row, col);
                if removed {
                    self.dirty = true;
                    self.emit(ChangeEvent::Edited);
                }
                self.gesture = Gesture::Stroke {
                    changed: changed || removed,
                };
            }
            (Tool::Select, Gesture::Select) => self.selection.update(row, col),
            _ => {}
        }
    }

    /// Pointer released at a grid cell. Strokes and fills checkpoint here,
    /// once per gesture.
    pub fn pointer_released(&mut self, row: i32, col: i32) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::None);
        match (self.tool, gesture) {
            (Tool::Pen, Gesture::Stroke { .. }) => self.commit(ChangeEvent::Edited),
            (Tool::Eraser, Gesture::Stroke { changed }) => {
                if changed {
                    self.commit(ChangeEvent::Edited);
                }
            }
            (Tool::Fill, Gesture::Fill { start_row, start_col }) => {
                let color = self.brush.color.clone();
                self.grid
                    .fill_rectangle(start_row, start_col, row, col, self.brush.kind, &color);
                self.commit(ChangeEvent::Edited);
            }
            (Tool::Select, Gesture::Select) => {
                self.selection.update(row, col);
                self.selection.finish();
            }
            _ => {}
        }
    }

    fn paint(&mut self, row: i32, col: i32) {
        self.grid.place(
            row,
            col,
            self.brush.kind,
            &self.brush.color,
            self.brush.mirrored,
        );
        self.dirty = true;
        self.emit(ChangeEvent::Edited);
    }

    // ── direct edits (UI buttons / shortcuts) ───────────────────────────────

    /// Place one symbol and checkpoint.
    pub fn place(&mut self, row: i32, col: i32, kind: StitchKind, color: &str, mirrored: bool) {
        self.grid.place(row, col, kind, color, mirrored);
        self.commit(ChangeEvent::Edited);
    }

    /// Erase the symbol claiming a cell and checkpoint. Returns whether
    /// anything was removed; a no-op erase takes no checkpoint.
    pub fn erase(&mut self, row: i32, col: i32) -> bool {
        if self.grid.remove(row, col) {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    /// Fill a rectangle with one checkpoint for the whole operation.
    pub fn fill_rectangle(
        &mut self,
        start_row: i32,
        start_col: i32,
        end_row: i32,
        end_col: i32,
        kind: StitchKind,
        color: &str,
    ) {
        self.grid
            .fill_rectangle(start_row, start_col, end_row, end_col, kind, color);
        self.commit(ChangeEvent::Edited);
    }

    /// Recolor every primary inside the current selection. Returns false
    /// (and takes no checkpoint) when no selection is active.
    pub fn recolor_selection(&mut self, color: &str) -> bool {
        let Some(rect) = self.selection.rect() else {
            return false;
        };
        let (min_row, min_col, max_row, max_col) = rect.normalized();
        self.grid
            .change_color(min_row, min_col, max_row, max_col, color);
        self.commit(ChangeEvent::Edited);
        true
    }

    pub fn add_row_top(&mut self) {
        self.grid.add_row_top();
        self.commit(ChangeEvent::Edited);
    }

    pub fn add_row_bottom(&mut self) {
        self.grid.add_row_bottom();
        self.commit(ChangeEvent::Edited);
    }

    pub fn remove_row_top(&mut self) -> bool {
        if self.grid.remove_row_top() {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    pub fn remove_row_bottom(&mut self) -> bool {
        if self.grid.remove_row_bottom() {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    pub fn add_column_left(&mut self) {
        self.grid.add_column_left();
        self.commit(ChangeEvent::Edited);
    }

    pub fn add_column_right(&mut self) {
        self.grid.add_column_right();
        self.commit(ChangeEvent::Edited);
    }

    pub fn remove_column_left(&mut self) -> bool {
        if self.grid.remove_column_left() {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    pub fn remove_column_right(&mut self) -> bool {
        if self.grid.remove_column_right() {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    pub fn set_rows(&mut self, rows: i32) -> bool {
        if self.grid.set_rows(rows) {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    pub fn set_cols(&mut self, cols: i32) -> bool {
        if self.grid.set_cols(cols) {
            self.commit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    /// Change the rendering cell size. View-only: dirties the session but
    /// takes no history checkpoint.
    pub fn set_cell_size(&mut self, cell_size: u32) -> bool {
        if self.grid.set_cell_size(cell_size) {
            self.dirty = true;
            self.emit(ChangeEvent::Edited);
            true
        } else {
            false
        }
    }

    /// Reset the chart to empty (one undoable checkpoint).
    pub fn clear(&mut self) {
        self.grid.clear();
        self.commit(ChangeEvent::Cleared);
    }

    // ── undo / redo ─────────────────────────────────────────────────────────

    /// Restore the previous checkpoint into the live grid.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.grid.import_state(&snapshot);
        self.dirty = true;
        self.emit(ChangeEvent::Restored);
        true
    }

    /// Restore the next checkpoint into the live grid.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.grid.import_state(&snapshot);
        self.dirty = true;
        self.emit(ChangeEvent::Restored);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── clipboard ───────────────────────────────────────────────────────────

    /// Copy the primaries inside the current selection into the clipboard.
    /// Returns the number of stitches captured (0 with no selection).
    pub fn copy_selection(&mut self) -> usize {
        match self.selection.rect() {
            Some(rect) => self.clipboard.capture(&self.grid, &rect),
            None => 0,
        }
    }

    /// Paste the clipboard with its top-left at (target_row, target_col),
    /// reusing normal placement growth/conflict rules. One checkpoint for
    /// the whole paste. Returns false on an empty clipboard.
    pub fn paste(&mut self, target_row: i32, target_col: i32) -> bool {
        if !self.clipboard.has_content() {
            return false;
        }
        let stitches = self.clipboard.stitches().to_vec();
        for s in &stitches {
            // Buffered columns are span left edges; place() expects the
            // clicked cell, which for an unmirrored decrease is the
            // rightmost cell of the span.
            let click_col = if s.kind.width() > 1 && !s.mirrored {
                target_col + s.d_col + s.kind.width() - 1
            } else {
                target_col + s.d_col
            };
            self.grid
                .place(target_row + s.d_row, click_col, s.kind, &s.color, s.mirrored);
        }
        self.commit(ChangeEvent::Edited);
        true
    }

    // ── persistence bridges ─────────────────────────────────────────────────

    /// Build a storage record from the session (id and timestamps are
    /// assigned by the pattern library on save).
    pub fn to_record(&self, canvas_image: Option<Vec<u8>>) -> PatternRecord {
        let snapshot = self.grid.export_state();
        PatternRecord {
            id: None,
            title: self.meta.title.clone(),
            description: self.meta.description.clone(),
            hook_size: self.meta.hook_size.clone(),
            yarn_weight: self.meta.yarn_weight.clone(),
            difficulty: self.meta.difficulty,
            canvas_image,
            placements: snapshot.placements,
            rows: snapshot.rows,
            cols: snapshot.cols,
            grid_size: snapshot.cell_size,
            start_col: snapshot.column_origin,
            created_at: None,
            updated_at: None,
        }
    }

    /// Load a storage record into the session, resetting history to the
    /// loaded state.
    pub fn load_record(&mut self, record: &PatternRecord) {
        self.grid.import_state(&record.snapshot());
        self.meta = PatternMeta {
            title: record.title.clone(),
            description: record.description.clone(),
            hook_size: record.hook_size.clone(),
            yarn_weight: record.yarn_weight.clone(),
            difficulty: record.difficulty,
            ..PatternMeta::default()
        };
        self.history.reset(self.grid.export_state());
        self.selection.clear();
        self.dirty = false;
        self.emit(ChangeEvent::Loaded);
    }

    /// Build an interchange document from the session.
    pub fn export_file(&self, settings: &ViewSettings, canvas_data: Option<String>) -> PatternFile {
        interchange::build_file(&self.meta, &self.grid.export_state(), settings, canvas_data)
    }

    /// Load a validated interchange document into the session, resetting
    /// history to the loaded state.
    pub fn load_file(&mut self, file: &PatternFile) {
        self.grid.import_state(&file.snapshot());
        self.meta = file.meta();
        self.history.reset(self.grid.export_state());
        self.selection.clear();
        self.dirty = false;
        self.emit(ChangeEvent::Loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    fn undo_depth(state: &mut EditorState) -> usize {
        let mut depth = 0;
        while state.undo() {
            depth += 1;
        }
        for _ in 0..depth {
            state.redo();
        }
        depth
    }

    #[test]
    fn test_new_session() {
        let state = EditorState::new();
        assert!(!state.is_dirty());
        assert!(!state.can_undo());
        assert!(!state.can_redo());
        assert_eq!(state.tool(), Tool::Pen);
        assert!(state.grid().is_empty());
    }

    #[test]
    fn test_place_and_undo_redo() {
        let mut state = EditorState::new();
        state.place(0, 0, StitchKind::Single, "#000000", false);
        assert!(state.is_dirty());
        assert!(state.can_undo());

        assert!(state.undo());
        assert!(state.grid().is_empty());
        assert!(state.can_redo());

        assert!(state.redo());
        assert_eq!(state.grid().primary_count(), 1);
        assert!(!state.redo());
    }

    #[test]
    fn test_undo_redo_round_trip_value_equality() {
        let mut state = EditorState::new();
        state.place(0, 0, StitchKind::Single, "#000000", false);
        state.place(1, 5, StitchKind::Dc3Tog, "#ff0000", false);
        state.fill_rectangle(2, 0, 2, 3, StitchKind::Chain, "#00ff00");
        let before = state.export_state();

        assert!(state.undo());
        assert!(state.undo());
        assert!(state.undo());
        assert!(!state.undo());
        assert!(state.redo());
        assert!(state.redo());
        assert!(state.redo());
        assert_eq!(state.export_state(), before);
    }

    #[test]
    fn test_stroke_takes_one_checkpoint() {
        let mut state = EditorState::new();
        state.pointer_pressed(0, 0);
        state.pointer_dragged(0, 1);
        state.pointer_dragged(0, 2);
        state.pointer_released(0, 2);
        assert_eq!(state.grid().primary_count(), 3);
        assert_eq!(undo_depth(&mut state), 1);
    }

    #[test]
    fn test_eraser_stroke_without_hits_takes_no_checkpoint() {
        let mut state = EditorState::new();
        state.set_tool(Tool::Eraser);
        state.pointer_pressed(0, 0);
        state.pointer_dragged(0, 1);
        state.pointer_released(0, 1);
        assert!(!state.can_undo());
    }

    #[test]
    fn test_fill_gesture_atomicity() {
        let mut state = EditorState::new();
        state.brush.kind = StitchKind::Single;
        state.set_tool(Tool::Fill);
        state.pointer_pressed(0, 0);
        state.pointer_released(2, 2);
        assert_eq!(state.grid().primary_count(), 9);
        assert_eq!(undo_depth(&mut state), 1, "fill must checkpoint once");
    }

    #[test]
    fn test_fill_rectangle_single_checkpoint() {
        let mut state = EditorState::new();
        state.fill_rectangle(0, 0, 2, 2, StitchKind::Single, "#000000");
        assert_eq!(state.grid().primary_count(), 9);
        assert_eq!(undo_depth(&mut state), 1);
    }

    #[test]
    fn test_checkpoint_branch_truncation() {
        let mut state = EditorState::new();
        state.place(0, 0, StitchKind::Single, "#000000", false);
        state.place(0, 1, StitchKind::Single, "#000000", false);
        assert!(state.undo());
        state.place(0, 2, StitchKind::Double, "#000000", false);
        assert!(!state.can_redo());
        assert!(!state.redo());
    }

    #[test]
    fn test_resize_refusal_takes_no_checkpoint() {
        let mut state = EditorState::new();
        assert!(!state.remove_row_top());
        assert!(!state.remove_row_bottom());
        assert!(!state.can_undo());
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut state = EditorState::new();
        state.place(0, 0, StitchKind::Single, "#000000", false);
        state.clear();
        assert!(state.grid().is_empty());
        assert!(state.undo());
        assert_eq!(state.grid().primary_count(), 1);
    }

    #[test]
    fn test_select_tool_gesture_and_tool_switch_clears() {
        let mut state = EditorState::new();
        state.set_tool(Tool::Select);
        state.pointer_pressed(1, 1);
        state.pointer_dragged(2, 4);
        state.pointer_released(3, 5);
        assert_eq!(state.selection.rect().unwrap().normalized(), (1, 1, 3, 5));

        state.set_tool(Tool::Pen);
        assert!(!state.selection.is_active());
    }

    #[test]
    fn test_copy_paste_offset() {
        let mut state = EditorState::new();
        state.place(3, 4, StitchKind::Single, "#ff0000", false);
        state.set_tool(Tool::Select);
        state.pointer_pressed(2, 3);
        state.pointer_released(4, 5);
        assert_eq!(state.copy_selection(), 1);

        assert!(state.paste(10, 10));
        let snap = state.export_state();
        assert!(
            snap.placements
                .iter()
                .any(|p| p.row == 11 && p.col == 11 && p.color == "#ff0000"),
            "paste must preserve the (1,1) offset from the selection origin"
        );
    }

    #[test]
    fn test_paste_multicell_lands_on_stored_left_edge() {
        let mut state = EditorState::new();
        state.place(0, 5, StitchKind::Dc3Tog, "#000000", false); // anchored at col 3
        state.set_tool(Tool::Select);
        state.pointer_pressed(0, 0);
        state.pointer_released(0, 10);
        assert_eq!(state.copy_selection(), 1);

        assert!(state.paste(5, 0));
        let snap = state.export_state();
        assert!(
            snap.placements
                .iter()
                .any(|p| p.row == 5 && p.col == 3 && p.kind == StitchKind::Dc3Tog),
            "got {:?}",
            snap.placements
        );
        assert_eq!(undo_depth(&mut state), 2, "paste checkpoints once");
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut state = EditorState::new();
        assert!(!state.paste(0, 0));
        assert!(!state.can_undo());
    }

    #[test]
    fn test_recolor_selection() {
        let mut state = EditorState::new();
        state.place(1, 1, StitchKind::Single, "#000000", false);
        assert!(!state.recolor_selection("#ff0000"), "no selection yet");

        state.set_tool(Tool::Select);
        state.pointer_pressed(0, 0);
        state.pointer_released(2, 2);
        assert!(state.recolor_selection("#ff0000"));
        assert_eq!(state.export_state().placements[0].color, "#ff0000");
    }

    #[test]
    fn test_listeners_fire_and_unsubscribe() {
        let mut state = EditorState::new();
        let count = Rc::new(StdCell::new(0usize));
        let seen = Rc::clone(&count);
        let id = state.subscribe(move |_| seen.set(seen.get() + 1));

        state.place(0, 0, StitchKind::Single, "#000000", false);
        assert_eq!(count.get(), 1);
        state.undo();
        assert_eq!(count.get(), 2);

        assert!(state.unsubscribe(id));
        state.place(0, 1, StitchKind::Single, "#000000", false);
        assert_eq!(count.get(), 2);
        assert!(!state.unsubscribe(id));
    }

    #[test]
    fn test_listener_event_kinds() {
        let mut state = EditorState::new();
        let events = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        state.subscribe(move |e| sink.borrow_mut().push(e));

        state.place(0, 0, StitchKind::Single, "#000000", false);
        state.undo();
        state.clear();
        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::Edited,
                ChangeEvent::Restored,
                ChangeEvent::Cleared
            ]
        );
    }

    #[test]
    fn test_record_round_trip() {
        let mut state = EditorState::new();
        state.meta.title = "Shell Stitch Sampler".to_string();
        state.place(0, 5, StitchKind::Dc2Tog, "#ff0000", true);
        state.place(1, -2, StitchKind::Single, "#000000", false);
        let record = state.to_record(None);

        let mut restored = EditorState::new();
        restored.load_record(&record);
        assert_eq!(restored.export_state(), state.export_state());
        assert_eq!(restored.meta.title, "Shell Stitch Sampler");
        assert!(!restored.is_dirty());
        assert!(!restored.can_undo(), "load resets history");
    }

    #[test]
    fn test_set_cell_size_no_checkpoint() {
        let mut state = EditorState::new();
        assert!(state.set_cell_size(25));
        assert!(!state.can_undo());
        assert!(state.is_dirty());
        assert!(!state.set_cell_size(99));
    }
}
