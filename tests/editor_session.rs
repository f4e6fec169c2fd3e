//! End-to-end editor session behavior: checkpoint discipline, undo/redo,
//! selection and clipboard.

use stitchgrid::editor::{EditorState, Tool};
use stitchgrid::symbol::StitchKind;

#[test]
fn undo_then_redo_reproduces_state_exactly() {
    let mut state = EditorState::new();
    state.place(0, 0, StitchKind::Chain, "#000000", false);
    state.place(0, 5, StitchKind::Dc3Tog, "#ff0000", false);
    state.fill_rectangle(1, 0, 1, 9, StitchKind::Single, "#00ff00");
    state.add_row_top();
    state.add_column_left();
    let before = state.export_state();

    let mut undone = 0;
    while state.undo() {
        undone += 1;
    }
    assert_eq!(undone, 5);
    assert!(state.grid().is_empty());

    for _ in 0..undone {
        assert!(state.redo());
    }
    assert_eq!(state.export_state(), before);
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut state = EditorState::new();
    state.place(0, 0, StitchKind::Single, "#000000", false);
    state.place(0, 1, StitchKind::Single, "#000000", false);
    assert!(state.undo());
    assert!(state.can_redo());

    state.place(0, 2, StitchKind::Double, "#000000", false);
    assert!(!state.can_redo());
    assert!(!state.redo());
}

#[test]
fn fill_gesture_is_one_checkpoint() {
    let mut state = EditorState::new();
    state.brush.kind = StitchKind::Single;
    state.brush.color = "#000000".to_string();
    state.set_tool(Tool::Fill);
    state.pointer_pressed(0, 0);
    state.pointer_released(2, 2);

    assert_eq!(state.export_state().placements.len(), 9);
    assert!(state.undo(), "one checkpoint to undo");
    assert!(state.grid().is_empty());
    assert!(!state.can_undo(), "and no more than one");
}

#[test]
fn drag_paint_stroke_is_one_checkpoint() {
    let mut state = EditorState::new();
    state.brush.kind = StitchKind::Double;
    state.pointer_pressed(1, 0);
    for col in 1..8 {
        state.pointer_dragged(1, col);
    }
    state.pointer_released(1, 7);
    assert_eq!(state.export_state().placements.len(), 8);

    assert!(state.undo());
    assert!(state.grid().is_empty());
    assert!(!state.can_undo());
}

#[test]
fn copy_paste_preserves_relative_offsets() {
    let mut state = EditorState::new();
    state.place(3, 4, StitchKind::Treble, "#123456", false);

    state.set_tool(Tool::Select);
    state.pointer_pressed(2, 3);
    state.pointer_dragged(3, 4);
    state.pointer_released(4, 5);
    assert_eq!(state.copy_selection(), 1);

    assert!(state.paste(10, 10));
    let snap = state.export_state();
    assert!(
        snap.placements
            .iter()
            .any(|p| p.row == 11 && p.col == 11 && p.kind == StitchKind::Treble),
        "expected the stitch at (11, 11), got {:?}",
        snap.placements
    );
}

#[test]
fn paste_near_edge_grows_like_freehand_drawing() {
    let mut state = EditorState::new();
    state.place(0, 0, StitchKind::Single, "#000000", false);
    state.set_tool(Tool::Select);
    state.pointer_pressed(0, 0);
    state.pointer_released(0, 0);
    assert_eq!(state.copy_selection(), 1);

    assert!(state.paste(5, 45));
    let snap = state.export_state();
    assert_eq!(snap.rows, 6);
    assert_eq!(snap.cols, 46);
    assert!(snap.placements.iter().any(|p| p.row == 5 && p.col == 45));
}

#[test]
fn clipboard_survives_selection_changes() {
    let mut state = EditorState::new();
    state.place(0, 0, StitchKind::Single, "#000000", false);
    state.set_tool(Tool::Select);
    state.pointer_pressed(0, 0);
    state.pointer_released(0, 0);
    assert_eq!(state.copy_selection(), 1);

    // switching tools clears the selection but not the clipboard
    state.set_tool(Tool::Pen);
    assert!(!state.selection.is_active());
    assert!(state.clipboard.has_content());
    assert!(state.paste(2, 2));
}

#[test]
fn mirrored_decrease_survives_copy_paste() {
    let mut state = EditorState::new();
    state.place(0, 4, StitchKind::Dc2Tog, "#000000", true); // spans 4..6
    state.set_tool(Tool::Select);
    state.pointer_pressed(0, 0);
    state.pointer_released(0, 9);
    assert_eq!(state.copy_selection(), 1);

    assert!(state.paste(3, 0));
    let snap = state.export_state();
    let pasted = snap
        .placements
        .iter()
        .find(|p| p.row == 3)
        .expect("pasted stitch");
    assert_eq!(pasted.col, 4);
    assert!(pasted.mirrored);
}
