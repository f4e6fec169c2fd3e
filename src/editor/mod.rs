//! Chart editor core.
//!
//! This module holds the editing engine behind the drawing surface:
//!
//! - **Grid store**: sparse symbol map with multi-cell occupancy, automatic
//!   growth in every direction, and whole-symbol conflict/removal semantics
//! - **History**: bounded snapshot undo/redo with branch truncation
//! - **Selection**: rectangle selection in grid coordinates
//! - **Clipboard**: copy/paste of selected stitches with normalized offsets
//! - **Session state**: tool dispatch, brush, checkpoint discipline, dirty
//!   tracking, and change notification for renderers
//!
//! Everything here speaks grid-logical (row, column) integer coordinates;
//! pixel-to-cell conversion belongs to the presentation layer.

pub mod grid;
pub mod history;
pub mod selection;
pub mod state;

pub use grid::{CellEntry, PatternGrid};
pub use history::History;
pub use selection::{ClipStitch, Clipboard, Selection, SelectionRect};
pub use state::{Brush, ChangeEvent, EditorState, SubscriptionId, Tool};
