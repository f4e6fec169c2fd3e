//! Crochet stitch chart designer core.
//!
//! This crate provides the engine behind a grid-based stitch chart editor:
//! the pattern grid store with undo/redo, selection and clipboard, the JSON
//! interchange format, and a file-backed pattern library.
//!
//! The binary `stitchgrid` inspects and converts pattern files.

pub mod color;
pub mod editor;
pub mod interchange;
pub mod model;
pub mod storage;
pub mod symbol;
