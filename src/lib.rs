//! Guideline Tetris (workspace facade crate).
//!
//! Re-exports the rules engine as `guideline_tetris::{core, types}`. The implementation lives
//! in dedicated crates under `crates/`; this package adds the headless [`autoplay`] driver used
//! by the `guideline-demo` binary.

pub mod autoplay;

pub use guideline_tetris_core as core;
pub use guideline_tetris_types as types;
