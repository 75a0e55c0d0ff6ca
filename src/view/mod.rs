//! UI-agnostic view models.
//!
//! These modules turn fetched payloads into presentation data (column
//! layout, styled summary segments) without depending on ratatui. The TUI
//! maps them to framework-specific widgets for rendering.

pub mod columns;
pub mod summary;
