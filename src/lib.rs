//! hdtop - top-like monitoring console for Hadoop YARN.
//!
//! The library holds everything behind the `hdtop` binary: configuration,
//! REST payload models, pollers, the cooperative scheduler and the TUI.

pub mod config;
pub mod model;
pub mod provider;
pub mod scheduler;
pub mod tui;
pub mod util;
pub mod view;
