//! Terminal User Interface for hdtop.
//!
//! A metrics pane over a scrollable applications table, refreshed by two
//! pollers that share one cooperative scheduler on the UI thread.

mod app;
mod dashboard;
mod event;
mod input;
mod render;
pub mod style;
pub mod table;
pub mod widgets;

pub use app::App;
pub use dashboard::{Dashboard, PollTask};
pub use event::{Event, EventSource, TerminalEvents};
