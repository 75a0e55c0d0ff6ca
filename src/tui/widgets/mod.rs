//! TUI widgets for hdtop.

mod apps;
mod metrics;
mod progress;
mod summary;

pub use apps::AppsPane;
pub use metrics::{METRICS_PANE_HEIGHT, MetricsPane};
pub use progress::ProgressBar;
pub use summary::SummaryLine;

use ratatui::text::{Line, Span};

/// A single-line widget laid out for a given width at paint time.
pub trait Renderable {
    fn render(&self, width: u16) -> Line<'static>;
}

/// Cuts a list of spans down to `width` characters.
pub(crate) fn clip_spans(spans: Vec<Span<'static>>, width: u16) -> Vec<Span<'static>> {
    let mut left = width as usize;
    let mut clipped = Vec::with_capacity(spans.len());
    for span in spans {
        if left == 0 {
            break;
        }
        let len = span.content.chars().count();
        if len <= left {
            left -= len;
            clipped.push(span);
        } else {
            let text: String = span.content.chars().take(left).collect();
            clipped.push(Span::styled(text, span.style));
            left = 0;
        }
    }
    clipped
}

/// Plain text of a rendered line, for assertions.
#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
