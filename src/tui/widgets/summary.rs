//! One line of styled summary text.

use ratatui::text::{Line, Span};

use super::{Renderable, clip_spans};
use crate::tui::style::Styles;
use crate::view::summary::Segment;

/// Holds the segments of one summary line and paints them with the palette.
#[derive(Debug, Clone, Default)]
pub struct SummaryLine {
    segments: Vec<Segment>,
    dirty: bool,
}

impl SummaryLine {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            dirty: true,
        }
    }

    pub fn set(&mut self, segments: Vec<Segment>) {
        if self.segments != segments {
            self.segments = segments;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderable for SummaryLine {
    fn render(&self, width: u16) -> Line<'static> {
        let spans = self
            .segments
            .iter()
            .map(|s| Span::styled(s.text.clone(), Styles::metric(s.style)))
            .collect();
        Line::from(clip_spans(spans, width))
    }
}
