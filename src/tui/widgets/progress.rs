//! Textual progress bar with an overlaid `current/complete` label.

use ratatui::text::{Line, Span};

use super::Renderable;
use crate::tui::style::Styles;

const FILL_CHAR: char = '|';

/// Formats one end of the label.
pub type LabelFormatter = fn(i64) -> String;

/// Character counts of a bar laid out at a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLayout {
    pub fill: usize,
    pub space: usize,
    pub label: String,
}

impl BarLayout {
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.fill + self.space + self.label.len());
        text.extend(std::iter::repeat_n(FILL_CHAR, self.fill));
        text.extend(std::iter::repeat_n(' ', self.space));
        text.push_str(&self.label);
        text
    }
}

/// Progress bar state. Laid out lazily for whatever width is painted.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    current: i64,
    complete: i64,
    formatter: LabelFormatter,
    dirty: bool,
}

impl ProgressBar {
    pub fn new(formatter: LabelFormatter) -> Self {
        Self {
            current: 0,
            complete: 0,
            formatter,
            dirty: true,
        }
    }

    pub fn set_progress(&mut self, current: i64, complete: i64) {
        self.current = current;
        self.complete = complete;
        self.dirty = true;
    }

    pub fn progress(&self) -> (i64, i64) {
        (self.current, self.complete)
    }

    /// Returns whether the state changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn label(&self) -> String {
        format!(
            "{}/{}",
            (self.formatter)(self.current),
            (self.formatter)(self.complete)
        )
    }

    pub fn layout(&self, width: usize) -> BarLayout {
        let label = self.label();
        let label_len = label.chars().count();

        if label_len > width {
            return BarLayout {
                fill: 0,
                space: 0,
                label: label.chars().take(width).collect(),
            };
        }

        let room = width - label_len;
        let denominator = self.complete.max(1) as f64;
        let ratio = self.current as f64 / denominator;
        let fill = (ratio * width as f64)
            .round_ties_even()
            .clamp(0.0, room as f64) as usize;

        BarLayout {
            fill,
            space: room - fill,
            label,
        }
    }
}

impl Renderable for ProgressBar {
    fn render(&self, width: u16) -> Line<'static> {
        let layout = self.layout(width as usize);
        let fill: String = std::iter::repeat_n(FILL_CHAR, layout.fill).collect();
        let mut empty: String = " ".repeat(layout.space);
        empty.push_str(&layout.label);

        Line::from(vec![
            Span::styled(fill, Styles::bar_fill()),
            Span::styled(empty, Styles::bar_empty()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::line_text;
    use crate::util::format_memory;

    fn plain(value: i64) -> String {
        value.to_string()
    }

    fn bar(current: i64, complete: i64) -> ProgressBar {
        let mut bar = ProgressBar::new(plain);
        bar.set_progress(current, complete);
        bar
    }

    #[test]
    fn test_width_and_fill_invariants() {
        let pairs = [
            (0, 0),
            (0, 10),
            (5, 10),
            (10, 10),
            (15, 10),
            (-3, 10),
            (7, 0),
            (1, 3),
            (i64::MAX, 1),
            (123_456, 1_000_000),
        ];
        for (current, complete) in pairs {
            let progress = bar(current, complete);
            for width in 0..=80usize {
                let layout = progress.layout(width);
                let label_len = layout.label.chars().count();
                assert_eq!(
                    layout.fill + layout.space + label_len,
                    width,
                    "({current}, {complete}) at {width}"
                );
                assert!(layout.fill <= width.saturating_sub(label_len));
                assert_eq!(layout.text().chars().count(), width);
                assert_eq!(
                    line_text(&progress.render(width as u16)).chars().count(),
                    width
                );
            }
        }
    }

    #[test]
    fn test_half_full() {
        let layout = bar(5, 10).layout(20);
        assert_eq!(layout.label, "5/10");
        assert_eq!(layout.fill, 10);
        assert_eq!(layout.space, 6);
        assert_eq!(layout.text(), "||||||||||      5/10");
    }

    #[test]
    fn test_half_cells_round_to_even() {
        // 2.5, 10.5 and 4.5 cells.
        assert_eq!(bar(1, 4).layout(10).fill, 2);
        assert_eq!(bar(1, 4).layout(10).text(), "||     1/4");
        assert_eq!(bar(3, 4).layout(14).fill, 10);
        assert_eq!(bar(1, 2).layout(9).fill, 4);
    }

    #[test]
    fn test_zero_complete_behaves_as_one() {
        assert_eq!(bar(0, 0).layout(10).fill, 0);
        // 1/1 would fill the whole width, clipped to leave room for the label.
        assert_eq!(bar(1, 0).layout(10).fill, bar(1, 1).layout(10).fill);
        assert_eq!(bar(1, 0).layout(10).fill, 7);
    }

    #[test]
    fn test_overflow_saturates_and_negative_clips() {
        let full = bar(50, 10).layout(12);
        assert_eq!(full.fill, 12 - "50/10".len());
        assert_eq!(full.space, 0);

        let negative = bar(-5, 10).layout(12);
        assert_eq!(negative.fill, 0);
    }

    #[test]
    fn test_narrow_width_truncates_label() {
        let layout = bar(12345, 67890).layout(4);
        assert_eq!(layout.label, "1234");
        assert_eq!(layout.fill, 0);
        assert_eq!(layout.space, 0);
        assert_eq!(bar(1, 2).layout(0).text(), "");
    }

    #[test]
    fn test_memory_label() {
        let mut bar = ProgressBar::new(format_memory);
        bar.set_progress(3072, 6144);
        assert_eq!(bar.label(), "1.50G/3.00G");
    }

    #[test]
    fn test_set_progress_marks_dirty() {
        let mut bar = ProgressBar::new(plain);
        assert!(bar.take_dirty());
        assert!(!bar.take_dirty());
        bar.set_progress(1, 2);
        assert!(bar.take_dirty());
        assert_eq!(bar.progress(), (1, 2));
    }
}
