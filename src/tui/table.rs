//! Table widget state and layout: scrolling, width resolution, row views.

use ratatui::style::Style;
use ratatui::text::Line;

use super::widgets::Renderable;
use crate::view::columns::{Alignment, ColumnSpec, ColumnWidth};

/// Placed between adjacent columns.
pub const COLUMN_SEPARATOR: &str = " ";

/// Rows of formatted cells plus selection and scroll position.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Current body, one `Vec` of cells per row.
    pub rows: Vec<Vec<String>>,
    /// Selected row index.
    pub selected: usize,
    /// Index of the first visible row.
    pub scroll_offset: usize,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole body and clamps selection and scroll into range.
    pub fn replace(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        let max = self.rows.len().saturating_sub(1);
        self.selected = self.selected.min(max);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Moves selection up.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves selection down.
    pub fn select_down(&mut self) {
        let max = self.rows.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    /// Moves selection up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Moves selection down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        let max = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + page_size).min(max);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Scrolls so the selection is inside a window of `height` rows and
    /// returns the visible index range.
    pub fn visible_range(&mut self, height: usize) -> std::ops::Range<usize> {
        if height == 0 || self.rows.is_empty() {
            return 0..0;
        }
        // Keep the window full when the body shrank.
        let max_offset = self.rows.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
        let end = (self.scroll_offset + height).min(self.rows.len());
        self.scroll_offset..end
    }
}

/// Resolves column widths for a total line width.
///
/// Fixed columns take their literal width. Weighted columns split what is
/// left after fixed columns and separators, by floor division of their
/// weights; the remainder goes one character at a time to weighted columns
/// in order. Weighted widths shrink to zero when space runs out.
pub fn resolve_widths(columns: &[ColumnSpec], total: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }

    let separators = (columns.len() as u32 - 1) * COLUMN_SEPARATOR.len() as u32;
    let mut fixed = 0u32;
    let mut weight_total = 0u32;
    for column in columns {
        match column.width {
            ColumnWidth::Fixed(w) => fixed += w as u32,
            ColumnWidth::Weighted(w) => weight_total += w as u32,
        }
    }

    let mut widths: Vec<u16> = columns
        .iter()
        .map(|c| match c.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Weighted(_) => 0,
        })
        .collect();

    if weight_total == 0 {
        return widths;
    }

    let remaining = (total as u32).saturating_sub(fixed + separators);
    let mut assigned = 0u32;
    for (width, column) in widths.iter_mut().zip(columns) {
        if let ColumnWidth::Weighted(weight) = column.width {
            let share = remaining * weight as u32 / weight_total;
            *width = share as u16;
            assigned += share;
        }
    }

    let mut leftover = remaining - assigned;
    for (width, column) in widths.iter_mut().zip(columns) {
        if leftover == 0 {
            break;
        }
        if matches!(column.width, ColumnWidth::Weighted(w) if w > 0) {
            *width += 1;
            leftover -= 1;
        }
    }
    widths
}

/// Clips `text` to `width` characters and pads it according to `alignment`.
pub fn layout_cell(text: &str, width: u16, alignment: Alignment) -> String {
    let width = width as usize;
    let clipped: String = text.chars().take(width).collect();
    match alignment {
        Alignment::Left => format!("{:<width$}", clipped, width = width),
        Alignment::Right => format!("{:>width$}", clipped, width = width),
    }
}

/// Header row or data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Data,
}

/// One table row, laid out at paint time.
pub struct TableRowView<'a> {
    pub columns: &'a [ColumnSpec],
    pub cells: &'a [String],
    pub kind: RowKind,
    pub style: Style,
}

impl TableRowView<'_> {
    pub fn text(&self, width: u16) -> String {
        let widths = resolve_widths(self.columns, width);
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (column, &w))| {
                let text = self.cells.get(i).map(String::as_str).unwrap_or("");
                let alignment = match self.kind {
                    RowKind::Header => Alignment::Left,
                    RowKind::Data => column.alignment,
                };
                layout_cell(text, w, alignment)
            })
            .collect();
        cells.join(COLUMN_SEPARATOR)
    }
}

impl Renderable for TableRowView<'_> {
    fn render(&self, width: u16) -> Line<'static> {
        let mut text = self.text(width);
        // Fill the rest of the line so row backgrounds span the pane.
        let used = text.chars().count();
        if used < width as usize {
            text.push_str(&" ".repeat(width as usize - used));
        }
        Line::styled(text, self.style)
    }
}
