//! Active applications table pane.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use serde_json::Value;

use super::Renderable;
use crate::model::{AppRecord, apps_from_response};
use crate::provider::PollTarget;
use crate::tui::style::Styles;
use crate::tui::table::{RowKind, TableRowView, TableState};
use crate::view::columns::TableSchema;

/// Scrollable table of running and queued applications.
pub struct AppsPane {
    schema: TableSchema,
    headers: Vec<String>,
    pub table: TableState,
    /// Body height at the last paint, used as the page size.
    page_size: usize,
    dirty: bool,
}

impl AppsPane {
    pub fn new(schema: TableSchema) -> Self {
        let headers = schema.headers();
        Self {
            schema,
            headers,
            table: TableState::new(),
            page_size: 1,
            dirty: true,
        }
    }

    /// Replaces the table body with one row per record.
    pub fn update(&mut self, records: &[AppRecord]) {
        let rows = records.iter().map(|r| self.schema.cells(r)).collect();
        self.table.replace(rows);
        self.dirty = true;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Marks the pane for repaint after a scroll.
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let columns = self.schema.columns();

        let mut lines = Vec::with_capacity(area.height as usize);
        lines.push(
            TableRowView {
                columns,
                cells: &self.headers,
                kind: RowKind::Header,
                style: Styles::table_header(),
            }
            .render(area.width),
        );

        let body_height = area.height as usize - 1;
        self.page_size = body_height.max(1);
        let selected = self.table.selected;
        for index in self.table.visible_range(body_height) {
            let style = if index == selected {
                Styles::selected()
            } else {
                Styles::table_row()
            };
            lines.push(
                TableRowView {
                    columns,
                    cells: &self.table.rows[index],
                    kind: RowKind::Data,
                    style,
                }
                .render(area.width),
            );
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl PollTarget for AppsPane {
    const NAME: &'static str = "apps";
    type Update = Vec<AppRecord>;

    fn extract(body: Value) -> Result<Option<Vec<AppRecord>>, serde_json::Error> {
        apps_from_response(body)
    }

    fn apply(&mut self, update: Vec<AppRecord>) {
        self.update(&update);
    }
}
