//! Cluster metrics pane.
//!
//! Two columns: resource usage bars on the left (vCore, Mem), the apps,
//! nodes and containers summary lines on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use serde_json::Value;

use super::{ProgressBar, Renderable, SummaryLine};
use crate::model::{ClusterMetrics, metrics_from_response};
use crate::provider::PollTarget;
use crate::tui::style::Styles;
use crate::util::format_memory;
use crate::view::summary::{apps_summary, containers_summary, nodes_summary};

/// Rows taken by the pane: three content rows framed by one blank row on
/// each side.
pub const METRICS_PANE_HEIGHT: u16 = 5;

const DESCRIPTION_WIDTH: usize = 7;
const BAR_TRAILER: &str = "]   ";

fn plain(value: i64) -> String {
    value.to_string()
}

pub struct MetricsPane {
    pub vcores: ProgressBar,
    pub memory: ProgressBar,
    pub apps: SummaryLine,
    pub nodes: SummaryLine,
    pub containers: SummaryLine,
    current: ClusterMetrics,
}

impl Default for MetricsPane {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsPane {
    pub fn new() -> Self {
        let empty = ClusterMetrics::default();
        Self {
            vcores: ProgressBar::new(plain),
            memory: ProgressBar::new(format_memory),
            apps: SummaryLine::new(apps_summary(&empty)),
            nodes: SummaryLine::new(nodes_summary(&empty)),
            containers: SummaryLine::new(containers_summary(&empty)),
            current: empty,
        }
    }

    /// Last applied snapshot.
    pub fn current(&self) -> &ClusterMetrics {
        &self.current
    }

    /// Refreshes every widget of the pane from one snapshot.
    pub fn update(&mut self, metrics: ClusterMetrics) {
        self.apps.set(apps_summary(&metrics));
        self.nodes.set(nodes_summary(&metrics));
        self.containers.set(containers_summary(&metrics));
        self.vcores.set_progress(
            metrics.allocated_virtual_cores,
            metrics.total_virtual_cores,
        );
        self.memory
            .set_progress(metrics.allocated_mb, metrics.total_mb);
        self.current = metrics;
    }

    pub fn take_dirty(&mut self) -> bool {
        // No short-circuit: every flag must be cleared.
        let flags = [
            self.vcores.take_dirty(),
            self.memory.take_dirty(),
            self.apps.take_dirty(),
            self.nodes.take_dirty(),
            self.containers.take_dirty(),
        ];
        flags.contains(&true)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);
        let [left, right] =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(rows[1]);

        let bars = vec![
            usage_bar_line("vCore", &self.vcores, left.width),
            usage_bar_line("Mem", &self.memory, left.width),
        ];
        frame.render_widget(Paragraph::new(bars), left);

        let summaries = vec![
            self.apps.render(right.width),
            self.nodes.render(right.width),
            self.containers.render(right.width),
        ];
        frame.render_widget(Paragraph::new(summaries), right);
    }
}

/// `<description right-aligned in 7>[<bar>]   `
fn usage_bar_line(description: &str, bar: &ProgressBar, width: u16) -> Line<'static> {
    let frame_width = DESCRIPTION_WIDTH + 1 + BAR_TRAILER.len();
    let bar_width = (width as usize).saturating_sub(frame_width) as u16;

    let mut spans = vec![
        Span::styled(
            format!("{:>width$}", description, width = DESCRIPTION_WIDTH),
            Styles::bar_description(),
        ),
        Span::styled("[", Styles::bar_boundary()),
    ];
    spans.extend(bar.render(bar_width).spans);
    spans.push(Span::styled(BAR_TRAILER, Styles::bar_boundary()));
    Line::from(spans)
}

impl PollTarget for MetricsPane {
    const NAME: &'static str = "cluster-metrics";
    type Update = ClusterMetrics;

    fn extract(body: Value) -> Result<Option<ClusterMetrics>, serde_json::Error> {
        metrics_from_response(body)
    }

    fn apply(&mut self, update: ClusterMetrics) {
        self.update(update);
    }
}
