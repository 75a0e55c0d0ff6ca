//! Summary lines of the metrics pane.
//!
//! Each formatter maps a [`ClusterMetrics`] snapshot to an ordered list of
//! styled segments. Optional segments appear only when their counter is
//! strictly positive; their order is fixed.

use crate::model::ClusterMetrics;

/// Style class of a summary segment (TUI maps these to colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStyle {
    Text,
    Number,
    TextSuccess,
    NumberSuccess,
    TextWarn,
    NumberWarn,
    TextFail,
    NumberFail,
}

/// One styled piece of a summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub style: MetricStyle,
    pub text: String,
}

impl Segment {
    fn new(style: MetricStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Severity of an optional counter.
#[derive(Clone, Copy)]
enum Tone {
    Warn,
    Fail,
}

impl Tone {
    fn styles(self) -> (MetricStyle, MetricStyle) {
        match self {
            Tone::Warn => (MetricStyle::NumberWarn, MetricStyle::TextWarn),
            Tone::Fail => (MetricStyle::NumberFail, MetricStyle::TextFail),
        }
    }
}

/// Appends `", <n> <name>"` when `value > 0`.
fn push_optional(segments: &mut Vec<Segment>, value: i64, name: &str, tone: Tone) {
    if value <= 0 {
        return;
    }
    let (number, text) = tone.styles();
    segments.push(Segment::new(MetricStyle::Text, ", "));
    segments.push(Segment::new(number, value.to_string()));
    segments.push(Segment::new(text, format!(" {}", name)));
}

/// `Apps: [P pending, ]R running[, F failed][, K killed], C/S done`
pub fn apps_summary(m: &ClusterMetrics) -> Vec<Segment> {
    use MetricStyle::*;

    let mut segments = vec![Segment::new(Text, "Apps: ")];

    if m.apps_pending > 0 {
        segments.push(Segment::new(Number, m.apps_pending.to_string()));
        segments.push(Segment::new(Text, " pending, "));
    }

    segments.push(Segment::new(NumberSuccess, m.apps_running.to_string()));
    segments.push(Segment::new(TextSuccess, " running"));

    push_optional(&mut segments, m.apps_failed, "failed", Tone::Fail);
    push_optional(&mut segments, m.apps_killed, "killed", Tone::Fail);

    segments.extend([
        Segment::new(Text, ", "),
        Segment::new(Number, m.apps_completed.to_string()),
        Segment::new(Text, "/"),
        Segment::new(Number, m.apps_submitted.to_string()),
        Segment::new(Text, " done"),
    ]);
    segments
}

/// `Nodes: T; A active, D decommission[, unhealthy..][, lost..]`
pub fn nodes_summary(m: &ClusterMetrics) -> Vec<Segment> {
    use MetricStyle::*;

    let mut segments = vec![
        Segment::new(Text, "Nodes: "),
        Segment::new(Number, m.total_nodes.to_string()),
        Segment::new(Text, "; "),
        Segment::new(NumberSuccess, m.active_nodes.to_string()),
        Segment::new(TextSuccess, " active"),
        Segment::new(Text, ", "),
        Segment::new(Number, m.decommission_nodes().to_string()),
        Segment::new(Text, " decommission"),
    ];

    push_optional(&mut segments, m.unhealthy_nodes, "unhealthy", Tone::Warn);
    push_optional(&mut segments, m.rebooted_nodes, "rebooted", Tone::Warn);
    push_optional(&mut segments, m.lost_nodes, "lost", Tone::Fail);
    push_optional(&mut segments, m.shutdown_nodes, "shutdown", Tone::Fail);
    segments
}

/// `Containers: A allocated[, R reserved][, P pending]`
pub fn containers_summary(m: &ClusterMetrics) -> Vec<Segment> {
    use MetricStyle::*;

    let mut segments = vec![
        Segment::new(Text, "Containers: "),
        Segment::new(NumberSuccess, m.containers_allocated.to_string()),
        Segment::new(TextSuccess, " allocated"),
    ];

    if m.containers_reserved > 0 {
        segments.extend([
            Segment::new(Text, ", "),
            Segment::new(Number, m.containers_reserved.to_string()),
            Segment::new(Text, " reserved"),
        ]);
    }

    if m.containers_pending > 0 {
        segments.extend([
            Segment::new(Text, ", "),
            Segment::new(Number, m.containers_pending.to_string()),
            Segment::new(Text, " pending"),
        ]);
    }
    segments
}
