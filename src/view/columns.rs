//! Known-field registry and table schema resolution for the apps pane.

use serde_json::Value;

use crate::model::AppRecord;
use crate::util::{format_datetime, format_elapsed_time, format_memory, format_percent};

/// Maximum number of configurable column slots.
pub const MAX_COLUMNS: usize = 16;

/// Turns a raw JSON value into display text.
pub type CellFormatter = fn(&Value) -> String;

/// Horizontal alignment of data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Width policy of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Literal character count.
    Fixed(u16),
    /// Relative share of the space left over after fixed columns.
    Weighted(u16),
}

impl ColumnWidth {
    /// Positive values are fixed widths, negative values are weights.
    pub const fn from_signed(width: i16) -> Self {
        if width < 0 {
            ColumnWidth::Weighted(width.unsigned_abs())
        } else {
            ColumnWidth::Fixed(width as u16)
        }
    }
}

/// Layout metadata for one column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub header_label: &'static str,
    pub width: ColumnWidth,
    pub formatter: CellFormatter,
    pub alignment: Alignment,
}

impl ColumnSpec {
    const fn new(
        field: &'static str,
        header_label: &'static str,
        width: i16,
        formatter: CellFormatter,
        alignment: Alignment,
    ) -> Self {
        Self {
            field,
            header_label,
            width: ColumnWidth::from_signed(width),
            formatter,
            alignment,
        }
    }

    /// Formats this column's cell for `record`. Absent fields are empty.
    pub fn format(&self, record: &AppRecord) -> String {
        record
            .get(self.field)
            .map(|value| (self.formatter)(value))
            .unwrap_or_default()
    }
}

use Alignment::{Left, Right};

/// Every field the apps pane knows how to display.
pub static KNOWN_FIELDS: [ColumnSpec; 28] = [
    ColumnSpec::new("id", "AppID", 32, plain, Left),
    ColumnSpec::new("user", "User", 8, plain, Left),
    ColumnSpec::new("name", "Name", -1, plain, Left),
    ColumnSpec::new("queue", "Queue", 8, plain, Left),
    ColumnSpec::new("state", "State", 7, plain, Left),
    ColumnSpec::new("progress", "Progress", 5, percent, Right),
    ColumnSpec::new("clusterId", "Clust", 15, plain, Left),
    ColumnSpec::new("applicationType", "Type", 5, plain, Left),
    ColumnSpec::new("applicationTags", "Tags", 15, plain, Left),
    ColumnSpec::new("priority", "Pri", 5, plain, Left),
    ColumnSpec::new("startedTime", "Start", 8, datetime, Right),
    ColumnSpec::new("elapsedTime", "Time", 9, elapsed, Right),
    ColumnSpec::new("allocatedMB", "Mem", 7, memory, Right),
    ColumnSpec::new("allocatedVCores", "vCore", 5, plain, Right),
    ColumnSpec::new("runningContainers", "Pod", 5, plain, Right),
    ColumnSpec::new("memorySeconds", "MemSec", 7, memory, Right),
    ColumnSpec::new("vcoreSeconds", "vCoreSec", 6, plain, Right),
    ColumnSpec::new("queueUsagePercentage", "Queue%", 6, percent, Right),
    ColumnSpec::new("clusterUsagePercentage", "Clust%", 6, percent, Right),
    ColumnSpec::new("logAggregationStatus", "LogAgg", 9, plain, Left),
    ColumnSpec::new("preemptedResourceMB", "PreMem", 7, memory, Right),
    ColumnSpec::new("preemptedResourceVCores", "PreCPU", 5, plain, Right),
    ColumnSpec::new("numNonAMContainerPreempted", "PreNAM", 5, plain, Right),
    ColumnSpec::new("numAMContainerPreempted", "PreAM", 5, plain, Right),
    ColumnSpec::new("preemptedMemorySeconds", "PreMS", 7, memory, Right),
    ColumnSpec::new("preemptedVcoreSeconds", "PreCS", 5, plain, Right),
    ColumnSpec::new("unmanagedApplication", "Unmgd", 5, plain, Left),
    ColumnSpec::new("amNodeLabelExpression", "AMLbl", 5, plain, Left),
];

/// Looks up a field in the registry.
pub fn find_field(name: &str) -> Option<&'static ColumnSpec> {
    KNOWN_FIELDS.iter().find(|column| column.field == name)
}

/// Names of all known fields, in registry order.
pub fn known_field_names() -> Vec<&'static str> {
    KNOWN_FIELDS.iter().map(|column| column.field).collect()
}

/// Ordered, deduplicated set of active columns.
///
/// Resolved once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct TableSchema {
    columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Resolves configured selector slots into the active schema.
    ///
    /// Unset slots are skipped, order is preserved, and a field repeated in a
    /// later slot is dropped. Slot values are expected to be validated
    /// against [`KNOWN_FIELDS`] already; anything else is skipped.
    pub fn resolve<S: AsRef<str>>(slots: &[Option<S>]) -> Self {
        let mut columns: Vec<ColumnSpec> = Vec::new();
        for name in slots.iter().take(MAX_COLUMNS).flatten() {
            let Some(column) = find_field(name.as_ref()) else {
                continue;
            };
            if columns.iter().any(|c| c.field == column.field) {
                continue;
            }
            columns.push(*column);
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header labels, one per column.
    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.header_label.to_string())
            .collect()
    }

    /// Formatted cells of `record`, one per column.
    pub fn cells(&self, record: &AppRecord) -> Vec<String> {
        self.columns.iter().map(|c| c.format(record)).collect()
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

fn memory(value: &Value) -> String {
    match value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)) {
        Some(mib) => format_memory(mib),
        None => plain(value),
    }
}

fn percent(value: &Value) -> String {
    value
        .as_f64()
        .map(format_percent)
        .unwrap_or_else(|| plain(value))
}

fn datetime(value: &Value) -> String {
    value
        .as_i64()
        .map(format_datetime)
        .unwrap_or_else(|| plain(value))
}

fn elapsed(value: &Value) -> String {
    value
        .as_i64()
        .map(format_elapsed_time)
        .unwrap_or_else(|| plain(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn record(value: Value) -> AppRecord {
        match value {
            Value::Object(map) => AppRecord::from(map),
            _ => AppRecord::from(Map::new()),
        }
    }

    #[test]
    fn test_resolve_skips_unset_slots_in_order() {
        let mut slots: Vec<Option<&str>> = vec![None; MAX_COLUMNS];
        for (i, name) in ["id", "state", "startedTime", "name", "allocatedMB", "user"]
            .into_iter()
            .enumerate()
        {
            slots[i] = Some(name);
        }

        let schema = TableSchema::resolve(&slots);
        let fields: Vec<_> = schema.columns().iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec!["id", "state", "startedTime", "name", "allocatedMB", "user"]
        );
    }

    #[test]
    fn test_resolve_keeps_relative_order_across_gaps() {
        let slots = [None, Some("queue"), None, Some("id"), None];
        let schema = TableSchema::resolve(&slots);
        assert_eq!(schema.headers(), vec!["Queue", "AppID"]);
    }

    #[test]
    fn test_resolve_drops_duplicates_and_unknown() {
        let slots = [Some("id"), Some("bogus"), Some("id"), Some("user")];
        let schema = TableSchema::resolve(&slots);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.columns()[1].field, "user");
    }

    #[test]
    fn test_registry_has_unique_fields_and_one_weighted_column() {
        let names = known_field_names();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate field {name}");
        }
        let weighted: Vec<_> = KNOWN_FIELDS
            .iter()
            .filter(|c| matches!(c.width, ColumnWidth::Weighted(_)))
            .map(|c| c.field)
            .collect();
        assert_eq!(weighted, vec!["name"]);
    }

    #[test]
    fn test_width_from_signed() {
        assert_eq!(ColumnWidth::from_signed(7), ColumnWidth::Fixed(7));
        assert_eq!(ColumnWidth::from_signed(-3), ColumnWidth::Weighted(3));
    }

    #[test]
    fn test_cells_apply_formatters_and_default_missing() {
        let schema = TableSchema::resolve(&[
            Some("id"),
            Some("allocatedMB"),
            Some("progress"),
            Some("elapsedTime"),
            Some("queue"),
        ]);
        let app = record(json!({
            "id": "application_1_0001",
            "allocatedMB": 3072,
            "progress": 42.57,
            "elapsedTime": 30_000
        }));
        assert_eq!(
            schema.cells(&app),
            vec!["application_1_0001", "1.50G", "42.6", "<1m", ""]
        );
    }

    #[test]
    fn test_numeric_formatter_falls_back_to_raw_text() {
        let schema = TableSchema::resolve(&[Some("progress"), Some("allocatedMB")]);
        let app = record(json!({"progress": "n/a", "allocatedMB": null}));
        assert_eq!(schema.cells(&app), vec!["n/a", ""]);
    }

    #[test]
    fn test_booleans_are_capitalized() {
        let schema = TableSchema::resolve(&[Some("unmanagedApplication"), Some("name")]);
        let app = record(json!({"unmanagedApplication": false, "name": true}));
        assert_eq!(schema.cells(&app), vec!["False", "True"]);
    }
}
