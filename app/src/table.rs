//! Generic tabular renderer.
//!
//! Renders any list of homogeneous records — passed as JSON objects — under
//! caller-supplied column definitions, with single-column sorting and
//! per-column cell formatting. The component performs no I/O and has no error
//! states: a missing or oddly shaped field renders as a placeholder dash, not
//! a failure.

use std::cmp::Ordering;

use serde_json::Value;

use crate::badge::badge_for;

const PLACEHOLDER: &str = "-";
const SKELETON_CELL: &str = "░░░░░░░░";
const SKELETON_ROWS: usize = 5;
const EMPTY_TITLE: &str = "No data found";
const EMPTY_DESCRIPTION: &str = "No records match your current criteria.";

/// Built-in cell formatters. A column's custom `render` closure, when
/// present, always takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Status,
    Date,
    Currency,
}

pub type CellRender = Box<dyn Fn(&Value, &Value) -> String>;

pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub kind: CellKind,
    pub render: Option<CellRender>,
}

impl Column {
    pub fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sortable: false,
            kind: CellKind::Text,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn render(mut self, render: impl Fn(&Value, &Value) -> String + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: &'static str,
    pub direction: SortDirection,
}

/// A row-scoped action, rendered once per row in a trailing Actions column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub label: &'static str,
    pub icon: &'static str,
}

impl RowAction {
    pub const fn new(label: &'static str, icon: &'static str) -> Self {
        Self { label, icon }
    }
}

/// A click somewhere in the rendered table. Row indices refer to the
/// displayed (sorted) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click<'a> {
    Header(&'a str),
    Row(usize),
    Action { row: usize, action: usize },
}

/// What a click produced. An action click never doubles as a row selection:
/// action triggers swallow the event before it reaches the row.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    SortChanged(SortConfig),
    RowSelected(Value),
    ActionTriggered { action: usize, row: Value },
    Ignored,
}

pub struct DataTable {
    columns: Vec<Column>,
    actions: Vec<RowAction>,
    row_selectable: bool,
    sort: Option<SortConfig>,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            actions: Vec::new(),
            row_selectable: false,
            sort: None,
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Mark rows as clickable, i.e. a row-click handler is wired up.
    pub fn selectable(mut self) -> Self {
        self.row_selectable = true;
        self
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn actions(&self) -> &[RowAction] {
        &self.actions
    }

    /// Advance the sort state for a header click.
    ///
    /// First click on a sortable column sorts ascending; clicking the same
    /// column while ascending flips to descending; any other click on a
    /// sortable column restarts ascending on that column. Once sorting has
    /// started there is no way back to the unsorted state. Clicks on unknown
    /// or non-sortable columns do nothing.
    pub fn toggle_sort(&mut self, key: &str) {
        let Some(column) = self.columns.iter().find(|column| column.key == key) else {
            return;
        };
        if !column.sortable {
            return;
        }
        let direction = match self.sort {
            Some(sort)
                if sort.key == column.key && sort.direction == SortDirection::Ascending =>
            {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortConfig {
            key: column.key,
            direction,
        });
    }

    /// Rows in display order. The sort compares raw field values with a
    /// generic ordering: numbers numerically, strings lexically (so
    /// numeric-looking strings sort as text), and mixed-type or missing
    /// values as equal, keeping their original relative order — the sort is
    /// stable.
    pub fn sorted(&self, rows: &[Value]) -> Vec<Value> {
        let mut sorted = rows.to_vec();
        if let Some(sort) = self.sort {
            sorted.sort_by(|a, b| {
                let ordering = compare_values(a.get(sort.key), b.get(sort.key));
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        sorted
    }

    /// Format one cell.
    pub fn render_cell(&self, column: &Column, row: &Value) -> String {
        let value = row.get(column.key).unwrap_or(&Value::Null);
        if let Some(render) = &column.render {
            return render(value, row);
        }
        match column.kind {
            CellKind::Status => format_status(value),
            CellKind::Date => format_date(value),
            CellKind::Currency => format_currency(value),
            CellKind::Text => format_text(value),
        }
    }

    /// Dispatch a click and return what it produced, updating sort state for
    /// header clicks.
    pub fn click(&mut self, rows: &[Value], click: Click<'_>) -> TableEvent {
        match click {
            Click::Header(key) => {
                let before = self.sort;
                self.toggle_sort(key);
                match self.sort {
                    Some(sort) if before != Some(sort) => TableEvent::SortChanged(sort),
                    _ => TableEvent::Ignored,
                }
            }
            Click::Row(index) => {
                if !self.row_selectable {
                    return TableEvent::Ignored;
                }
                self.sorted(rows)
                    .get(index)
                    .cloned()
                    .map_or(TableEvent::Ignored, TableEvent::RowSelected)
            }
            Click::Action { row, action } => {
                if action >= self.actions.len() {
                    return TableEvent::Ignored;
                }
                self.sorted(rows).get(row).cloned().map_or(
                    TableEvent::Ignored,
                    |record| TableEvent::ActionTriggered {
                        action,
                        row: record,
                    },
                )
            }
        }
    }

    /// Render the table as text. With the loading flag set, a skeleton shaped
    /// by the column count replaces the rows entirely.
    pub fn render(&self, rows: &[Value], loading: bool) -> String {
        if loading {
            return self.render_loading();
        }

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|column| self.header_label(column))
            .chain(self.actions_header())
            .collect();

        let sorted = self.sorted(rows);
        let body: Vec<Vec<String>> = sorted
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| self.render_cell(column, row))
                    .chain(self.actions_cell())
                    .collect()
            })
            .collect();

        let mut out = render_grid(&header, &body);
        if sorted.is_empty() {
            out.push_str(&format!("\n{EMPTY_TITLE}\n{EMPTY_DESCRIPTION}\n"));
        }
        out
    }

    fn render_loading(&self) -> String {
        let column_count = self.columns.len() + usize::from(!self.actions.is_empty());
        let skeleton_row: Vec<String> = (0..column_count)
            .map(|_| SKELETON_CELL.to_string())
            .collect();
        let body: Vec<Vec<String>> = (0..SKELETON_ROWS).map(|_| skeleton_row.clone()).collect();
        render_grid(&skeleton_row, &body)
    }

    fn header_label(&self, column: &Column) -> String {
        if !column.sortable {
            return column.title.to_string();
        }
        let marker = match self.sort {
            Some(sort) if sort.key == column.key => match sort.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            },
            _ => "⇅",
        };
        format!("{} {marker}", column.title)
    }

    fn actions_header(&self) -> Option<String> {
        (!self.actions.is_empty()).then(|| "Actions".to_string())
    }

    fn actions_cell(&self) -> Option<String> {
        (!self.actions.is_empty()).then(|| {
            self.actions
                .iter()
                .map(|action| action.label)
                .collect::<Vec<_>>()
                .join(" | ")
        })
    }
}

/// Stable key for a displayed row: the record's `Id`, or the positional index
/// when no identity field is present. The positional fallback can collide
/// across reorders; that is a known limitation, kept as-is.
pub fn row_key(row: &Value, index: usize) -> String {
    row.get("Id")
        .and_then(Value::as_u64)
        .map_or_else(|| index.to_string(), |id| id.to_string())
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn format_status(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| PLACEHOLDER.to_string(), |status| badge_for(status).to_string())
}

fn format_date(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return PLACEHOLDER.to_string();
    };
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%b %d, %Y").to_string())
}

fn format_currency(value: &Value) -> String {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    };
    format!("${amount:.2}")
}

/// Plain cells show the value, or a dash for anything falsy: null, absent,
/// `false`, zero, the empty string.
fn format_text(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::Bool(false) => PLACEHOLDER.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) if s.is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => PLACEHOLDER.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn render_grid(header: &[String], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in body {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(render_row(header));
    lines.push("-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in body {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Id", "ID").sortable(),
            Column::new("name", "Name").sortable(),
            Column::new("total", "Total").sortable().kind(CellKind::Currency),
            Column::new("status", "Status").kind(CellKind::Status),
        ]
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"Id": 1, "name": "Charlie", "total": 30.0, "status": "pending"}),
            json!({"Id": 2, "name": "Alice", "total": 10.0, "status": "paid"}),
            json!({"Id": 3, "name": "Bob", "total": 20.0, "status": "overdue"}),
        ]
    }

    fn names(table: &DataTable, rows: &[Value]) -> Vec<String> {
        table
            .sorted(rows)
            .iter()
            .map(|row| row["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn ascending_then_descending_reverses_distinct_rows() {
        let mut table = DataTable::new(columns());
        table.toggle_sort("name");
        let ascending = names(&table, &rows());
        table.toggle_sort("name");
        let descending = names(&table, &rows());

        assert_eq!(ascending, ["Alice", "Bob", "Charlie"]);
        let reversed: Vec<String> = ascending.into_iter().rev().collect();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn sort_state_machine_transitions() {
        let mut table = DataTable::new(columns());
        assert_eq!(table.sort(), None);

        table.toggle_sort("name");
        assert_eq!(
            table.sort(),
            Some(SortConfig {
                key: "name",
                direction: SortDirection::Ascending
            })
        );

        table.toggle_sort("name");
        assert_eq!(
            table.sort().map(|s| s.direction),
            Some(SortDirection::Descending)
        );

        // Third click on the same column goes back to ascending, not to
        // the unsorted state.
        table.toggle_sort("name");
        assert_eq!(
            table.sort().map(|s| s.direction),
            Some(SortDirection::Ascending)
        );

        // A different column always restarts ascending.
        table.toggle_sort("name");
        table.toggle_sort("total");
        assert_eq!(
            table.sort(),
            Some(SortConfig {
                key: "total",
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn non_sortable_and_unknown_headers_are_inert() {
        let mut table = DataTable::new(columns());
        table.toggle_sort("status");
        assert_eq!(table.sort(), None);
        table.toggle_sort("nope");
        assert_eq!(table.sort(), None);
    }

    #[test]
    fn numeric_strings_sort_lexically() {
        let mut table = DataTable::new(vec![Column::new("code", "Code").sortable()]);
        let rows = vec![
            json!({"code": "10"}),
            json!({"code": "9"}),
            json!({"code": "100"}),
        ];
        table.toggle_sort("code");
        let codes: Vec<String> = table
            .sorted(&rows)
            .iter()
            .map(|row| row["code"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(codes, ["10", "100", "9"]);
    }

    #[test]
    fn mixed_type_values_sort_without_losing_rows() {
        let mut table = DataTable::new(vec![Column::new("v", "V").sortable()]);
        let rows = vec![json!({"v": "b"}), json!({"v": 1}), json!({"v": "a"})];
        table.toggle_sort("v");
        // Mixed-type columns have no defined relative order; the only
        // guarantee is that every row survives the sort.
        let sorted = table.sorted(&rows);
        assert_eq!(sorted.len(), rows.len());
        for row in &rows {
            assert!(sorted.contains(row));
        }
    }

    #[test]
    fn ties_are_stable() {
        let mut table = DataTable::new(vec![
            Column::new("group", "Group").sortable(),
            Column::new("n", "N"),
        ]);
        let rows = vec![
            json!({"group": "x", "n": 1}),
            json!({"group": "x", "n": 2}),
            json!({"group": "x", "n": 3}),
        ];
        table.toggle_sort("group");
        let order: Vec<i64> = table
            .sorted(&rows)
            .iter()
            .map(|row| row["n"].as_i64().unwrap())
            .collect();
        assert_eq!(order, [1, 2, 3]);
    }

    #[test]
    fn falsy_values_render_as_dash() {
        let table = DataTable::new(vec![Column::new("v", "V")]);
        let column = &table.columns()[0];
        assert_eq!(table.render_cell(column, &json!({"v": null})), "-");
        assert_eq!(table.render_cell(column, &json!({})), "-");
        assert_eq!(table.render_cell(column, &json!({"v": false})), "-");
        assert_eq!(table.render_cell(column, &json!({"v": 0})), "-");
        assert_eq!(table.render_cell(column, &json!({"v": ""})), "-");
        assert_eq!(table.render_cell(column, &json!({"v": "ok"})), "ok");
    }

    #[test]
    fn currency_formats_two_decimals_with_zero_fallback() {
        let table = DataTable::new(vec![Column::new("total", "Total").kind(CellKind::Currency)]);
        let column = &table.columns()[0];
        assert_eq!(table.render_cell(column, &json!({"total": 254.339})), "$254.34");
        assert_eq!(table.render_cell(column, &json!({"total": "85.5"})), "$85.50");
        assert_eq!(table.render_cell(column, &json!({"total": null})), "$0.00");
        assert_eq!(table.render_cell(column, &json!({})), "$0.00");
    }

    #[test]
    fn date_formats_iso_and_falls_back_to_raw() {
        let table = DataTable::new(vec![Column::new("date", "Date").kind(CellKind::Date)]);
        let column = &table.columns()[0];
        assert_eq!(
            table.render_cell(column, &json!({"date": "2025-08-04"})),
            "Aug 04, 2025"
        );
        assert_eq!(
            table.render_cell(column, &json!({"date": "next tuesday"})),
            "next tuesday"
        );
        assert_eq!(table.render_cell(column, &json!({"date": 7})), "-");
    }

    #[test]
    fn status_cells_use_badges_with_fallback() {
        let table = DataTable::new(vec![Column::new("status", "Status").kind(CellKind::Status)]);
        let column = &table.columns()[0];
        assert_eq!(table.render_cell(column, &json!({"status": "paid"})), "[paid]");
        assert_eq!(
            table.render_cell(column, &json!({"status": "archived"})),
            "[archived]"
        );
        assert_eq!(table.render_cell(column, &json!({"status": null})), "-");
    }

    #[test]
    fn custom_render_wins_over_kind() {
        let table = DataTable::new(vec![Column::new("total", "Total")
            .kind(CellKind::Currency)
            .render(|value, row| {
                format!(
                    "{} for {}",
                    value.as_f64().unwrap_or_default(),
                    row["name"].as_str().unwrap_or(PLACEHOLDER)
                )
            })]);
        let column = &table.columns()[0];
        assert_eq!(
            table.render_cell(column, &json!({"total": 5.0, "name": "Ada"})),
            "5 for Ada"
        );
    }

    #[test]
    fn empty_rows_render_the_empty_state() {
        let table = DataTable::new(columns());
        let rendered = table.render(&[], false);
        assert!(rendered.contains("No data found"));
        assert!(rendered.contains("No records match your current criteria."));
    }

    #[test]
    fn populated_rows_do_not_render_the_empty_state() {
        let table = DataTable::new(columns());
        let rendered = table.render(&rows(), false);
        assert!(!rendered.contains("No data found"));
        assert!(rendered.contains("Alice"));
    }

    #[test]
    fn loading_renders_a_skeleton_shaped_by_columns() {
        let table = DataTable::new(columns());
        let rendered = table.render(&rows(), true);
        assert!(!rendered.contains("Alice"));
        // Header plus separator plus five skeleton rows.
        assert_eq!(rendered.lines().count(), 2 + 5);
        let first = rendered.lines().next().unwrap();
        assert_eq!(first.matches(SKELETON_CELL).count(), 4);
    }

    #[test]
    fn action_clicks_do_not_select_the_row() {
        let mut table = DataTable::new(columns())
            .with_actions(vec![RowAction::new("Edit", "pencil")])
            .selectable();
        let rows = rows();

        let event = table.click(&rows, Click::Action { row: 0, action: 0 });
        match event {
            TableEvent::ActionTriggered { action, row } => {
                assert_eq!(action, 0);
                assert_eq!(row["Id"], 1);
            }
            other => panic!("expected ActionTriggered, got {other:?}"),
        }

        let event = table.click(&rows, Click::Row(0));
        assert!(matches!(event, TableEvent::RowSelected(_)));
    }

    #[test]
    fn row_clicks_without_a_handler_are_ignored() {
        let mut table = DataTable::new(columns());
        assert_eq!(table.click(&rows(), Click::Row(0)), TableEvent::Ignored);
    }

    #[test]
    fn out_of_range_clicks_are_ignored() {
        let mut table = DataTable::new(columns())
            .with_actions(vec![RowAction::new("Edit", "pencil")])
            .selectable();
        assert_eq!(table.click(&rows(), Click::Row(9)), TableEvent::Ignored);
        assert_eq!(
            table.click(&rows(), Click::Action { row: 0, action: 9 }),
            TableEvent::Ignored
        );
    }

    #[test]
    fn header_click_reports_sort_changes() {
        let mut table = DataTable::new(columns());
        let event = table.click(&rows(), Click::Header("name"));
        assert_eq!(
            event,
            TableEvent::SortChanged(SortConfig {
                key: "name",
                direction: SortDirection::Ascending
            })
        );
        assert_eq!(table.click(&rows(), Click::Header("status")), TableEvent::Ignored);
    }

    #[test]
    fn row_key_prefers_id_and_falls_back_to_index() {
        assert_eq!(row_key(&json!({"Id": 7}), 0), "7");
        assert_eq!(row_key(&json!({"name": "x"}), 3), "3");
    }

    #[test]
    fn actions_column_renders_one_trigger_per_action() {
        let table = DataTable::new(vec![Column::new("name", "Name")]).with_actions(vec![
            RowAction::new("Edit", "pencil"),
            RowAction::new("Delete", "trash"),
        ]);
        let rendered = table.render(&[json!({"name": "Ada"})], false);
        assert!(rendered.contains("Actions"));
        assert!(rendered.contains("Edit | Delete"));
    }
}
