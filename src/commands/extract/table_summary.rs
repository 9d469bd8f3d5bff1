use serde_json::Value;

use super::get_page_no;
use crate::model::{TableCellRecord, TableSummary};

pub(super) fn is_table_node(node: &Value) -> bool {
    let labelled_table = node.get("label").and_then(Value::as_str) == Some("table");
    let has_cells = node
        .get("data")
        .and_then(Value::as_object)
        .is_some_and(|data| data.contains_key("table_cells"));

    labelled_table || has_cells
}

pub(super) fn extract_table_summary(table: &Value) -> TableSummary {
    let cells = table
        .get("data")
        .and_then(|data| data.get("table_cells"))
        .and_then(Value::as_array)
        .map(|cells| cells.iter().map(table_cell_record).collect())
        .unwrap_or_default();

    TableSummary {
        page_no: get_page_no(table),
        cells,
    }
}

fn table_cell_record(cell: &Value) -> TableCellRecord {
    TableCellRecord {
        row: cell.get("start_row_offset_idx").and_then(Value::as_i64),
        col: cell.get("start_col_offset_idx").and_then(Value::as_i64),
        text: cell
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        column_header: flag(cell, "column_header"),
        row_header: flag(cell, "row_header"),
    }
}

fn flag(cell: &Value, key: &str) -> bool {
    cell.get(key).and_then(Value::as_bool).unwrap_or(false)
}
