use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;

use crate::model::TableSummary;

pub(super) fn format_tables_for_prompt(tables: &[TableSummary]) -> Result<String> {
    if tables.is_empty() {
        return Ok(String::new());
    }

    let mut formatted = String::from("\n\nTables in this section:\n");

    for (table_index, table) in tables.iter().enumerate() {
        if table.cells.is_empty() {
            continue;
        }

        let page = table
            .page_no
            .map_or_else(|| "None".to_string(), |page| page.to_string());
        write!(formatted, "\nTable {} (Page {}):\n", table_index + 1, page)?;

        let mut rows = BTreeMap::<i64, BTreeMap<i64, &str>>::new();
        for cell in &table.cells {
            rows.entry(cell.row.unwrap_or(0))
                .or_default()
                .insert(cell.col.unwrap_or(0), cell.text.as_str());
        }

        let max_col = rows
            .values()
            .filter_map(|columns| columns.keys().next_back().copied())
            .max()
            .unwrap_or(0);
        let first_row = rows.keys().next().copied();

        for (row_index, columns) in &rows {
            let row_cells = (0..=max_col)
                .map(|col| columns.get(&col).copied().unwrap_or(""))
                .collect::<Vec<&str>>();
            writeln!(formatted, "| {} |", row_cells.join(" | "))?;

            if Some(*row_index) == first_row {
                let separator = vec!["---"; row_cells.len()];
                writeln!(formatted, "| {} |", separator.join(" | "))?;
            }
        }
    }

    Ok(formatted)
}
