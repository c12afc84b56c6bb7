// src/table/mod.rs
//! Maps parsed CSV records into the picks grid.

use chrono::{DateTime, Local};
use tracing::info;

use crate::fetch::Record;

pub mod classify;
pub mod columns;
pub mod grid;

pub use classify::{RowClass, EDGE_COLUMN};
pub use columns::{
    column_specs, display_label, formatter_for, ColumnSpec, FormatRule, FORMAT_RULES,
};
pub use grid::{BodyRow, Direction, DisplayRow, Grid, GridOptions, Page, SortKey, SortOrder};

pub const DEFAULT_PAGE_LENGTH: usize = 25;

/// Project each record through the column order.
pub fn display_rows(fields: &[String], records: &[Record]) -> Vec<DisplayRow> {
    records
        .iter()
        .map(|r| fields.iter().map(|f| r.get(f).map(str::to_string)).collect())
        .collect()
}

/// Highest edge first when the edge column exists, else the first column A→Z.
pub fn default_order(fields: &[String]) -> SortOrder {
    match fields.iter().position(|f| f == EDGE_COLUMN) {
        Some(column) => SortOrder {
            column,
            direction: Direction::Desc,
        },
        None => SortOrder {
            column: 0,
            direction: Direction::Asc,
        },
    }
}

pub fn status_line(rows: usize, loaded_at: &DateTime<Local>) -> String {
    format!(
        "Loaded {} games • {}",
        rows,
        loaded_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Rebuild the page table from one load.
///
/// `previous` is destroyed (rows included) before the new grid draws. The
/// returned grid must be handed back on the next rebuild.
pub fn build_table(
    previous: Option<Grid>,
    page: &mut Page,
    fields: &[String],
    records: &[Record],
    page_length: usize,
    loaded_at: DateTime<Local>,
) -> Grid {
    if let Some(prev) = previous {
        prev.destroy(page);
    }

    let columns = column_specs(fields);
    page.head = columns.iter().map(|c| c.title.clone()).collect();

    let edge_idx = fields.iter().position(|f| f == EDGE_COLUMN);
    let created_row: Option<grid::CreatedRowHook> = edge_idx.map(|idx| {
        Box::new(move |row: &[Option<String>]| {
            RowClass::from_raw(row.get(idx).and_then(|c| c.as_deref()))
        }) as grid::CreatedRowHook
    });

    let grid = Grid::new(
        page,
        GridOptions {
            data: display_rows(fields, records),
            columns,
            page_length,
            order: default_order(fields),
            created_row,
        },
    );

    page.status = status_line(records.len(), &loaded_at);
    info!(rows = records.len(), columns = fields.len(), "table built");
    grid
}
