use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use super::classify::RowClass;
use super::columns::ColumnSpec;
use crate::process::to_number;

/// Cells of one record in column order; `None` where the record had no value.
pub type DisplayRow = Vec<Option<String>>;

/// Called once per row as the grid creates it.
pub type CreatedRowHook = Box<dyn Fn(&[Option<String>]) -> RowClass + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: usize,
    pub direction: Direction,
}

/// Value a cell sorts by.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// `None` (not a number) sorts below every number.
    Number(Option<f64>),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            },
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// A row as it appears in the table body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub cells: Vec<String>,
    pub sort_keys: Vec<SortKey>,
    pub class: RowClass,
}

/// The document the grid draws into: table head, table body and status line.
#[derive(Debug, Default)]
pub struct Page {
    pub head: Vec<String>,
    pub body: Vec<BodyRow>,
    pub status: String,
}

pub struct GridOptions {
    pub data: Vec<DisplayRow>,
    pub columns: Vec<ColumnSpec>,
    pub page_length: usize,
    pub order: SortOrder,
    pub created_row: Option<CreatedRowHook>,
}

struct GridRow {
    data: DisplayRow,
    class: RowClass,
}

/// Sortable, paginated table bound to a [`Page`].
///
/// A grid owns its rendered body rows. Call [`Grid::destroy`] before building
/// a replacement so nothing from the old data survives.
pub struct Grid {
    columns: Vec<ColumnSpec>,
    numeric: Vec<bool>,
    rows: Vec<GridRow>,
    page_length: usize,
    order: SortOrder,
}

impl Grid {
    pub fn new(page: &mut Page, options: GridOptions) -> Self {
        let GridOptions {
            data,
            columns,
            page_length,
            order,
            created_row,
        } = options;

        let numeric = columns
            .iter()
            .enumerate()
            .map(|(idx, col)| col.formatter.is_numeric() || all_numeric(&data, idx))
            .collect();

        let rows = data
            .into_iter()
            .map(|data| {
                let class = created_row
                    .as_ref()
                    .map(|hook| hook(data.as_slice()))
                    .unwrap_or_default();
                GridRow { data, class }
            })
            .collect();

        let mut grid = Self {
            columns,
            numeric,
            rows,
            page_length: page_length.max(1),
            order,
        };
        grid.sort_rows();
        grid.draw(page);
        debug!(rows = grid.rows.len(), order = ?grid.order, "grid initialised");
        grid
    }

    /// Tear the grid down and clear the head and every row it rendered.
    pub fn destroy(self, page: &mut Page) {
        debug!(rows = page.body.len(), "destroying grid");
        page.head.clear();
        page.body.clear();
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Re-sort by `column` and redraw. Out-of-range columns are ignored.
    pub fn sort_by(&mut self, page: &mut Page, column: usize, direction: Direction) {
        if column >= self.columns.len() {
            return;
        }
        self.order = SortOrder { column, direction };
        self.sort_rows();
        self.draw(page);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_length(&self) -> usize {
        self.page_length
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_length)
    }

    /// Rows of the zero-based `index`-th page; empty past the last page.
    pub fn page_rows<'p>(&self, page: &'p Page, index: usize) -> &'p [BodyRow] {
        let start = index.saturating_mul(self.page_length).min(page.body.len());
        let end = start.saturating_add(self.page_length).min(page.body.len());
        &page.body[start..end]
    }

    fn sort_key(&self, column: usize, raw: Option<&str>) -> SortKey {
        if self.numeric[column] {
            SortKey::Number(to_number(raw))
        } else {
            SortKey::Text(raw.unwrap_or_default().to_string())
        }
    }

    fn sort_rows(&mut self) {
        let SortOrder { column, direction } = self.order;
        if column >= self.columns.len() {
            return;
        }
        let keys: Vec<SortKey> = self
            .rows
            .iter()
            .map(|r| self.sort_key(column, cell(&r.data, column)))
            .collect();
        let mut indexed: Vec<(SortKey, GridRow)> =
            keys.into_iter().zip(self.rows.drain(..)).collect();
        // stable, so equal keys keep file order in both directions
        indexed.sort_by(|(a, _), (b, _)| match direction {
            Direction::Asc => a.compare(b),
            Direction::Desc => b.compare(a),
        });
        self.rows = indexed.into_iter().map(|(_, row)| row).collect();
    }

    fn draw(&self, page: &mut Page) {
        page.body = self
            .rows
            .iter()
            .map(|row| BodyRow {
                cells: self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(idx, col)| col.formatter.apply(cell(&row.data, idx)))
                    .collect(),
                sort_keys: (0..self.columns.len())
                    .map(|idx| self.sort_key(idx, cell(&row.data, idx)))
                    .collect(),
                class: row.class,
            })
            .collect();
    }
}

fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx).and_then(|c| c.as_deref())
}

/// True when the column has at least one value and every non-empty value coerces.
fn all_numeric(data: &[DisplayRow], column: usize) -> bool {
    let mut seen = false;
    for raw in data.iter().filter_map(|r| cell(r, column)) {
        if raw.trim().is_empty() {
            continue;
        }
        if to_number(Some(raw)).is_none() {
            return false;
        }
        seen = true;
    }
    seen
}
