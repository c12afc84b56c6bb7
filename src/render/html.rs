//! Self-contained HTML page for the picks table.
//!
//! The page embeds its CSS and a small script that keeps the table sortable
//! and paginated in the browser, so the file works offline.

use serde_json::json;

use crate::table::{BodyRow, Direction, Grid, Page, SortKey, SortOrder, DEFAULT_PAGE_LENGTH};

pub const TABLE_ID: &str = "picks";
pub const STATUS_ID: &str = "status";

/// Render `page` as a full HTML document. `grid` supplies paging and ordering;
/// without one (nothing loaded yet) the table is empty.
pub fn render_page(page: &Page, grid: Option<&Grid>, title: &str) -> String {
    let (page_length, order) = match grid {
        Some(g) => (g.page_length(), Some(g.order())),
        None => (DEFAULT_PAGE_LENGTH, None),
    };
    let order_json = order.map(|o| json!([o.column, o.direction]));
    let settings = json!({
        "pageLength": page_length,
        "order": order_json,
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div id="{status_id}">{status}</div>
        <table id="{table_id}">
            <thead>{head}</thead>
            <tbody>{body}</tbody>
        </table>
        <div class="pager"></div>
    </div>
    <script id="grid-settings" type="application/json">{settings}</script>
    <script>{js}</script>
</body>
</html>"#,
        title = html_escape(title),
        css = inline_css(),
        status_id = STATUS_ID,
        status = html_escape(&page.status),
        table_id = TABLE_ID,
        head = render_head(page, order),
        body = render_body(&page.body),
        settings = settings.to_string().replace("</", "<\\/"),
        js = inline_javascript(),
    )
}

fn render_head(page: &Page, order: Option<SortOrder>) -> String {
    let numeric: Vec<bool> = (0..page.head.len())
        .map(|idx| {
            page.body
                .first()
                .and_then(|r| r.sort_keys.get(idx))
                .map(|k| matches!(k, SortKey::Number(_)))
                .unwrap_or(false)
        })
        .collect();

    let cells: String = page
        .head
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let sorted = match order {
                Some(o) if o.column == idx => match o.direction {
                    Direction::Asc => r#" aria-sort="ascending""#,
                    Direction::Desc => r#" aria-sort="descending""#,
                },
                _ => "",
            };
            format!(
                r#"<th data-type="{}"{}>{}</th>"#,
                if numeric[idx] { "num" } else { "text" },
                sorted,
                html_escape(label)
            )
        })
        .collect();
    format!("<tr>{cells}</tr>")
}

fn render_body(rows: &[BodyRow]) -> String {
    rows.iter().map(render_row).collect::<Vec<_>>().join("\n")
}

fn render_row(row: &BodyRow) -> String {
    let class = row
        .class
        .css_class()
        .map(|c| format!(r#" class="{c}""#))
        .unwrap_or_default();
    let cells: String = row
        .cells
        .iter()
        .zip(row.sort_keys.iter())
        .map(|(text, key)| {
            format!(
                r#"<td data-order="{}">{}</td>"#,
                html_escape(&order_value(key)),
                html_escape(text)
            )
        })
        .collect();
    format!("<tr{class}>{cells}</tr>")
}

fn order_value(key: &SortKey) -> String {
    match key {
        SortKey::Number(Some(n)) => n.to_string(),
        SortKey::Number(None) => String::new(),
        SortKey::Text(s) => s.clone(),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    color: #111827;
    background: #ffffff;
    margin: 0;
}
.container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
h1 { font-size: 1.75rem; margin: 0 0 0.5rem; }
#status { color: #6b7280; font-size: 0.875rem; margin-bottom: 1rem; }
table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
th { cursor: pointer; user-select: none; background: #f9fafb; }
th[aria-sort="ascending"]::after { content: " \25B2"; }
th[aria-sort="descending"]::after { content: " \25BC"; }
tr.edge-great { background: #bbf7d0; }
tr.edge-good { background: #ecfccb; }
tr.edge-bad { background: #fecaca; }
.pager { margin-top: 1rem; display: flex; gap: 0.25rem; flex-wrap: wrap; }
.pager button { border: 1px solid #d1d5db; background: #fff; padding: 0.25rem 0.6rem; cursor: pointer; }
.pager button.current { background: #111827; color: #fff; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
  const table = document.getElementById('picks');
  const tbody = table.tBodies[0];
  const pager = document.querySelector('.pager');
  const settings = JSON.parse(document.getElementById('grid-settings').textContent);
  const pageLength = settings.pageLength || 25;
  const rows = Array.from(tbody.rows);
  let current = 0;

  function key(row, idx, numeric) {
    const raw = row.cells[idx] ? row.cells[idx].dataset.order : '';
    if (!numeric) return raw || '';
    const n = parseFloat(raw);
    return Number.isFinite(n) ? n : -Infinity;
  }

  function sortBy(idx, dir) {
    const th = table.tHead.rows[0].cells[idx];
    const numeric = th.dataset.type === 'num';
    rows.sort(function (a, b) {
      const x = key(a, idx, numeric), y = key(b, idx, numeric);
      const c = x < y ? -1 : x > y ? 1 : 0;
      return dir === 'desc' ? -c : c;
    });
    Array.from(table.tHead.rows[0].cells).forEach(function (h) { h.removeAttribute('aria-sort'); });
    th.setAttribute('aria-sort', dir === 'desc' ? 'descending' : 'ascending');
    rows.forEach(function (r) { tbody.appendChild(r); });
    show(0);
  }

  function show(page) {
    const pages = Math.max(1, Math.ceil(rows.length / pageLength));
    current = Math.min(Math.max(page, 0), pages - 1);
    rows.forEach(function (r, i) {
      r.style.display = Math.floor(i / pageLength) === current ? '' : 'none';
    });
    pager.innerHTML = '';
    if (pages < 2) return;
    for (let p = 0; p < pages; p++) {
      const b = document.createElement('button');
      b.textContent = String(p + 1);
      if (p === current) b.className = 'current';
      b.addEventListener('click', function () { show(p); });
      pager.appendChild(b);
    }
  }

  Array.from(table.tHead.rows[0].cells).forEach(function (th, idx) {
    th.addEventListener('click', function () {
      sortBy(idx, th.getAttribute('aria-sort') === 'descending' ? 'asc' : 'desc');
    });
  });

  show(0);
})();
"#
}
