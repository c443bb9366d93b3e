// SPDX-License-Identifier: Apache-2.0

use salescope_model::{Cell, ChartPoint, Table};

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Real(v) => format!("{v:.2}"),
        other => other.to_string(),
    }
}

/// Plain-text grid. Numeric columns are right-aligned.
pub(crate) fn render_grid(table: &Table) -> String {
    let headers = table.column_names();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let numeric: Vec<bool> = table.columns().iter().map(|c| c.kind.is_numeric()).collect();

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &body {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .zip(&numeric)
            .map(|((text, w), is_numeric)| {
                if *is_numeric {
                    format!("{text:>w$}")
                } else {
                    format!("{text:<w$}")
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out.push_str(&format!("({} rows)\n", table.len()));
    out
}

/// Horizontal bars scaled to the largest magnitude. Negative values draw `-`.
pub(crate) fn render_bars(points: &[ChartPoint], width: usize) -> String {
    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max_abs = points.iter().map(|p| p.value.abs()).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for point in points {
        let len = if max_abs > 0.0 {
            ((point.value.abs() / max_abs) * width as f64).round() as usize
        } else {
            0
        };
        let glyph = if point.value < 0.0 { "-" } else { "#" };
        let bar = glyph.repeat(len);
        out.push_str(&format!(
            "{:<label_width$} | {bar:<width$} {:.2}\n",
            point.label, point.value
        ));
    }
    out
}
