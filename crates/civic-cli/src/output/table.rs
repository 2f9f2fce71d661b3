//! Aligned text tables for `--format table`.

use civic_core::entities::Issue;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const ISSUE_HEADERS: [&str; 6] = ["id", "status", "priority", "category", "created", "title"];

/// One row per issue, in the order given.
#[must_use]
pub fn render_issue_table(issues: &[Issue], options: TableOptions) -> String {
    if issues.is_empty() {
        return String::from("(no issues)");
    }
    let rows = issues
        .iter()
        .map(|issue| {
            vec![
                issue.id.clone(),
                issue.status.to_string(),
                issue.priority.to_string(),
                issue.category.clone(),
                issue.created_at.format("%Y-%m-%d").to_string(),
                issue.title.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&ISSUE_HEADERS, &rows, options)
}

/// Render an aligned table for string rows. Only the last column is shrunk
/// to fit `max_width`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    if let (Some(max_width), Some(last)) = (options.max_width, widths.len().checked_sub(1)) {
        let fixed: usize = widths[..last].iter().sum::<usize>() + last * 2;
        widths[last] = widths[last].min(max_width.saturating_sub(fixed).max(headers[last].len()));
    }

    let line = |cells: &mut dyn Iterator<Item = (String, usize)>, color: bool| {
        cells
            .map(|(cell, width)| {
                let text = truncate_text(&cell, width);
                let pad = " ".repeat(width.saturating_sub(text.chars().count()));
                let text = if color { colorize(&text) } else { text };
                format!("{text}{pad}")
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(
        &mut headers.iter().map(|h| (*h).to_string()).zip(widths.iter().copied()),
        false,
    ));
    lines.push("-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2));
    for row in rows {
        lines.push(line(
            &mut row.iter().cloned().zip(widths.iter().copied()),
            options.color,
        ));
    }
    lines.join("\n")
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn colorize(value: &str) -> String {
    let code = match value {
        "critical" => "31",
        "high" | "open" => "33",
        "in-progress" => "36",
        "resolved" | "closed" => "32",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}
