use rapport::domain::cell_shade;
use rapport::grid::format_hours;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::app::App;

use super::widgets::{cell_display, shade_style, truncate, CELL_WIDTH};

const LABEL_WIDTH: usize = 26;
const TOTAL_WIDTH: usize = 9;

pub fn render_grid_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let (start, end) = app.granularity.period(app.anchor);
    let title = format!(
        " {} {} - {} ",
        app.granularity.as_str(),
        start,
        end
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (rows, cols) = app.grid_dims();
    if rows == 0 || cols == 0 {
        frame.render_widget(
            Paragraph::new("No report loaded (press r to fetch)")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    // Horizontal scroll: keep the cursor's day column in view.
    let slot = CELL_WIDTH + 1;
    let max_cols = ((inner.width as usize)
        .saturating_sub(LABEL_WIDTH + TOTAL_WIDTH)
        / slot)
        .max(1)
        .min(cols);
    if app.grid.cursor_col < app.grid.col_offset {
        app.grid.col_offset = app.grid.cursor_col;
    }
    if app.grid.cursor_col >= app.grid.col_offset + max_cols {
        app.grid.col_offset = app.grid.cursor_col + 1 - max_cols;
    }
    app.grid.col_offset = app.grid.col_offset.min(cols - max_cols);
    let visible = app.grid.col_offset..(app.grid.col_offset + max_cols);

    let Some(report) = app.report.as_ref() else {
        return;
    };
    let mut lines: Vec<Line> = Vec::new();

    // Day header
    let mut header = vec![Span::styled(
        format!("{:<LABEL_WIDTH$}", "Task"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for day in &report.days[visible.clone()] {
        let label = day.date.format("%a %d").to_string();
        let style = shade_style(cell_shade(day, false)).add_modifier(Modifier::BOLD);
        header.push(Span::styled(format!("{:>CELL_WIDTH$} ", label), style));
    }
    header.push(Span::styled(
        format!("{:>TOTAL_WIDTH$}", "Total"),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(header));

    // One line per task row
    for (r, row) in report.tasks.iter().enumerate() {
        let focused_row = r == app.grid.cursor_row;
        let label = truncate(
            &format!("{} / {}", row.task.account.name, row.task.name),
            LABEL_WIDTH - 1,
        );
        let label_style = if focused_row {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(
            format!("{label:<LABEL_WIDTH$}"),
            label_style,
        )];

        for (c, entry) in row.entries.iter().enumerate() {
            if !visible.contains(&c) {
                continue;
            }
            let focused = focused_row && c == app.grid.cursor_col;
            let editing = focused && app.grid.editing;
            let key = (entry.task_contributor_id.clone(), entry.day.date);
            let editor = app.grid.editors.get(&key);

            let text = match editor {
                Some(editor) => editor.input().to_string(),
                None => entry.hours.map(format_hours).unwrap_or_default(),
            };

            let mut style = shade_style(cell_shade(&entry.day, entry.closed));
            if editor.is_some_and(|e| e.has_field_error()) {
                style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
            } else if editor.is_some_and(|e| e.is_dirty()) {
                style = style.fg(Color::Yellow);
            }
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(cell_display(&text, editing), style));
            spans.push(Span::raw(" "));
        }

        let total = row.total_hours();
        let total_text = if total > 0.0 {
            format_hours(total)
        } else {
            String::new()
        };
        spans.push(Span::styled(
            format!("{total_text:>TOTAL_WIDTH$}"),
            Style::default().fg(Color::Cyan),
        ));
        lines.push(Line::from(spans));
    }

    // Per-day totals
    let mut totals = vec![Span::styled(
        format!("{:<LABEL_WIDTH$}", "Total"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for c in visible {
        let total = report.day_total(c);
        let text = if total > 0.0 {
            format_hours(total)
        } else {
            String::new()
        };
        totals.push(Span::styled(
            format!("{text:>CELL_WIDTH$} "),
            Style::default().fg(Color::Cyan),
        ));
    }
    totals.push(Span::styled(
        format!("{:>TOTAL_WIDTH$}", format_hours(report.total_hours())),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(totals));

    frame.render_widget(Paragraph::new(lines), inner);
}
