use rapport::domain::SpecialDayKind;
use rapport::sort::SortKey;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::app::{App, DisplayName, EntityList};

use super::widgets::{sort_marker_char, truncate};

pub fn render_accounts(frame: &mut Frame, app: &mut App, area: Rect) {
    render_entities(
        frame,
        area,
        &app.accounts,
        &crate::app::ACCOUNT_COLUMNS,
        "Accounts",
        |account| vec![account.name.clone(), account.status.as_str().to_string()],
    );
}

pub fn render_tasks(frame: &mut Frame, app: &mut App, area: Rect) {
    render_entities(
        frame,
        area,
        &app.tasks,
        &crate::app::TASK_COLUMNS,
        "Tasks",
        |task| {
            vec![
                task.name.clone(),
                task.account.name.clone(),
                task.status.as_str().to_string(),
            ]
        },
    );
}

pub fn render_users(frame: &mut Frame, app: &mut App, area: Rect) {
    render_entities(
        frame,
        area,
        &app.users,
        &crate::app::USER_COLUMNS,
        "Users",
        |user| {
            vec![
                user.name.clone(),
                user.email.clone().unwrap_or_else(|| "-".to_string()),
                user.status.as_str().to_string(),
            ]
        },
    );
}

pub fn render_special_days(frame: &mut Frame, app: &mut App, area: Rect) {
    render_entities(
        frame,
        area,
        &app.special_days,
        &crate::app::SPECIAL_DAY_COLUMNS,
        "Special Days",
        |day| {
            let kind = match day.kind {
                SpecialDayKind::MajorHoliday => "Major holiday",
                SpecialDayKind::HalfDay => "Half day",
            };
            vec![day.date.to_string(), day.name.clone(), kind.to_string()]
        },
    );
}

fn column_width(idx: usize) -> usize {
    if idx == 0 {
        32
    } else {
        18
    }
}

fn render_entities<R, F>(
    frame: &mut Frame,
    area: Rect,
    list: &EntityList<R, F>,
    columns: &[(&str, F)],
    title: &str,
    row_cells: impl Fn(&R) -> Vec<String>,
) where
    R: SortKey<Field = F> + Clone + DisplayName,
    F: Copy + Eq,
{
    let visible = list.visible();
    let mut title_text = format!(" {} ({}) ", title, visible.len());
    if list.show_inactive {
        title_text.push_str("[incl. inactive] ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title_text)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    // Filter input
    let filter_line = if list.filter_focused {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(list.filter.value.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if !list.filter.is_empty() {
        Line::from(format!("/ {}", list.filter.value))
    } else {
        Line::from(Span::styled(
            "press / to filter",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(filter_line), chunks[0]);

    // Column headers with sort markers
    let mut header = Vec::new();
    for (idx, (label, field)) in columns.iter().enumerate() {
        let marker = sort_marker_char(list.sort.marker(*field));
        let text = format!("[{}] {}{}", idx + 1, label, marker);
        header.push(Span::styled(
            format!("{:<width$}", text, width = column_width(idx)),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[1]);

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to show").style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|row| {
            let mut text = String::new();
            for (idx, cell) in row_cells(row).iter().enumerate() {
                let width = column_width(idx);
                text.push_str(&format!(
                    "{:<width$}",
                    truncate(cell, width.saturating_sub(2)),
                ));
            }
            ListItem::new(text)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(list.selected.min(visible.len() - 1)));
    let widget = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(widget, chunks[2], &mut state);
}
