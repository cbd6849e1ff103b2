use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View, VIEW_ORDER};

mod grid_view;
mod list_view;
pub(crate) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tab_bar(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Grid => grid_view::render_grid_view(frame, app, body),
        View::Accounts => list_view::render_accounts(frame, app, body),
        View::Tasks => list_view::render_tasks(frame, app, body),
        View::Users => list_view::render_users(frame, app, body),
        View::SpecialDays => list_view::render_special_days(frame, app, body),
    }

    render_status(frame, root[2], app);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    for view in VIEW_ORDER {
        let style = if view == app.current_view {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", view.title()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &mut App) {
    let contextual_status = app.get_contextual_status();
    let status_text = app
        .status
        .message()
        .unwrap_or(&contextual_status)
        .to_string();

    let status_lower = status_text.to_lowercase();
    let is_error = status_lower.contains("error")
        || status_lower.contains("warning")
        || status_lower.contains("closed")
        || status_lower.contains("invalid");
    let is_success = status_lower.contains("saved")
        || status_lower.contains("loaded")
        || status_lower.contains("success");

    let (border_style, text_color) = if is_error {
        (Style::default().fg(Color::Red), Color::Red)
    } else if is_success {
        (Style::default().fg(Color::Green), Color::Green)
    } else {
        (Style::default().fg(Color::White), Color::White)
    };

    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut text_area = inner;
    if app.is_loading && inner.width > 2 {
        let throbber_area = Rect {
            x: inner.x,
            y: inner.y,
            width: 1,
            height: 1,
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
        text_area = Rect {
            x: inner.x + 2,
            y: inner.y,
            width: inner.width.saturating_sub(2),
            height: inner.height,
        };
    }

    frame.render_widget(
        Paragraph::new(status_text).style(Style::default().fg(text_color)),
        text_area,
    );
}
