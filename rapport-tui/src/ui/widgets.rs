use rapport::domain::CellShade;
use rapport::sort::SortMarker;
use ratatui::style::{Color, Modifier, Style};

/// Character budget of one grid cell (excluding the separator space).
pub const CELL_WIDTH: usize = 7;

/// Render cell text into its fixed slot. While typing, a block cursor
/// trails the input; overlong input shows its tail so the cursor stays
/// visible.
pub fn cell_display(text: &str, editing: bool) -> String {
    if editing {
        let budget = CELL_WIDTH - 1;
        let tail: String = if text.len() > budget {
            text.chars()
                .skip(text.chars().count().saturating_sub(budget))
                .collect()
        } else {
            text.to_string()
        };
        format!("{:<width$}", format!("{}█", tail), width = CELL_WIDTH)
    } else {
        let shown: String = text.chars().take(CELL_WIDTH).collect();
        format!("{:>width$}", shown, width = CELL_WIDTH)
    }
}

/// Background styling per cell classification.
pub fn shade_style(shade: CellShade) -> Style {
    match shade {
        CellShade::Weekday => Style::default(),
        CellShade::Weekend => Style::default().bg(Color::DarkGray),
        CellShade::Holiday => Style::default().bg(Color::LightRed).fg(Color::Black),
        CellShade::HalfDay => Style::default().bg(Color::LightYellow).fg(Color::Black),
        CellShade::Closed => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        CellShade::ClosedWeekend => Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Gray)
            .add_modifier(Modifier::DIM),
        CellShade::ClosedHoliday => Style::default()
            .bg(Color::Red)
            .fg(Color::Gray)
            .add_modifier(Modifier::DIM),
        CellShade::ClosedHalfDay => Style::default()
            .bg(Color::Yellow)
            .fg(Color::Gray)
            .add_modifier(Modifier::DIM),
    }
}

pub fn sort_marker_char(marker: SortMarker) -> char {
    match marker {
        SortMarker::Unsorted => ' ',
        SortMarker::Ascending => '↑',
        SortMarker::Descending => '↓',
    }
}

/// Truncate to `max` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let shown: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{shown}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_cell_shows_trailing_cursor() {
        assert_eq!(cell_display("7.5", true), "7.5█   ");
        assert_eq!(cell_display("", true), "█      ");
    }

    #[test]
    fn overlong_input_keeps_the_tail_visible() {
        let shown = cell_display("123456789", true);
        assert!(shown.ends_with('█'));
        assert!(shown.contains("456789"));
    }

    #[test]
    fn display_cell_right_aligns() {
        assert_eq!(cell_display("8", false), "      8");
    }
}
