//! Counter view component.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::core::Region;

/// Brand colors
const ACCENT_COLOR: Color = Color::Rgb(77, 201, 176);
const LOADING_COLOR: Color = Color::Rgb(140, 140, 150);
const ERROR_COLOR: Color = Color::Rgb(220, 90, 90);
const HINT_COLOR: Color = Color::Rgb(100, 100, 110);

/// Height of the counter box including borders.
const BOX_HEIGHT: u16 = 7;

/// Maximum width of the counter box.
const BOX_WIDTH: u16 = 60;

/// Map a region class to its color.
///
/// Classes are space separated; the first known visual class wins.
#[must_use]
pub fn class_color(class: &str) -> Color {
    for name in class.split_whitespace() {
        match name {
            "loading" => return LOADING_COLOR,
            "success" => return ACCENT_COLOR,
            "error" => return ERROR_COLOR,
            _ => {}
        }
    }
    Color::Reset
}

/// Render the status and message regions centered in `area`, with a key hint footer.
pub fn render_counter(
    frame: &mut Frame,
    area: Rect,
    status: &Region,
    message: &Region,
    footer: &str,
) {
    if area.width < 10 || area.height < 3 {
        return;
    }

    let width = area.width.min(BOX_WIDTH);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height.saturating_sub(BOX_HEIGHT + 1) / 2;
    let height = BOX_HEIGHT.min(area.height);
    let box_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .title(" Visitor count ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(HINT_COLOR));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let status_style = Style::default()
        .fg(class_color(&status.class))
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(status.text.as_str(), status_style)))
            .alignment(Alignment::Center),
        rows[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            message.text.as_str(),
            Style::default().fg(class_color(&message.class)),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        rows[3],
    );

    let footer_y = box_area.y + box_area.height;
    if footer_y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(Span::styled(footer, Style::default().fg(HINT_COLOR)))
                .alignment(Alignment::Center),
            Rect::new(area.x, footer_y, area.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn region(text: &str, class: &str) -> Region {
        Region {
            text: text.to_string(),
            class: class.to_string(),
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn class_colors() {
        assert_eq!(class_color("counter loading"), LOADING_COLOR);
        assert_eq!(class_color("counter success"), ACCENT_COLOR);
        assert_eq!(class_color("error"), ERROR_COLOR);
        assert_eq!(class_color("counter"), Color::Reset);
        assert_eq!(class_color(""), Color::Reset);
    }

    #[test]
    fn renders_both_regions_and_footer() {
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_counter(
                    f,
                    area,
                    &region("42", "counter success"),
                    &region("count ok", "success"),
                    "r refresh  q quit",
                );
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("42"));
        assert!(text.contains("count ok"));
        assert!(text.contains("r refresh  q quit"));
        assert!(text.contains("Visitor count"));
    }

    #[test]
    fn tiny_area_renders_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(8, 2)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_counter(
                    f,
                    area,
                    &region("42", "counter success"),
                    &region("", ""),
                    "",
                );
            })
            .unwrap();

        assert!(!screen(&terminal).contains("42"));
    }
}
