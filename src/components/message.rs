use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const HPADDING: u16 = 2;
const VPADDING: u16 = 1;

/// A centered dialog sized to its text.
#[derive(Debug, Clone)]
pub struct MessageBox {
    title: String,
    lines: Vec<String>,
}

impl MessageBox {
    pub fn new(title: impl Into<String>, text: &str) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        MessageBox { title: title.into(), lines }
    }

    /// Outer size including border and padding.
    pub fn size(&self) -> (u16, u16) {
        let text_width = self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let width = text_width.max(self.title.chars().count()) as u16 + (HPADDING + 1) * 2;
        let height = self.lines.len() as u16 + (VPADDING + 1) * 2;
        (width, height)
    }
}

impl Widget for MessageBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.size();
        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(ratatui::layout::Flex::Center).areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)]).flex(ratatui::layout::Flex::Center).areas(area);

        Clear.render(area, buf);
        Block::default()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().bold().fg(Color::Cyan))
            .render(area, buf);

        let area = area.inner(Margin { horizontal: HPADDING + 1, vertical: VPADDING + 1 });
        let lines = self.lines.into_iter().map(Line::from).collect::<Vec<_>>();
        Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_size_fits_text() {
        let message = MessageBox::new("Version", "flappy-rs v0.5.0\n\nConfig directory: /tmp");
        assert_eq!(message.size(), (22 + 6, 3 + 4));
    }

    #[test]
    fn test_render_shows_title_and_text() {
        let message = MessageBox::new("Help", "flap");
        let area = Rect::new(0, 0, 20, 9);
        let mut buf = Buffer::empty(area);
        message.render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect();
        assert!(rows.iter().any(|row| row.contains("Help")));
        assert!(rows.iter().any(|row| row.contains("flap")));
    }
}
