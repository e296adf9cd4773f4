use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

/// How-to-play text followed by one keybinding table per group.
#[derive(Debug)]
pub struct Help {
    text: String,
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(text: &str, keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .filter(|(_, action)| action.state == ActionState::Start)
                    .map(|(event, action)| (key_event_to_string(&event), action.command.describe()))
                    .collect();
                keybindings.sort();
                (group_name, keybindings)
            })
            .collect();

        Self {
            text: text.to_string(),
            keybinding_groups: groups,
            column_spacing: 5,
            margin_vertical: 1,
            margin_horizontal: 2,
        }
    }

    pub fn groups(&self) -> &[(String, Vec<(String, String)>)] {
        &self.keybinding_groups
    }

    fn render_group(
        &self,
        area: Rect,
        buf: &mut Buffer,
        group_name: &str,
        keybindings: &[(String, String)],
        key_length: u16,
        val_length: u16,
    ) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();
        let widths = [Constraint::Length(key_length), Constraint::Min(val_length)];

        let table = Table::new(rows, widths)
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(ratatui::widgets::Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let key_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(key, _)| key.len()))
            .max()
            .unwrap_or(0) as u16;
        let val_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(_, val)| val.len()))
            .max()
            .unwrap_or(0) as u16;

        // + column_spacing + margin*2 + border
        let table_width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        let width = table_width.max(self.text.len() as u16 + 2).min(area.width);

        let mut heights = vec![Constraint::Length(3)];
        heights.extend(self.keybinding_groups.iter().map(|(_, keybindings)| {
            // + margin*2 + header + border
            Constraint::Length(keybindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2)
        }));

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(ratatui::layout::Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(ratatui::layout::Flex::Center).split(area);

        Clear.render(areas[0], buf);
        Paragraph::new(Line::from(self.text.as_str()))
            .alignment(Alignment::Center)
            .block(Block::new().borders(Borders::ALL).border_type(BorderType::Rounded))
            .render(areas[0], buf);

        for (i, (group_name, keybindings)) in self.keybinding_groups.iter().enumerate() {
            self.render_group(areas[i + 1], buf, group_name, keybindings, key_length, val_length);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::Config, constants::home::HELP_TEXT, pages::PageId};

    #[test]
    fn test_new_help() -> color_eyre::eyre::Result<()> {
        let config = Config::new()?;
        let game = config.keybindings.pages.get(&PageId::Game).cloned().unwrap_or_default();
        let groups = vec![("Global".to_string(), config.keybindings.global), ("Game".to_string(), game)];
        let help = Help::new(HELP_TEXT, groups);

        let (_, game_keys) = &help.groups()[1];
        assert!(game_keys.contains(&("Space".to_string(), "Flap".to_string())));
        assert!(game_keys.contains(&("Enter".to_string(), "Restart".to_string())));

        let (_, global_keys) = &help.groups()[0];
        assert!(global_keys.contains(&("Ctrl-c".to_string(), "Quit".to_string())));
        Ok(())
    }

    #[test]
    fn test_render_lists_commands() {
        let mut keys = PageKeyBindings::default();
        keys.insert(
            crate::config::parse_key_event("<space>").unwrap(),
            crate::action::act!(crate::action::Command::Game(crate::action::GameAction::Flap)),
        );
        let help = Help::new("Avoid the pipes.", vec![("Game".to_string(), keys)]);
        assert_eq!(help.groups()[0].1, vec![("Space".to_string(), "Flap".to_string())]);

        let area = Rect::new(0, 0, 40, 16);
        let mut buf = Buffer::empty(area);
        help.render(area, &mut buf);
        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect();
        assert!(rows.iter().any(|row| row.contains("Avoid the pipes.")));
        assert!(rows.iter().any(|row| row.contains("Flap")));
    }
}
