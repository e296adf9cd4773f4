use std::collections::HashMap;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, HomeAction},
    config::PageKeyBindings,
    constants::home::TITLE_TEXT,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OptionItem {
    Start,
    Settings,
    Help,
    Version,
    Quit,
}

impl OptionItem {
    fn command(self) -> Command {
        match self {
            OptionItem::Start => Command::StartGame,
            OptionItem::Settings => Command::OpenSettings,
            OptionItem::Help => Command::ToggleShowHelp,
            OptionItem::Version => Command::ShowVersion,
            OptionItem::Quit => Command::Quit,
        }
    }
}

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    options: Vec<(OptionItem, &'static str)>,
    #[builder(default)]
    selected_option_index: usize,
}

impl HomePage {
    pub fn new() -> Result<Self> {
        let page = HomePageBuilder::default()
            .options(vec![
                (OptionItem::Start, "Start"),
                (OptionItem::Settings, "Settings"),
                (OptionItem::Help, "Help"),
                (OptionItem::Version, "Version"),
                (OptionItem::Quit, "Quit"),
            ])
            .build()?;
        Ok(page)
    }

    pub fn selected(&self) -> Option<OptionItem> {
        self.options.get(self.selected_option_index).map(|(item, _)| *item)
    }

    pub fn up(&mut self) {
        self.selected_option_index = self.selected_option_index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected_option_index + 1 < self.options.len() {
            self.selected_option_index += 1;
        }
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action.state != ActionState::Start {
            return Ok(None);
        }
        if let Command::Home(command) = action.command {
            match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => return Ok(self.selected().map(|item| act!(item.command()))),
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);

        let title_lines: Vec<&str> = TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let num_title_lines = title_lines.len() as u16;

        let num_options = self.options.len() as u16;
        let option_height = num_options * 2 - 1;

        let [title_area, option_area] =
            Layout::vertical(vec![Constraint::Length(num_title_lines), Constraint::Length(option_height)])
                .flex(layout::Flex::SpaceAround)
                .areas(rect);

        // Draw title
        let lines = title_lines.iter().map(|line| Line::from(*line)).collect::<Vec<_>>();
        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center);
        f.render_widget(paragraph, title_area);

        // Draw options
        let max_option_len = self.options.iter().map(|(_, title)| title.len()).max().unwrap_or(0) as u16;
        let [option_area] = Layout::horizontal(vec![Constraint::Length(max_option_len + (2 * 2))])
            .flex(layout::Flex::SpaceAround)
            .areas(option_area);

        let mut lines = Vec::with_capacity(self.options.len() * 2);
        for (index, (_, title)) in self.options.iter().enumerate() {
            if index > 0 {
                lines.push(Line::from(""));
            }
            let padded = format!("  {title:<width$}  ", width = max_option_len as usize);
            let style = if index == self.selected_option_index {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default()
            };
            lines.push(Line::from(padded).style(style));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Left);
        f.render_widget(paragraph, option_area);

        Ok(())
    }
}
