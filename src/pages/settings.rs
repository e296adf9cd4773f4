use std::collections::HashMap;

use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, SettingsAction},
    components::slider::Slider,
    config::{Config, GameSettings, PageKeyBindings},
};

const SPEED_RANGE: (f64, f64) = (-10.0, 0.0);
const GRAVITY_RANGE: (f64, f64) = (0.0, 5.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Field {
    Speed,
    Gravity,
    Save,
    Close,
}

const FIELDS: [Field; 4] = [Field::Speed, Field::Gravity, Field::Save, Field::Close];

/// Draft editor for the runtime game settings. Nothing is applied until Save.
pub struct SettingsPage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    applied: GameSettings,
    speed: Slider,
    gravity: Slider,
    focus: usize,
}

impl SettingsPage {
    pub fn new() -> Self {
        let mut page = SettingsPage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            applied: GameSettings::default(),
            speed: Slider::new("Pipe speed", SPEED_RANGE.0, SPEED_RANGE.1),
            gravity: Slider::new("Gravity", GRAVITY_RANGE.0, GRAVITY_RANGE.1),
            focus: 0,
        };
        page.load_draft();
        page
    }

    pub fn draft(&self) -> GameSettings {
        GameSettings { gravity: self.gravity.value(), pipe_speed: self.speed.value() }
    }

    fn load_draft(&mut self) {
        self.speed.set(self.applied.pipe_speed);
        self.gravity.set(self.applied.gravity);
        self.focus = 0;
    }

    fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    fn up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    fn down(&mut self) {
        self.focus = (self.focus + 1).min(FIELDS.len() - 1);
    }

    fn slider_mut(&mut self) -> Option<&mut Slider> {
        match self.focused() {
            Field::Speed => Some(&mut self.speed),
            Field::Gravity => Some(&mut self.gravity),
            Field::Save | Field::Close => None,
        }
    }

    fn select(&mut self) -> Option<Action> {
        match self.focused() {
            Field::Save => {
                debug!(settings = ?self.draft(), "saving settings");
                Some(act!(Command::SaveSettings(self.draft())))
            },
            Field::Close => Some(act!(Command::CloseSettings)),
            Field::Speed | Field::Gravity => {
                self.down();
                None
            },
        }
    }

    fn button(&self, field: Field, label: &'static str) -> Paragraph<'static> {
        let style =
            if self.focused() == field { Style::default().bg(Color::Cyan).fg(Color::Black) } else { Style::default() };
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
    }
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for SettingsPage {
    fn id(&self) -> PageId {
        PageId::Settings
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

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.applied = config.game.settings();
        self.load_draft();
        Ok(())
    }

    fn resume(&mut self) {
        self.load_draft();
    }

    fn apply_settings(&mut self, settings: &GameSettings) -> Result<()> {
        self.applied = *settings;
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action.state != ActionState::Start {
            return Ok(None);
        }
        if let Command::Settings(command) = action.command {
            match command {
                SettingsAction::Up => self.up(),
                SettingsAction::Down => self.down(),
                SettingsAction::Decrease => {
                    if let Some(slider) = self.slider_mut() {
                        slider.decrease();
                    }
                },
                SettingsAction::Increase => {
                    if let Some(slider) = self.slider_mut() {
                        slider.increase();
                    }
                },
                SettingsAction::Select => return Ok(self.select()),
            }
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        f.render_widget(Clear, area);

        let [area] = Layout::horizontal([Constraint::Length(40)]).flex(layout::Flex::Center).areas(area);
        let [title_area, speed_area, gravity_area, button_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .flex(layout::Flex::Center)
        .spacing(1)
        .areas(area);

        let title = Paragraph::new("Settings").style(Style::default().bold()).alignment(Alignment::Center);
        f.render_widget(title, title_area);

        f.render_widget(self.speed.widget(self.focused() == Field::Speed), speed_area);
        f.render_widget(self.gravity.widget(self.focused() == Field::Gravity), gravity_area);

        let [save_area, close_area] = Layout::horizontal([Constraint::Length(12), Constraint::Length(12)])
            .flex(layout::Flex::SpaceAround)
            .areas(button_area);
        f.render_widget(self.button(Field::Save, "Save"), save_area);
        f.render_widget(self.button(Field::Close, "Close"), close_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(page: &mut SettingsPage, command: SettingsAction) -> Option<Action> {
        page.update(act!(Command::Settings(command))).unwrap()
    }

    #[test]
    fn test_draft_starts_from_defaults() {
        let page = SettingsPage::new();
        assert_eq!(page.draft(), GameSettings { gravity: 1.5, pipe_speed: -5.0 });
    }

    #[test]
    fn test_save_sends_draft() {
        let mut page = SettingsPage::new();
        press(&mut page, SettingsAction::Increase);
        press(&mut page, SettingsAction::Increase);
        press(&mut page, SettingsAction::Down);
        press(&mut page, SettingsAction::Decrease);
        press(&mut page, SettingsAction::Down);

        let saved = press(&mut page, SettingsAction::Select);
        assert_eq!(saved, Some(act!(Command::SaveSettings(GameSettings { gravity: 1.4, pipe_speed: -4.8 }))));
    }

    #[test]
    fn test_close_discards_draft() {
        let mut page = SettingsPage::new();
        press(&mut page, SettingsAction::Decrease);
        for _ in 0..3 {
            press(&mut page, SettingsAction::Down);
        }
        assert_eq!(press(&mut page, SettingsAction::Select), Some(act!(Command::CloseSettings)));

        page.resume();
        assert_eq!(page.draft(), GameSettings::default());
    }

    #[test]
    fn test_sliders_respect_ranges() {
        let mut page = SettingsPage::new();
        for _ in 0..100 {
            press(&mut page, SettingsAction::Increase);
        }
        press(&mut page, SettingsAction::Down);
        for _ in 0..100 {
            press(&mut page, SettingsAction::Decrease);
        }
        assert_eq!(page.draft(), GameSettings { gravity: 0.0, pipe_speed: 0.0 });
    }

    #[test]
    fn test_reopen_shows_applied_values() -> Result<()> {
        let mut page = SettingsPage::new();
        page.apply_settings(&GameSettings { gravity: 2.5, pipe_speed: -7.0 })?;
        page.resume();
        assert_eq!(page.draft(), GameSettings { gravity: 2.5, pipe_speed: -7.0 });
        Ok(())
    }
}
