use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::{act, Action, Command},
    components::{help::Help, message::MessageBox},
    config::{Config, GameSettings},
    constants::{home, HEIGHT, WIDTH},
    pages::{game::GamePage, home::HomePage, settings::SettingsPage, Page, PageId},
    tui,
    utils::version,
};

/// Dialogs drawn over the active page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Version,
}

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    overlay: Option<Overlay>,
    pages: Vec<Box<dyn Page>>,
    active_page_index: usize,
    settings_return: PageId,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, seed: Option<u64>) -> Result<Self> {
        let config = Config::new()?;

        let home_page = HomePage::new()?;
        let game_page = GamePage::new(seed);
        let settings_page = SettingsPage::new();

        let mut app = Self {
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            overlay: None,
            config,
            pages: vec![Box::new(home_page), Box::new(game_page), Box::new(settings_page)],
            active_page_index: 0,
            settings_return: PageId::Home,
        };
        app.register_pages(None)?;
        Ok(app)
    }

    fn register_pages(&mut self, action_tx: Option<UnboundedSender<Action>>) -> Result<()> {
        for page in self.pages.iter_mut() {
            page.register_keymap(&self.config.keybindings.pages)?;
            if let Some(tx) = &action_tx {
                page.register_action_handler(tx.clone())?;
            }
            page.register_config_handler(self.config.clone())?;
            page.init()?;
        }
        Ok(())
    }

    pub fn active_page_id(&self) -> PageId {
        self.pages[self.active_page_index].id()
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    fn get_active_page(&mut self) -> &mut Box<dyn Page> {
        &mut self.pages[self.active_page_index]
    }

    fn set_active_page(&mut self, id: PageId) {
        let Some(index) = self.pages.iter().position(|page| page.id() == id) else {
            error!("No page registered for {id}");
            return;
        };
        if index == self.active_page_index {
            return;
        }
        debug!(from = %self.active_page_id(), to = %id, "switching page");
        self.pages[self.active_page_index].pause();
        self.active_page_index = index;
        self.pages[index].resume();
    }

    fn apply_settings(&mut self, settings: &GameSettings) -> Result<()> {
        info!(gravity = settings.gravity, pipe_speed = settings.pipe_speed, "applying settings");
        for page in self.pages.iter_mut() {
            page.apply_settings(settings)?;
        }
        Ok(())
    }

    /// Looks up a key in the global bindings first, then in the active page's bindings.
    fn map_key(&mut self, key: crossterm::event::KeyEvent) -> Option<Action> {
        if let Some(action) = self.config.keybindings.global.get(&key) {
            return Some(action.clone());
        }
        if self.overlay.is_some() {
            return None;
        }
        let page_id = self.active_page_id();
        self.config.keybindings.pages.get(&page_id).and_then(|keymap| keymap.get(&key)).cloned()
    }

    /// Applies the app-level part of an action, then hands it to the active page.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match &action.command {
            Command::Quit => self.should_quit = true,
            Command::Suspend => self.should_suspend = true,
            Command::Resume => self.should_suspend = false,
            Command::Error(message) => error!("{message}"),
            Command::ToggleShowHelp => {
                self.overlay = if self.overlay == Some(Overlay::Help) { None } else { Some(Overlay::Help) };
            },
            Command::ShowVersion => self.overlay = Some(Overlay::Version),
            Command::Back => {
                if self.overlay.take().is_none() {
                    match self.active_page_id() {
                        PageId::Settings => self.set_active_page(self.settings_return),
                        PageId::Game => self.set_active_page(PageId::Home),
                        PageId::Home => {},
                    }
                }
            },
            Command::StartGame => {
                self.overlay = None;
                self.set_active_page(PageId::Game);
            },
            Command::OpenSettings => {
                self.overlay = None;
                let current = self.active_page_id();
                if current != PageId::Settings {
                    self.settings_return = current;
                    self.set_active_page(PageId::Settings);
                }
            },
            Command::CloseSettings => self.set_active_page(self.settings_return),
            Command::SaveSettings(settings) => {
                self.apply_settings(settings)?;
                self.set_active_page(self.settings_return);
            },
            _ => {},
        }

        if self.overlay.is_none() || action.command == Command::Tick {
            return self.get_active_page().update(action);
        }
        Ok(None)
    }

    fn new_tui(&self) -> Result<tui::Tui> {
        let mut tui = tui::Tui::new()?.mouse(true);
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        Ok(tui)
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.new_tui()?;
        tui.enter()?;

        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
        }
        info!("{} started", env!("CARGO_PKG_NAME"));

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(act!(Command::Quit))?,
                    tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
                    tui::Event::Render => action_tx.send(act!(Command::Render))?,
                    tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(x, y)))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = self.map_key(key) {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action)?;
                        }
                    },
                    _ => {},
                }
                if self.overlay.is_none() {
                    if let Some(action) = self.get_active_page().handle_events(Some(e))? {
                        action_tx.send(action)?;
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action.command != Command::Tick && action.command != Command::Render {
                    log::debug!("{:?}", action.command);
                }
                match action.command {
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Command::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    _ => {},
                }
                if let Some(action) = self.update(action)? {
                    action_tx.send(action)?
                }
            }
            if self.should_suspend {
                self.get_active_page().pause();
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui = self.new_tui()?;
                tui.enter()?;
                self.get_active_page().resume();
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("{} stopped", env!("CARGO_PKG_NAME"));
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::Black));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Err(e) = self.get_active_page().draw(f, area) {
                let _ = action_tx.send(act!(Command::Error(format!("Failed to draw: {:?}", e))));
            }

            match self.overlay {
                Some(Overlay::Help) => self.draw_help(f, area),
                Some(Overlay::Version) => f.render_widget(MessageBox::new(home::VERSION_TITLE, &version()), area),
                None => {},
            }
        })?;

        Ok(())
    }

    fn draw_help(&mut self, f: &mut Frame<'_>, rect: Rect) {
        let active_page_id = self.active_page_id();
        let page_keybindings = self.config.keybindings.pages.get(&active_page_id).cloned().unwrap_or_default();
        let help = Help::new(
            home::HELP_TEXT,
            vec![
                ("Global".to_string(), self.config.keybindings.global.clone()),
                (active_page_id.to_string(), page_keybindings),
            ],
        );

        f.render_widget(help, rect);
    }
}
