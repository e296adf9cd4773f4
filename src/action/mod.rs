mod game;
mod home;
mod settings;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;
pub use crate::action::home::HomeAction;
pub use crate::action::settings::SettingsAction;
use crate::config::GameSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    ShowVersion,
    Back,
    StartGame,
    OpenSettings,
    CloseSettings,
    SaveSettings(GameSettings),
    // Page actions
    Home(HomeAction),
    Game(GameAction),
    Settings(SettingsAction),
}

impl Command {
    /// Name shown in the keybinding table.
    pub fn describe(&self) -> String {
        match self {
            Command::Home(action) => action.to_string(),
            Command::Game(action) => action.to_string(),
            Command::Settings(action) => action.to_string(),
            command => command.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

macro_rules! act {
    ($command:expr) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
}

pub(crate) use act;
