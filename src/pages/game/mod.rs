mod bird;
mod object;
mod pipe;
mod scheduler;
mod session;
mod world;

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Circle, Context, Rectangle},
        Block, BorderType, Borders,
    },
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::{Frame, Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    config::{Config, GameSettings, PageKeyBindings},
    constants::game,
    pages::game::{
        object::Object,
        session::Session,
        world::{GameState, World},
    },
};

const GAME_OVER_TEXT: &str = "Game Over";
const RESTART_HINT: &str = "Press Enter to restart";

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    session: Session,
    seed: Option<u64>,
    canvas: Rect,
    last_tick: Option<Instant>,
}

impl GamePage {
    pub fn new(seed: Option<u64>) -> Self {
        GamePage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            session: Session::new(Default::default(), seed),
            seed,
            canvas: Rect::new(0, 0, 0, 0),
            last_tick: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.session.world().state
    }

    pub fn score(&self) -> u32 {
        self.session.world().score
    }

    fn start(&mut self) {
        self.session.start();
        self.last_tick = Some(Instant::now());
    }

    /// Feeds the wall time since the last call into the session, keeping sub-millisecond remainders.
    fn advance_clock(&mut self, now: Instant) {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };

        let elapsed = now.saturating_duration_since(last).as_millis() as u64;
        if elapsed > game::MAX_CATCH_UP_MS {
            debug!(elapsed, "dropping wall time beyond catch-up limit");
            self.session.advance(game::MAX_CATCH_UP_MS);
            self.last_tick = Some(now);
        } else {
            self.session.advance(elapsed);
            self.last_tick = Some(last + Duration::from_millis(elapsed));
        }
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        self.canvas.contains(Position::new(column, row))
    }

    fn paint(ctx: &mut Context<'_>, world: &World) {
        let height = world.config.field_height;

        for pipe in world.pipes.iter() {
            for segment in [&pipe.upper, &pipe.lower] {
                let b = segment.bounds();
                // canvas y grows upwards
                ctx.draw(&Rectangle {
                    x: b.left,
                    y: height - b.bottom,
                    width: b.width(),
                    height: b.height(),
                    color: game::PIPE_COLOR,
                });
            }
        }

        let (x, y) = world.bird.center();
        ctx.draw(&Circle { x, y: height - y, radius: world.bird.radius(), color: game::BIRD_COLOR });

        ctx.layer();

        let cell_width = world.config.field_width / f64::from(game::CANVAS_COLS);
        let cell_height = height / f64::from(game::CANVAS_ROWS);
        let centered = |text: &str| world.config.field_width / 2.0 - text.len() as f64 * cell_width / 2.0;

        let score = format!("Score: {}", world.score);
        let x = centered(&score);
        ctx.print(x, height - cell_height, Span::styled(score, Style::new().fg(game::SCORE_COLOR).bold()));

        if world.state == GameState::GameOver {
            let middle = height / 2.0;
            ctx.print(
                centered(GAME_OVER_TEXT),
                middle + cell_height,
                Span::styled(GAME_OVER_TEXT, Style::new().fg(game::GAME_OVER_COLOR).bold()),
            );
            ctx.print(
                centered(RESTART_HINT),
                middle - cell_height,
                Span::styled(RESTART_HINT, Style::new().fg(game::SCORE_COLOR)),
            );
        }
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
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
        self.session = Session::new(config.game, self.seed);
        Ok(())
    }

    fn pause(&mut self) {
        self.last_tick = None;
    }

    fn resume(&mut self) {
        self.last_tick = Some(Instant::now());
    }

    fn apply_settings(&mut self, settings: &GameSettings) -> Result<()> {
        self.session.apply_settings(*settings);
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self.contains(mouse.column, mouse.row) {
                return Ok(Some(act!(Command::Game(GameAction::Flap))));
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Tick => self.advance_clock(Instant::now()),
            Command::StartGame => self.start(),
            Command::Game(command) if action.state == ActionState::Start => match command {
                GameAction::Flap => self.session.flap(),
                GameAction::Restart => {
                    if self.state() != GameState::Running {
                        self.start();
                    }
                },
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [area] =
            Layout::vertical([Constraint::Length(game::CANVAS_ROWS + 2)]).flex(layout::Flex::Center).areas(area);
        let [area] =
            Layout::horizontal([Constraint::Length(game::CANVAS_COLS + 2)]).flex(layout::Flex::Center).areas(area);

        let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded);
        self.canvas = block.inner(area);

        let world = self.session.world();
        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .background_color(game::SKY_COLOR)
            .x_bounds([0.0, world.config.field_width])
            .y_bounds([0.0, world.config.field_height])
            .paint(|ctx| Self::paint(ctx, world));
        f.render_widget(canvas, area);

        Ok(())
    }
}
