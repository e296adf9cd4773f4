use ratatui::style::Color;

pub const FIELD_WIDTH: f64 = 400.0;
pub const FIELD_HEIGHT: f64 = 600.0;

pub const GRAVITY: f64 = 1.5;
pub const FLAP_IMPULSE: f64 = -10.0;

pub const BIRD_X: f64 = 50.0;
pub const BIRD_Y: f64 = 50.0;
pub const BIRD_SIZE: f64 = 40.0;

pub const PIPE_SPEED: f64 = -5.0;
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_MIN_HEIGHT: i32 = 100;
pub const PIPE_MAX_HEIGHT: i32 = 400;

pub const TICK_INTERVAL_MS: u64 = 30;
pub const SPAWN_INTERVAL_MS: u64 = 2500;
pub const SPAWN_RETRY_MS: u64 = 100;

// Wall-clock gaps longer than this are not replayed (e.g. after a suspend)
pub const MAX_CATCH_UP_MS: u64 = 250;

// Terminal cells used for the play field, 2x4 braille dots per cell keeps the 2:3 aspect
pub const CANVAS_COLS: u16 = 40;
pub const CANVAS_ROWS: u16 = 30;

pub const SKY_COLOR: Color = Color::LightBlue;
pub const PIPE_COLOR: Color = Color::Green;
pub const BIRD_COLOR: Color = Color::Yellow;
pub const SCORE_COLOR: Color = Color::White;
pub const GAME_OVER_COLOR: Color = Color::Red;
