pub mod game;
pub mod home;

pub const WIDTH: u16 = 64;
pub const HEIGHT: u16 = 36;
