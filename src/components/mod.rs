pub mod help;
pub mod message;
pub mod slider;
