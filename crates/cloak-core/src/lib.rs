pub mod camera;
pub mod config;
pub mod display;
pub mod prompt;
pub mod session;

pub use config::Config;
