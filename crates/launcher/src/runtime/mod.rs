mod app;
mod config;
mod logging;

pub use app::run_from_env;
