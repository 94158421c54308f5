pub mod model_v1;
pub mod samples;
pub mod screens;
pub mod settings;

pub use formbit::*;

#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    #[error("app error: {0}")]
    App(#[from] AppError),
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}
