use thiserror::Error;
use varwin_core::errors::WindowError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("max_bp is not set and could not be derived from the inputs")]
    MissingMaxBp,
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
