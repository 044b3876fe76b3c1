use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Terminal I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Failed to read .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}
