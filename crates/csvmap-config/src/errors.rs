use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration structure at '{path}': {message}")]
    InvalidStructure { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn structure(path: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidStructure {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
