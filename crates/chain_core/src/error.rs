use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Chain holder not initialized")]
    NotInitialized,

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ChainError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ChainError::InvalidConfig(_)
                | ChainError::UnknownStrategy(_)
                | ChainError::Json(_)
                | ChainError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
