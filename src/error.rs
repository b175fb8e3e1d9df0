use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("container with id \"{0}\" not found")]
    ContainerNotFound(String),

    #[error("no global window object")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("unable to set up canvas: {0}")]
    Canvas(String),

    #[error("unable to schedule animation frame: {0}")]
    Scheduler(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options object: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("unrecognized color syntax `{0}`")]
    Syntax(String),

    #[error("color component `{0}` out of range")]
    Component(String),
}
