use thiserror::Error;

#[derive(Error, Debug)]
pub enum JarvisError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Unknown prompt name: {0}")]
    UnknownPromptName(String),

    #[error("Custom prompt is empty")]
    EmptyCustomPrompt,

    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, JarvisError>;
