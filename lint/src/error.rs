use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Invalid settings in {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize output")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Position out of document: {0}")]
    Position(String),
}
