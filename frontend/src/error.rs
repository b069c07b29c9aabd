use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("persistent storage is not available")]
    Unavailable,
    #[error("failed to read key {0:?} from storage")]
    Read(String),
    #[error("failed to write key {0:?} to storage")]
    Write(String),
    #[error("failed to serialize liked posts: {0}")]
    Serialize(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("no browser window to issue the request from")]
    NoWindow,
    #[error("could not build request: {0}")]
    Request(String),
    #[error("request did not complete: {0}")]
    Response(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid frontend config: {0}")]
    Parse(#[from] serde_json::Error),
}
