//! Error types for the commit message pipeline
//!
//! Each stage of the pipeline has its own error enum; [`AppError`] rolls
//! them up so the CLI boundary can map every failure to a stable exit code.

use thiserror::Error;

/// Top-level error returned to the CLI boundary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Git error: {0}")]
    Git(#[from] GitError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

impl AppError {
    /// Process exit code for this error kind
    ///
    /// 2 = configuration, 3 = git, 4 = network/API, 5 = encoding.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Git(_) => 3,
            AppError::Api(_) => 4,
            AppError::Encoding(_) => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("failed to write config file '{0}': {1}")]
    FileWrite(String, #[source] std::io::Error),
    #[error("failed to parse config file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    TomlSerialize(#[source] toml::ser::Error),
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("home directory could not be determined")]
    NoHomeDir,
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git executable not found, make sure git is installed and in PATH")]
    NotFound,
    #[error("not a git repository: {0}")]
    NotARepository(String),
    #[error("path does not exist: {0}")]
    PathNotFound(String),
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API key not set, configure it with --api-key")]
    MissingApiKey,
    #[error("API key rejected (HTTP 401), check your configured key")]
    Unauthorized,
    #[error("rate limited by the API (HTTP 429), try again later")]
    RateLimited,
    #[error("API server error (HTTP {status})")]
    ServerError { status: u16 },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected API response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("message contains characters not representable in {encoding}")]
    Unrepresentable { encoding: &'static str },
    #[error("failed to write to stdout: {0}")]
    Io(#[from] std::io::Error),
}
