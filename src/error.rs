use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to establish or read the line source.
///
/// Every variant is reported to the user as `URL connection error`; the
/// variants only exist so logs can say what actually went wrong.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}': expected http, https or file")]
    UnsupportedScheme { scheme: String },

    #[error("Connection to '{url}' failed: {reason}")]
    Connection { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::YamlError(err.to_string())
    }
}
