use std::fmt;

/// Comprehensive error types for url-validator operations.
///
/// These cover configuration-time faults only. A rejected URL is never an
/// error; it is reported as a validation [`Outcome`](crate::core::Outcome)
/// carrying a symbolic error key.
#[derive(Debug)]
pub enum UrlValidatorError {
    /// IO error (reading a configuration file, etc.)
    Io(std::io::Error),

    /// Configuration error (invalid option value)
    Config(String),

    /// Unknown transport adapter identifier
    UnknownAdapter(String),

    /// Unknown symbolic HTTP status name
    UnknownStatusName(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),
}

impl fmt::Display for UrlValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlValidatorError::Io(err) => write!(f, "IO error: {err}"),
            UrlValidatorError::Config(msg) => write!(f, "Configuration error: {msg}"),
            UrlValidatorError::UnknownAdapter(id) => write!(f, "Unknown transport adapter: {id}"),
            UrlValidatorError::UnknownStatusName(name) => {
                write!(f, "Unknown HTTP status name: {name}")
            }
            UrlValidatorError::Http(err) => write!(f, "HTTP error: {err}"),
            UrlValidatorError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for UrlValidatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UrlValidatorError::Io(err) => Some(err),
            UrlValidatorError::Http(err) => Some(err),
            UrlValidatorError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UrlValidatorError {
    fn from(err: std::io::Error) -> Self {
        UrlValidatorError::Io(err)
    }
}

impl From<reqwest::Error> for UrlValidatorError {
    fn from(err: reqwest::Error) -> Self {
        UrlValidatorError::Http(err)
    }
}

impl From<toml::de::Error> for UrlValidatorError {
    fn from(err: toml::de::Error) -> Self {
        UrlValidatorError::TomlParsing(err)
    }
}

/// Type alias for Results using UrlValidatorError
pub type Result<T> = std::result::Result<T, UrlValidatorError>;
