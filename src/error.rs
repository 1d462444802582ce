use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request to {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid color '{0}'\n\n\
             Hint: Colors are written as hex strings, either #RRGGBB or #RRGGBBAA.\n\
             Example: \"#1C1E24FF\"")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0}")]
    Other(String),
}

/// Failure reported to every waiter of a resource request.
///
/// Cloned once per waiter, so it only carries owned, printable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Resource URL is empty")]
    EmptyKey,

    #[error("Failed to download {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Failed to decode {url}: {reason}")]
    DecodeFailed { url: String, reason: String },
}

impl LoadError {
    /// URL the failure belongs to, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            LoadError::EmptyKey => None,
            LoadError::FetchFailed { url, .. } | LoadError::DecodeFailed { url, .. } => Some(url),
        }
    }
}

/// Errors produced while turning fetched bytes into a cached payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("image data is corrupt: {0}")]
    Image(String),

    #[error("decoded image has no pixels")]
    EmptyImage,

    #[error("response body is empty")]
    EmptyBody,
}
