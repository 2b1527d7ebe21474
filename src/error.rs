use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    ParseError { file: PathBuf, message: String },
    /// A route pattern that does not compile as a regex
    InvalidPattern { pattern: String, message: String },
    /// The requested api definition version is not one of the known dialects
    UnknownDialect(String),
    InvalidType { expr: String, message: String },
    InvalidBody(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ParseError { file, message } => {
                write!(f, "Parse error in {}: {}", file.display(), message)
            }
            Error::InvalidPattern { pattern, message } => {
                write!(f, "Invalid route pattern `{}`: {}", pattern, message)
            }
            Error::UnknownDialect(id) => {
                write!(f, "Unknown api_definition_version = {}", id)
            }
            Error::InvalidType { expr, message } => {
                write!(f, "Invalid type expression `{}`: {}", expr, message)
            }
            Error::InvalidBody(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        Error::ParseError {
            file: PathBuf::from("<signature>"),
            message: err.to_string(),
        }
    }
}
