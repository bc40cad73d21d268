/// Error types for the xrm library
use std::fmt;

/// Result type alias for resource database operations
pub type Result<T> = std::result::Result<T, XrmError>;

/// Main error type for resource database operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrmError {
    /// The input could not be parsed into an entry or query
    MalformedSpecifier(String),

    /// Query name and class have a different number of components
    LengthMismatch(String),

    /// I/O errors
    Io(String),

    /// Too many nested #include directives (include cycle)
    IncludeDepthExceeded(String),
}

impl fmt::Display for XrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrmError::MalformedSpecifier(msg) => write!(f, "Malformed specifier: {}", msg),
            XrmError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            XrmError::Io(msg) => write!(f, "I/O error: {}", msg),
            XrmError::IncludeDepthExceeded(msg) => {
                write!(f, "Include depth exceeded: {}", msg)
            }
        }
    }
}

impl std::error::Error for XrmError {}

impl From<std::io::Error> for XrmError {
    fn from(err: std::io::Error) -> Self {
        XrmError::Io(err.to_string())
    }
}
