/// Error types for catalog I/O and the editor collaborators.
///
/// Failing to find a message is never an error: parsing, navigation and
/// search report absence with `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Reading a catalog or walking the workspace failed
    Io(String),
    /// A line index outside the document was requested
    InvalidLine(String),
    /// A source reference pattern could not be compiled
    Reference(String),
    /// The statistics tool could not be run
    Statistics(String),
    /// Settings could not be resolved
    Config(String),
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::Io(msg) => write!(f, "I/O error: {}", msg),
            NavError::InvalidLine(msg) => write!(f, "Invalid line: {}", msg),
            NavError::Reference(msg) => write!(f, "Reference error: {}", msg),
            NavError::Statistics(msg) => write!(f, "Statistics error: {}", msg),
            NavError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for NavError {}

/// Result type for fallible catalog operations
pub type NavResult<T> = Result<T, NavError>;
