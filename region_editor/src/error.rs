use std::fmt;
use std::time::Duration;

/// Failures of the motion map codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The map does not hold exactly one digit per 4 grid cells.
    LengthMismatch { expected: usize, actual: usize },
    /// A character that is not a hex digit.
    InvalidDigit { position: usize, found: char },
    /// The padded grid does not fit in memory addressing.
    GridTooLarge { columns: usize, rows: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::LengthMismatch { expected, actual } => write!(
                f,
                "motion map length mismatch: expected {expected} hex digits, got {actual}"
            ),
            CodecError::InvalidDigit { position, found } => {
                write!(f, "invalid hex digit {found:?} at position {position}")
            }
            CodecError::GridTooLarge { columns, rows } => {
                write!(f, "motion grid of {columns}x{rows} cells is too large")
            }
        }
    }
}

impl std::error::Error for CodecError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Reference resolution with a zero or non-finite dimension.
    InvalidReference { width: f32, height: f32 },
    /// Resolution string not in `WIDTH*HEIGHT` form.
    InvalidResolution(String),
    /// The view did not become ready before the deadline.
    ViewNotReady { waited: Duration },
    Codec(CodecError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::InvalidReference { width, height } => {
                write!(f, "invalid reference resolution {width}x{height}")
            }
            EditorError::InvalidResolution(raw) => {
                write!(f, "invalid resolution string {raw:?}, expected WIDTH*HEIGHT")
            }
            EditorError::ViewNotReady { waited } => {
                write!(f, "view not ready after {} ms", waited.as_millis())
            }
            EditorError::Codec(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for EditorError {
    fn from(e: CodecError) -> Self {
        EditorError::Codec(e)
    }
}
