/// Broad category of an [`AppError`].
///
/// The exit code tells the shell what happened; the kind lets library callers
/// match on the failure without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Size bounds violate `0 < min_size < max_size`.
    InvalidBounds,
    /// A measurement is NaN or infinite.
    InvalidMeasurement,
    /// Unusable user input (arguments, CSV schema, empty data).
    Input,
    /// Filesystem or serialization failure.
    Io,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            kind: ErrorKind::Input,
            message: message.into(),
        }
    }

    pub fn with_kind(kind: ErrorKind, exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_bounds(min_size: f64, max_size: f64) -> Self {
        Self::with_kind(
            ErrorKind::InvalidBounds,
            2,
            format!(
                "Invalid size bounds: min={min_size}, max={max_size} (must be finite with 0 < min < max)."
            ),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Io, 2, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
