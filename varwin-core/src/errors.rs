use thiserror::Error;

/// Errors raised while building a window table or binning coordinates into it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Position {position} lies beyond the last window (covered span ends at {last_end})")]
    OutOfRange { position: u32, last_end: u32 },
}

/// Errors raised while loading positional inputs from disk.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
