use std::fmt;
use std::io;

/// Errors from the ambient layers (reading input, writing output).
///
/// The optimiser core itself is total (see the crate-level docs) and never
/// produces one of these; a malformed declaration is logged and left alone
/// rather than turned into an `Err`.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    UnterminatedString { at: usize },
    UnterminatedComment,
    UnterminatedBlock,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::UnterminatedString { at } => {
                write!(f, "unterminated string literal starting at byte {}", at)
            }
            Error::UnterminatedComment => write!(f, "unterminated comment"),
            Error::UnterminatedBlock => write!(f, "unterminated block (missing '}}')"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
