use std::io;
use symrw_error::Error as EngineError;

/// Utility enum to package errors that can occur while reading / simplifying.
#[derive(Debug)]
pub enum Error {
    /// The input could not be read.
    Io(io::Error),

    /// The input could not be parsed, or the rules could not be built.
    Engine(EngineError),
}

impl Error {
    /// Report this error to stderr. Parse errors are rendered with the given input highlighted.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Io(err) => eprintln!("error: {}", err),
            Self::Engine(err) => err.report_to_stderr(input),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}
