use crate::protocol::LineError;
use crate::protocol::ParseError;

use ufmt::{uDisplay, uWrite, uwrite, Formatter};
use ufmt_macros::uDebug;

/// Why a line was rejected.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorReason {
    InvalidCommand,
    LineTooLong,
}
impl ErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorReason::InvalidCommand => ParseError::InvalidCommand.reason(),
            ErrorReason::LineTooLong => LineError::TooLong.reason(),
        }
    }
}
impl From<ParseError> for ErrorReason {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::InvalidCommand => ErrorReason::InvalidCommand,
        }
    }
}
impl From<LineError> for ErrorReason {
    fn from(error: LineError) -> Self {
        match error {
            LineError::TooLong => ErrorReason::LineTooLong,
        }
    }
}

/// A single status line sent back to the host.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Response {
    /// A move was accepted.
    Ok,
    /// A move was rejected because the previous one is still running.
    Busy,
    /// The accepted move has finished on both axes.
    Complete,
    /// A line was rejected.
    Error(ErrorReason),
}
impl Response {
    /// Writes the response as one `\r\n`-terminated line.
    ///
    /// # Parameters
    ///
    /// - `out`: Serial output to write to.
    pub fn emit<W: uWrite + ?Sized>(&self, out: &mut W) -> Result<(), W::Error> {
        uwrite!(out, "{}\r\n", self)
    }
}
impl uDisplay for Response {
    fn fmt<W: uWrite + ?Sized>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error> {
        match self {
            Response::Ok => f.write_str("ok"),
            Response::Busy => f.write_str("busy"),
            Response::Complete => f.write_str("complete"),
            Response::Error(reason) => {
                f.write_str("error ")?;
                f.write_str(reason.as_str())
            }
        }
    }
}
