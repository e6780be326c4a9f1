use heapless::Vec;
use ufmt_macros::uDebug;

/// What happens to the rest of a line once it has overflowed the buffer.
#[derive(Debug, uDebug, Default, PartialEq, Eq, Copy, Clone)]
pub enum OverflowPolicy {
    /// Drop everything up to and including the next newline, so the tail of
    /// an oversized line can never be read as a command of its own.
    #[default]
    DiscardUntilNewline,
    /// Start a fresh line with the very next byte.
    Restart,
}

/// Errors that might occur while assembling a line.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum LineError {
    /// The line did not fit in the buffer.
    TooLong,
}
impl LineError {
    /// The reason string reported on the serial link.
    pub fn reason(&self) -> &'static str {
        match self {
            LineError::TooLong => "line too long",
        }
    }
}

/// A complete line, without its terminator.
pub type Line<const N: usize> = Vec<u8, N>;

/// Assembles newline-delimited lines from a byte stream.
///
/// Bytes are fed one at a time and never block. Carriage returns are
/// dropped, so `\r\n` and `\n` endings behave the same.
///
/// # Type Parameters
///
/// - `N`: Capacity of the buffer, including the slot reserved for the
///   terminator. Lines of up to `N - 1` bytes are accepted.
pub struct LineAssembler<const N: usize> {
    buffer: Vec<u8, N>,
    policy: OverflowPolicy,
    discarding: bool,
}
impl<const N: usize> LineAssembler<N> {
    /// Longest accepted line, in bytes.
    pub const MAX_LINE_LEN: usize = N - 1;

    /// Creates a new, empty `LineAssembler`.
    pub fn new(policy: OverflowPolicy) -> Self {
        const { assert!(N >= 2, "line buffer needs room for a terminator") };
        Self {
            buffer: Vec::new(),
            policy,
            discarding: false,
        }
    }

    /// Number of bytes in the partially assembled line.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Checks whether no partial line is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feeds one byte.
    ///
    /// # Returns
    ///
    /// - `Ok(None)`: if no line is complete yet.
    /// - `Ok(Some(line))`: if `byte` terminated a line. The buffer is empty
    ///   again afterwards.
    /// - `Err(LineError::TooLong)`: if `byte` did not fit. The byte and the
    ///   partial line are dropped; what happens to the following bytes is
    ///   decided by the [OverflowPolicy].
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line<N>>, LineError> {
        match byte {
            b'\r' => Ok(None),
            b'\n' if self.discarding => {
                self.discarding = false;
                Ok(None)
            }
            b'\n' => Ok(Some(core::mem::take(&mut self.buffer))),
            _ if self.discarding => Ok(None),
            _ => {
                if self.buffer.len() < Self::MAX_LINE_LEN
                    && self.buffer.push(byte).is_ok()
                {
                    Ok(None)
                } else {
                    self.overflow()
                }
            }
        }
    }

    fn overflow(&mut self) -> Result<Option<Line<N>>, LineError> {
        self.buffer.clear();
        self.discarding = self.policy == OverflowPolicy::DiscardUntilNewline;
        Err(LineError::TooLong)
    }
}
