use crate::Steps;

use ufmt_macros::uDebug;
use winnow::ascii::{digit1, Caseless};
use winnow::combinator::opt;
use winnow::token::{literal, one_of, take_while};
use winnow::{Parser, Result};

/// A request to move both axes to absolute targets.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub struct MoveRequest {
    /// Target for axis A.
    pub target_a: Steps,
    /// Target for axis B.
    pub target_b: Steps,
}

/// Possible errors that might occur during parsing.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum ParseError {
    /// Unknown verb, missing or malformed argument.
    InvalidCommand,
}
impl ParseError {
    /// The reason string reported on the serial link.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::InvalidCommand => "invalid command",
        }
    }
}

/// Parses one command line.
///
/// The only command is `GOTO <a> <b>`: a case-insensitive verb followed by
/// exactly two base-10 integers, all separated by runs of spaces or tabs.
///
/// # Parameters
///
/// - `line`: The line, without its terminator.
///
/// # Returns
///
/// - `Ok(None)`: if the line is empty or only whitespace.
/// - `Ok(Some(request))`: for a valid `GOTO`.
/// - `Err(ParseError::InvalidCommand)`: for anything else.
pub fn parse_line(line: &str) -> core::result::Result<Option<MoveRequest>, ParseError> {
    let command = line.trim_start_matches(BLANKS);
    if command.is_empty() {
        return Ok(None);
    }
    parse_goto
        .parse(command)
        .map(Some)
        .map_err(|_| ParseError::InvalidCommand)
}

/// Token separators.
const BLANKS: [char; 2] = [' ', '\t'];

/// Parse a `GOTO` command, including any trailing blanks.
fn parse_goto<'s>(input: &mut &'s str) -> Result<MoveRequest> {
    literal(Caseless("GOTO")).parse_next(input)?;
    parse_blanks.parse_next(input)?;
    let target_a = parse_target.parse_next(input)?;
    parse_blanks.parse_next(input)?;
    let target_b = parse_target.parse_next(input)?;
    opt(parse_blanks).parse_next(input)?;
    Ok(MoveRequest { target_a, target_b })
}

/// Parse a run of one or more blanks.
fn parse_blanks<'s>(input: &mut &'s str) -> Result<()> {
    take_while(1.., BLANKS).map(|_| ()).parse_next(input)
}

/// Parse a signed base-10 step count.
///
/// The count must fit in the step range; larger values fail rather than
/// wrap or saturate.
fn parse_target<'s>(input: &mut &'s str) -> Result<Steps> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .try_map(str::parse::<i32>)
        .map(Steps::new)
        .parse_next(input)
}
