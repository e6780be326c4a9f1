mod command_parser;
mod line_assembler;
mod response;

pub use command_parser::parse_line;
pub use command_parser::MoveRequest;
pub use command_parser::ParseError;
pub use line_assembler::Line;
pub use line_assembler::LineAssembler;
pub use line_assembler::LineError;
pub use line_assembler::OverflowPolicy;
pub use response::ErrorReason;
pub use response::Response;

#[cfg(test)]
pub use response::test::TestSerial;
