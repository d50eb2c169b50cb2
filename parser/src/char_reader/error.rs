use crate::char_reader::Position;

/// Errors raised while reading characters from a std::io::BufRead
#[derive(std::fmt::Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("unexpected end of input at {0}")]
    EOF(Position),
    #[error("{0}")]
    ReadError(String),
}
