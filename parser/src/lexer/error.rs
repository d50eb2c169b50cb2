use crate::char_reader;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    ReaderError(String),
}

impl From<char_reader::error::Error> for Error {
    fn from(e: char_reader::error::Error) -> Self {
        Self::ReaderError(e.to_string())
    }
}
