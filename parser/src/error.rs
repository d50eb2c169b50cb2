use crate::{Block, char_reader::Position, lexer, lump};

/// Stream name plus the start of the offending token, rendered `name(row,column)`.
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub source: String,
    pub position: Position,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.source, self.position)
    }
}

#[derive(thiserror::Error, std::fmt::Debug, PartialEq)]
pub enum Error {
    #[error("{0}: expected an identifier (a-z 0-9 _), found {1}")]
    ExpectedIdentifier(Location, String),
    #[error("{0}: expected {{, found {1}")]
    ExpectedOpenBrace(Location, String),
    #[error("{0}: expected an identifier (a-z 0-9 _) or }}, found {1}")]
    ExpectedKeyOrCloseBrace(Location, String),
    #[error("{0}: alias `{1}` already defined earlier in file")]
    DuplicateAlias(Location, String),
    #[error("{0}: key `{1}` already provided earlier in {2}")]
    DuplicateKey(Location, String, Block),
    #[error("{0}: empty value for key `{1}`")]
    EmptyValue(Location, String),
    #[error("{0}: value for key `{1}` contains a `\"`")]
    QuoteInValue(Location, String),
    #[error("{0}: {1}")]
    LexerError(String, String),
    #[error("{0}: {1}")]
    LumpError(String, lump::error::Error),
}

impl Error {
    pub(crate) fn duplicate(location: Location, e: entity::error::Error, block: Block) -> Self {
        match e {
            entity::error::Error::DuplicateAlias(name) => Self::DuplicateAlias(location, name),
            entity::error::Error::DuplicateKey(key) => Self::DuplicateKey(location, key, block),
        }
    }

    pub(crate) fn lexer(source: &str, e: lexer::error::Error) -> Self {
        Self::LexerError(source.to_string(), e.to_string())
    }
}
