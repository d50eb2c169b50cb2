use std::io::BufRead;

use entity::{AliasTable, Entity, KeyValues};
use tracing::debug;

use crate::{
    error::{Error, Location},
    lexer::{Lexer, token::Token},
};

pub mod char_reader;
pub mod error;
pub mod lexer;
pub mod lump;

/// Which grammar a `{ key value ... }` block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Alias,
    Entity,
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alias => write!(f, "alias"),
            Self::Entity => write!(f, "entity"),
        }
    }
}

/// Parses alias definitions and entity lumps.
///
/// Both grammars are sequences of `{ key value ... }` blocks read with the
/// same [`Lexer`]; alias blocks are additionally preceded by a class name.
/// Keys are lowercased, values are kept as written.
pub struct Parser<T>
where
    T: BufRead,
{
    lexer: Lexer<T>,
    source: String,
}

impl<T> Parser<T>
where
    T: BufRead,
{
    /// `source` names the stream in error messages.
    pub fn new(source: impl Into<String>, reader: T) -> Self {
        Self {
            lexer: Lexer::new(reader),
            source: source.into(),
        }
    }

    /// `classname { key value ... } ...`
    pub fn parse_aliases(&mut self) -> Result<AliasTable, Error> {
        let mut table = AliasTable::new();

        loop {
            let token = self.next()?;
            if token.is_eof() {
                break;
            }

            if !token.is_identifier() {
                return Err(Error::ExpectedIdentifier(
                    self.location(&token),
                    token.to_string(),
                ));
            }

            // claimed before the body so a repeated name fails at the name
            let overrides = table
                .try_insert(token.value().to_lowercase(), KeyValues::new())
                .map_err(|e| Error::duplicate(self.location(&token), e, Block::Alias))?;

            self.expect_open_brace()?;
            self.parse_block(Block::Alias, overrides)?;
        }

        debug!(
            target: "bspentityalias::parser",
            source = self.source.as_str(),
            aliases = table.len(),
            "parsed alias definitions"
        );

        Ok(table)
    }

    /// `{ key value ... } ...`
    pub fn parse_entities(&mut self) -> Result<Vec<Entity>, Error> {
        let mut entities = vec![];

        loop {
            let token = self.next()?;
            if token.is_eof() {
                break;
            }

            self.open_brace(&token)?;

            let mut pairs = KeyValues::new();
            self.parse_block(Block::Entity, &mut pairs)?;
            entities.push(Entity::from(pairs));
        }

        debug!(
            target: "bspentityalias::parser",
            source = self.source.as_str(),
            entities = entities.len(),
            "parsed entities"
        );

        Ok(entities)
    }

    /// Reads pairs into `pairs` up to the closing `}`; the opening `{` is
    /// already consumed.
    fn parse_block(&mut self, block: Block, pairs: &mut KeyValues) -> Result<(), Error> {
        loop {
            let key = self.next()?;
            if key.is("}") {
                break;
            }

            if !key.is_identifier() {
                return Err(Error::ExpectedKeyOrCloseBrace(
                    self.location(&key),
                    key.to_string(),
                ));
            }

            let name = key.value().to_lowercase();
            let slot = pairs
                .try_insert(name.clone(), String::new())
                .map_err(|e| Error::duplicate(self.location(&key), e, block))?;

            let value = self.next()?;
            if value.is_empty_span() {
                return Err(Error::EmptyValue(self.location(&value), name));
            }
            // the entity lump has no escape for a quote inside a value
            if block == Block::Alias && value.value().contains('"') {
                return Err(Error::QuoteInValue(self.location(&value), name));
            }

            *slot = value.value().to_string();
        }

        Ok(())
    }

    fn expect_open_brace(&mut self) -> Result<(), Error> {
        let token = self.next()?;
        self.open_brace(&token)
    }

    fn open_brace(&self, token: &Token) -> Result<(), Error> {
        if token.is("{") {
            Ok(())
        } else {
            Err(Error::ExpectedOpenBrace(
                self.location(token),
                token.to_string(),
            ))
        }
    }

    fn next(&mut self) -> Result<Token, Error> {
        self.lexer
            .next()
            .map_err(|e| Error::lexer(&self.source, e))
    }

    fn location(&self, token: &Token) -> Location {
        Location {
            source: self.source.clone(),
            position: token.start(),
        }
    }
}

/// Locates the entity lump inside a BSP file's bytes and parses it.
///
/// Only the lump itself is tokenized, never the surrounding binary data.
pub fn parse_map(source: &str, bytes: &[u8]) -> Result<Vec<Entity>, Error> {
    let range = lump::locate(bytes).map_err(|e| Error::LumpError(source.to_string(), e))?;

    Parser::new(source, &bytes[range]).parse_entities()
}
