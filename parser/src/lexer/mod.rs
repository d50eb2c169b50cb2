use std::io::BufRead;

use tracing::trace;

use crate::{
    char_reader::{self, CharReader},
    lexer::{
        error::Error,
        token::{Token, Type},
    },
};

pub mod error;
pub mod token;

/// Splits a stream into bare words and quoted strings.
///
/// Anything at or below the space character separates tokens, `//` starts a
/// comment running to the end of the line, and a NUL byte ends the stream.
/// Once EOF is returned every further call returns EOF at the same position.
pub struct Lexer<T>
where
    T: BufRead,
{
    reader: CharReader<T>,
    finished: bool,
}

impl<T> Lexer<T>
where
    T: BufRead,
{
    pub fn new(reader: T) -> Self {
        Self {
            reader: CharReader::new(reader),
            finished: false,
        }
    }

    pub fn next(&mut self) -> Result<Token, Error> {
        let token = self.scan()?;
        trace!(target: "bspentityalias::lexer", ?token);

        Ok(token)
    }

    fn scan(&mut self) -> Result<Token, Error> {
        loop {
            if self.finished {
                return Ok(Token::eof(self.reader.position()));
            }

            // skip whitespace and control characters
            loop {
                match self.peek()? {
                    None => return Ok(self.finish()),
                    Some(c) if c <= ' ' => {
                        if self.reader.read()? == '\0' {
                            return Ok(self.finish());
                        }
                    }
                    Some(_) => break,
                }
            }

            let start = self.reader.position();
            let c = self.reader.read()?;

            if c == '/' && self.peek()? == Some('/') {
                self.skip_line()?;
                continue;
            }

            return match c {
                '"' => self.quoted(start),
                _ => self.word(start, c),
            };
        }
    }

    fn quoted(&mut self, start: char_reader::Position) -> Result<Token, Error> {
        let mut value = String::new();

        loop {
            match self.peek()? {
                None => break,
                Some('"') => {
                    self.reader.read()?;
                    break;
                }
                Some('\0') => {
                    self.reader.read()?;
                    self.finished = true;
                    break;
                }
                Some(c) => {
                    self.reader.read()?;
                    value.push(c);
                }
            }
        }

        Ok(Token::new(
            Type::Quoted(value),
            start,
            self.reader.position(),
        ))
    }

    fn word(&mut self, start: char_reader::Position, first: char) -> Result<Token, Error> {
        let mut value = String::from(first);
        let mut end = self.reader.position();

        // the terminator is consumed but does not count towards the span
        loop {
            match self.peek()? {
                None => break,
                Some(c) if c > ' ' => {
                    self.reader.read()?;
                    value.push(c);
                    end = self.reader.position();
                }
                Some(_) => {
                    if self.reader.read()? == '\0' {
                        self.finished = true;
                    }
                    break;
                }
            }
        }

        Ok(Token::new(Type::Word(value), start, end))
    }

    fn skip_line(&mut self) -> Result<(), Error> {
        loop {
            match self.peek()? {
                None => break,
                Some(c) => {
                    self.reader.read()?;
                    match c {
                        '\n' => break,
                        '\0' => {
                            self.finished = true;
                            break;
                        }
                        _ => continue,
                    }
                }
            }
        }

        Ok(())
    }

    fn finish(&mut self) -> Token {
        self.finished = true;
        Token::eof(self.reader.position())
    }

    fn peek(&mut self) -> Result<Option<char>, Error> {
        match self.reader.peek() {
            Ok(c) => Ok(Some(c)),
            Err(char_reader::error::Error::EOF(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
