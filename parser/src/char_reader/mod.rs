/// Errors raised while reading characters from a std::io::BufRead
pub mod error;

use tracing::warn;

use crate::char_reader::error::Error;

const BOM: char = '\u{FEFF}';

/// Zero-based row/column inside a text stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

/// Reads a std::io::BufRead one UTF-8 character at a time, keeping track of
/// the position of the next unread character.
///
/// Malformed byte sequences decode to U+FFFD instead of failing, since entity
/// lumps written by older tools are not always valid UTF-8. A byte order mark
/// at the very start of the stream is dropped and takes up no column.
///
/// # Examples
///
/// ```
/// use parser::char_reader::{CharReader, Position};
///
/// let source = "héllo\nworld";
/// let mut char_reader = CharReader::new(source.as_bytes());
///
/// for want in "héllo\n".chars() {
///     assert_eq!(char_reader.read().unwrap(), want);
/// }
///
/// assert_eq!(char_reader.position(), Position::new(1, 0));
/// assert_eq!(char_reader.peek().unwrap(), 'w');
/// assert_eq!(char_reader.position(), Position::new(1, 0));
/// ```
#[derive(std::fmt::Debug)]
pub struct CharReader<T>
where
    T: std::io::BufRead,
{
    reader: T,
    position: Position,
    peeked: Option<char>,
    started: bool,
}

impl<T> CharReader<T>
where
    T: std::io::BufRead,
{
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            position: Position::default(),
            peeked: None,
            started: false,
        }
    }

    /// Position of the next character `read` would return.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the next character without consuming it.
    /// Returns Error::EOF once the reader is exhausted.
    pub fn peek(&mut self) -> Result<char, Error> {
        match self.peeked {
            Some(c) => Ok(c),
            None => {
                let c = self.next()?;
                self.peeked = Some(c);
                Ok(c)
            }
        }
    }

    /// Consumes the next character and advances the position.
    /// A newline moves to the start of the next row; NUL does not move at all.
    pub fn read(&mut self) -> Result<char, Error> {
        let c = match self.peeked.take() {
            Some(c) => c,
            None => self.next()?,
        };

        match c {
            '\0' => {}
            '\n' => {
                self.position.row += 1;
                self.position.column = 0;
            }
            _ => self.position.column += 1,
        }

        Ok(c)
    }

    fn next(&mut self) -> Result<char, Error> {
        let c = self.decode()?;
        if self.started {
            return Ok(c);
        }

        self.started = true;
        match c {
            BOM => self.decode(),
            c => Ok(c),
        }
    }

    fn decode(&mut self) -> Result<char, Error> {
        let lead = self.next_byte()?.ok_or(Error::EOF(self.position))?;

        let (rest, bits, min) = if lead & 0b1000_0000 == 0 {
            return Ok(lead as char);
        } else if lead & 0b1110_0000 == 0b1100_0000 {
            (1, lead & 0b0001_1111, 0x80)
        } else if lead & 0b1111_0000 == 0b1110_0000 {
            (2, lead & 0b0000_1111, 0x800)
        } else if lead & 0b1111_1000 == 0b1111_0000 {
            (3, lead & 0b0000_0111, 0x1_0000)
        } else {
            return Ok(self.replacement(lead));
        };

        let mut codepoint = bits as u32;
        for _ in 0..rest {
            // a byte that does not continue the sequence is left for the next read
            match self.peek_byte()? {
                Some(b) if b & 0b1100_0000 == 0b1000_0000 => {
                    self.reader.consume(1);
                    codepoint = codepoint << 6 | (b & 0b0011_1111) as u32;
                }
                _ => return Ok(self.replacement(lead)),
            }
        }

        match char::from_u32(codepoint) {
            Some(c) if codepoint >= min => Ok(c),
            _ => Ok(self.replacement(lead)),
        }
    }

    fn replacement(&self, lead: u8) -> char {
        warn!(
            target: "bspentityalias::lexer",
            position = %self.position,
            lead,
            "invalid UTF-8 sequence, substituting U+FFFD"
        );

        char::REPLACEMENT_CHARACTER
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, Error> {
        let buf = self
            .reader
            .fill_buf()
            .map_err(|e| Error::ReadError(e.to_string()))?;

        Ok(buf.first().copied())
    }

    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.reader.consume(1);
        }

        Ok(b)
    }
}
