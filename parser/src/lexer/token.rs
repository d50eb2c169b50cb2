use crate::char_reader::Position;

#[derive(Debug, PartialEq, Clone)]
pub enum Type {
    Word(String),
    Quoted(String),
    EOF,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub(crate) ty: Type,
    pub(crate) start: Position,
    pub(crate) end: Position,
}

impl Token {
    pub fn new(ty: Type, start: Position, end: Position) -> Self {
        Self { ty, start, end }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(Type::EOF, position, position)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Decoded text of the token; quotes are not included and EOF is empty.
    pub fn value(&self) -> &str {
        match &self.ty {
            Type::Word(value) | Type::Quoted(value) => value.as_str(),
            Type::EOF => "",
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.ty, Type::EOF)
    }

    /// Only EOF has a zero-length span: `""` still spans its two quotes.
    pub fn is_empty_span(&self) -> bool {
        self.start == self.end
    }

    /// Non-empty and made of alphanumerics or `_` only.
    pub fn is_identifier(&self) -> bool {
        let value = self.value();
        !value.is_empty() && value.chars().all(|c| c.is_alphanumeric() || c == '_')
    }

    /// Quoted and bare spellings compare equal, so `"{"` opens a block too.
    pub fn is(&self, text: &str) -> bool {
        !self.is_eof() && self.value() == text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ty {
            Type::EOF => write!(f, "EOF"),
            _ => write!(f, "\"{}\"", self.value()),
        }
    }
}
