#[derive(thiserror::Error, std::fmt::Debug, PartialEq)]
pub enum Error {
    #[error("key `{0}` already provided earlier in block")]
    DuplicateKey(String),
    #[error("alias `{0}` already defined earlier in file")]
    DuplicateAlias(String),
}
