#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("can't find start of entity lump")]
    StartNotFound,
    #[error("can't find end of entity lump")]
    EndNotFound,
}
