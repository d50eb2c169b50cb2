use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File \"{}\" does not exist", .0.display())]
    MapNotFound(PathBuf),
    #[error(
        "Alias definition file \"{}\" does not exist (checked relative to current dir & relative to {}'s directory)",
        .0.display(),
        .1.display()
    )]
    AliasesNotFound(PathBuf, PathBuf),
    #[error("{}: {}", .0, .1.display())]
    Io(std::io::Error, PathBuf),
}

impl Error {
    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |e| Self::Io(e, path.to_path_buf())
    }
}
