use std::fmt::Display;
use std::path::{Path, PathBuf};

// Kinds of error that can be pinned to a place in a grammar file
pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    // Zero when the error concerns the whole file
    pub line: usize,
}

impl Location {
    pub fn line(file: &Path, line: usize) -> Self {
        Location { file: file.to_path_buf(), line }
    }

    pub fn whole_file(file: &Path) -> Self {
        Location::line(file, 0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T,
}

impl<T: ErrorType> Error<T> {
    pub fn at(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
