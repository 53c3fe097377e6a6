use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

pub trait ErrorType: Display + Debug + PartialEq {}

// Where in a grammar file something went wrong. Line 0 means the whole file
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn file(path: &Path) -> Self {
        Location { file: path.to_path_buf(), line: 0 }
    }

    pub fn line(path: &Path, line: usize) -> Self {
        Location { file: path.to_path_buf(), line }
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
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Oops;

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    impl ErrorType for Oops {}

    #[test]
    fn location_omits_line_zero() {
        let path = Path::new("grammars/anbn.bnf");

        assert_eq!(Location::file(path).to_string(), "grammars/anbn.bnf");
        assert_eq!(Location::line(path, 4).to_string(), "grammars/anbn.bnf:4");
    }

    #[test]
    fn error_shows_location_and_message() {
        let error = Error { location: Location::line(Path::new("g.bnf"), 2), error: Oops };
        let shown = error.to_string();

        assert!(shown.contains("[g.bnf:2]"));
        assert!(shown.contains("oops"));
    }
}
