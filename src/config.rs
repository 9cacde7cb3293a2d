//! Where puzzle inputs live and how they are named.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_INPUT_DIR: &str = "inputs";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self { input_dir: PathBuf::from(DEFAULT_INPUT_DIR) }
    }
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self { input_dir: input_dir.into() }
    }

    /// `day7.in` for the real input, `day7test2.in` for the second example.
    pub fn input_path(&self, day: u8, test: Option<u32>) -> PathBuf {
        let name = match test {
            None => format!("day{day}.in"),
            Some(test) => format!("day{day}test{test}.in"),
        };
        self.input_dir.join(name)
    }

    pub fn read_input(&self, day: u8, test: Option<u32>) -> Result<String> {
        read(day, &self.input_path(day, test))
    }
}

fn read(day: u8, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::MissingInput { day, path: path.to_owned() },
        _ => Error::ReadInput { path: path.to_owned(), source },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_names() {
        let config = Config::new("in");
        assert_eq!(config.input_path(7, None), Path::new("in/day7.in"));
        assert_eq!(config.input_path(12, Some(2)), Path::new("in/day12test2.in"));
        assert_eq!(Config::default().input_dir, Path::new("inputs"));
    }

    #[test]
    fn missing_input_names_the_day() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        match config.read_input(3, None) {
            Err(Error::MissingInput { day: 3, path }) => assert!(path.ends_with("day3.in")),
            other => panic!("unexpected {other:?}"),
        }
        fs::write(dir.path().join("day3.in"), "467..114..\n").unwrap();
        assert_eq!(config.read_input(3, None).unwrap(), "467..114..\n");
    }
}
