//! Open modes.
//!
//! Modes are given as short strings in the style of `fopen`: exactly one of
//! `r` (read), `w` (write, truncating) or `x` (write, failing if the file
//! exists), optionally followed by `+` for read/write access. The `b` flag is
//! accepted and ignored because sound files are always binary.

use std::fmt;
use std::str::FromStr;

use libc::c_int;
use sndfile_sys::{SFM_RDWR, SFM_READ, SFM_WRITE};

use crate::error::{Error, Result};

/// A validated open mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenMode {
    text: String,
    read: bool,
    write: bool,
    exclusive: bool,
    update: bool,
}

impl OpenMode {
    /// Parse a mode string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMode`] if the string contains characters other than
    /// `xrwb+`, repeats a character, or does not contain exactly one of
    /// `x`, `r` and `w`.
    ///
    /// # Example
    ///
    /// ```
    /// use soundfile_rs::OpenMode;
    ///
    /// let mode = OpenMode::parse("r+")?;
    /// assert!(mode.is_readable());
    /// assert!(mode.is_update());
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn parse(mode: &str) -> Result<Self> {
        let mut seen = Vec::with_capacity(mode.len());
        for c in mode.chars() {
            if !"xrwb+".contains(c) {
                return Err(Error::invalid_mode(mode, "unknown mode character"));
            }
            if seen.contains(&c) {
                return Err(Error::invalid_mode(mode, "repeated mode character"));
            }
            seen.push(c);
        }

        let primary = seen.iter().filter(|c| matches!(c, 'x' | 'r' | 'w')).count();
        if primary != 1 {
            return Err(Error::invalid_mode(mode, "mode must contain exactly one of 'xrw'"));
        }

        Ok(OpenMode {
            text: mode.to_string(),
            read: seen.contains(&'r'),
            write: seen.contains(&'w'),
            exclusive: seen.contains(&'x'),
            update: seen.contains(&'+'),
        })
    }

    /// Read-only mode (`"r"`).
    pub fn read() -> Self {
        OpenMode {
            text: "r".to_string(),
            read: true,
            write: false,
            exclusive: false,
            update: false,
        }
    }

    /// Write mode (`"w"`).
    pub fn write() -> Self {
        OpenMode {
            text: "w".to_string(),
            read: false,
            write: true,
            exclusive: false,
            update: false,
        }
    }

    /// The mode string as given.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether data can be read (`r` or `+`).
    pub fn is_readable(&self) -> bool {
        self.read || self.update
    }

    /// Whether data can be written (`w`, `x` or `+`).
    pub fn is_writable(&self) -> bool {
        !self.read || self.update
    }

    /// Whether the mode opens an existing file and takes its format from it.
    pub fn opens_existing(&self) -> bool {
        self.read
    }

    /// Whether the mode truncates an existing file (`w`).
    pub fn is_truncating(&self) -> bool {
        self.write
    }

    /// Whether opening must fail if the file exists (`x`).
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Whether the mode allows both reading and writing (`+`).
    pub fn is_update(&self) -> bool {
        self.update
    }

    /// The libsndfile `SFM_*` constant for this mode.
    pub fn to_native(&self) -> c_int {
        if self.update {
            SFM_RDWR as c_int
        } else if self.read {
            SFM_READ as c_int
        } else {
            SFM_WRITE as c_int
        }
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::read()
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_modes() {
        assert_eq!(OpenMode::parse("r").unwrap().to_native(), SFM_READ as c_int);
        assert_eq!(OpenMode::parse("w").unwrap().to_native(), SFM_WRITE as c_int);
        assert_eq!(OpenMode::parse("x").unwrap().to_native(), SFM_WRITE as c_int);
        assert_eq!(OpenMode::parse("r+").unwrap().to_native(), SFM_RDWR as c_int);
        assert_eq!(OpenMode::parse("w+").unwrap().to_native(), SFM_RDWR as c_int);
        assert_eq!(OpenMode::parse("rb").unwrap().to_native(), SFM_READ as c_int);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(OpenMode::parse("").is_err());
        assert!(OpenMode::parse("rw").is_err());
        assert!(OpenMode::parse("rr").is_err());
        assert!(OpenMode::parse("a").is_err());
        assert!(OpenMode::parse("+").is_err());
        assert!(OpenMode::parse("r++").is_err());
    }

    #[test]
    fn test_predicates() {
        let r = OpenMode::parse("r").unwrap();
        assert!(r.is_readable());
        assert!(!r.is_writable());
        assert!(r.opens_existing());

        let w = OpenMode::parse("w").unwrap();
        assert!(!w.is_readable());
        assert!(w.is_writable());
        assert!(w.is_truncating());

        let x = OpenMode::parse("x+").unwrap();
        assert!(x.is_readable());
        assert!(x.is_writable());
        assert!(x.is_exclusive());
        assert!(x.is_update());
    }

    #[test]
    fn test_display_keeps_mode_text() {
        assert_eq!(OpenMode::parse("rb+").unwrap().to_string(), "rb+");
        assert_eq!(OpenMode::default().as_str(), "r");
    }
}
