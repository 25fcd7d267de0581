//! Metadata string tags.

use std::fmt;
use std::str::FromStr;

use libc::c_int;
use sndfile_sys as ffi;

use crate::error::{Error, Result};

/// A metadata string libsndfile can store in a file header.
///
/// Not every format supports every tag; libsndfile silently drops the ones
/// a format cannot hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Title
    Title,
    /// Copyright notice
    Copyright,
    /// Software that created the file
    Software,
    /// Artist
    Artist,
    /// Free-form comment
    Comment,
    /// Date
    Date,
    /// Album
    Album,
    /// License
    License,
    /// Track number
    TrackNumber,
    /// Genre
    Genre,
}

impl Tag {
    /// Every tag, in native code order.
    pub const ALL: [Tag; 10] = [
        Tag::Title,
        Tag::Copyright,
        Tag::Software,
        Tag::Artist,
        Tag::Comment,
        Tag::Date,
        Tag::Album,
        Tag::License,
        Tag::TrackNumber,
        Tag::Genre,
    ];

    /// The lower-case tag name, e.g. `"tracknumber"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Tag::Title => "title",
            Tag::Copyright => "copyright",
            Tag::Software => "software",
            Tag::Artist => "artist",
            Tag::Comment => "comment",
            Tag::Date => "date",
            Tag::Album => "album",
            Tag::License => "license",
            Tag::TrackNumber => "tracknumber",
            Tag::Genre => "genre",
        }
    }

    /// The `SF_STR_*` code.
    pub const fn code(&self) -> c_int {
        (match self {
            Tag::Title => ffi::SF_STR_TITLE,
            Tag::Copyright => ffi::SF_STR_COPYRIGHT,
            Tag::Software => ffi::SF_STR_SOFTWARE,
            Tag::Artist => ffi::SF_STR_ARTIST,
            Tag::Comment => ffi::SF_STR_COMMENT,
            Tag::Date => ffi::SF_STR_DATE,
            Tag::Album => ffi::SF_STR_ALBUM,
            Tag::License => ffi::SF_STR_LICENSE,
            Tag::TrackNumber => ffi::SF_STR_TRACKNUMBER,
            Tag::Genre => ffi::SF_STR_GENRE,
        }) as c_int
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == lower)
            .ok_or_else(|| Error::invalid_argument(format!("unknown tag '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Tag::Title.code(), 0x01);
        assert_eq!(Tag::TrackNumber.code(), 0x09);
        assert_eq!(Tag::Genre.code(), 0x10);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Artist".parse::<Tag>().unwrap(), Tag::Artist);
        assert_eq!("tracknumber".parse::<Tag>().unwrap(), Tag::TrackNumber);
        assert!("composer".parse::<Tag>().is_err());
    }
}
