//! Major formats, subtypes and endian-ness.
//!
//! A libsndfile format word is the bitwise OR of three codes: a major
//! format (the container, e.g. WAV), a subtype (the sample encoding, e.g.
//! PCM_16) and an endian-ness. This module holds the closed dictionaries of
//! those codes and the queries libsndfile answers about them.
//!
//! # Example
//!
//! ```no_run
//! use soundfile_rs::format::{check_format, default_subtype, Subtype};
//!
//! assert!(check_format("WAV", Some("PCM_24"), None));
//! assert!(!check_format("FLAC", Some("VORBIS"), None));
//! assert_eq!(default_subtype("mat5"), Some(Subtype::Double));
//! ```

use std::collections::BTreeMap;
use std::ffi::CStr;
use std::fmt;
use std::path::Path;
use std::ptr;
use std::str::FromStr;

use libc::{c_int, c_void};
use sndfile_sys::{
    self as ffi, sf_command, sf_format_check, SF_FORMAT_INFO, SF_INFO,
};

use crate::error::{Error, Result};

/// Declares a closed dictionary of native codes as a Rust enum.
macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident, $err:path {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal => $code:path, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value, in native code order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// The upper-case name used in strings.
            pub const fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// The native libsndfile code.
            pub const fn code(&self) -> c_int {
                match self {
                    $( $name::$variant => $code as c_int, )+
                }
            }

            /// Look up a value by its native code.
            pub fn from_code(code: c_int) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            /// Parse a name case-insensitively.
            fn from_str(s: &str) -> Result<Self> {
                let upper = s.to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == upper)
                    .ok_or_else(|| $err(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.name()
            }
        }
    };
}

code_table! {
    /// Major (container) formats.
    MajorFormat, Error::invalid_format {
        /// Microsoft WAV format (little endian default).
        Wav = "WAV" => ffi::SF_FORMAT_WAV,
        /// Apple/SGI AIFF format (big endian).
        Aiff = "AIFF" => ffi::SF_FORMAT_AIFF,
        /// Sun/NeXT AU format (big endian).
        Au = "AU" => ffi::SF_FORMAT_AU,
        /// RAW PCM data.
        Raw = "RAW" => ffi::SF_FORMAT_RAW,
        /// Ensoniq PARIS file format.
        Paf = "PAF" => ffi::SF_FORMAT_PAF,
        /// Amiga IFF / SVX8 / SV16 format.
        Svx = "SVX" => ffi::SF_FORMAT_SVX,
        /// Sphere NIST format.
        Nist = "NIST" => ffi::SF_FORMAT_NIST,
        /// VOC files.
        Voc = "VOC" => ffi::SF_FORMAT_VOC,
        /// Berkeley/IRCAM/CARL.
        Ircam = "IRCAM" => ffi::SF_FORMAT_IRCAM,
        /// Sonic Foundry's 64 bit RIFF/WAV.
        W64 = "W64" => ffi::SF_FORMAT_W64,
        /// Matlab (tm) V4.2 / GNU Octave 2.0.
        Mat4 = "MAT4" => ffi::SF_FORMAT_MAT4,
        /// Matlab (tm) V5.0 / GNU Octave 2.1.
        Mat5 = "MAT5" => ffi::SF_FORMAT_MAT5,
        /// Portable Voice Format.
        Pvf = "PVF" => ffi::SF_FORMAT_PVF,
        /// Fasttracker 2 Extended Instrument.
        Xi = "XI" => ffi::SF_FORMAT_XI,
        /// HMM Tool Kit format.
        Htk = "HTK" => ffi::SF_FORMAT_HTK,
        /// Midi Sample Dump Standard.
        Sds = "SDS" => ffi::SF_FORMAT_SDS,
        /// Audio Visual Research.
        Avr = "AVR" => ffi::SF_FORMAT_AVR,
        /// MS WAVE with WAVEFORMATEX.
        Wavex = "WAVEX" => ffi::SF_FORMAT_WAVEX,
        /// Sound Designer 2.
        Sd2 = "SD2" => ffi::SF_FORMAT_SD2,
        /// FLAC lossless file format.
        Flac = "FLAC" => ffi::SF_FORMAT_FLAC,
        /// Core Audio File format.
        Caf = "CAF" => ffi::SF_FORMAT_CAF,
        /// Psion WVE format.
        Wve = "WVE" => ffi::SF_FORMAT_WVE,
        /// Xiph OGG container.
        Ogg = "OGG" => ffi::SF_FORMAT_OGG,
        /// Akai MPC 2000 sampler.
        Mpc2k = "MPC2K" => ffi::SF_FORMAT_MPC2K,
        /// RF64 WAV file.
        Rf64 = "RF64" => ffi::SF_FORMAT_RF64,
    }
}

code_table! {
    /// Sample encodings.
    Subtype, Error::invalid_subtype {
        /// Signed 8 bit data.
        PcmS8 = "PCM_S8" => ffi::SF_FORMAT_PCM_S8,
        /// Signed 16 bit data.
        Pcm16 = "PCM_16" => ffi::SF_FORMAT_PCM_16,
        /// Signed 24 bit data.
        Pcm24 = "PCM_24" => ffi::SF_FORMAT_PCM_24,
        /// Signed 32 bit data.
        Pcm32 = "PCM_32" => ffi::SF_FORMAT_PCM_32,
        /// Unsigned 8 bit data (WAV and RAW only).
        PcmU8 = "PCM_U8" => ffi::SF_FORMAT_PCM_U8,
        /// 32 bit float data.
        Float = "FLOAT" => ffi::SF_FORMAT_FLOAT,
        /// 64 bit float data.
        Double = "DOUBLE" => ffi::SF_FORMAT_DOUBLE,
        /// U-Law encoded.
        Ulaw = "ULAW" => ffi::SF_FORMAT_ULAW,
        /// A-Law encoded.
        Alaw = "ALAW" => ffi::SF_FORMAT_ALAW,
        /// IMA ADPCM.
        ImaAdpcm = "IMA_ADPCM" => ffi::SF_FORMAT_IMA_ADPCM,
        /// Microsoft ADPCM.
        MsAdpcm = "MS_ADPCM" => ffi::SF_FORMAT_MS_ADPCM,
        /// GSM 6.10 encoding.
        Gsm610 = "GSM610" => ffi::SF_FORMAT_GSM610,
        /// OKI / Dialogix ADPCM.
        VoxAdpcm = "VOX_ADPCM" => ffi::SF_FORMAT_VOX_ADPCM,
        /// 32kbs G721 ADPCM encoding.
        G721_32 = "G721_32" => ffi::SF_FORMAT_G721_32,
        /// 24kbs G723 ADPCM encoding.
        G723_24 = "G723_24" => ffi::SF_FORMAT_G723_24,
        /// 40kbs G723 ADPCM encoding.
        G723_40 = "G723_40" => ffi::SF_FORMAT_G723_40,
        /// 12 bit Delta Width Variable Word encoding.
        Dwvw12 = "DWVW_12" => ffi::SF_FORMAT_DWVW_12,
        /// 16 bit Delta Width Variable Word encoding.
        Dwvw16 = "DWVW_16" => ffi::SF_FORMAT_DWVW_16,
        /// 24 bit Delta Width Variable Word encoding.
        Dwvw24 = "DWVW_24" => ffi::SF_FORMAT_DWVW_24,
        /// N bit Delta Width Variable Word encoding.
        DwvwN = "DWVW_N" => ffi::SF_FORMAT_DWVW_N,
        /// 8 bit differential PCM (XI only).
        Dpcm8 = "DPCM_8" => ffi::SF_FORMAT_DPCM_8,
        /// 16 bit differential PCM (XI only).
        Dpcm16 = "DPCM_16" => ffi::SF_FORMAT_DPCM_16,
        /// Xiph Vorbis encoding.
        Vorbis = "VORBIS" => ffi::SF_FORMAT_VORBIS,
    }
}

code_table! {
    /// Byte order of the sample data.
    Endian, Error::invalid_endian {
        /// Default file endian-ness.
        File = "FILE" => ffi::SF_ENDIAN_FILE,
        /// Force little endian-ness.
        Little = "LITTLE" => ffi::SF_ENDIAN_LITTLE,
        /// Force big endian-ness.
        Big = "BIG" => ffi::SF_ENDIAN_BIG,
        /// Force CPU endian-ness.
        Cpu = "CPU" => ffi::SF_ENDIAN_CPU,
    }
}

impl MajorFormat {
    /// The subtype used when none is given for this format.
    ///
    /// libsndfile itself has no notion of a default subtype; these choices
    /// are the most widely compatible encoding of each container. `RAW` has
    /// no default because the encoding cannot be guessed.
    pub const fn default_subtype(&self) -> Option<Subtype> {
        match self {
            MajorFormat::Raw => None,
            MajorFormat::Mat4 | MajorFormat::Mat5 => Some(Subtype::Double),
            MajorFormat::Xi => Some(Subtype::Dpcm16),
            MajorFormat::Wve => Some(Subtype::Alaw),
            MajorFormat::Ogg => Some(Subtype::Vorbis),
            _ => Some(Subtype::Pcm16),
        }
    }

    /// Guess the major format from a file name's extension.
    ///
    /// # Example
    ///
    /// ```
    /// use soundfile_rs::MajorFormat;
    ///
    /// assert_eq!(MajorFormat::from_extension("take1.flac"), Some(MajorFormat::Flac));
    /// assert_eq!(MajorFormat::from_extension("notes.txt"), None);
    /// ```
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }
}

/// Return the default subtype for a major format name.
///
/// Returns `None` for unknown names and for `RAW`.
pub fn default_subtype(format: &str) -> Option<Subtype> {
    format.parse::<MajorFormat>().ok()?.default_subtype()
}

/// Build and validate the native format word for a format combination.
///
/// The subtype defaults to [`MajorFormat::default_subtype`] and the
/// endian-ness to [`Endian::File`].
///
/// # Errors
///
/// - [`Error::NoDefaultSubtype`] if no subtype is given and the format has
///   no default
/// - [`Error::InvalidFormatCombination`] if libsndfile rejects the result
pub fn format_int(
    format: MajorFormat,
    subtype: Option<Subtype>,
    endian: Option<Endian>,
) -> Result<c_int> {
    let subtype = match subtype.or_else(|| format.default_subtype()) {
        Some(subtype) => subtype,
        None => {
            return Err(Error::NoDefaultSubtype {
                format: format.name().to_string(),
            })
        }
    };
    let endian = endian.unwrap_or(Endian::File);

    let word = format.code() | subtype.code() | endian.code();

    let info = SF_INFO {
        format: word,
        channels: 1,
        ..SF_INFO::default()
    };
    // SAFETY: info is a fully initialized SF_INFO that outlives the call.
    if unsafe { sf_format_check(&info) } == ffi::SF_FALSE as c_int {
        return Err(Error::InvalidFormatCombination);
    }

    Ok(word)
}

/// Like [`format_int`], but taking case-insensitive names.
pub fn format_int_from_names(
    format: &str,
    subtype: Option<&str>,
    endian: Option<&str>,
) -> Result<c_int> {
    let format: MajorFormat = format.parse()?;
    let subtype = subtype.map(str::parse::<Subtype>).transpose()?;
    let endian = endian.map(str::parse::<Endian>).transpose()?;
    format_int(format, subtype, endian)
}

/// Check whether a combination of format, subtype and endian-ness is valid.
///
/// Unknown names make the combination invalid.
pub fn check_format(format: &str, subtype: Option<&str>, endian: Option<&str>) -> bool {
    format_int_from_names(format, subtype, endian).is_ok()
}

/// Return the name for a native code.
///
/// Major formats are searched first, then subtypes, then endian-ness.
/// Unknown codes are rendered as hexadecimal.
pub fn format_str(code: c_int) -> String {
    if let Some(format) = MajorFormat::from_code(code) {
        return format.name().to_string();
    }
    if let Some(subtype) = Subtype::from_code(code) {
        return subtype.name().to_string();
    }
    if let Some(endian) = Endian::from_code(code) {
        return endian.name().to_string();
    }
    format!("{:#x}", code)
}

/// Ask libsndfile for the name and description of a code.
///
/// `command` is one of `SFC_GET_FORMAT_INFO` (look up by code),
/// `SFC_GET_FORMAT_MAJOR` or `SFC_GET_FORMAT_SUBTYPE` (look up by index).
/// Returns `(name, description)`; the description is empty when libsndfile
/// does not know the code.
pub fn format_info(code: c_int, command: c_int) -> (String, String) {
    let mut info = SF_FORMAT_INFO {
        format: code,
        ..SF_FORMAT_INFO::default()
    };

    // SAFETY: sf_command with a null handle only touches the passed struct,
    // whose size we report accurately.
    unsafe {
        sf_command(
            ptr::null_mut(),
            command,
            &mut info as *mut SF_FORMAT_INFO as *mut c_void,
            std::mem::size_of::<SF_FORMAT_INFO>() as c_int,
        );
    }

    let description = if info.name.is_null() {
        String::new()
    } else {
        // SAFETY: libsndfile returns pointers into its static format tables.
        unsafe { CStr::from_ptr(info.name) }
            .to_string_lossy()
            .into_owned()
    };

    (format_str(info.format), description)
}

/// Return the major formats supported by the linked libsndfile.
///
/// Maps format names to their descriptions.
///
/// # Example
///
/// ```no_run
/// let formats = soundfile_rs::available_formats();
/// assert_eq!(formats["WAV"], "WAV (Microsoft)");
/// ```
pub fn available_formats() -> BTreeMap<String, String> {
    enumerate_formats(
        ffi::SFC_GET_FORMAT_MAJOR_COUNT as c_int,
        ffi::SFC_GET_FORMAT_MAJOR as c_int,
    )
    .collect()
}

/// Return the subtypes supported by the linked libsndfile.
///
/// If `format` is given, only subtypes valid for that major format are
/// returned.
pub fn available_subtypes(format: Option<&str>) -> BTreeMap<String, String> {
    enumerate_formats(
        ffi::SFC_GET_FORMAT_SUBTYPE_COUNT as c_int,
        ffi::SFC_GET_FORMAT_SUBTYPE as c_int,
    )
    .filter(|(subtype, _)| format.map_or(true, |f| check_format(f, Some(subtype), None)))
    .collect()
}

/// Iterate `(name, description)` pairs of one libsndfile format table.
fn enumerate_formats(count_command: c_int, item_command: c_int) -> impl Iterator<Item = (String, String)> {
    let mut count: c_int = 0;

    // SAFETY: the count commands write a single int.
    unsafe {
        sf_command(
            ptr::null_mut(),
            count_command,
            &mut count as *mut c_int as *mut c_void,
            std::mem::size_of::<c_int>() as c_int,
        );
    }

    (0..count.max(0)).map(move |index| format_info(index, item_command))
}
