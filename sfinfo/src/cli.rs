//! Command-line argument definitions using clap derive macros.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Inspect and convert sound files.
///
/// sfinfo prints the header and metadata of any file libsndfile can read,
/// lists the formats the installed libsndfile supports, and converts
/// between formats block by block.
#[derive(Parser, Debug)]
#[command(name = "sfinfo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Input sound file
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output sound file (converts INPUT when given)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    // ========================================================================
    // Mode Selection
    // ========================================================================
    /// List the available major formats and exit
    #[arg(long)]
    pub formats: bool,

    /// List the available subtypes and exit
    ///
    /// With FORMAT, only the subtypes that can be combined with it are
    /// listed.
    #[arg(long, value_name = "FORMAT", num_args = 0..=1)]
    pub subtypes: Option<Option<String>>,

    // ========================================================================
    // Output Format
    // ========================================================================
    /// Major format of the output (default: from the output extension)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Subtype of the output
    ///
    /// Defaults to the input's subtype when the output has the same major
    /// format, and to the format's default subtype otherwise.
    #[arg(short = 's', long, value_name = "SUBTYPE")]
    pub subtype: Option<String>,

    /// Endian-ness of the output
    #[arg(short = 'e', long, value_name = "ENDIAN")]
    pub endian: Option<String>,

    /// Frames per block when converting
    #[arg(short = 'b', long, value_name = "FRAMES", default_value = "65536")]
    pub blocksize: usize,

    // ========================================================================
    // Output Control
    // ========================================================================
    /// Show detailed progress and information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force overwrite of existing output file
    #[arg(long)]
    pub force: bool,
}

/// What a set of arguments asks for.
#[derive(Debug, PartialEq)]
pub enum Mode<'a> {
    /// List major formats
    Formats,
    /// List subtypes, optionally for one major format
    Subtypes(Option<&'a str>),
    /// Print the summary of a file
    Info(&'a Path),
    /// Convert a file
    Convert {
        /// File to read
        input: &'a Path,
        /// File to write
        output: &'a Path,
    },
}

impl Args {
    /// Validate argument combinations.
    pub fn validate(&self) -> Result<(), String> {
        // Quiet and verbose are mutually exclusive
        if self.quiet && self.verbose {
            return Err("Cannot use both --quiet and --verbose".to_string());
        }

        // Listing modes don't need files
        if self.formats || self.subtypes.is_some() {
            return Ok(());
        }

        let input = match self.input {
            Some(ref input) => input,
            None => {
                return Err(
                    "Input file is required (or use --formats or --subtypes)".to_string(),
                )
            }
        };

        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()));
        }

        match self.output {
            Some(ref output) => {
                if output.exists() && !self.force {
                    return Err(format!(
                        "Output file already exists: {} (use --force to overwrite)",
                        output.display()
                    ));
                }
                if self.blocksize == 0 {
                    return Err("Block size must be at least 1".to_string());
                }
            }
            None => {
                if self.format.is_some() || self.subtype.is_some() || self.endian.is_some() {
                    return Err(
                        "--format, --subtype and --endian require an output file".to_string(),
                    );
                }
            }
        }

        Ok(())
    }

    /// The mode selected by the arguments.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn mode(&self) -> Option<Mode<'_>> {
        if self.formats {
            return Some(Mode::Formats);
        }
        if let Some(ref format) = self.subtypes {
            return Some(Mode::Subtypes(format.as_deref()));
        }

        let input = self.input.as_deref()?;
        Some(match self.output.as_deref() {
            Some(output) => Mode::Convert { input, output },
            None => Mode::Info(input),
        })
    }
}

/// Example usage shown in --help.
const EXAMPLES: &str = r#"
EXAMPLES:
    # Show the header and tags of a file
    sfinfo recording.wav

    # List the formats and subtypes libsndfile supports
    sfinfo --formats
    sfinfo --subtypes FLAC

    # Convert, taking the format from the output extension
    sfinfo recording.wav recording.flac

    # Convert to 24-bit big-endian AIFF
    sfinfo recording.wav out.aiff --subtype PCM_24 --endian BIG

    # Write headerless samples
    sfinfo recording.wav samples.raw --subtype FLOAT

    # Overwrite with progress and library logging
    RUST_LOG=soundfile_rs=debug sfinfo -v --force in.flac out.ogg
"#;
