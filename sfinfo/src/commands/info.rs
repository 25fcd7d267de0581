//! File summary command (INPUT alone).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Args;
use crate::output;

/// Run the info command.
pub fn run(args: &Args, input: &Path) -> Result<()> {
    output::print_verbose(
        &format!("Opening sound file: {}", input.display()),
        args.verbose,
    );

    let info = soundfile_rs::info(input)
        .with_context(|| format!("Failed to open sound file: {}", input.display()))?;

    if args.quiet {
        return Ok(());
    }

    output::print_title(&info.name);
    output::print_field("Sample rate", &format!("{} Hz", info.samplerate));
    output::print_field("Channels", &output::format_channels(info.channels));
    output::print_field("Frames", &output::format_frames(info.frames));
    output::print_field("Duration", &output::format_clock(info.duration));
    output::print_field("Format", &output::format_code(&info.format_info, &info.format));
    output::print_field("Subtype", &output::format_code(&info.subtype_info, &info.subtype));
    output::print_field("Endian", &info.endian);
    output::print_field("Sections", &info.sections.to_string());
    output::print_field("Seekable", if info.seekable { "yes" } else { "no" });

    if let Ok(metadata) = fs::metadata(input) {
        output::print_field("File size", &output::format_size(metadata.len()));
    }

    if !info.tags.is_empty() {
        output::print_title("Tags");
        for (tag, value) in &info.tags {
            output::print_field(tag.name(), value);
        }
    }

    Ok(())
}
