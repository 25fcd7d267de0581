//! Block-wise conversion command (INPUT OUTPUT).

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::info;

use soundfile_rs::{check_format, BlockOptions, MajorFormat, OpenOptions, SoundFile};

use crate::cli::Args;
use crate::output::{self, FrameProgress};

/// Run the convert command.
pub fn run(args: &Args, input: &Path, output_path: &Path) -> Result<()> {
    let start_time = Instant::now();

    if output_path.exists() && same_file(input, output_path) {
        bail!("Input and output are the same file: {}", input.display());
    }

    output::print_verbose(
        &format!("Opening sound file: {}", input.display()),
        args.verbose,
    );

    let mut source = SoundFile::open(input)
        .with_context(|| format!("Failed to open sound file: {}", input.display()))?;

    output::print_verbose(&source.to_string(), args.verbose);

    let options = output_options(args, &source, output_path);
    let mut target = options
        .open(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

    info!(
        input = %input.display(),
        output = %output_path.display(),
        format = %target.format(),
        subtype = %target.subtype(),
        "converting"
    );

    // Tags go in before any audio, which most formats require
    for (tag, value) in source.tags().context("Failed to read tags")? {
        if let Err(e) = target.set_tag(tag, &value) {
            output::print_warning(&format!("Tag '{}' not copied: {}", tag, e));
        }
    }

    let total = source.frames();
    let channels = source.channels();
    let mut progress = FrameProgress::new(total, args.verbose);
    let mut written = 0u64;

    // One buffer for the whole copy
    let mut buffer = vec![0.0f64; args.blocksize * channels];
    let mut blocks = source
        .blocks::<f64>(BlockOptions::new(args.blocksize))
        .context("Failed to read input")?;

    while let Some(frames) = blocks.next_into(&mut buffer) {
        let frames = frames.context("Failed to read input")?;
        target
            .write(&buffer[..frames * channels])
            .context("Failed to write output")?;
        written += frames as u64;
        progress.advance(frames as u64);
    }

    progress.finish();

    // Close file
    target.close().context("Failed to close output file")?;

    if !args.quiet {
        print_summary(input, output_path, &target, written, start_time.elapsed());
    }

    Ok(())
}

/// Build the output options from the arguments and the input file.
fn output_options(args: &Args, source: &SoundFile<'_>, output_path: &Path) -> OpenOptions {
    let mut options = OpenOptions::new()
        .mode("w")
        .samplerate(source.samplerate())
        .channels(source.channels());

    if let Some(ref format) = args.format {
        options = options.format(format);
    }
    if let Some(ref endian) = args.endian {
        options = options.endian(endian);
    }

    match args.subtype {
        Some(ref subtype) => options.subtype(subtype),
        None => match inherited_subtype(args, source, output_path) {
            Some(subtype) => options.subtype(subtype),
            None => options,
        },
    }
}

/// The input's subtype, if the output should keep it.
///
/// It is kept when the output has the same major format, or a format with
/// no default subtype such as RAW, and the combination is valid.
fn inherited_subtype(args: &Args, source: &SoundFile<'_>, output_path: &Path) -> Option<String> {
    let major = match args.format {
        Some(ref format) => format.parse::<MajorFormat>().ok()?,
        None => MajorFormat::from_extension(output_path)?,
    };

    let subtype = source.subtype();
    let keep = major.name() == source.format() || major.default_subtype().is_none();
    if keep && check_format(major.name(), Some(&subtype), args.endian.as_deref()) {
        Some(subtype)
    } else {
        None
    }
}

/// Whether two existing paths name the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Print conversion summary.
fn print_summary(
    input: &Path,
    output_path: &Path,
    target: &SoundFile<'_>,
    frames: u64,
    elapsed: std::time::Duration,
) {
    println!();
    output::print_done(&format!(
        "Converted {} to {}",
        input.display(),
        output_path.display()
    ));

    output::print_field("Frames written", &output::format_frames(frames));
    output::print_field("Duration", &output::format_clock(target.duration()));
    output::print_field(
        "Output format",
        &format!("{} / {}", target.format(), target.subtype()),
    );
    output::print_field("Processing time", &format!("{:.2?}", elapsed));

    if elapsed.as_secs_f64() > 0.001 {
        let fps = frames as f64 / elapsed.as_secs_f64();
        output::print_field("Speed", &format!("{:.0} frames/sec", fps));
    }
}
