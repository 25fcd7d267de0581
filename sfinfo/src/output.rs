//! Terminal output for sfinfo.
//!
//! Listings and summaries go to stdout. Errors, warnings, verbose notes and
//! conversion progress go to stderr so they never mix with a listing.

use std::io::{self, Write};

use colored::Colorize;

/// Width of the label column in file summaries.
const LABEL_WIDTH: usize = 16;

/// Print an error and the chain of causes under it.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".red(), cause);
    }
}

/// Print a warning.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a note that only shows with `--verbose`.
pub fn print_verbose(msg: &str, verbose: bool) {
    if verbose {
        eprintln!("{} {}", "note:".blue(), msg);
    }
}

/// Print the line that closes a finished conversion.
pub fn print_done(msg: &str) {
    println!("{} {}", "done:".green().bold(), msg);
}

/// Print a section title, such as a file name.
pub fn print_title(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Print one labelled field of a summary, values aligned in a column.
pub fn print_field(label: &str, value: &str) {
    let label = format!("{}:", label);
    let pad = LABEL_WIDTH.saturating_sub(label.len());
    println!("  {}{} {}", label.dimmed(), " ".repeat(pad), value);
}

/// Print a name and its description as one row of a listing.
pub fn print_entry(name: &str, description: &str) {
    println!("  {:<10} {}", name.bold(), description);
}

/// Frame counts with thousands separators, e.g. `2,646,000`.
pub fn format_frames(frames: u64) -> String {
    let digits = frames.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A length in seconds as a clock reading, e.g. `1:30.000`.
///
/// Hours appear only when needed.
pub fn format_clock(seconds: f64) -> String {
    let millis = (seconds * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let minutes = millis / 60_000 % 60;
    let secs = millis / 1000 % 60;
    let ms = millis % 1000;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
    } else {
        format!("{}:{:02}.{:03}", minutes, secs, ms)
    }
}

/// A channel count with its common layout name.
pub fn format_channels(channels: usize) -> String {
    match channels {
        1 => "1 (mono)".to_string(),
        2 => "2 (stereo)".to_string(),
        n => n.to_string(),
    }
}

/// A format or subtype as libsndfile describes it, with its short name.
pub fn format_code(description: &str, name: &str) -> String {
    format!("{} [{}]", description, name)
}

/// A byte count in binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} bytes", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

/// Conversion progress in frames, reported in 10% steps on stderr.
pub struct FrameProgress {
    total: u64,
    done: u64,
    reported: u64,
    enabled: bool,
}

impl FrameProgress {
    pub fn new(total: u64, enabled: bool) -> Self {
        FrameProgress {
            total,
            done: 0,
            reported: 0,
            enabled,
        }
    }

    /// Percentage of `total` copied so far.
    fn percent(&self) -> u64 {
        if self.total == 0 {
            100
        } else {
            self.done * 100 / self.total
        }
    }

    pub fn advance(&mut self, frames: u64) {
        self.done = (self.done + frames).min(self.total);

        let percent = self.percent();
        if self.enabled && self.total > 0 && percent >= self.reported + 10 {
            self.reported = percent;
            eprint!(
                "\r{} {:>3}% of {} frames",
                "copying".blue(),
                percent,
                format_frames(self.total)
            );
            io::stderr().flush().ok();
        }
    }

    pub fn finish(&self) {
        if self.enabled && self.total > 0 {
            eprintln!(
                "\r{} {:>3}% of {} frames",
                "copying".blue(),
                self.percent(),
                format_frames(self.total)
            );
        }
    }
}
