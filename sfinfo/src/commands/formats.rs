//! Format listings (--formats and --subtypes modes).

use anyhow::{bail, Result};
use colored::Colorize;

use soundfile_rs::{available_formats, available_subtypes, default_subtype, MajorFormat};

use crate::cli::Args;
use crate::output;

/// Run the --formats listing.
pub fn run_formats(args: &Args) -> Result<()> {
    output::print_verbose(
        &format!("libsndfile version: {}", soundfile_rs::library_version()),
        args.verbose,
    );

    let formats = available_formats();
    println!("{}", "Major formats:".bold());
    for (name, description) in &formats {
        output::print_entry(name, description);
    }

    output::print_verbose(&format!("{} formats", formats.len()), args.verbose);
    Ok(())
}

/// Run the --subtypes listing, optionally restricted to one major format.
pub fn run_subtypes(args: &Args, format: Option<&str>) -> Result<()> {
    let subtypes = available_subtypes(format);

    match format {
        Some(format) => {
            // Unknown names would silently list nothing
            let major: MajorFormat = format.parse()?;
            if subtypes.is_empty() {
                bail!("No subtypes available for format '{}'", major);
            }
            println!("{}", format!("Subtypes for {}:", major).bold());
        }
        None => println!("{}", "Subtypes:".bold()),
    }

    let default = format.and_then(default_subtype);
    for (name, description) in &subtypes {
        let is_default = default.map_or(false, |d| d.name() == name.as_str());
        if is_default {
            output::print_entry(name, &format!("{} (default)", description));
        } else {
            output::print_entry(name, description);
        }
    }

    output::print_verbose(&format!("{} subtypes", subtypes.len()), args.verbose);
    Ok(())
}
