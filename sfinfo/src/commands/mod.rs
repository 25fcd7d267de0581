//! Subcommand implementations, one module per mode.

pub mod convert;
pub mod formats;
pub mod info;
