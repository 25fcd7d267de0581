//! Version of the linked libsndfile.

use std::ffi::CStr;
use std::sync::OnceLock;

use sndfile_sys::sf_version_string;

/// Cached version string.
static VERSION: OnceLock<String> = OnceLock::new();

/// The full version string of the linked libsndfile, e.g.
/// `"libsndfile-1.2.2"`.
///
/// The string is fetched from the library once and cached.
///
/// # Example
///
/// ```no_run
/// println!("{}", soundfile_rs::library_version());
/// ```
pub fn library_version() -> &'static str {
    VERSION.get_or_init(|| {
        // SAFETY: sf_version_string returns a pointer to a static string.
        let ptr = unsafe { sf_version_string() };
        if ptr.is_null() {
            return String::from("libsndfile-unknown");
        }
        unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned()
    })
}

/// The version number alone, e.g. `"1.2.2"`.
pub fn library_version_number() -> &'static str {
    let version = library_version();
    version.strip_prefix("libsndfile-").unwrap_or(version)
}
