use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SNDFILE_LIB_DIR");
    println!("cargo:rustc-check-cfg=cfg(sndfile_unlinked)");

    // docs.rs has no libsndfile; the declarations compile without it
    if env::var("DOCS_RS").is_ok() {
        println!("cargo:warning=Building on docs.rs - skipping libsndfile linkage");
        println!("cargo:rustc-cfg=sndfile_unlinked");
        return;
    }

    let include_paths = match try_pkg_config() {
        Some(paths) => paths,
        None => {
            println!("cargo:warning=pkg-config failed to find libsndfile");
            fallback_link();
            Vec::new()
        }
    };

    if env::var("CARGO_FEATURE_BINDGEN").is_ok() {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
        generate_bindings(&include_paths, &out_dir);
    }
}

/// Try to find libsndfile using pkg-config.
///
/// On success pkg-config emits the link directives itself.
fn try_pkg_config() -> Option<Vec<PathBuf>> {
    match pkg_config::Config::new()
        .atleast_version("1.0")
        .probe("sndfile")
    {
        Ok(lib) => {
            println!("cargo:info=Found libsndfile {} via pkg-config", lib.version);
            Some(lib.include_paths)
        }
        Err(e) => {
            println!("cargo:warning=pkg-config error: {}", e);
            None
        }
    }
}

/// Link against a plain `libsndfile`, honouring `SNDFILE_LIB_DIR`.
fn fallback_link() {
    if let Ok(dir) = env::var("SNDFILE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }

    println!("cargo:warning=Falling back to -lsndfile");
    if cfg!(target_os = "windows") {
        println!("cargo:rustc-link-lib=sndfile-1");
    } else {
        println!("cargo:rustc-link-lib=sndfile");
    }
}

/// Generate Rust bindings from the installed `sndfile.h` using bindgen.
#[cfg(feature = "bindgen")]
fn generate_bindings(include_paths: &[PathBuf], out_dir: &PathBuf) {
    let mut builder = bindgen::Builder::default()
        .header_contents("wrapper.h", "#include <sndfile.h>\n");

    for path in include_paths {
        builder = builder.clang_arg(format!("-I{}", path.display()));
    }

    let bindings = builder
        // Functions
        .allowlist_function("sf_.*")
        // Types
        .allowlist_type("SNDFILE.*")
        .allowlist_type("SF_.*")
        .allowlist_type("sf_.*")
        // Constants from the anonymous enums
        .allowlist_var("SF_.*")
        .allowlist_var("SFM_.*")
        .allowlist_var("SFC_.*")
        .allowlist_var("SF_STR_.*")
        .allowlist_var("SF_ERR_.*")
        .default_enum_style(bindgen::EnumVariation::Consts)
        .translate_enum_integer_types(true)
        .derive_debug(true)
        .derive_default(true)
        .derive_copy(true)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .layout_tests(true)
        .generate()
        .expect("Failed to generate libsndfile bindings");

    let bindings_path = out_dir.join("bindings.rs");
    bindings
        .write_to_file(&bindings_path)
        .expect("Failed to write bindings");

    println!("cargo:info=Generated bindings at {:?}", bindings_path);
}

#[cfg(not(feature = "bindgen"))]
fn generate_bindings(_include_paths: &[PathBuf], _out_dir: &PathBuf) {}
