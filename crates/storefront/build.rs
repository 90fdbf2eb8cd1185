//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so templates can reference an
//! immutable, content-addressed stylesheet URL.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by Cargo"));
    let css_path = manifest_dir.join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        println!("cargo:warning=stylesheet missing at {}", css_path.display());
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..HASH_LEN).unwrap_or(&digest);
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    publish_fingerprinted(&manifest_dir, &css_path, short_hash);
}

/// Copy the stylesheet to `static/css/derived/main.<hash>.css`.
fn publish_fingerprinted(manifest_dir: &Path, css_path: &Path, hash: &str) {
    let derived_dir = manifest_dir.join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("derived CSS directory is creatable");
    fs::copy(css_path, derived_dir.join(format!("main.{hash}.css")))
        .expect("stylesheet copies into the derived directory");
}
