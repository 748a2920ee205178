//! caffstream-rs — one-shot extraction of the embedded CIFF image from a
//! CAFF animation container.
//!
//! The container is a flat sequence of tagged, length-prefixed blocks behind
//! a signed header. [`formats`] holds the block decoding and the extractor
//! itself; [`api`] wraps it in a path-to-path conversion used by the
//! `caff2ciff` binary.

pub mod api;
pub mod formats;
pub mod testlib;

pub use api::{convert_file, ConvertError};
pub use formats::{extract_first_animation, Extraction, FormatError};

static CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate semantic version string.
pub fn version() -> &'static str {
    CRATE_VERSION
}
