//! Shared test utilities for the image-server workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Instrumented drawing plugins (recording, failing, marking)
//! - PNG decoding and pixel inspection helpers
//! - Reference renders to compare pipeline output against
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{CallLog, RecordingPlugin, decode_png};
//! ```

pub mod images;
pub mod plugins;

// Re-export commonly used items at the crate root
pub use images::*;
pub use plugins::*;

/// Assert that PNG bytes decode to an image of the given size.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_png_size;
///
/// assert_png_size!(&png, 240, 80);
/// ```
#[macro_export]
macro_rules! assert_png_size {
    ($png:expr, $width:expr, $height:expr) => {{
        let decoded = $crate::decode_png($png);
        assert_eq!(
            decoded.dimensions(),
            ($width as u32, $height as u32),
            "unexpected PNG dimensions"
        );
        decoded
    }};
}
