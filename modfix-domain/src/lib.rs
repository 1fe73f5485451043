//! Domain logic: turn tidy analysis results and go command errors into
//! go.mod diagnostics and quick fixes.
//!
//! This crate owns *what* is reported and where it is anchored. It does not
//! own caching, file loading or running the go command; those sit behind the
//! [`Snapshot`] port and are provided by `modfix-core`.

mod diagnostics;
mod error;
mod locate;
mod ports;
mod quickfix;
mod range;
mod token;

pub use diagnostics::{DiagnosticSet, compute_diagnostics, to_diagnostic};
pub use error::{ModError, ModResult};
pub use locate::locate_tool_error;
pub use ports::{Snapshot, TidyError};
pub use quickfix::{compute_quick_fixes, same_diagnostic};
pub use range::{range_from_offsets, range_from_span};
pub use token::{
    ModuleAtVersion, SegmentMatcher, TokenExtractor, colon_segments, extract_module_version,
};
