//! Embeddable core library for modfix.
//!
//! Provides a clap-free entry point suitable for linking into a language
//! server or other host process.
//!
//! # Ports
//!
//! The domain reads everything through [`Snapshot`]. This crate provides:
//! - [`MemorySnapshot`](adapters::MemorySnapshot): files held in memory, loadable from disk
//! - [`MemoizedTidy`](tidy::MemoizedTidy): per-content, single-flight tidy handle
//! - [`TidySource`](ports::TidySource): what actually produces a tidy run
//!
//! # Entry points
//!
//! - [`run_diagnostics`](pipeline::run_diagnostics): diagnostics to publish
//! - [`run_quick_fixes`](pipeline::run_quick_fixes): code actions for held diagnostics
//! - [`run_locate`](pipeline::run_locate): anchor a go command error, with fallback

pub mod adapters;
pub mod hash;
pub mod pipeline;
pub mod ports;
pub mod settings;
pub mod tidy;

// Re-export the domain surface so embedders don't need modfix-domain directly.
pub use modfix_domain::{ModError, ModResult, Snapshot, TidyError};
