//! docspell - A CLI tool that spell-checks a documentation corpus
//!
//! This library provides the core functionality: discovering candidate
//! documentation files, building a merged session dictionary, running
//! per-file pipelines of external processes, and aggregating results.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod selector;
