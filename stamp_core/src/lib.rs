//! `stamp_core` fills marker comments in generated web assets with
//! content derived from a project's `stamp.toml`: script tags for the library
//! base and dependency scripts, references to the application's main
//! namespace, and the test-runner stylesheet link.
//!
//! ## Processing Pipeline
//!
//! ```text
//! stamp.toml
//!   → StampConfig (raw, relative paths)
//!   → ResolvedConfig (absolute paths, injected into the Rewriter)
//!   → Walk (development dir, skipping library and compiler roots)
//!   → Rewriter (per line: indent + replacement + marker + "\n")
//! ```
//!
//! ## Markers
//!
//! | Marker | Inserted text |
//! |---|---|
//! | `<!--@base_js@-->` | `<script>` tag for the base script |
//! | `<!--@deps_js@-->` | `<script>` tag for the dependencies script |
//! | `/*@exec_main@*/` | `NS();` |
//! | `/*@main_fn@*/` | `NS = function() {` |
//! | `/*@provide_main@*/` | `goog.provide('NS');` |
//! | `<!--@require_main@-->` | `<script>` tag calling `goog.require('NS')` |
//! | `<!--@multitestrunner_css@-->` | `<link>` tag for the test-runner stylesheet |
//!
//! The marker itself is kept after the inserted text, so every run matches
//! it again and regenerates the whole line from the current configuration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stamp_core::ResolvedConfig;
//! use stamp_core::Rewriter;
//! use std::path::Path;
//!
//! let config = ResolvedConfig::load(Path::new(".")).unwrap();
//! let report = Rewriter::new(config).rewrite_all().unwrap();
//! println!("{} marker(s) rewritten", report.replaced_count());
//! ```

pub use config::*;
pub use error::*;
pub use marker::*;
pub use rewriter::*;
pub use walk::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod marker;
mod rewriter;
pub mod walk;
