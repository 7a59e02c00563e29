//! Core library for docgen
//!
//! This crate implements the **Functional Core** of the docgen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The docgen project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`docgen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`docgen`**: Filesystem access, HTTP calls to generation backends, and
//!   orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`grouping`]: Main/companion file grouping by base-name suffix
//! - [`merge`]: Concatenation of a main document with its companions
//! - [`prompt`]: Prompt template substitution
//! - [`regen`]: Staleness decision from modification times
//! - [`selection`]: Which work set a run operates on
//! - [`failed`]: Failure-record model and side-file (de)serialization
//! - [`providers`]: Provider identifiers plus the request/response wire shapes
//!   of every generation backend
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docgen_core::grouping::group_for_merge;
//! use std::path::PathBuf;
//!
//! let files = vec![PathBuf::from("docs/llm/foo.md"), PathBuf::from("docs/llm/foo-impl.md")];
//! let groups = group_for_merge(&files);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].companion_files.len(), 1);
//! ```

pub mod failed;
pub mod grouping;
pub mod merge;
pub mod prompt;
pub mod providers;
pub mod regen;
pub mod selection;
