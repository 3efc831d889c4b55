//! `probook_core` is the engine behind [probook](../probook_cli). It turns a
//! tree of annotated solution snippets and a markdown template with
//! placeholder regions into a single merged blog post.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Snippet tree (*.cpp + optional *.md explanations)
//!   → Tree scanner (walks directories, files before subdirectories)
//!   → Header parser (reads the `/** @problem: ... */` block, validates ids)
//!   → Snippet registry (files each entry under every declared identifier)
//! Template (index.md)
//!   → Document merger (finds `<!-- problem.<id>.begin/end -->` regions,
//!     inserts explanation + listing before each closing marker)
//!   → result.md
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `probook.toml` discovery and path resolution.
//! - [`header`]: Snippet header micro-format.
//! - [`scanner`]: Directory walking and snippet loading.
//!
//! ## Key Types
//!
//! - [`SnippetEntry`]: One parsed snippet with its explanation and listing.
//! - [`SnippetRegistry`]: Identifier to snippet mapping populated by the
//!   scan and read by the merge.
//! - [`MergeOutcome`]: The merged document plus which regions were filled.
//! - [`BuildContext`]: Resolved paths and options for a full build.
//!
//! ## Snippet Format
//!
//! ```text
//! /**
//!  * @problem: two-sum, leetcode-1
//!  * @tags: hash-table
//!  * @date: 2021-03-14
//!  */
//! int main() {}
//! ```
//!
//! The file's own name without its extension must be one of the `@problem`
//! identifiers. Files without such a header are skipped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use probook_core::PathOverrides;
//! use probook_core::{BuildContext, build};
//! use std::path::Path;
//!
//! let ctx = BuildContext::load(Path::new("."), &PathOverrides::default()).unwrap();
//! let result = build(&ctx).unwrap();
//! println!("merged {} region(s)", result.outcome.merged.len());
//! ```

pub use build::*;
pub use config::*;
pub use error::*;
pub use merger::*;
pub use registry::*;

mod build;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod header;
mod merger;
mod registry;
pub mod scanner;
