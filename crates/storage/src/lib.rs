#![forbid(unsafe_code)]

//! File-backed store for kanbn-compatible planning boards.
//!
//! A board is a directory with an `index.md` (YAML frontmatter options plus
//! one `##` heading per column) and one markdown file per task under
//! `tasks/`. Every operation re-reads the documents, mutates in memory and
//! writes back only the affected files; the on-disk document set is the
//! single source of truth.

mod store;

pub use store::*;
