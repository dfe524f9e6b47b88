//! Emission of resolved layers as stylesheet text.
//!
//! [`format`] turns a `ResolvedLayer` into plain stylesheet source (a base
//! selector plus an `@keyframes` block); [`compile`] runs that source through
//! lightningcss to get canonical, vendor-prefixed CSS. The formatter is
//! stateless and consumes pose data by reference; it never reaches back into
//! the resolution engine.

pub mod compile;
pub mod format;

pub use compile::{compile, CompileError};
pub use format::{stylesheet_source, FormatOptions};
