//! gmake — a very lightweight build tool.
//!
//! A GMakefile is a list of named directives, each a block of
//! semicolon-terminated commands:
//!
//! ```text
//! all {
//!     cc -o hello hello.c;
//! }
//! ```

pub mod config;
pub mod dsl;
pub mod runner;
