//! Translator from the stack-based VM language to Hack assembly.
//!
//! [`parser`] turns source text into [`ast::Command`]s, [`translator`] expands
//! each command into instructions, and [`program`] strings whole programs
//! together behind an optional bootstrap.

pub mod ast;
pub mod error;
pub mod parser;
pub mod program;
pub mod source;
pub mod translator;

pub use error::{Error, TranslateError};
pub use program::{assemble, serialize, Unit};
pub use translator::Translator;
