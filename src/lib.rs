//! Translates stack-machine VM commands into Hack assembly.
//!
//! Each source line is parsed into an [`ast::Command`], turned into a
//! [`asm::Fragment`] of instruction records by [`translator::generate`], and
//! rendered to text by the [`driver`].

pub mod asm;
pub mod ast;
pub mod driver;
pub mod error;
pub mod parser;
pub mod segments;
pub mod translator;

pub use driver::{fragments, translate, translate_reader, Summary, TranslateOptions, Translation};
pub use error::TranslateError;
