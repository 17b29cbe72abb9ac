use std::io;

use crate::ast::Command;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("syntax error at line {line}: \"{text}\"")]
    Syntax { line: usize, text: String },

    /// A command reached code generation without a rule for it.
    #[error("internal error at line {line}: no code generation rule for `{command}`")]
    Internal { line: usize, command: Command },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl TranslateError {
    pub fn line(&self) -> Option<usize> {
        match self {
            TranslateError::Syntax { line, .. } | TranslateError::Internal { line, .. } => {
                Some(*line)
            }
            TranslateError::Io(_) => None,
        }
    }
}
