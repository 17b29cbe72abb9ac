//! Line-by-line translation of a whole compilation unit.

use std::io::{self, BufRead, Write};
use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::asm::Fragment;
use crate::error::TranslateError;
use crate::parser::parse_line;
use crate::translator::{generate, TranslationContext};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Precede each fragment with a `// <command>` comment.
    pub annotate: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub commands: usize,
    pub instructions: usize,
}

/// Lazily parses and translates source lines, strictly in input order.
///
/// Blank and comment-only lines are consumed (they still advance the line
/// counter) but yield nothing. The first error is yielded once and ends the
/// iteration.
pub struct Translation<I> {
    lines: I,
    line: usize,
    done: bool,
}

impl<I, S> Translation<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Translation {
            lines,
            line: 0,
            done: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    fn translate_line(&self, text: &str) -> Result<Fragment, TranslateError> {
        let command = parse_line(text, self.line)?;
        generate(&command, TranslationContext::new(self.line))
    }
}

impl<I, S> Iterator for Translation<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    type Item = Result<Fragment, TranslateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            };
            self.line += 1;

            let text = text.as_ref().trim();
            if text.is_empty() {
                continue;
            }

            match self.translate_line(text) {
                Ok(fragment) if fragment.is_empty() => continue,
                Ok(fragment) => {
                    debug!(
                        line = self.line,
                        command = %fragment.command,
                        instructions = fragment.instructions.len(),
                        "translated"
                    );
                    return Some(Ok(fragment));
                }
                Err(err) => {
                    warn!(line = self.line, "translation aborted: {}", err);
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<I, S> FusedIterator for Translation<I>
where
    I: Iterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
}

/// Fragments for every command in `source`.
pub fn fragments(source: &str) -> impl Iterator<Item = Result<Fragment, TranslateError>> + '_ {
    Translation::new(source.lines().map(Ok))
}

/// Streams `reader` through the translator into `writer`.
///
/// Fragments are written as soon as they are generated, so on error `writer`
/// holds the output of every line before the failing one. Callers that must
/// not leave partial output behind should hand in a buffer.
pub fn translate_reader<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    options: &TranslateOptions,
) -> Result<Summary, TranslateError> {
    let mut translation = Translation::new(reader.lines());
    let mut summary = Summary::default();

    for fragment in translation.by_ref() {
        let fragment = fragment?;
        fragment.render(&mut writer, options.annotate)?;
        summary.commands += 1;
        summary.instructions += fragment.instructions.len();
    }
    writer.flush()?;

    summary.lines = translation.line();
    Ok(summary)
}

/// Translates a whole unit held in memory. Nothing is returned unless every line translates.
pub fn translate(source: &str, options: &TranslateOptions) -> Result<String, TranslateError> {
    let mut out = Vec::new();
    translate_reader(source.as_bytes(), &mut out, options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
