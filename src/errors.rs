//! Error types with rich diagnostics using miette
//!
//! Path errors carry a span into the offending path string.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Wrap a path string for miette's source-code display.
pub(crate) fn path_source(path: &str) -> NamedSource<String> {
    NamedSource::new("<path>", path.to_string())
}

// ============================================================================
// Path Errors
// ============================================================================

/// Errors that occur while tokenizing or decoding a path string
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("invalid path syntax: {message}")]
    #[diagnostic(code(drawshape::path::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("`{letter}` takes arguments in groups of {expected}, got {got}")]
    #[diagnostic(code(drawshape::path::argument_count))]
    ArgumentCount {
        letter: char,
        expected: usize,
        got: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("this command")]
        span: SourceSpan,
    },

    #[error("path must begin with a move command")]
    #[diagnostic(
        code(drawshape::path::missing_move_to),
        help("start the path with `M x,y`")
    )]
    MissingMoveTo {
        #[source_code]
        src: NamedSource<String>,
        #[label("drawing before any `M`")]
        span: SourceSpan,
    },
}

impl PathError {
    /// Byte range of the offending input.
    pub fn span(&self) -> SourceSpan {
        match self {
            PathError::Syntax { span, .. }
            | PathError::ArgumentCount { span, .. }
            | PathError::MissingMoveTo { span, .. } => *span,
        }
    }
}
