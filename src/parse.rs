//! Tokenize SVG path data into raw commands
//!
//! Each command comes out with its letter upper-cased, a relative flag, and
//! exactly one group of arguments: implicit repeats such as `L1,2 3,4` are
//! split into separate commands, and extra pairs after a move become lines.

use crate::errors::{PathError, path_source};
use crate::{PathParser, Rule};
use pest::Parser;
use pest::iterators::Pair;

/// One drawing instruction as written in the path string.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    /// Upper-case command letter
    pub letter: char,
    /// True for lower-case (relative) commands
    pub relative: bool,
    pub args: Vec<f64>,
    /// Byte offset and length of the command in the source
    pub span: (usize, usize),
}

/// Number of arguments one instance of `letter` consumes.
pub fn arg_count(letter: char) -> usize {
    match letter {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'Q' | 'S' => 4,
        'C' => 6,
        'A' => 7,
        _ => 0,
    }
}

/// Tokenize path data.
pub fn tokenize(path: &str) -> Result<Vec<RawCommand>, PathError> {
    let pairs = PathParser::parse(Rule::path, path).map_err(|e| syntax_error(path, e))?;

    let mut commands = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::path {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::command {
                    split_command(path, inner, &mut commands)?;
                }
            }
        }
    }
    Ok(commands)
}

fn syntax_error(path: &str, err: pest::error::Error<Rule>) -> PathError {
    use pest::error::InputLocation;

    let (start, end) = match err.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span(span) => span,
    };
    PathError::Syntax {
        message: err.variant.message().into_owned(),
        src: path_source(path),
        span: (start, end - start).into(),
    }
}

fn split_command(
    path: &str,
    pair: Pair<Rule>,
    out: &mut Vec<RawCommand>,
) -> Result<(), PathError> {
    let span = pair.as_span();
    let span = (span.start(), span.end() - span.start());

    let mut letter = None;
    let mut args = Vec::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::letter => letter = part.as_str().chars().next(),
            Rule::args => {
                for number in part.into_inner() {
                    args.push(parse_number(path, &number)?);
                }
            }
            _ => {}
        }
    }

    let Some(letter) = letter else {
        return Err(PathError::Syntax {
            message: "expected a command letter".to_string(),
            src: path_source(path),
            span: span.into(),
        });
    };
    let relative = letter.is_ascii_lowercase();
    let letter = letter.to_ascii_uppercase();
    let expected = arg_count(letter);

    let count_error = || PathError::ArgumentCount {
        letter,
        expected,
        got: args.len(),
        src: path_source(path),
        span: span.into(),
    };

    if expected == 0 {
        if !args.is_empty() {
            return Err(count_error());
        }
        out.push(RawCommand {
            letter,
            relative,
            args: Vec::new(),
            span,
        });
        return Ok(());
    }

    if args.is_empty() || args.len() % expected != 0 {
        return Err(count_error());
    }

    for (i, group) in args.chunks(expected).enumerate() {
        out.push(RawCommand {
            letter: if letter == 'M' && i > 0 { 'L' } else { letter },
            relative,
            args: group.to_vec(),
            span,
        });
    }
    Ok(())
}

fn parse_number(path: &str, pair: &Pair<Rule>) -> Result<f64, PathError> {
    let text = pair.as_str();
    text.parse::<f64>().map_err(|e| {
        let span = pair.as_span();
        PathError::Syntax {
            message: format!("invalid number {text:?}: {e}"),
            src: path_source(path),
            span: (span.start(), span.end() - span.start()).into(),
        }
    })
}
