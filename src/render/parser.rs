//! Scanner for `Put <name> here` placeholders.

use regex::Regex;
use std::{ops::Range, sync::LazyLock};

/// `([\s\W]|^)` and `([\s\W]|$)` capture the single boundary character on
/// each side. Neither belongs to the placeholder: the left one closes the
/// preceding literal, the right one opens the next.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([\s\W]|^)(?:put|insert)\s+(.+?\S)(?:\s*\(([^)]+)\))?\s+here([\s\W]|$)")
        .expect("placeholder pattern compiles")
});

/// A compiled template component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Component {
    /// Text copied to the output verbatim.
    Literal(String),
    /// A placeholder, resolved against the context at render time.
    Variable {
        name: String,
        modifier: Option<String>,
    },
}

/// A borrowed piece of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'a> {
    Literal(&'a str),
    Variable {
        name: &'a str,
        modifier: Option<&'a str>,
    },
}

/// A [`Piece`] and the byte range of the input it accounts for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub range: Range<usize>,
    pub piece: Piece<'a>,
}

/// Split `input` into literal and variable pieces.
///
/// The returned ranges are contiguous and cover `input` exactly. Scanning
/// never fails: anything that does not match the placeholder grammar is
/// literal text.
pub fn scan(input: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;
    let mut search = 0;

    while let Some(caps) = PLACEHOLDER.captures_at(input, search) {
        // Groups 1, 2 and 4 always participate in a match.
        let (Some(left), Some(name), Some(right)) = (caps.get(1), caps.get(2), caps.get(4)) else {
            break;
        };

        if left.end() > last {
            spans.push(literal(input, last..left.end()));
        }
        spans.push(Span {
            range: left.end()..right.start(),
            piece: Piece::Variable {
                name: name.as_str().trim(),
                modifier: caps.get(3).map(|m| m.as_str()),
            },
        });

        // The right boundary opens the next literal but stays consumed
        // for matching: placeholders never share a boundary character.
        last = right.start();
        search = right.end();
    }

    if last < input.len() {
        spans.push(literal(input, last..input.len()));
    }

    spans
}

/// Compile `input` into owned components, ready to cache.
pub fn compile(input: &str) -> Vec<Component> {
    scan(input)
        .into_iter()
        .map(|span| match span.piece {
            Piece::Literal(t) => Component::Literal(t.to_owned()),
            Piece::Variable { name, modifier } => Component::Variable {
                name: name.to_owned(),
                modifier: modifier.map(str::to_owned),
            },
        })
        .collect()
}

fn literal(input: &str, range: Range<usize>) -> Span<'_> {
    Span {
        piece: Piece::Literal(&input[range.clone()]),
        range,
    }
}
