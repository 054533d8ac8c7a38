//! Word units for word-wise motion and deletion.
//!
//! A word unit is measured from a point, scanning away from it. The first
//! matching rule wins:
//!
//! 1. two or more spaces: the whole run of spaces;
//! 2. an optional single space, then word chars: the space plus the word run;
//! 3. an optional single space, then non-word chars: the space plus the
//!    non-word run (spaces included);
//! 4. nothing left to scan: zero.
//!
//! Motion and deletion both measure through [`unit_len`], so deleting one
//! word removes exactly what moving one word skips.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Which way a scan runs from the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the start of the document.
    Backward,
    /// Toward the end of the document.
    Forward,
}

/// Character classes used by the word scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Alphanumerics and `_`.
    Word,
    /// Whitespace, `\n` included.
    Space,
    /// Everything else.
    Other,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        if ch.is_alphanumeric() || ch == '_' {
            Self::Word
        } else if ch.is_whitespace() {
            Self::Space
        } else {
            Self::Other
        }
    }
}

fn is_space(ch: char) -> bool {
    CharClass::of(ch) == CharClass::Space
}

fn is_word(ch: char) -> bool {
    CharClass::of(ch) == CharClass::Word
}

/// Measures one word unit at the head of `chars`, given in scan order.
pub fn unit_len<I>(chars: I) -> usize
where
    I: IntoIterator<Item = char>,
{
    let mut chars = chars.into_iter();

    let Some(first) = chars.next() else {
        return 0;
    };

    let (lead, head) = if is_space(first) {
        match chars.next() {
            Some(second) if is_space(second) => {
                return 2 + chars.take_while(|&c| is_space(c)).count();
            }
            Some(second) => (1, second),
            // A lone space is itself a non-word run.
            None => return 1,
        }
    } else {
        (0, first)
    };

    let run = if is_word(head) {
        1 + chars.take_while(|&c| is_word(c)).count()
    } else {
        1 + chars.take_while(|&c| !is_word(c)).count()
    };
    lead + run
}

/// Measures the word unit next to `offset` in `document`, scanning in
/// `direction`. Offsets past the end measure as if at the end.
pub fn unit_at(document: &Document, offset: usize, direction: Direction) -> usize {
    let offset = offset.min(document.len_chars());
    match direction {
        Direction::Forward => document.chars_after(offset).map(unit_len).unwrap_or(0),
        Direction::Backward => document
            .chars_before(offset)
            .map(unit_len)
            .unwrap_or(0)
            .min(offset),
    }
}
