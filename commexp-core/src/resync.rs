//! Cursor realignment after length-changing divergences
//!
//! A single change in the encoded stream can decode into a different number of
//! characters (multi-unit character encodings), so after a divergence every
//! downstream message variant may have drifted relative to the original. Each
//! variant is realigned on its own by looking for the next original character a
//! few positions ahead of its cursor.

use crate::constants::RESYNC_CONFIRM_LEN;
use serde::{Deserialize, Serialize};

/// Outcome of a realignment attempt for one stream cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resync {
    /// The next original character was found `offset` positions past the cursor
    Matched(usize),
    /// No candidate offset inside the lookahead window matched
    NoMatch,
    /// The lookahead ran past the end of the original or the stream
    EndOfStream,
}

impl Resync {
    /// Extra cursor shift on top of the regular single-step advance
    pub fn extra_shift(&self) -> usize {
        match self {
            Resync::Matched(offset) => offset - 1,
            Resync::NoMatch | Resync::EndOfStream => 0,
        }
    }

    /// Whether the attempt failed to realign the stream
    pub fn is_failure(&self) -> bool {
        !matches!(self, Resync::Matched(_))
    }
}

/// Realign `stream` against `original` after a divergence at `at`
///
/// Offsets `1..=max_offset` past `cursor` are tried in ascending order:
/// - offset 1 accepts when `original[at + 1]` equals the stream character there
/// - larger offsets also require `original[at + 2]` to match the following stream
///   character, so a larger shift is never taken on a single coincidental match
///
/// The first satisfied offset wins. Running off the end of either sequence while a
/// candidate is still being checked abandons the attempt with `EndOfStream`.
pub fn resync_cursor(
    original: &[char],
    at: usize,
    stream: &[char],
    cursor: usize,
    max_offset: usize,
) -> Resync {
    let Some(&next) = original.get(at + 1) else {
        return Resync::EndOfStream;
    };

    for offset in 1..=max_offset {
        let Some(&candidate) = stream.get(cursor + offset) else {
            return Resync::EndOfStream;
        };

        if candidate != next {
            continue;
        }

        if offset == 1 {
            return Resync::Matched(offset);
        }

        match confirm(original, at + 1, stream, cursor + offset) {
            Some(true) => return Resync::Matched(offset),
            Some(false) => {}
            None => return Resync::EndOfStream,
        }
    }

    Resync::NoMatch
}

/// Check that the characters following an accepted candidate also line up
fn confirm(original: &[char], from: usize, stream: &[char], stream_from: usize) -> Option<bool> {
    for k in 1..RESYNC_CONFIRM_LEN {
        let expected = original.get(from + k)?;
        let found = stream.get(stream_from + k)?;
        if expected != found {
            return Some(false);
        }
    }
    Some(true)
}
