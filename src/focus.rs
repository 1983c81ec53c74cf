//! Cursor placement for the host editor.
//!
//! Positions point just inside the opening quote of the translation that
//! needs attention.

use serde::{Deserialize, Serialize};

use crate::lines::LineSource;
use crate::message::Message;
use crate::search::{Target, find_target};

/// Length of `msgstr "`.
const MSGSTR_COLUMN: usize = 8;
/// Length of `msgstr[0] "`.
const MSGSTR_PLURAL_COLUMN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Column of the value in `msgstr[n] "`, accounting for multi-digit indices.
pub fn plural_column(index: usize) -> usize {
    if index == 0 {
        MSGSTR_PLURAL_COLUMN
    } else {
        MSGSTR_PLURAL_COLUMN + index.ilog10() as usize
    }
}

/// Where the cursor should land to edit `message`'s translation.
///
/// Plural entries focus their first empty slot, or the first slot when the
/// entry is fuzzy.
pub fn msgstr_position(message: &Message) -> Position {
    let slots = message
        .msgstr_plural_line
        .iter()
        .zip(&message.msgstr_plural)
        .enumerate();
    for (index, (line, value)) in slots {
        if value.is_empty() || message.is_fuzzy {
            return Position::new(*line, plural_column(index));
        }
    }

    match (message.msgstr_line, message.msgstr_plural_line.first()) {
        (Some(line), _) => Position::new(line, MSGSTR_COLUMN),
        (None, Some(line)) => Position::new(*line, MSGSTR_PLURAL_COLUMN),
        (None, None) => Position::new(message.msgid_line, 0),
    }
}

/// Move from `cursor` to the next message matching `target`.
///
/// The cursor stays where it is when nothing matches.
pub fn focus_next_target<D: LineSource + ?Sized>(
    document: &D,
    cursor: Position,
    target: Target,
    backwards: bool,
) -> Position {
    find_target(document, cursor.line, target, backwards)
        .map(|message| msgstr_position(&message))
        .unwrap_or(cursor)
}
