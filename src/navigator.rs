use tracing::trace;

use crate::lines::{Line, LineSource, backward_lines, forward_lines};
use crate::message::Message;
use crate::parser::parse_message_at;
use crate::tokens;

fn is_separator(line: &Line<'_>) -> bool {
    line.is_blank() || tokens::is_comment(&line.text)
}

/// The message following `current`, skipping blank and comment lines.
///
/// The next block is re-parsed from its first field line so its own
/// leading comments (and fuzzy flag) are picked up. Lines that do not
/// yield a message starting after `current` are skipped.
pub fn next_message<D: LineSource + ?Sized>(document: &D, current: &Message) -> Option<Message> {
    for line in forward_lines(document, current.last_line + 1) {
        if is_separator(&line) {
            continue;
        }
        match parse_message_at(document, line.line_number) {
            Some(message) if message.first_line > current.last_line => return Some(message),
            _ => trace!(line = line.line_number, "no message starts here"),
        }
    }
    None
}

/// The message preceding `current`, skipping blank and comment lines.
pub fn previous_message<D: LineSource + ?Sized>(
    document: &D,
    current: &Message,
) -> Option<Message> {
    let start = current.first_line.checked_sub(1)?;
    for line in backward_lines(document, start) {
        if is_separator(&line) {
            continue;
        }
        match parse_message_at(document, line.line_number) {
            Some(message) if message.last_line < current.first_line => return Some(message),
            _ => trace!(line = line.line_number, "no message ends here"),
        }
    }
    None
}

/// The first message of the catalog, usually the header entry.
pub fn first_message<D: LineSource + ?Sized>(document: &D) -> Option<Message> {
    forward_lines(document, 0)
        .filter(|line| !is_separator(line))
        .find_map(|line| parse_message_at(document, line.line_number))
}

/// Iterate over every message of the catalog, in document order.
pub fn messages<D: LineSource + ?Sized>(document: &D) -> Messages<'_, D> {
    Messages {
        document,
        current: None,
        started: false,
    }
}

pub struct Messages<'a, D: LineSource + ?Sized> {
    document: &'a D,
    current: Option<Message>,
    started: bool,
}

impl<D: LineSource + ?Sized> Iterator for Messages<'_, D> {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        let next = if self.started {
            next_message(self.document, self.current.as_ref()?)
        } else {
            self.started = true;
            first_message(self.document)
        };
        self.current = next.clone();
        next
    }
}
