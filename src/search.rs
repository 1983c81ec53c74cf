use std::str::FromStr;

use tracing::debug;

use crate::lines::LineSource;
use crate::message::{self, Message};
use crate::navigator::{next_message, previous_message};
use crate::parser::parse_message_at;

/// Walk from the message containing `from_line` until `predicate` holds.
///
/// The message under `from_line` itself is never returned. `None` means
/// either `from_line` is not inside a message or the search ran off the
/// end (or start, when `backwards`) of the document.
pub fn find_next<D, P>(
    document: &D,
    from_line: usize,
    predicate: P,
    backwards: bool,
) -> Option<Message>
where
    D: LineSource + ?Sized,
    P: Fn(&Message) -> bool,
{
    let mut message = parse_message_at(document, from_line)?;
    loop {
        message = if backwards {
            previous_message(document, &message)?
        } else {
            next_message(document, &message)?
        };
        if predicate(&message) {
            debug!(
                from_line,
                found = message.first_line,
                backwards,
                "search matched"
            );
            return Some(message);
        }
    }
}

/// The translation states a search can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Untranslated,
    Fuzzy,
    UntranslatedOrFuzzy,
}

impl Target {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            Target::Untranslated => message::is_untranslated(message),
            Target::Fuzzy => message::is_fuzzy(message),
            Target::UntranslatedOrFuzzy => message::is_untranslated_or_fuzzy(message),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "untranslated" => Ok(Target::Untranslated),
            "fuzzy" => Ok(Target::Fuzzy),
            "any" | "untranslated-or-fuzzy" => Ok(Target::UntranslatedOrFuzzy),
            other => Err(format!(
                "Unknown target '{}' (expected untranslated, fuzzy or any)",
                other
            )),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Untranslated => write!(f, "untranslated"),
            Target::Fuzzy => write!(f, "fuzzy"),
            Target::UntranslatedOrFuzzy => write!(f, "any"),
        }
    }
}

pub fn find_target<D: LineSource + ?Sized>(
    document: &D,
    from_line: usize,
    target: Target,
    backwards: bool,
) -> Option<Message> {
    find_next(document, from_line, |message| target.matches(message), backwards)
}
