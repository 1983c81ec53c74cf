//! Line-level recognizers for PO catalog syntax.
//!
//! Every matcher is anchored to the start of the line. Keyed field lines
//! tolerate trailing whitespace after the closing quote.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, OnceLock};

use regex::Regex;
use tracing::warn;

use crate::message::Field;

/// Build the pattern for a keyed field line, escaping the key.
///
/// `msgstr[2]` becomes `^msgstr\[2\]\s+"(.*?)"\s*$`.
pub fn keyed_pattern(key: &str) -> String {
    format!(r#"^{}\s+"(.*?)"\s*$"#, regex::escape(key))
}

fn keyed(key: &str) -> Regex {
    Regex::new(&keyed_pattern(key)).expect("escaped field key is a valid pattern")
}

static MSGCTXT_START: LazyLock<Regex> = LazyLock::new(|| keyed("msgctxt"));
static MSGID_START: LazyLock<Regex> = LazyLock::new(|| keyed("msgid"));
static MSGID_PLURAL_START: LazyLock<Regex> = LazyLock::new(|| keyed("msgid_plural"));
static MSGSTR_START: LazyLock<Regex> = LazyLock::new(|| keyed("msgstr"));
static MSGSTR_PLURAL_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^msgstr\[\d+\]\s+"(.*?)"\s*$"#).expect("plural msgstr pattern is valid")
});
static CONTINUATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.*?)\s*"$"#).expect("continuation pattern is valid"));

// msgstr[n] matchers, compiled on first use per index
static PLURAL_SLOTS: OnceLock<Mutex<HashMap<usize, Regex>>> = OnceLock::new();

fn plural_slot_value(index: usize, text: &str) -> Option<String> {
    let slots = PLURAL_SLOTS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut slots = slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if !slots.contains_key(&index) {
        let key = Field::MsgstrPlural(index).key();
        match Regex::new(&keyed_pattern(&key)) {
            Ok(regex) => {
                slots.insert(index, regex);
            }
            Err(e) => {
                warn!("Failed to build matcher for '{}': {}", key, e);
                return None;
            }
        }
    }
    slots
        .get(&index)
        .and_then(|regex| capture(regex, text))
        .map(str::to_string)
}

fn capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The quoted value of `text` if it is the keyed line for `field`.
pub fn field_value(field: Field, text: &str) -> Option<String> {
    let regex = match field {
        Field::Msgctxt => &*MSGCTXT_START,
        Field::Msgid => &*MSGID_START,
        Field::MsgidPlural => &*MSGID_PLURAL_START,
        Field::Msgstr => &*MSGSTR_START,
        Field::MsgstrPlural(index) => return plural_slot_value(index, text),
    };
    capture(regex, text).map(str::to_string)
}

/// The quoted value of a continuation line.
pub fn continuation_value(text: &str) -> Option<&str> {
    capture(&CONTINUATION_LINE, text)
}

pub fn is_comment(text: &str) -> bool {
    text.trim().starts_with('#')
}

/// A `#,` flags comment carrying the `fuzzy` flag, alone or among others.
///
/// Stricter than a plain `^#, fuzzy` prefix match on purpose: flags are
/// split on commas, so `#, c-format, fuzzy` counts and `#, fuzzy-ish` does not.
pub fn is_fuzzy_marker(text: &str) -> bool {
    text.strip_prefix("#,")
        .is_some_and(|flags| flags.split(',').any(|flag| flag.trim() == "fuzzy"))
}

/// `msgstr "..."` or `msgstr[n] "..."`.
pub fn is_translation_start(text: &str) -> bool {
    MSGSTR_START.is_match(text) || MSGSTR_PLURAL_START.is_match(text)
}

/// A line that can open or belong to the keyed part of a message block.
pub fn is_block_line(text: &str) -> bool {
    is_comment(text)
        || MSGCTXT_START.is_match(text)
        || MSGID_START.is_match(text)
        || MSGID_PLURAL_START.is_match(text)
        || is_translation_start(text)
}
