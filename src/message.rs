use serde::{Deserialize, Serialize};

/// The keyed fields a PO message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    /// `msgstr[n]`
    MsgstrPlural(usize),
}

impl Field {
    /// The keyword as written in the catalog, e.g. `msgstr[2]`.
    pub fn key(&self) -> String {
        match self {
            Field::Msgctxt => "msgctxt".to_string(),
            Field::Msgid => "msgid".to_string(),
            Field::MsgidPlural => "msgid_plural".to_string(),
            Field::Msgstr => "msgstr".to_string(),
            Field::MsgstrPlural(index) => format!("msgstr[{}]", index),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One catalog entry, derived from the document text on demand.
///
/// Line numbers are zero-based. `first_line..=last_line` spans the whole
/// block, leading comments included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub msgctxt: Option<String>,
    pub msgctxt_line: Option<usize>,
    pub msgid: String,
    pub msgid_line: usize,
    pub msgid_plural: Option<String>,
    pub msgid_plural_line: Option<usize>,
    pub msgstr: Option<String>,
    pub msgstr_line: Option<usize>,
    pub msgstr_plural: Vec<String>,
    pub msgstr_plural_line: Vec<usize>,
    pub is_fuzzy: bool,
    pub first_line: usize,
    pub last_line: usize,
}

impl Message {
    /// An empty message anchored at `first_line`.
    pub fn new(first_line: usize) -> Self {
        Message {
            first_line,
            last_line: first_line,
            ..Default::default()
        }
    }

    /// Append `value` to `field`, creating the field if needed.
    pub fn append(&mut self, field: Field, value: &str) {
        match field {
            Field::Msgctxt => self.msgctxt.get_or_insert_with(String::new).push_str(value),
            Field::Msgid => self.msgid.push_str(value),
            Field::MsgidPlural => self
                .msgid_plural
                .get_or_insert_with(String::new)
                .push_str(value),
            Field::Msgstr => self.msgstr.get_or_insert_with(String::new).push_str(value),
            Field::MsgstrPlural(index) => {
                if self.msgstr_plural.len() <= index {
                    self.msgstr_plural.resize(index + 1, String::new());
                }
                self.msgstr_plural[index].push_str(value);
            }
        }
    }

    /// Record the line where `field`'s keyed line begins.
    pub fn mark_line(&mut self, field: Field, line: usize) {
        match field {
            Field::Msgctxt => self.msgctxt_line = Some(line),
            Field::Msgid => self.msgid_line = line,
            Field::MsgidPlural => self.msgid_plural_line = Some(line),
            Field::Msgstr => self.msgstr_line = Some(line),
            Field::MsgstrPlural(index) => {
                if self.msgstr_plural_line.len() <= index {
                    self.msgstr_plural_line.resize(index + 1, line);
                }
                self.msgstr_plural_line[index] = line;
            }
        }
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some() || !self.msgstr_plural.is_empty()
    }

    /// The catalog header: empty msgid without context.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none()
    }

    pub fn is_untranslated(&self) -> bool {
        is_untranslated(self)
    }

    pub fn contains_line(&self, line: usize) -> bool {
        (self.first_line..=self.last_line).contains(&line)
    }
}

/// Singular: msgstr absent or empty. Plural: at least one empty slot.
pub fn is_untranslated(message: &Message) -> bool {
    if message.msgstr_plural.is_empty() {
        message.msgstr.as_deref().is_none_or(str::is_empty)
    } else {
        message.msgstr_plural.iter().any(String::is_empty)
    }
}

pub fn is_fuzzy(message: &Message) -> bool {
    message.is_fuzzy
}

pub fn is_untranslated_or_fuzzy(message: &Message) -> bool {
    is_untranslated(message) || is_fuzzy(message)
}
