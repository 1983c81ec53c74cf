//! Navigation over gettext PO catalogs.
//!
//! The core re-derives a [`Message`] from the live document text on every
//! call: [`parse_message_at`] finds the entry around a line,
//! [`next_message`] / [`previous_message`] step between entries, and
//! [`find_next`] walks until a translation-state predicate holds.
//!
//! ```ignore
//! use po_navigator::{Document, Target, find_target};
//!
//! let doc = Document::from_text("msgid \"Hello\"\nmsgstr \"Bonjour\"\nmsgid \"Bye\"\nmsgstr \"\"\n");
//! let message = find_target(&doc, 0, Target::Untranslated, false).unwrap();
//! assert_eq!(message.msgid, "Bye");
//! ```

pub mod config;
pub mod definition;
pub mod error;
pub mod focus;
pub mod lines;
pub mod message;
pub mod navigator;
pub mod parser;
pub mod search;
pub mod status;
pub mod tokens;


pub use config::{Settings, VerbosityLevel};
pub use definition::{Location, SourceReference, provide_definition};
pub use error::{NavError, NavResult};
pub use focus::{Position, focus_next_target, msgstr_position};
pub use lines::{Document, Line, LineSource};
pub use message::{Field, Message, is_fuzzy, is_untranslated, is_untranslated_or_fuzzy};
pub use navigator::{first_message, messages, next_message, previous_message};
pub use parser::{MessageParser, parse_message_at};
pub use search::{Target, find_next, find_target};
pub use status::{
    CatalogCounts, CatalogStatistics, FixedStatistics, MsgfmtStatistics, StatisticsProvider,
};
