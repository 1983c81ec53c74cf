use tracing::{debug, trace};

use crate::lines::{LineSource, backward_lines, forward_lines};
use crate::message::{Field, Message};
use crate::tokens;

/// Parses the PO message surrounding a given line.
///
/// The parser finds where the enclosing block begins by scanning backward,
/// then reads the block forward in grammar order: comments, `msgctxt`,
/// `msgid`, `msgid_plural`, then `msgstr` or `msgstr[0]`, `msgstr[1]`, …
pub struct MessageParser<'a, D: LineSource + ?Sized> {
    document: &'a D,
    line: usize,
    position: usize,
}

impl<'a, D: LineSource + ?Sized> MessageParser<'a, D> {
    pub fn new(document: &'a D, line: usize) -> Self {
        MessageParser {
            document,
            line,
            position: line,
        }
    }

    /// Returns `None` when the line is not inside a message or the block
    /// has no `msgid`.
    pub fn parse(&mut self) -> Option<Message> {
        if self.line >= self.document.line_count() {
            return None;
        }
        let first_line = self.block_start()?;
        debug!(line = self.line, first_line, "message block located");

        let mut message = Message::new(first_line);
        self.position = first_line;

        self.parse_comments(&mut message);
        self.parse_field(&mut message, Field::Msgctxt);
        if !self.parse_field(&mut message, Field::Msgid) {
            debug!(first_line, "block has no msgid");
            return None;
        }
        self.parse_field(&mut message, Field::MsgidPlural);
        if !self.parse_field(&mut message, Field::Msgstr) {
            self.parse_plural_translations(&mut message);
        }

        message.last_line = self.position - 1;
        trace!(
            msgid = %message.msgid,
            first_line = message.first_line,
            last_line = message.last_line,
            "message parsed"
        );
        Some(message)
    }

    /// Scan backward for the first line of the enclosing block.
    ///
    /// Crossing a translation line once the candidate has moved above the
    /// translations means the scan left the block: the candidate is the
    /// start. Stacked `msgstr[n]` lines stay in the same block. A blank
    /// line above a candidate ends the block too.
    fn block_start(&self) -> Option<usize> {
        let mut candidate: Option<(usize, bool)> = None;
        for line in backward_lines(self.document, self.line) {
            if line.is_blank() {
                if let Some((start, _)) = candidate {
                    return Some(start);
                }
                continue;
            }
            let translation = tokens::is_translation_start(&line.text);
            if let Some((start, false)) = candidate {
                if translation {
                    return Some(start);
                }
            }
            if tokens::is_block_line(&line.text) {
                candidate = Some((line.line_number, translation));
            }
        }
        candidate.map(|(start, _)| start)
    }

    fn parse_comments(&mut self, message: &mut Message) {
        for line in forward_lines(self.document, self.position) {
            if !tokens::is_comment(&line.text) {
                return;
            }
            if tokens::is_fuzzy_marker(&line.text) {
                message.is_fuzzy = true;
            }
            self.position += 1;
        }
    }

    fn parse_plural_translations(&mut self, message: &mut Message) {
        let mut index = 0;
        while self.parse_field(message, Field::MsgstrPlural(index)) {
            index += 1;
        }
    }

    /// Consume the keyed line for `field` and its continuation lines.
    ///
    /// Returns false, consuming nothing, when the current line is not
    /// `field`'s keyed line.
    fn parse_field(&mut self, message: &mut Message, field: Field) -> bool {
        let Some(line) = self.document.line_at(self.position) else {
            return false;
        };
        let Some(value) = tokens::field_value(field, &line.text) else {
            return false;
        };

        message.append(field, &value);
        message.mark_line(field, line.line_number);
        self.position += 1;

        for line in forward_lines(self.document, self.position) {
            match tokens::continuation_value(&line.text) {
                Some(value) => {
                    message.append(field, value);
                    self.position += 1;
                }
                None => break,
            }
        }
        true
    }
}

/// Parse the message containing `line`.
pub fn parse_message_at<D: LineSource + ?Sized>(document: &D, line: usize) -> Option<Message> {
    MessageParser::new(document, line).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_singular_pair() {
        let doc = vec![
            r#"msgid "Hello""#,
            r#"msgstr "Bonjour""#,
            r#"msgid "Bye""#,
            r#"msgstr """#,
        ];
        let message = parse_message_at(&doc, 0).unwrap();
        assert_eq!(message.msgid, "Hello");
        assert_eq!(message.msgstr.as_deref(), Some("Bonjour"));
        assert_eq!((message.first_line, message.last_line), (0, 1));
        assert_eq!(message.msgid_line, 0);
        assert_eq!(message.msgstr_line, Some(1));

        let second = parse_message_at(&doc, 3).unwrap();
        assert_eq!(second.msgid, "Bye");
        assert_eq!(second.msgstr.as_deref(), Some(""));
        assert_eq!((second.first_line, second.last_line), (2, 3));
    }

    #[test]
    fn test_full_entry_with_comments_and_context() {
        let doc = vec![
            "# translator note",
            "#: src/menu.c:42",
            "#, fuzzy, c-format",
            r#"msgctxt "menu""#,
            r#""bar""#,
            r#"msgid "Open ""#,
            r#""file""#,
            r#"msgstr "Ouvrir""#,
            r#""fichier""#,
        ];
        for line in 0..doc.len() {
            let message = parse_message_at(&doc, line).unwrap();
            assert_eq!(message.first_line, 0);
            assert_eq!(message.last_line, 8);
            assert!(message.is_fuzzy);
            assert_eq!(message.msgctxt.as_deref(), Some("menubar"));
            assert_eq!(message.msgctxt_line, Some(3));
            assert_eq!(message.msgid, "Open file");
            assert_eq!(message.msgid_line, 5);
            assert_eq!(message.msgstr.as_deref(), Some("Ouvrirfichier"));
            assert_eq!(message.msgstr_line, Some(7));
        }
    }

    #[test]
    fn test_plural_entry() {
        let doc = vec![
            r#"msgid "%d file""#,
            r#"msgid_plural "%d files""#,
            r#"msgstr[0] "%d fichier""#,
            r#"msgstr[1] """#,
            r#""#,
            r#"msgid "next""#,
            r#"msgstr "suivant""#,
        ];
        let message = parse_message_at(&doc, 3).unwrap();
        assert_eq!(message.msgid_plural.as_deref(), Some("%d files"));
        assert_eq!(message.msgid_plural_line, Some(1));
        assert_eq!(message.msgstr, None);
        assert_eq!(message.msgstr_plural, vec!["%d fichier", ""]);
        assert_eq!(message.msgstr_plural_line, vec![2, 3]);
        assert_eq!((message.first_line, message.last_line), (0, 3));
        assert!(message.is_untranslated());
    }

    #[test]
    fn test_plural_slots_stop_at_first_gap() {
        let doc = vec![
            r#"msgid "a""#,
            r#"msgid_plural "as""#,
            r#"msgstr[0] "x""#,
            r#"msgstr[2] "z""#,
        ];
        let message = parse_message_at(&doc, 0).unwrap();
        assert_eq!(message.msgstr_plural, vec!["x"]);
        assert_eq!(message.last_line, 2);
    }

    #[test]
    fn test_header_entry() {
        let doc = vec![
            "# SOME DESCRIPTIVE TITLE.",
            r#"msgid """#,
            r#"msgstr """#,
            r#""Project-Id-Version: demo\n""#,
            r#""Content-Type: text/plain; charset=UTF-8\n""#,
            "",
            r#"msgid "Hello""#,
            r#"msgstr "Bonjour""#,
        ];
        let header = parse_message_at(&doc, 4).unwrap();
        assert!(header.is_header());
        assert_eq!(
            header.msgstr.as_deref(),
            Some(r"Project-Id-Version: demo\nContent-Type: text/plain; charset=UTF-8\n")
        );
        assert_eq!((header.first_line, header.last_line), (0, 4));
    }

    #[test]
    fn test_blank_line_after_block_anchors_to_previous_message() {
        let doc = vec![
            r#"msgid "Hello""#,
            r#"msgstr "Bonjour""#,
            "",
            r#"msgid "Bye""#,
            r#"msgstr "Au revoir""#,
        ];
        let message = parse_message_at(&doc, 2).unwrap();
        assert_eq!(message.msgid, "Hello");
        assert!(!message.contains_line(2));
    }

    #[test]
    fn test_fuzzy_marker_belongs_to_following_message() {
        let doc = vec![
            r#"msgid "Hello""#,
            r#"msgstr "Bonjour""#,
            "",
            "#, fuzzy",
            r#"msgid "Bye""#,
            r#"msgstr "Salut""#,
        ];
        assert!(!parse_message_at(&doc, 0).unwrap().is_fuzzy);
        let second = parse_message_at(&doc, 5).unwrap();
        assert!(second.is_fuzzy);
        assert_eq!(second.first_line, 3);
    }

    #[test]
    fn test_detached_comment_does_not_capture_next_message() {
        let doc = vec![
            r#"msgid "a""#,
            r#"msgstr "A""#,
            "",
            "# detached note",
            "",
            r#"msgid "c""#,
            r#"msgstr """#,
        ];
        for line in 5..=6 {
            let message = parse_message_at(&doc, line).unwrap();
            assert_eq!(message.msgid, "c");
            assert_eq!((message.first_line, message.last_line), (5, 6));
        }
        // the comment alone is not a message
        assert_eq!(parse_message_at(&doc, 3), None);
        assert_eq!(parse_message_at(&doc, 1).unwrap().msgid, "a");
    }

    #[test]
    fn test_no_message() {
        let empty: Vec<&str> = vec![];
        assert_eq!(parse_message_at(&empty, 0), None);

        let blanks = vec!["", "   ", ""];
        assert_eq!(parse_message_at(&blanks, 1), None);

        let orphan_translation = vec![r#"msgstr "x""#];
        assert_eq!(parse_message_at(&orphan_translation, 0), None);

        let doc = vec![r#"msgid "a""#, r#"msgstr "b""#];
        assert_eq!(parse_message_at(&doc, 2), None);
    }

    #[test]
    fn test_entry_without_translation() {
        let doc = vec!["#. extracted", r#"msgid "lonely""#];
        let message = parse_message_at(&doc, 1).unwrap();
        assert_eq!(message.msgstr, None);
        assert!(message.msgstr_plural.is_empty());
        assert_eq!(message.last_line, 1);
        assert!(message.is_untranslated());
    }
}
