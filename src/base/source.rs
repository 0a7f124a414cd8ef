//! Source text with a UTF-16 line index.
//!
//! Offsets throughout the crate are UTF-16 code units, the unit the source
//! parser reports positions in. [`SourceText`] converts those offsets to
//! `loc` positions, back again, and to byte offsets for slicing.

use text_size::{TextRange, TextSize};

use super::position::{Position, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineStart {
    utf16: u32,
    byte: u32,
}

/// Maps UTF-16 offsets to 1-indexed lines and 0-indexed columns.
///
/// Recognizes every ECMAScript line terminator: `\n`, `\r\n`, `\r`,
/// U+2028 and U+2029.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<LineStart>,
    len_utf16: u32,
    ascii: bool,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut lines = vec![LineStart { utf16: 0, byte: 0 }];
        let mut utf16 = 0u32;
        let mut chars = text.char_indices().peekable();

        while let Some((byte, c)) = chars.next() {
            utf16 += c.len_utf16() as u32;
            let next_byte = (byte + c.len_utf8()) as u32;
            match c {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        utf16 += 1;
                        lines.push(LineStart {
                            utf16,
                            byte: next_byte + 1,
                        });
                    } else {
                        lines.push(LineStart {
                            utf16,
                            byte: next_byte,
                        });
                    }
                }
                '\n' | '\u{2028}' | '\u{2029}' => lines.push(LineStart {
                    utf16,
                    byte: next_byte,
                }),
                _ => {}
            }
        }

        Self {
            lines,
            len_utf16: utf16,
            ascii: text.is_ascii(),
        }
    }

    /// Number of lines (a trailing terminator opens one more, empty line)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the indexed text in UTF-16 code units
    pub fn len(&self) -> TextSize {
        TextSize::new(self.len_utf16)
    }

    pub fn is_empty(&self) -> bool {
        self.len_utf16 == 0
    }

    fn line_of(&self, offset: u32) -> usize {
        self.lines.partition_point(|line| line.utf16 <= offset) - 1
    }

    /// Convert an offset to a position; offsets past the end clamp to it.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = u32::from(offset).min(self.len_utf16);
        let line = self.line_of(offset);
        Position::new(line + 1, (offset - self.lines[line].utf16) as usize)
    }

    /// Convert a position back to an offset.
    ///
    /// Returns `None` for lines that don't exist and columns that run past
    /// the start of the following line.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let start = self.lines.get(position.line.checked_sub(1)?)?;
        let offset = start.utf16.checked_add(u32::try_from(position.column).ok()?)?;
        let limit = self
            .lines
            .get(position.line)
            .map_or(self.len_utf16, |next| next.utf16);
        (offset <= limit).then(|| TextSize::new(offset))
    }
}

/// Program text paired with its line index.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    index: LineIndex,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// Length in UTF-16 code units
    pub fn len(&self) -> TextSize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The `loc` for an offset range
    pub fn location(&self, range: TextRange) -> SourceLocation {
        SourceLocation::new(
            self.index.position(range.start()),
            self.index.position(range.end()),
        )
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.index.position(offset)
    }

    pub fn offset(&self, position: Position) -> Option<TextSize> {
        self.index.offset(position)
    }

    /// Convert a UTF-16 offset to a byte offset into the text.
    ///
    /// Returns `None` past the end or inside a surrogate pair.
    pub fn byte_offset(&self, offset: TextSize) -> Option<usize> {
        let offset = u32::from(offset);
        if offset > self.index.len_utf16 {
            return None;
        }
        if self.index.ascii {
            return Some(offset as usize);
        }

        let line = self.index.lines[self.index.line_of(offset)];
        let mut utf16 = line.utf16;
        let mut byte = line.byte as usize;
        for c in self.text[byte..].chars() {
            if utf16 >= offset {
                break;
            }
            utf16 += c.len_utf16() as u32;
            byte += c.len_utf8();
        }
        (utf16 == offset).then_some(byte)
    }

    /// The text covered by an offset range
    pub fn slice(&self, range: TextRange) -> Option<&'a str> {
        let start = self.byte_offset(range.start())?;
        let end = self.byte_offset(range.end())?;
        self.text.get(start..end)
    }

    /// The character starting at `offset`
    pub fn char_at(&self, offset: TextSize) -> Option<char> {
        let byte = self.byte_offset(offset)?;
        self.text[byte..].chars().next()
    }

    /// Skip whitespace, line comments and block comments starting at `from`.
    ///
    /// Returns the offset of the next significant character, or the end of
    /// the text.
    pub fn skip_trivia(&self, from: TextSize) -> TextSize {
        let Some(start) = self.byte_offset(from) else {
            return self.len();
        };

        let mut chars = self.text[start..].chars().peekable();
        let mut offset = u32::from(from);

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '\u{feff}' {
                offset += c.len_utf16() as u32;
                chars.next();
                continue;
            }
            if c != '/' {
                break;
            }

            let mut lookahead = chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some('/') => {
                    while let Some(&c) = chars.peek() {
                        if is_line_terminator(c) {
                            break;
                        }
                        offset += c.len_utf16() as u32;
                        chars.next();
                    }
                }
                Some('*') => {
                    chars.next();
                    chars.next();
                    offset += 2;
                    let mut prev = '\0';
                    while let Some(c) = chars.next() {
                        offset += c.len_utf16() as u32;
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                }
                _ => break,
            }
        }

        TextSize::new(offset)
    }

    /// The next significant character at or after `from`, with its offset
    pub fn next_significant(&self, from: TextSize) -> Option<(TextSize, char)> {
        let offset = self.skip_trivia(from);
        self.char_at(offset).map(|c| (offset, c))
    }
}

/// Whether `text` is an ECMAScript IdentifierName
pub fn is_identifier_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c == '$' || c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(|c| {
            c == '$' || c == '\u{200c}' || c == '\u{200d}' || unicode_ident::is_xid_continue(c)
        })
}

/// ECMAScript line terminators
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
