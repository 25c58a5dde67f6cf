//! Support for Apple `.strings` string tables.
//!
//! The reader is a small tokenizer rather than a line matcher: block comments
//! may span lines, quoted values may contain escaped quotes and newlines, and
//! comments are never mistaken for entries. Statements that are not of the
//! form `"key" = "value";` are skipped.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::{
    error::Error,
    traits::Parser,
    types::{Decoded, LocalizationTable},
};

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// All key-value pairs in file order.
    pub pairs: Vec<Pair>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let mut lexer = Lexer::new(content);
        let mut pairs = Vec::new();
        let mut statement: Vec<(usize, Token)> = Vec::new();
        let mut pending_comment: Option<String> = None;
        let mut last_terminator_line = 0;

        while let Some((line, token)) = lexer.next_token()? {
            match token {
                Token::Comment(text) => {
                    // A comment sharing a line with the previous `;` is not attached to the next pair.
                    if statement.is_empty() && line != last_terminator_line {
                        pending_comment = Some(text);
                    }
                }
                Token::Semicolon => {
                    match statement.as_slice() {
                        [] => {}
                        [
                            (_, Token::Quoted(key) | Token::Bare(key)),
                            (_, Token::Equals),
                            (_, Token::Quoted(value)),
                        ] => pairs.push(Pair {
                            key: key.clone(),
                            value: value.clone(),
                            comment: pending_comment.take(),
                        }),
                        [(start, _), ..] => {
                            debug!(line = start, "skipping malformed .strings statement");
                        }
                    }
                    statement.clear();
                    pending_comment = None;
                    last_terminator_line = line;
                }
                other => {
                    if matches!(other, Token::Quoted(_) | Token::Bare(_))
                        && starts_new_statement(&statement, line)
                    {
                        if let Some((start, _)) = statement.first() {
                            debug!(line = start, "skipping .strings statement without `;`");
                        }
                        statement.clear();
                    }
                    statement.push((line, other));
                }
            }
        }

        if let Some((line, _)) = statement.first() {
            debug!(line, "skipping trailing .strings statement without `;`");
        }

        Ok(Format { pairs })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for pair in &self.pairs {
            writeln!(writer, "{}", pair)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl From<Format> for Decoded {
    fn from(value: Format) -> Self {
        Decoded::from(
            value
                .pairs
                .into_iter()
                .map(|pair| (pair.key, pair.value))
                .collect::<LocalizationTable>(),
        )
    }
}

impl From<&LocalizationTable> for Format {
    fn from(table: &LocalizationTable) -> Self {
        Format {
            pairs: table
                .iter()
                .map(|(key, value)| Pair {
                    key: key.to_string(),
                    value: value.to_string(),
                    comment: None,
                })
                .collect(),
        }
    }
}

/// Whether a key token on `line` has to begin a new statement, abandoning the
/// unterminated `statement` before it.
fn starts_new_statement(statement: &[(usize, Token)], line: usize) -> bool {
    match statement {
        [] => false,
        [
            (_, Token::Quoted(_) | Token::Bare(_)),
            (_, Token::Equals),
            (_, Token::Quoted(_)),
        ] => true,
        [.., (_, Token::Equals)] => false,
        [.., (last_line, _)] => line > *last_line,
    }
}

/// A single key-value pair in a `.strings` file.
///
/// `key` and `value` hold unescaped text; escaping happens on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// The comment immediately preceding the pair, markers included.
    pub comment: Option<String>,
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "{}", comment)?;
        }
        write!(f, "\"{}\" = \"{}\";", escape(&self.key), escape(&self.value))
    }
}

/// Escapes text for embedding in a double-quoted `.strings` literal.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Quoted(String),
    Bare(String),
    Equals,
    Semicolon,
    Comment(String),
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn new(content: &str) -> Self {
        Lexer {
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> Result<Option<(usize, Token)>, Error> {
        while let Some(c) = self.peek() {
            let line = self.line;
            let token = match (c, self.peek_at(1)) {
                (c, _) if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                ('/', Some('*')) => self.block_comment()?,
                ('/', Some('/')) => self.line_comment(),
                ('"', _) => self.quoted()?,
                ('=', _) => {
                    self.bump();
                    Token::Equals
                }
                (';', _) => {
                    self.bump();
                    Token::Semicolon
                }
                _ => self.bare(),
            };
            return Ok(Some((line, token)));
        }
        Ok(None)
    }

    fn block_comment(&mut self) -> Result<Token, Error> {
        let start = self.line;
        let mut text = String::new();
        text.extend([self.bump(), self.bump()].into_iter().flatten());
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    text.push_str("*/");
                    return Ok(Token::Comment(text));
                }
                Some(c) => text.push(c),
                None => return Err(Error::strings(start, "unterminated block comment")),
            }
        }
    }

    fn line_comment(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.bump();
        }
        Token::Comment(text.trim_end().to_string())
    }

    fn bare(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let starts_comment = c == '/' && matches!(self.peek_at(1), Some('*' | '/'));
            if c.is_whitespace() || matches!(c, '=' | ';' | '"') || (starts_comment && !text.is_empty()) {
                break;
            }
            text.push(c);
            self.bump();
        }
        Token::Bare(text)
    }

    fn quoted(&mut self) -> Result<Token, Error> {
        let start = self.line;
        let unterminated = || Error::strings(start, "unterminated string literal");
        self.bump();

        let mut text = String::new();
        loop {
            match self.bump().ok_or_else(unterminated)? {
                '"' => return Ok(Token::Quoted(text)),
                '\\' => match self.bump().ok_or_else(unterminated)? {
                    'n' => text.push('\n'),
                    't' => text.push('\t'),
                    'r' => text.push('\r'),
                    '0' => text.push('\0'),
                    'u' | 'U' => match self.unicode_escape() {
                        Some(c) => text.push(c),
                        None => return Err(Error::strings(self.line, "invalid unicode escape")),
                    },
                    other => text.push(other),
                },
                c => text.push(c),
            }
        }
    }

    /// Reads the four hex digits after `\U`, pairing UTF-16 surrogates.
    fn unicode_escape(&mut self) -> Option<char> {
        let high = self.hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high);
        }
        if self.peek() != Some('\\') || !matches!(self.peek_at(1), Some('u' | 'U')) {
            return None;
        }
        self.bump();
        self.bump();
        let low = self.hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }

    fn hex4(&mut self) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self.peek()?.to_digit(16)?;
            self.bump();
            value = value * 16 + digit;
        }
        Some(value)
    }
}
