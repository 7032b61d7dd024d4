//! JSONC tokenizer.
//!
//! Produces a flat token stream with byte offsets. Line (`//`) and block
//! (`/* */`) comments are consumed as trivia, so downstream parsing sees
//! plain JSON tokens.

use super::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Str(String),
    Number(f64),
    True,
    False,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub len: usize,
}

pub(crate) struct Lexer<'a> {
    source: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            source: text.as_bytes(),
            text,
            pos: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.pos >= self.source.len() {
                break;
            }
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while self.pos < self.source.len() {
            match self.source[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.peek_at(self.pos + 1) == Some(b'/') => {
                    while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_at(self.pos + 1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos + 1 >= self.source.len() {
                            return Err(ParseError::new(start, "unterminated block comment"));
                        }
                        if self.source[self.pos] == b'*' && self.source[self.pos + 1] == b'/' {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let kind = match self.source[self.pos] {
            b'{' => {
                self.pos += 1;
                TokenKind::LeftBrace
            }
            b'}' => {
                self.pos += 1;
                TokenKind::RightBrace
            }
            b'[' => {
                self.pos += 1;
                TokenKind::LeftBracket
            }
            b']' => {
                self.pos += 1;
                TokenKind::RightBracket
            }
            b':' => {
                self.pos += 1;
                TokenKind::Colon
            }
            b',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            b'"' => self.lex_string()?,
            b'-' | b'0'..=b'9' => self.lex_number()?,
            b't' | b'f' | b'n' => self.lex_keyword()?,
            _ => return Err(ParseError::new(start, "unexpected character")),
        };
        Ok(Token {
            kind,
            offset: start,
            len: self.pos - start,
        })
    }

    fn lex_string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            if self.pos >= self.source.len() {
                return Err(ParseError::new(start, "unterminated string"));
            }
            match self.source[self.pos] {
                b'"' => {
                    self.pos += 1;
                    return Ok(TokenKind::Str(value));
                }
                b'\\' => {
                    self.pos += 1;
                    let esc = self
                        .peek_at(self.pos)
                        .ok_or_else(|| ParseError::new(start, "unterminated string"))?;
                    self.pos += 1;
                    match esc {
                        b'"' => value.push('"'),
                        b'\\' => value.push('\\'),
                        b'/' => value.push('/'),
                        b'b' => value.push('\u{0008}'),
                        b'f' => value.push('\u{000C}'),
                        b'n' => value.push('\n'),
                        b'r' => value.push('\r'),
                        b't' => value.push('\t'),
                        b'u' => {
                            let unit = self.lex_unicode_escape(start)?;
                            if (0xD800..0xDC00).contains(&unit)
                                && self.peek_at(self.pos) == Some(b'\\')
                                && self.peek_at(self.pos + 1) == Some(b'u')
                            {
                                self.pos += 2;
                                let low = self.lex_unicode_escape(start)?;
                                let combined = 0x10000
                                    + ((u32::from(unit) - 0xD800) << 10)
                                    + (u32::from(low) - 0xDC00);
                                value.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                            } else {
                                value.push(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'));
                            }
                        }
                        _ => return Err(ParseError::new(self.pos - 1, "invalid escape sequence")),
                    }
                }
                c if c < 0x20 => {
                    return Err(ParseError::new(self.pos, "control character in string"));
                }
                _ => {
                    // Consume one UTF-8 scalar, not one byte.
                    let rest = &self.text[self.pos..];
                    let ch = rest.chars().next().unwrap_or('\u{FFFD}');
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    fn lex_unicode_escape(&mut self, string_start: usize) -> Result<u16, ParseError> {
        if self.pos + 4 > self.source.len() {
            return Err(ParseError::new(string_start, "truncated unicode escape"));
        }
        let hex = &self.text[self.pos..self.pos + 4];
        let unit = u16::from_str_radix(hex, 16)
            .map_err(|_| ParseError::new(self.pos, "invalid unicode escape"))?;
        self.pos += 4;
        Ok(unit)
    }

    fn lex_number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        if self.peek_at(self.pos) == Some(b'-') {
            self.pos += 1;
        }
        while matches!(self.peek_at(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek_at(self.pos) == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek_at(self.pos), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek_at(self.pos), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek_at(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            while matches!(self.peek_at(self.pos), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        let raw = &self.text[start..self.pos];
        let value = raw
            .parse::<f64>()
            .map_err(|_| ParseError::new(start, "malformed number"))?;
        Ok(TokenKind::Number(value))
    }

    fn lex_keyword(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        for (literal, kind) in [
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("null", TokenKind::Null),
        ] {
            if self.text[start..].starts_with(literal) {
                self.pos += literal.len();
                return Ok(kind);
            }
        }
        Err(ParseError::new(start, "unexpected identifier"))
    }

    fn peek_at(&self, pos: usize) -> Option<u8> {
        self.source.get(pos).copied()
    }
}
