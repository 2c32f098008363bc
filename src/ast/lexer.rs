use crate::ast::token::{Pos, Token, TokenKind};
use crate::error::{SyntaxError, SyntaxErrorKind};

fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Lazy token stream over an expression string.
///
/// The reader holds a plain character cursor and decides what belongs to the
/// current token by peeking before consuming, so a terminating character that
/// opens the next token is never taken and never has to be pushed back.
/// Positions are recorded once, at the first character of each token.
pub(crate) struct TokenReader {
    src: Vec<char>,
    idx: usize,
    row: u32,
    col: u32,
}

impl TokenReader {
    pub(crate) fn new(src: &str) -> Self {
        TokenReader {
            src: src.chars().collect(),
            idx: 0,
            row: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.idx).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src.get(self.idx + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.idx += 1;
        self.col += 1;
        Some(ch)
    }

    fn pos(&self) -> Pos {
        Pos {
            row: self.row,
            col: self.col,
        }
    }

    /// Reads the next token. End of input is a regular [`TokenKind::Eof`]
    /// token positioned one column past the last consumed character.
    pub(crate) fn read(&mut self) -> Result<Token, SyntaxError> {
        let (after_blank, after_newline) = self.skip_trivia()?;
        let pos = self.pos();
        let token = |kind, text| Token {
            pos,
            kind,
            text,
            after_blank,
            after_newline,
        };

        let Some(ch) = self.peek() else {
            return Ok(token(TokenKind::Eof, String::new()));
        };

        if is_alpha(ch) || ch == '_' {
            return Ok(token(TokenKind::Identifier, self.scan_identifier()));
        }
        if ch.is_ascii_digit() {
            let (kind, text) = if ch == '0' {
                self.scan_zero(pos)?
            } else {
                self.scan_decimal()
            };
            return Ok(token(kind, text));
        }

        self.bump();
        let (kind, text) = match ch {
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '%' => (TokenKind::Percent, "%"),
            '(' => (TokenKind::LParen, "("),
            ')' => (TokenKind::RParen, ")"),
            ',' => (TokenKind::Comma, ","),
            '*' => {
                if self.peek() == Some('*') {
                    self.bump();
                    (TokenKind::DoubleStar, "**")
                } else {
                    (TokenKind::Star, "*")
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.bump();
                    (TokenKind::DoubleSlash, "//")
                } else {
                    (TokenKind::Slash, "/")
                }
            }
            _ => return Err(SyntaxError::new(pos, SyntaxErrorKind::UnexpectedChar(ch))),
        };
        Ok(token(kind, text.to_string()))
    }

    /// Skips blanks and line breaks, reporting whether each occurred
    /// immediately before the next token. A bare `\r` is rejected.
    fn skip_trivia(&mut self) -> Result<(bool, bool), SyntaxError> {
        let mut blank = false;
        let mut newline = false;
        loop {
            match self.peek() {
                Some(ch) if is_blank(ch) => {
                    self.bump();
                    blank = true;
                }
                Some('\n') => {
                    self.bump();
                    self.row += 1;
                    self.col = 1;
                    newline = true;
                }
                Some('\r') => {
                    if self.peek_at(1) != Some('\n') {
                        return Err(SyntaxError::new(
                            self.pos(),
                            SyntaxErrorKind::UnexpectedChar('\r'),
                        ));
                    }
                    self.bump();
                    self.bump();
                    self.row += 1;
                    self.col = 1;
                    newline = true;
                }
                _ => break,
            }
        }
        Ok((blank, newline))
    }

    fn scan_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if is_alpha(ch) || ch.is_ascii_digit() || ch == '_' {
                self.bump();
                text.push(ch);
            } else {
                break;
            }
        }
        text
    }

    /// Scans a decimal integer starting with `1`-`9`. A single `.` promotes
    /// it to a float; the digit run after the dot continues the float.
    fn scan_decimal(&mut self) -> (TokenKind, String) {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.bump();
                text.push(ch);
            } else {
                break;
            }
        }
        if self.peek() == Some('.') {
            self.bump();
            text.push('.');
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    self.bump();
                    text.push(ch);
                } else {
                    break;
                }
            }
            return (TokenKind::Float, text);
        }
        (TokenKind::Integer, text)
    }

    /// Disambiguates a token starting with `0`: a bare zero, a float, a bare
    /// octal literal, or a `0b`/`0o`/`0x` prefixed literal.
    fn scan_zero(&mut self, pos: Pos) -> Result<(TokenKind, String), SyntaxError> {
        self.bump();
        let mut text = String::from("0");
        match self.peek() {
            Some('.') => {
                self.bump();
                text.push('.');
                while let Some(ch) = self.peek() {
                    if ch.is_ascii_digit() {
                        self.bump();
                        text.push(ch);
                    } else {
                        break;
                    }
                }
                Ok((TokenKind::Float, text))
            }
            Some(ch @ ('b' | 'B')) => self.scan_radix(pos, text, ch, 2),
            Some(ch @ ('o' | 'O')) => self.scan_radix(pos, text, ch, 8),
            Some(ch @ ('x' | 'X')) => self.scan_radix(pos, text, ch, 16),
            Some(ch) if ch.is_ascii_digit() => {
                // Bare octal like 0755. A decimal digit outside 0-7 right
                // after the zero cannot open any other token, so it is a bad
                // octal digit rather than a token boundary.
                if !('0'..='7').contains(&ch) {
                    return Err(SyntaxError::new(
                        self.pos(),
                        SyntaxErrorKind::InvalidDigit { base: 8, digit: ch },
                    ));
                }
                while let Some(ch) = self.peek() {
                    if ('0'..='7').contains(&ch) {
                        self.bump();
                        text.push(ch);
                    } else {
                        break;
                    }
                }
                Ok((TokenKind::OctLiteral, text))
            }
            _ => Ok((TokenKind::Integer, text)),
        }
    }

    /// Consumes a literal prefix (`0b`, `0o`, `0x`) and its digit run. A
    /// prefix with no digits is an error; when the very next token starts
    /// right at the bad character, the diagnostic blames that token instead.
    fn scan_radix(
        &mut self,
        pos: Pos,
        mut text: String,
        prefix: char,
        base: u32,
    ) -> Result<(TokenKind, String), SyntaxError> {
        self.bump();
        text.push(prefix);

        let mut has_digit = false;
        while let Some(ch) = self.peek() {
            if ch.to_digit(base).is_some() {
                self.bump();
                text.push(ch);
                has_digit = true;
            } else {
                break;
            }
        }
        if !has_digit {
            return Err(self.literal_prefix_error(pos, base));
        }

        let kind = match base {
            2 => TokenKind::BinLiteral,
            8 => TokenKind::OctLiteral,
            _ => TokenKind::HexLiteral,
        };
        Ok((kind, text))
    }

    /// Enriches a "no digits" diagnostic using the token that follows the
    /// prefix: a directly adjacent numeric token names the invalid digit, a
    /// directly adjacent non-digit after a hex prefix becomes an unexpected
    /// character. Separated tokens keep the plain prefix error.
    fn literal_prefix_error(&mut self, pos: Pos, base: u32) -> SyntaxError {
        let plain = SyntaxError::new(pos, SyntaxErrorKind::LiteralNoDigits { base });

        let next = match self.read() {
            Ok(next) => next,
            Err(_) => return plain,
        };
        if next.kind == TokenKind::Eof || next.after_blank || next.after_newline {
            return plain;
        }
        let Some(first) = next.text.chars().next() else {
            return plain;
        };

        if base == 16 {
            SyntaxError::new(next.pos, SyntaxErrorKind::UnexpectedChar(first))
        } else if next.kind == TokenKind::Integer {
            SyntaxError::new(next.pos, SyntaxErrorKind::InvalidDigit { base, digit: first })
        } else {
            plain
        }
    }
}
