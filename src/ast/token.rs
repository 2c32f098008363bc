use std::fmt;

/// Source position of a token, 1-based for both row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Float,
    BinLiteral,
    OctLiteral,
    HexLiteral,
    LParen,
    RParen,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    DoubleSlash,
    Eof,
}

impl TokenKind {
    /// True for the token kinds a literal expression node may carry.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::BinLiteral
                | TokenKind::OctLiteral
                | TokenKind::HexLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::BinLiteral => "bin-literal",
            TokenKind::OctLiteral => "oct-literal",
            TokenKind::HexLiteral => "hex-literal",
            TokenKind::LParen => "left-paren",
            TokenKind::RParen => "right-paren",
            TokenKind::Comma => "comma",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Percent => "percent",
            TokenKind::DoubleStar => "double-star",
            TokenKind::DoubleSlash => "double-slash",
            TokenKind::Eof => "end-of-input",
        };
        f.write_str(name)
    }
}

/// A single token produced by the token reader.
///
/// `after_blank` and `after_newline` record whether whitespace or a line break
/// immediately preceded the token's first character. The lexer uses them to
/// decide whether a malformed-literal diagnostic may also blame the token that
/// follows the bad prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub pos: Pos,
    pub kind: TokenKind,
    pub text: String,
    pub after_blank: bool,
    pub after_newline: bool,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:?}>", self.kind, self.text)
    }
}
