use log::debug;

use crate::ast::lexer::TokenReader;
use crate::ast::token::{Token, TokenKind};
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{SyntaxError, SyntaxErrorKind};

/// Recursive-descent parser over the lazy token stream.
///
/// Grammar, loosest binding first:
///
/// ```text
/// Expression     = Additive
/// Additive       = Multiplicative ( ('+'|'-') Multiplicative )*
/// Multiplicative = Exponent ( ('*'|'/'|'%'|'//') Exponent )*
/// Exponent       = Unary ( '**' Unary )*
/// Unary          = ('+'|'-') Unary | Primary
/// Primary        = identifier
///                | identifier '(' ( Additive (',' Additive)* )? ')'
///                | literal
///                | '(' Additive ')'
/// ```
///
/// Every binary layer folds left-associatively, `**` included: `2**3**2` is
/// `(2**3)**2`. The parser keeps exactly one token of lookahead and never
/// backtracks; a failed production is a failed parse.
pub struct Parser {
    reader: TokenReader,
    peeked: Option<Token>,
}

impl Parser {
    /// Parses a complete expression string. Trailing tokens after a finished
    /// expression are an error, so on success the whole input was consumed.
    pub fn parse(text: &str) -> Result<Expr, SyntaxError> {
        debug!("parsing expression: {text:?}");
        let mut parser = Parser {
            reader: TokenReader::new(text),
            peeked: None,
        };

        let expr = parser.parse_additive()?;
        let trailing = parser.next_token()?;
        if trailing.kind != TokenKind::Eof {
            return Err(SyntaxError::new(
                trailing.pos,
                SyntaxErrorKind::TrailingToken {
                    text: trailing.text,
                },
            ));
        }
        Ok(expr)
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.reader.read(),
        }
    }

    fn peek_kind(&mut self) -> Result<TokenKind, SyntaxError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.reader.read()?);
        }
        Ok(self.peeked.as_ref().map_or(TokenKind::Eof, |t| t.kind))
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind()? {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.next_token()?;
            let right = self.parse_multiplicative()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_exponent()?;
        loop {
            let op = match self.peek_kind()? {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                TokenKind::DoubleSlash => BinaryOp::FloorDiv,
                _ => break,
            };
            self.next_token()?;
            let right = self.parse_exponent()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_exponent(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_unary()?;
        while self.peek_kind()? == TokenKind::DoubleStar {
            self.next_token()?;
            let right = self.parse_unary()?;
            expr = Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match self.peek_kind()? {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        self.next_token()?;
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Identifier => {
                if self.peek_kind()? == TokenKind::LParen {
                    self.next_token()?;
                    let args = self.parse_call_args()?;
                    Ok(Expr::Call {
                        name: token.text,
                        args,
                    })
                } else {
                    Ok(Expr::Variable(token.text))
                }
            }
            kind if kind.is_literal() => Ok(Expr::Literal(token)),
            TokenKind::LParen => {
                let inner = self.parse_additive()?;
                let close = self.next_token()?;
                if close.kind != TokenKind::RParen {
                    return Err(SyntaxError::new(close.pos, SyntaxErrorKind::ExpectedRParen));
                }
                Ok(inner)
            }
            TokenKind::Eof => Err(SyntaxError::new(token.pos, SyntaxErrorKind::UnexpectedEof)),
            _ => Err(SyntaxError::new(
                token.pos,
                SyntaxErrorKind::UnexpectedToken { text: token.text },
            )),
        }
    }

    /// Parses the argument list after a call's `(` has been consumed. An
    /// immediate `)` is an empty list, not an empty expression.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        if self.peek_kind()? == TokenKind::RParen {
            self.next_token()?;
            return Ok(args);
        }
        loop {
            args.push(self.parse_additive()?);
            let sep = self.next_token()?;
            match sep.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => break,
                _ => return Err(SyntaxError::new(sep.pos, SyntaxErrorKind::ExpectedRParen)),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Pos;

    fn parse(text: &str) -> Expr {
        Parser::parse(text).expect("parse should succeed")
    }

    fn parse_err(text: &str) -> SyntaxError {
        Parser::parse(text).expect_err("parse should fail")
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn int(text: &str, col: u32) -> Expr {
        Expr::Literal(Token {
            pos: Pos { row: 1, col },
            kind: TokenKind::Integer,
            text: text.to_string(),
            after_blank: false,
            after_newline: false,
        })
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1+2*3"),
            binary(
                BinaryOp::Add,
                int("1", 1),
                binary(BinaryOp::Mul, int("2", 3), int("3", 5)),
            )
        );
    }

    #[test]
    fn additive_folds_left() {
        assert_eq!(
            parse("1-2-3"),
            binary(
                BinaryOp::Sub,
                binary(BinaryOp::Sub, int("1", 1), int("2", 3)),
                int("3", 5),
            )
        );
    }

    #[test]
    fn exponent_folds_left() {
        assert_eq!(
            parse("2**3**2"),
            binary(
                BinaryOp::Pow,
                binary(BinaryOp::Pow, int("2", 1), int("3", 4)),
                int("2", 7),
            )
        );
    }

    #[test]
    fn exponent_binds_tighter_than_multiplication() {
        assert_eq!(
            parse("2*3**2"),
            binary(
                BinaryOp::Mul,
                int("2", 1),
                binary(BinaryOp::Pow, int("3", 3), int("2", 6)),
            )
        );
    }

    #[test]
    fn unary_is_right_recursive() {
        let expr = parse("--x");
        let Expr::Unary { op: UnaryOp::Neg, operand } = expr else {
            panic!("expected outer negation");
        };
        assert_eq!(
            *operand,
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::Variable("x".to_string())),
            }
        );
    }

    #[test]
    fn parenthesized_group_overrides_precedence() {
        assert_eq!(
            parse("(1+2)*3"),
            binary(
                BinaryOp::Mul,
                binary(BinaryOp::Add, int("1", 2), int("2", 4)),
                int("3", 7),
            )
        );
    }

    #[test]
    fn bare_identifier_is_a_variable() {
        assert_eq!(parse("c3p"), Expr::Variable("c3p".to_string()));
    }

    #[test]
    fn call_with_arguments() {
        let expr = parse("pow(2, 10)");
        let Expr::Call { name, args } = expr else {
            panic!("expected a call");
        };
        assert_eq!(name, "pow");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn call_with_empty_argument_list() {
        assert_eq!(
            parse("f()"),
            Expr::Call {
                name: "f".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn nested_calls() {
        let Expr::Call { name, args } = parse("wyy(c3p, gtmd(5))") else {
            panic!("expected a call");
        };
        assert_eq!(name, "wyy");
        assert_eq!(args[0], Expr::Variable("c3p".to_string()));
        assert!(matches!(&args[1], Expr::Call { name, .. } if name == "gtmd"));
    }

    #[test]
    fn empty_input_is_unexpected_eof() {
        let err = parse_err("");
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEof);
        assert_eq!(err.pos, Pos { row: 1, col: 1 });
    }

    #[test]
    fn operand_missing_at_end_of_input() {
        let err = parse_err("1+");
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEof);
        assert_eq!(err.pos, Pos { row: 1, col: 3 });
    }

    #[test]
    fn missing_closing_paren_reported_at_eof_position() {
        let err = parse_err("(1+2");
        assert_eq!(err.kind, SyntaxErrorKind::ExpectedRParen);
        assert_eq!(err.pos, Pos { row: 1, col: 5 });
    }

    #[test]
    fn call_missing_closing_paren() {
        let err = parse_err("f(1, 2");
        assert_eq!(err.kind, SyntaxErrorKind::ExpectedRParen);
    }

    #[test]
    fn trailing_token_after_complete_expression() {
        let err = parse_err("1+2 3");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::TrailingToken {
                text: "3".to_string()
            }
        );
        assert_eq!(err.pos, Pos { row: 1, col: 5 });
    }

    #[test]
    fn primary_rejects_stray_comma() {
        let err = parse_err(",1");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnexpectedToken {
                text: ",".to_string()
            }
        );
    }

    #[test]
    fn empty_group_is_rejected() {
        let err = parse_err("()");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnexpectedToken {
                text: ")".to_string()
            }
        );
    }

    #[test]
    fn lexer_errors_surface_through_parse() {
        let err = parse_err("1 + 0x");
        assert_eq!(err.kind, SyntaxErrorKind::LiteralNoDigits { base: 16 });
        assert_eq!(err.pos, Pos { row: 1, col: 5 });
    }

    #[test]
    fn positions_survive_line_breaks() {
        let err = parse_err("1 +\n  ,");
        assert_eq!(err.pos, Pos { row: 2, col: 3 });
    }
}
