//! Recursive-descent parser over a shared cursor.
//!
//! ```text
//! expr       := term (('+'|'-') term)*
//! term       := factor ('*' factor)*
//! factor     := literal | extern_ref | '(' expr ')' | '-' factor
//! literal    := [0-9]+
//! extern_ref := [A-Za-z0-9]+ ( '(' expr (',' expr)* ')' )?
//! ```
//!
//! `*` binds tighter than `+`/`-`; `+`/`-` are left-associative.
//! Unary minus is resolved at the `factor` level into a synthetic
//! `(-1) * factor` node, which is equivalent to "continuing the current
//! term with `*`" for the single-level case spec.md describes and
//! generalises cleanly to repeated unary minus (`--5`).

use crate::ast::Expr;
use crate::error::ParseError;
use crate::symtab::SymbolTable;

const MAX_ARGUMENTS: usize = 4;

pub fn parse(dense_text: &str, symbols: &SymbolTable) -> Result<Expr, ParseError> {
    if dense_text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut cursor = Cursor {
        text: dense_text,
        pos: 0,
        symbols,
    };
    let tree = cursor.parse_expr()?;

    match cursor.peek() {
        None => Ok(tree),
        Some(')') => Err(ParseError::TrailingInput { position: cursor.pos }),
        Some(c) => Err(ParseError::UnexpectedCharacter {
            found: Some(c),
            position: cursor.pos,
        }),
    }
}

struct Cursor<'s> {
    text: &'s str,
    pos: usize,
    symbols: &'s SymbolTable<'s>,
}

impl<'s> Cursor<'s> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn advance(&mut self) -> char {
        let c = self.peek().expect("advance past end of input");
        self.pos += c.len_utf8();
        c
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    lhs = Expr::add(lhs, rhs);
                }
                Some('-') => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    lhs = Expr::sub(lhs, rhs);
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_factor()?;
        while let Some('*') = self.peek() {
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Expr::mul(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some('-') => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::mul(Expr::Literal(-1), operand))
            }
            Some('(') => {
                self.advance();
                let inner = self.parse_expr()?;
                match self.peek() {
                    Some(')') => {
                        self.advance();
                        Ok(Expr::parenthesised(inner))
                    }
                    None => Err(ParseError::UnbalancedParentheses { position: self.pos }),
                    Some(c) => Err(ParseError::UnexpectedCharacter {
                        found: Some(c),
                        position: self.pos,
                    }),
                }
            }
            Some(c) if c.is_ascii_digit() => Ok(self.parse_literal()),
            Some(c) if c.is_ascii_alphabetic() => self.parse_extern_ref(),
            Some(')') | Some(',') => Err(ParseError::EmptyArgument { position: self.pos }),
            Some(c) => Err(ParseError::UnexpectedCharacter {
                found: Some(c),
                position: self.pos,
            }),
            None => Err(ParseError::UnbalancedParentheses { position: self.pos }),
        }
    }

    fn parse_literal(&mut self) -> Expr {
        let mut value: i32 = 0;
        while let Some(c) = self.peek() {
            if let Some(digit) = c.to_digit(10) {
                value = value.wrapping_mul(10).wrapping_add(digit as i32);
                self.advance();
            } else {
                break;
            }
        }
        Expr::Literal(value)
    }

    fn parse_extern_ref(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }
        let name = &self.text[start..self.pos];

        let address = self
            .symbols
            .resolve(name)
            .ok_or_else(|| ParseError::UnknownIdentifier {
                name: name.to_owned(),
                position: start,
            })?;

        if self.peek() != Some('(') {
            return Ok(Expr::ExternValue(address));
        }
        self.advance();

        let mut args = Vec::new();
        loop {
            let arg_start = self.pos;
            let arg = self.parse_expr()?;
            args.push(arg);
            if args.len() > MAX_ARGUMENTS {
                return Err(ParseError::TooManyArguments {
                    position: arg_start,
                });
            }
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    return Err(ParseError::UnexpectedCharacter {
                        found: Some(c),
                        position: self.pos,
                    })
                }
                None => return Err(ParseError::UnbalancedParentheses { position: self.pos }),
            }
        }

        Ok(Expr::ExternFunction(address, args))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Expr;

    fn parse_str(text: &str, symbols: &[(&str, u32)]) -> Result<Expr, ParseError> {
        let table = SymbolTable::new(symbols);
        parse(text, &table)
    }

    #[test]
    fn literal() {
        assert_eq!(parse_str("42", &[]), Ok(Expr::Literal(42)));
    }

    #[test]
    fn precedence() {
        // a + b * c
        assert_eq!(
            parse_str("2+3*4", &[]),
            Ok(Expr::add(Expr::Literal(2), Expr::mul(Expr::Literal(3), Expr::Literal(4))))
        );
    }

    #[test]
    fn parentheses_reset_precedence() {
        assert_eq!(
            parse_str("(2+3)*4", &[]),
            Ok(Expr::mul(
                Expr::parenthesised(Expr::add(Expr::Literal(2), Expr::Literal(3))),
                Expr::Literal(4)
            ))
        );
    }

    #[test]
    fn left_associative_subtraction() {
        // 10 - 3 - 2 == (10 - 3) - 2
        assert_eq!(
            parse_str("10-3-2", &[]),
            Ok(Expr::sub(Expr::sub(Expr::Literal(10), Expr::Literal(3)), Expr::Literal(2)))
        );
    }

    #[test]
    fn unary_minus_synthesises_literal() {
        assert_eq!(
            parse_str("-5+8", &[]),
            Ok(Expr::add(
                Expr::mul(Expr::Literal(-1), Expr::Literal(5)),
                Expr::Literal(8)
            ))
        );
    }

    #[test]
    fn unary_minus_chains_with_multiplication() {
        // -x*y == ((-1)*x)*y
        assert_eq!(
            parse_str("-x*y", &[("x", 100), ("y", 200)]),
            Ok(Expr::mul(
                Expr::mul(Expr::Literal(-1), Expr::ExternValue(100)),
                Expr::ExternValue(200)
            ))
        );
    }

    #[test]
    fn extern_value_resolved_by_following_character() {
        assert_eq!(parse_str("x", &[("x", 0x1000)]), Ok(Expr::ExternValue(0x1000)));
    }

    #[test]
    fn extern_function_with_nested_calls() {
        let symbols = [("add", 1u32), ("mul", 2u32)];
        let tree = parse_str("add(7,mul(3,4))", &symbols).unwrap();
        assert_eq!(
            tree,
            Expr::ExternFunction(
                1,
                vec![
                    Expr::Literal(7),
                    Expr::ExternFunction(2, vec![Expr::Literal(3), Expr::Literal(4)])
                ]
            )
        );
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        assert_eq!(
            parse_str("x", &[]),
            Err(ParseError::UnknownIdentifier {
                name: "x".to_owned(),
                position: 0
            })
        );
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        let symbols = [("f", 1u32)];
        assert_eq!(
            parse_str("f(1,2,3,4,5)", &symbols),
            Err(ParseError::TooManyArguments { position: 10 })
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(parse_str("", &[]), Err(ParseError::EmptyInput));
    }

    #[test]
    fn empty_parenthesised_group_is_an_error() {
        assert_eq!(
            parse_str("()", &[]),
            Err(ParseError::EmptyArgument { position: 1 })
        );
    }

    #[test]
    fn unbalanced_parentheses_is_an_error() {
        assert_eq!(
            parse_str("(2+3", &[]),
            Err(ParseError::UnbalancedParentheses { position: 4 })
        );
    }

    #[test]
    fn trailing_input_is_an_error() {
        assert_eq!(
            parse_str("2)", &[]),
            Err(ParseError::TrailingInput { position: 1 })
        );
    }
}
