//! Formula parser
//!
//! A recursive descent parser for template formulas. Input is lowercased and
//! split into numbers, identifiers, `+ - * /` and parentheses; every other
//! character is dropped by the tokenizer.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use lazy_regex::{regex, regex_is_match};
use tarief_core::column_key;

/// Maximum nesting of parentheses and unary minus
const MAX_DEPTH: usize = 64;

/// Maximum number of tokens in one formula, bounding the depth of operator chains
pub const MAX_TOKENS: usize = 1000;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use tarief_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("Aantal * Prijs").unwrap();
/// let ast = parse_formula("(uren * uurtarief) + km * kmtarief").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let tokens = tokenize(formula);
    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(FormulaError::Parse(format!(
            "Formula has {} tokens, limit is {}",
            tokens.len(),
            MAX_TOKENS
        )));
    }

    let mut parser = FormulaParser::new(tokens);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !parser.is_at_end() {
        return Err(FormulaError::Parse(format!(
            "Unexpected token after expression: {:?}",
            parser.current_token()
        )));
    }

    Ok(expr)
}

/// Check whether `name` can be referenced from a formula as a single identifier
pub fn is_identifier(name: &str) -> bool {
    let lower = column_key(name);
    regex_is_match!(r"^[a-z_][a-z0-9_]*$", &lower)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),

    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

/// Split a formula into tokens, silently dropping unrecognized characters
fn tokenize(formula: &str) -> Vec<Token> {
    let lower = formula.to_lowercase();
    regex!(r"[0-9]+(?:\.[0-9]+)?|[a-z_][a-z0-9_]*|[-+*/()]")
        .find_iter(&lower)
        .map(|m| {
            let text = m.as_str();
            match text {
                "+" => Token::Plus,
                "-" => Token::Minus,
                "*" => Token::Star,
                "/" => Token::Slash,
                "(" => Token::LeftParen,
                ")" => Token::RightParen,
                _ if text.starts_with(|c: char| c.is_ascii_digit()) => {
                    Token::Number(text.parse().unwrap_or(0.0))
                }
                _ => Token::Identifier(text.to_string()),
            }
        })
        .collect()
}

/// Formula parser
struct FormulaParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl FormulaParser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // === Helper methods ===

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    fn enter(&mut self) -> FormulaResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::Parse("Formula nested too deeply".into()));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary minus, parentheses, literals, identifiers

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_term()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_factor()?;
            left = FormulaExpr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        match self.consume() {
            Token::LeftParen => {
                self.enter()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                self.leave();
                Ok(expr)
            }

            Token::Minus => {
                self.enter()?;
                let operand = self.parse_factor()?;
                self.leave();
                Ok(FormulaExpr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(operand),
                })
            }

            Token::Number(n) => Ok(FormulaExpr::Number(n)),

            Token::Identifier(name) => Ok(FormulaExpr::Symbol(name)),

            other => Err(FormulaError::Parse(format!("Unexpected token: {:?}", other))),
        }
    }
}
