//! gettext plural rules.
//!
//! Catalogs declare how to pick a plural form with a `Plural-Forms` header:
//!
//! ```text
//! nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);
//! ```
//!
//! The expression is a C expression over the count `n`. It is parsed once
//! when the catalog loads and evaluated for every pluralized lookup.

use std::fmt;

use crate::error::PluralError;

/// The plural rule of a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralForms {
    count: usize,
    expr: Expr,
    source: String,
}

impl PluralForms {
    /// The Germanic rule: singular for exactly one, plural otherwise.
    pub fn germanic() -> Self {
        Self {
            count: 2,
            expr: Expr::Binary(
                BinaryOp::Ne,
                Box::new(Expr::N),
                Box::new(Expr::Number(1.0)),
            ),
            source: "nplurals=2; plural=(n != 1);".to_string(),
        }
    }

    /// Parses a `Plural-Forms` header value.
    ///
    /// ```rust
    /// use lokale::PluralForms;
    ///
    /// let forms = PluralForms::parse("nplurals=3; plural=n==1 ? 0 : n==2 ? 1 : 2;").unwrap();
    /// assert_eq!(forms.count(), 3);
    /// assert_eq!(forms.index(1.0), 0);
    /// assert_eq!(forms.index(2.0), 1);
    /// assert_eq!(forms.index(7.0), 2);
    /// ```
    pub fn parse(header: &str) -> Result<Self, PluralError> {
        let mut count = None;
        let mut expr = None;

        for clause in header.split(';') {
            let Some((key, value)) = clause.split_once('=') else {
                continue;
            };
            match key.trim() {
                "nplurals" => {
                    let value = value.trim();
                    let n = value
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| PluralError::InvalidCount(value.to_string()))?;
                    count = Some(n);
                }
                "plural" => expr = Some(value.trim()),
                _ => {}
            }
        }

        let count = count.ok_or_else(|| PluralError::MissingCount(header.to_string()))?;
        let source = expr.ok_or_else(|| PluralError::MissingExpression(header.to_string()))?;
        let expr = ExprParser::new(source).parse()?;

        Ok(Self {
            count,
            expr,
            source: header.trim().to_string(),
        })
    }

    /// Number of plural forms.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The header this rule was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Index of the plural form to use for `n`.
    ///
    /// Results outside `0..count`, and failed evaluations such as a
    /// division by zero, select form 0.
    pub fn index(&self, n: f64) -> usize {
        let value = self.expr.eval(n);
        if !value.is_finite() || value < 0.0 {
            return 0;
        }
        let index = value.trunc() as usize;
        if index >= self.count {
            0
        } else {
            index
        }
    }
}

impl Default for PluralForms {
    fn default() -> Self {
        Self::germanic()
    }
}

impl fmt::Display for PluralForms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    N,
    Number(f64),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

fn truth(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Expr {
    fn eval(&self, n: f64) -> f64 {
        match self {
            Expr::N => n,
            Expr::Number(v) => *v,
            Expr::Not(e) => truth(e.eval(n) == 0.0),
            Expr::Neg(e) => -e.eval(n),
            Expr::Ternary(cond, then, other) => {
                if cond.eval(n) != 0.0 {
                    then.eval(n)
                } else {
                    other.eval(n)
                }
            }
            Expr::Binary(op, lhs, rhs) => {
                let a = lhs.eval(n);
                let b = || rhs.eval(n);
                match op {
                    BinaryOp::Or => truth(a != 0.0 || b() != 0.0),
                    BinaryOp::And => truth(a != 0.0 && b() != 0.0),
                    BinaryOp::Eq => truth(a == b()),
                    BinaryOp::Ne => truth(a != b()),
                    BinaryOp::Lt => truth(a < b()),
                    BinaryOp::Le => truth(a <= b()),
                    BinaryOp::Gt => truth(a > b()),
                    BinaryOp::Ge => truth(a >= b()),
                    BinaryOp::Add => a + b(),
                    BinaryOp::Sub => a - b(),
                    BinaryOp::Mul => a * b(),
                    BinaryOp::Div => match b() {
                        d if d == 0.0 => f64::NAN,
                        d => (a / d).trunc(),
                    },
                    BinaryOp::Rem => a % b(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    N,
    Number(f64),
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
    End,
}

/// Recursive descent parser over a token list, C precedence.
struct ExprParser<'a> {
    source: &'a str,
    tokens: Vec<(Tok, usize)>,
    pos: usize,
}

const OPERATORS: &[&str] = &[
    "||", "&&", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "!",
];

impl<'a> ExprParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            pos: 0,
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> PluralError {
        PluralError::Syntax {
            expr: self.source.to_string(),
            offset,
            message: message.into(),
        }
    }

    fn tokenize(&mut self) -> Result<(), PluralError> {
        let src = self.source;
        let bytes = src.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            if c.is_ascii_whitespace() {
                i += 1;
                continue;
            }
            let start = i;
            let tok = match c {
                b'n' => {
                    i += 1;
                    Tok::N
                }
                b'(' => {
                    i += 1;
                    Tok::LParen
                }
                b')' => {
                    i += 1;
                    Tok::RParen
                }
                b'?' => {
                    i += 1;
                    Tok::Question
                }
                b':' => {
                    i += 1;
                    Tok::Colon
                }
                b'0'..=b'9' => {
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                    let value = src[start..i]
                        .parse::<f64>()
                        .map_err(|_| self.error(start, "invalid number"))?;
                    Tok::Number(value)
                }
                _ => {
                    let op = OPERATORS
                        .iter()
                        .find(|op| src[i..].starts_with(**op))
                        .ok_or_else(|| self.error(start, "unexpected character"))?;
                    i += op.len();
                    Tok::Op(op)
                }
            };
            self.tokens.push((tok, start));
        }
        self.tokens.push((Tok::End, src.len()));
        Ok(())
    }

    fn parse(mut self) -> Result<Expr, PluralError> {
        self.tokenize()?;
        let expr = self.ternary()?;
        match self.peek() {
            Tok::End => Ok(expr),
            _ => Err(self.error(self.offset(), "unexpected trailing input")),
        }
    }

    fn peek(&self) -> Tok {
        self.tokens.get(self.pos).map(|(t, _)| *t).unwrap_or(Tok::End)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, o)| *o)
            .unwrap_or(self.source.len())
    }

    fn advance(&mut self) -> Tok {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn eat_op(&mut self, ops: &[&'static str]) -> Option<&'static str> {
        match self.peek() {
            Tok::Op(op) if ops.contains(&op) => {
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn ternary(&mut self) -> Result<Expr, PluralError> {
        let cond = self.binary(0)?;
        if self.peek() != Tok::Question {
            return Ok(cond);
        }
        self.advance();
        let then = self.ternary()?;
        if self.advance() != Tok::Colon {
            return Err(self.error(self.offset(), "expected ':'"));
        }
        let other = self.ternary()?;
        Ok(Expr::Ternary(Box::new(cond), Box::new(then), Box::new(other)))
    }

    /// Binary operators by precedence level, lowest first.
    fn binary(&mut self, level: usize) -> Result<Expr, PluralError> {
        const LEVELS: &[&[&str]] = &[
            &["||"],
            &["&&"],
            &["==", "!="],
            &["<", "<=", ">", ">="],
            &["+", "-"],
            &["*", "/", "%"],
        ];

        if level == LEVELS.len() {
            return self.unary();
        }
        let mut lhs = self.binary(level + 1)?;
        while let Some(op) = self.eat_op(LEVELS[level]) {
            let rhs = self.binary(level + 1)?;
            lhs = Expr::Binary(binary_op(op), Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, PluralError> {
        match self.eat_op(&["!", "-"]) {
            Some("!") => Ok(Expr::Not(Box::new(self.unary()?))),
            Some(_) => Ok(Expr::Neg(Box::new(self.unary()?))),
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, PluralError> {
        let offset = self.offset();
        match self.advance() {
            Tok::N => Ok(Expr::N),
            Tok::Number(v) => Ok(Expr::Number(v)),
            Tok::LParen => {
                let expr = self.ternary()?;
                if self.advance() != Tok::RParen {
                    return Err(self.error(self.offset(), "expected ')'"));
                }
                Ok(expr)
            }
            _ => Err(self.error(offset, "expected expression")),
        }
    }
}

fn binary_op(op: &str) -> BinaryOp {
    match op {
        "||" => BinaryOp::Or,
        "&&" => BinaryOp::And,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::Ne,
        "<" => BinaryOp::Lt,
        "<=" => BinaryOp::Le,
        ">" => BinaryOp::Gt,
        ">=" => BinaryOp::Ge,
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        _ => BinaryOp::Rem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUSSIAN: &str = "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);";

    #[test]
    fn germanic_rule() {
        let forms = PluralForms::germanic();
        assert_eq!(forms.index(0.0), 1);
        assert_eq!(forms.index(1.0), 0);
        assert_eq!(forms.index(2.0), 1);
        assert_eq!(forms.index(1.5), 1);
    }

    #[test]
    fn parsed_germanic_matches_builtin() {
        let forms = PluralForms::parse("nplurals=2; plural=(n != 1);").unwrap();
        for n in 0..20 {
            assert_eq!(forms.index(n as f64), PluralForms::germanic().index(n as f64));
        }
    }

    #[test]
    fn single_form_languages() {
        let forms = PluralForms::parse("nplurals=1; plural=0;").unwrap();
        assert_eq!(forms.count(), 1);
        assert_eq!(forms.index(5.0), 0);
    }

    #[test]
    fn french_rule() {
        let forms = PluralForms::parse("nplurals=2; plural=(n > 1)").unwrap();
        assert_eq!(forms.index(0.0), 0);
        assert_eq!(forms.index(1.0), 0);
        assert_eq!(forms.index(2.0), 1);
    }

    #[test]
    fn russian_rule() {
        let forms = PluralForms::parse(RUSSIAN).unwrap();
        let cases = [(1, 0), (21, 0), (11, 2), (2, 1), (4, 1), (22, 1), (12, 2), (5, 2), (0, 2), (111, 2)];
        for (n, expected) in cases {
            assert_eq!(forms.index(n as f64), expected, "n = {}", n);
        }
    }

    #[test]
    fn arabic_rule() {
        let forms = PluralForms::parse(
            "nplurals=6; plural=n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5;",
        )
        .unwrap();
        let cases = [(0, 0), (1, 1), (2, 2), (3, 3), (10, 3), (11, 4), (99, 4), (100, 5), (102, 5)];
        for (n, expected) in cases {
            assert_eq!(forms.index(n as f64), expected, "n = {}", n);
        }
    }

    #[test]
    fn precedence_and_unary() {
        let forms = PluralForms::parse("nplurals=9; plural=1 + 2 * 3 - !0 - -1;").unwrap();
        assert_eq!(forms.index(0.0), 7);
        let forms = PluralForms::parse("nplurals=9; plural=(1 + 2) * 2;").unwrap();
        assert_eq!(forms.index(0.0), 6);
        let forms = PluralForms::parse("nplurals=9; plural=n / 2;").unwrap();
        assert_eq!(forms.index(5.0), 2);
    }

    #[test]
    fn out_of_range_selects_first_form() {
        let forms = PluralForms::parse("nplurals=2; plural=n;").unwrap();
        assert_eq!(forms.index(5.0), 0);
        let forms = PluralForms::parse("nplurals=2; plural=1 / (n - n);").unwrap();
        assert_eq!(forms.index(3.0), 0);
    }

    #[test]
    fn errors() {
        assert!(matches!(
            PluralForms::parse("plural=n != 1;"),
            Err(PluralError::MissingCount(_))
        ));
        assert!(matches!(
            PluralForms::parse("nplurals=0; plural=0;"),
            Err(PluralError::InvalidCount(_))
        ));
        assert!(matches!(
            PluralForms::parse("nplurals=2;"),
            Err(PluralError::MissingExpression(_))
        ));
        assert!(matches!(
            PluralForms::parse("nplurals=2; plural=(n != 1;"),
            Err(PluralError::Syntax { .. })
        ));
        assert!(matches!(
            PluralForms::parse("nplurals=2; plural=n ? 1;"),
            Err(PluralError::Syntax { .. })
        ));
        assert!(matches!(
            PluralForms::parse("nplurals=2; plural=x;"),
            Err(PluralError::Syntax { offset: 0, .. })
        ));
    }
}
