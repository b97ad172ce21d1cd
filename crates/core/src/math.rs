//! Safe evaluation of arithmetic expressions embedded in token values
//! (`"8 * 2"`, `"16px / 4"`). No `eval`, no surprises: a small recursive
//! descent parser over `+ - * /`, parentheses, and unit-suffixed operands.

use thiserror::Error;

use tokensmith_model::value::format_number;

#[derive(Debug, Error, PartialEq)]
pub enum MathError {
    #[error("unexpected `{0}` in expression")]
    Unexpected(char),
    #[error("expression ended unexpectedly")]
    UnexpectedEnd,
    #[error("trailing input after expression: `{0}`")]
    TrailingInput(String),
    #[error("division by zero")]
    DivisionByZero,
}

/// Whether a value string contains a non-trivial arithmetic expression:
/// any `+`, `*`, or `/` beyond an optional leading sign. A bare `-` acts as
/// a sign, never as math.
pub fn has_math(value: &str) -> bool {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix(['+', '-', '*', '/'])
        .unwrap_or(trimmed);
    rest.contains(['+', '*', '/'])
}

/// Evaluate an arithmetic expression to a number. Unit suffixes on operands
/// (`16px`) are ignored for the arithmetic.
pub fn evaluate(expr: &str) -> Result<f64, MathError> {
    Ok(Evaluator::run(expr)?.0)
}

/// Evaluate an expression and re-attach the first unit suffix seen among its
/// operands (`"16px * 2"` → `"32px"`). Unitless expressions yield a bare
/// number string.
pub fn evaluate_preserving_unit(expr: &str) -> Result<String, MathError> {
    let (value, unit) = Evaluator::run(expr)?;
    match unit {
        Some(unit) => Ok(format!("{}{unit}", format_number(value))),
        None => Ok(format_number(value)),
    }
}

struct Evaluator<'a> {
    input: &'a str,
    pos: usize,
    unit: Option<String>,
}

impl<'a> Evaluator<'a> {
    fn run(expr: &'a str) -> Result<(f64, Option<String>), MathError> {
        let mut ev = Evaluator {
            input: expr,
            pos: 0,
            unit: None,
        };
        let value = ev.expression()?;
        ev.skip_ws();
        if ev.pos < ev.input.len() {
            return Err(MathError::TrailingInput(ev.input[ev.pos..].to_string()));
        }
        Ok((value, ev.unit))
    }

    fn expression(&mut self) -> Result<f64, MathError> {
        let mut acc = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<f64, MathError> {
        let mut acc = self.factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    acc *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(MathError::DivisionByZero);
                    }
                    acc /= divisor;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, MathError> {
        self.skip_ws();
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                self.skip_ws();
                if self.peek() == Some(')') {
                    self.pos += 1;
                    Ok(value)
                } else {
                    Err(MathError::UnexpectedEnd)
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(MathError::Unexpected(c)),
            None => Err(MathError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, MathError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let value: f64 = self.input[start..self.pos]
            .parse()
            .map_err(|_| MathError::Unexpected('.'))?;

        // Unit suffix directly attached to the operand ("16px"); remember
        // the first one so the caller can re-tag the result.
        let unit_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '%') {
            self.pos += 1;
        }
        if self.pos > unit_start && self.unit.is_none() {
            self.unit = Some(self.input[unit_start..self.pos].to_string());
        }

        Ok(value)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }
}
