//! Expression display and evaluation behind the calculator keypad.

use thiserror::Error;

/// Display text after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";

const RESULT_DECIMALS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("expression ended early")]
    UnexpectedEnd,
    #[error("unexpected `{0}`")]
    UnexpectedChar(char),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("result is not a finite number")]
    NotFinite,
}

/// One keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKey {
    /// Appends a digit, `.`, an operator or a parenthesis.
    Input(char),
    Backspace,
    ClearAll,
    Evaluate,
}

/// Editable expression plus the last evaluated one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorState {
    pub display: String,
    /// `"<expression> ="` after a successful evaluation.
    pub history: String,
}

impl CalculatorState {
    pub fn apply(&mut self, key: CalcKey) {
        match key {
            CalcKey::Input(ch) => {
                if self.is_error() {
                    self.display.clear();
                }
                self.display.push(ch);
            }
            CalcKey::Backspace => {
                if self.is_error() {
                    self.display.clear();
                } else {
                    self.display.pop();
                }
            }
            CalcKey::ClearAll => {
                self.display.clear();
                self.history.clear();
            }
            CalcKey::Evaluate => self.evaluate(),
        }
    }

    fn evaluate(&mut self) {
        if self.display.is_empty() || self.is_error() {
            return;
        }
        match evaluate(&self.display) {
            Ok(value) => {
                self.history = format!("{} =", self.display);
                self.display = format_result(value);
            }
            Err(_) => self.display = ERROR_TEXT.to_string(),
        }
    }

    /// Text for the main display; `0` when empty.
    pub fn shown(&self) -> &str {
        if self.display.is_empty() {
            "0"
        } else {
            &self.display
        }
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_TEXT
    }
}

/// Evaluates `+ - × ÷ ^` (ASCII `*` and `/` too) with parentheses and unary signs.
///
/// `^` binds tighter than a leading minus and associates to the right.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let mut parser = Parser {
        chars: expression.chars().filter(|ch| !ch.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.sum()?;
    if let Some(ch) = parser.peek() {
        return Err(CalcError::UnexpectedChar(ch));
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}

/// Rounds to six decimals and drops trailing zeros.
pub fn format_result(value: f64) -> String {
    let mut text = format!("{:.*}", RESULT_DECIMALS, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn sum(&mut self) -> Result<f64, CalcError> {
        let mut value = self.product()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.product()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn product(&mut self) -> Result<f64, CalcError> {
        let mut value = self.signed()?;
        while let Some(op @ ('×' | '*' | '÷' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.signed()?;
            value = if matches!(op, '×' | '*') {
                value * rhs
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn signed(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.signed()?)
            }
            Some('+') => {
                self.pos += 1;
                self.signed()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if self.peek() == Some('^') {
            self.pos += 1;
            let exponent = self.signed()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.bump() {
            None => Err(CalcError::UnexpectedEnd),
            Some('(') => {
                let value = self.sum()?;
                match self.bump() {
                    Some(')') => Ok(value),
                    Some(ch) => Err(CalcError::UnexpectedChar(ch)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => {
                let start = self.pos - 1;
                while self
                    .peek()
                    .is_some_and(|next| next.is_ascii_digit() || next == '.')
                {
                    self.pos += 1;
                }
                let literal: String = self.chars[start..self.pos].iter().collect();
                literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(literal))
            }
            Some(ch) => Err(CalcError::UnexpectedChar(ch)),
        }
    }
}
