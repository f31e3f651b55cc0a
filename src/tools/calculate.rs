//! Calculation and unit conversion tool
//!
//! Pure computation over the argument string; no outbound calls. Two input
//! shapes are recognized:
//!
//! - temperature conversion phrases ("28.5 celsius to fahrenheit",
//!   "83.3 f in c"), rounded to one decimal
//! - arithmetic expressions over `+ - * / % ^`, parentheses, unary minus,
//!   and the constants `pi` and `e`, evaluated by a small recursive-descent
//!   parser restricted to exactly those operations
//!
//! Invalid input yields an error observation, never a panic or an Err.

use crate::tools::{Observation, ToolHandler};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

/// Tool performing arithmetic and Celsius/Fahrenheit conversions
pub struct CalculationTool;

impl CalculationTool {
    /// Create the calculation tool
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalculationTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for CalculationTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Performs arithmetic and Celsius/Fahrenheit conversions. Usage: calculate: [expression] or calculate: [value] celsius to fahrenheit"
    }

    async fn invoke(&self, input: &str) -> Observation {
        match evaluate(input) {
            Ok(result) => Observation::new(serde_json::json!({ "result": result })),
            Err(message) => Observation::error(format!("Calculation error: {}", message)),
        }
    }
}

fn c_to_f_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(-?\d+(?:\.\d+)?)\s*°?\s*(?:celsius|c)\s+(?:to|in)\s+°?\s*(?:fahrenheit|f)\s*$",
        )
        .expect("static regex compiles")
    })
}

fn f_to_c_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(-?\d+(?:\.\d+)?)\s*°?\s*(?:fahrenheit|f)\s+(?:to|in)\s+°?\s*(?:celsius|c)\s*$",
        )
        .expect("static regex compiles")
    })
}

/// Rounds to one decimal place, matching conventional temperature display
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Evaluates a calculation input to a number or an error description
pub fn evaluate(input: &str) -> std::result::Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty expression".to_string());
    }

    if let Some(captures) = c_to_f_regex().captures(trimmed) {
        let celsius: f64 = captures[1]
            .parse()
            .map_err(|e| format!("invalid number: {}", e))?;
        return Ok(round1(celsius * 9.0 / 5.0 + 32.0));
    }

    if let Some(captures) = f_to_c_regex().captures(trimmed) {
        let fahrenheit: f64 = captures[1]
            .parse()
            .map_err(|e| format!("invalid number: {}", e))?;
        return Ok(round1((fahrenheit - 32.0) * 5.0 / 9.0));
    }

    let mut parser = Parser::new(trimmed);
    let value = parser.parse_expression()?;
    parser.expect_end()?;

    if !value.is_finite() {
        return Err("result is not a finite number".to_string());
    }

    Ok(value)
}

/// Recursive-descent parser over the restricted arithmetic grammar
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := unary (('*' | '/' | '%') unary)*
/// unary      := '-' unary | power
/// power      := atom ('^' unary)?          (right-associative)
/// atom       := number | 'pi' | 'e' | '(' expression ')'
/// ```
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect_end(&mut self) -> std::result::Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(format!("unexpected character '{}'", c)),
        }
    }

    fn parse_expression(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Some('-') => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_term(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.parse_unary()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.advance();
                    value *= self.parse_unary()?;
                }
                Some('/') => {
                    self.advance();
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= divisor;
                }
                Some('%') => {
                    self.advance();
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err("modulo by zero".to_string());
                    }
                    value %= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_unary(&mut self) -> std::result::Result<f64, String> {
        if self.peek() == Some('-') {
            self.advance();
            return Ok(-self.parse_unary()?);
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> std::result::Result<f64, String> {
        let base = self.parse_atom()?;
        if self.peek() == Some('^') {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> std::result::Result<f64, String> {
        match self.peek() {
            Some('(') => {
                self.advance();
                let value = self.parse_expression()?;
                if self.peek() != Some(')') {
                    return Err("expected closing parenthesis".to_string());
                }
                self.advance();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() => self.parse_constant(),
            Some(c) => Err(format!("unexpected character '{}'", c)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn parse_number(&mut self) -> std::result::Result<f64, String> {
        self.skip_whitespace();
        let start = self.pos;
        let mut seen_dot = false;
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse()
            .map_err(|_| format!("invalid number '{}'", literal))
    }

    fn parse_constant(&mut self) -> std::result::Result<f64, String> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos].is_alphabetic() {
            self.pos += 1;
        }

        let word: String = self.chars[start..self.pos].iter().collect();
        match word.to_lowercase().as_str() {
            "pi" => Ok(std::f64::consts::PI),
            "e" => Ok(std::f64::consts::E),
            other => Err(format!("unknown identifier '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("28.5 + 4").unwrap(), 32.5);
        assert!((evaluate("17.8 - 18.5").unwrap() - (-0.7)).abs() < 1e-9);
        assert_eq!(evaluate("3 * 4").unwrap(), 12.0);
        assert_eq!(evaluate("10 / 4").unwrap(), 2.5);
        assert_eq!(evaluate("10 % 3").unwrap(), 1.0);
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0); // right-associative
        assert_eq!(evaluate("-2 ^ 2").unwrap(), -4.0); // unary binds outside power
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5").unwrap(), -5.0);
        assert_eq!(evaluate("--5").unwrap(), 5.0);
        assert_eq!(evaluate("3 - -2").unwrap(), 5.0);
    }

    #[test]
    fn test_constants() {
        assert!((evaluate("pi").unwrap() - std::f64::consts::PI).abs() < 1e-12);
        assert!((evaluate("2 * e").unwrap() - 2.0 * std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(evaluate("28.5 celsius to fahrenheit").unwrap(), 83.3);
        assert_eq!(evaluate("0 c to f").unwrap(), 32.0);
        assert_eq!(evaluate("100 Celsius in Fahrenheit").unwrap(), 212.0);
        assert_eq!(evaluate("28.5°C to °F").unwrap(), 83.3);
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        assert_eq!(evaluate("32 fahrenheit to celsius").unwrap(), 0.0);
        assert_eq!(evaluate("83.3 f in c").unwrap(), 28.5);
        assert_eq!(evaluate("-40 F to C").unwrap(), -40.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(evaluate("1 / 0").unwrap_err().contains("division by zero"));
        assert!(evaluate("1 % 0").unwrap_err().contains("modulo by zero"));
    }

    #[test]
    fn test_invalid_expressions() {
        assert!(evaluate("").is_err());
        assert!(evaluate("1 +").is_err());
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("foo + 1").is_err());
        assert!(evaluate("1 2").is_err());
        assert!(evaluate("1 $ 2").is_err());
    }

    #[test]
    fn test_idempotence() {
        // Same expression, same result, every time
        let first = evaluate("28.5 celsius to fahrenheit").unwrap();
        let second = evaluate("28.5 celsius to fahrenheit").unwrap();
        assert_eq!(first, second);

        let err_first = evaluate("nonsense").unwrap_err();
        let err_second = evaluate("nonsense").unwrap_err();
        assert_eq!(err_first, err_second);
    }

    #[tokio::test]
    async fn test_invoke_success_observation() {
        let tool = CalculationTool::new();
        let obs = tool.invoke("17.8 - 18.5").await;
        assert!(!obs.is_error());
        let result = obs.payload()["result"].as_f64().unwrap();
        assert!((result - (-0.7)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invoke_error_observation() {
        let tool = CalculationTool::new();
        let obs = tool.invoke("what is weather").await;
        assert!(obs.is_error());
        assert!(obs.payload()["error"]
            .as_str()
            .unwrap()
            .starts_with("Calculation error:"));
    }

    #[test]
    fn test_name_and_description() {
        let tool = CalculationTool::new();
        assert_eq!(tool.name(), "calculate");
        assert!(tool.description().contains("calculate:"));
    }
}
