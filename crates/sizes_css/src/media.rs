//! Media condition evaluation.
//!
//! The selector never looks inside a media condition itself; it hands the text to a
//! [`MediaEvaluator`] supplied by the host. [`Viewport`] is a small evaluator for hosts that
//! only know their viewport dimensions, which covers what sizes attributes use in practice.
//!
//! Every evaluator must answer `false` for conditions it cannot parse or does not understand.
use crate::length::NUMBER_PATTERN;
use lazy_static::lazy_static;
use regex::Regex;

/// Deepest nesting of parentheses the viewport evaluator descends into
pub const MAX_NESTING: usize = 32;

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(&format!("^{NUMBER_PATTERN}"))
        .unwrap_or_else(|e| unreachable!("number pattern is valid: {e}"));
}

/// Evaluates a media condition against the host environment
pub trait MediaEvaluator {
    /// Returns true when the condition matches. Unknown or malformed conditions return false.
    fn evaluate(&self, condition: &str) -> bool;
}

impl<F> MediaEvaluator for F
where
    F: Fn(&str) -> bool,
{
    fn evaluate(&self, condition: &str) -> bool {
        self(condition)
    }
}

/// Evaluator for which no condition ever matches
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverMatch;

impl MediaEvaluator for NeverMatch {
    fn evaluate(&self, _condition: &str) -> bool {
        false
    }
}

/// Evaluator for which every condition matches
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysMatch;

impl MediaEvaluator for AlwaysMatch {
    fn evaluate(&self, _condition: &str) -> bool {
        true
    }
}

/// Viewport state used to evaluate size related media features
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in css pixels
    pub width: f64,
    /// Height in css pixels
    pub height: f64,
    /// Initial font size in css pixels, used for `em` and `rem`
    pub font_size: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            font_size: 16.0,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Converts a length to css pixels. Returns `None` for unknown units.
    fn length_to_px(&self, value: f64, unit: &str) -> Option<f64> {
        let px = match unit {
            "px" => value,
            "em" | "rem" => value * self.font_size,
            // ch and ex are approximated as half an em
            "ch" | "ex" => value * self.font_size / 2.0,
            "vw" => value * self.width / 100.0,
            "vh" => value * self.height / 100.0,
            "vmin" => value * self.width.min(self.height) / 100.0,
            "vmax" => value * self.width.max(self.height) / 100.0,
            "in" => value * 96.0,
            "cm" => value * 96.0 / 2.54,
            "mm" => value * 96.0 / 25.4,
            "pt" => value * 96.0 / 72.0,
            "pc" => value * 16.0,
            _ => return None,
        };
        Some(px)
    }

    fn resolve(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Length(value, unit) => self.length_to_px(*value, unit),
            Value::Number(n) if *n == 0.0 => Some(0.0),
            _ => None,
        }
    }

    fn dimension(&self, name: &str) -> Option<f64> {
        match name {
            "width" => Some(self.width),
            "height" => Some(self.height),
            _ => None,
        }
    }
}

impl MediaEvaluator for Viewport {
    fn evaluate(&self, condition: &str) -> bool {
        let Some(tokens) = lex(condition) else {
            log::debug!("unable to tokenize media condition {condition:?}");
            return false;
        };

        let mut parser = ConditionParser {
            tokens: &tokens,
            pos: 0,
            depth: 0,
            viewport: self,
        };

        match parser.parse_query() {
            Some(result) if parser.eof() => result,
            _ => {
                log::debug!("unable to evaluate media condition {condition:?}");
                false
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Value {
    Number(f64),
    Length(f64, String),
    Ident(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    fn matches(self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
            Comparison::Eq => left == right,
        }
    }

    /// True for `<` and `<=`, false for `>` and `>=`, `None` for `=`
    fn is_less(self) -> Option<bool> {
        match self {
            Comparison::Lt | Comparison::Le => Some(true),
            Comparison::Gt | Comparison::Ge => Some(false),
            Comparison::Eq => None,
        }
    }

    /// The same comparison with the operands swapped
    fn flip(self) -> Self {
        match self {
            Comparison::Lt => Comparison::Gt,
            Comparison::Le => Comparison::Ge,
            Comparison::Gt => Comparison::Lt,
            Comparison::Ge => Comparison::Le,
            Comparison::Eq => Comparison::Eq,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    LParen,
    RParen,
    Colon,
    Comparison(Comparison),
    Value(Value),
}

/// Splits a media condition into tokens. Returns `None` on characters that have no place
/// in a size related media condition.
fn lex(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if matches!(c, '0'..='9' | '.' | '+' | '-') {
            if let Some(number) = NUMBER_RE.find(rest) {
                let value: f64 = number.as_str().parse().ok()?;
                rest = &rest[number.end()..];

                let unit_len = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                let unit = rest[..unit_len].to_ascii_lowercase();
                rest = &rest[unit_len..];

                tokens.push(Token::Value(if unit.is_empty() {
                    Value::Number(value)
                } else {
                    Value::Length(value, unit)
                }));
                continue;
            }
        }

        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ':' => tokens.push(Token::Colon),
            '<' | '>' => {
                let or_equal = rest[1..].starts_with('=');
                if or_equal {
                    rest = &rest[1..];
                }
                tokens.push(Token::Comparison(match (c, or_equal) {
                    ('<', false) => Comparison::Lt,
                    ('<', true) => Comparison::Le,
                    ('>', false) => Comparison::Gt,
                    _ => Comparison::Ge,
                }));
            }
            '=' => tokens.push(Token::Comparison(Comparison::Eq)),
            c if c.is_ascii_alphabetic() || matches!(c, '-' | '_') => {
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
                    .unwrap_or(rest.len());
                tokens.push(Token::Value(Value::Ident(rest[..len].to_ascii_lowercase())));
                rest = &rest[len..];
                continue;
            }
            _ => return None,
        }

        rest = &rest[c.len_utf8()..];
    }

    Some(tokens)
}

/// Recursive descent over a tokenized media condition. Every parse function returns `None`
/// when the input is malformed or uses something the viewport cannot answer.
struct ConditionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Parentheses currently open
    depth: usize,
    viewport: &'a Viewport,
}

impl ConditionParser<'_> {
    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self, expected: &Token) -> Option<()> {
        if self.current() == Some(expected) {
            self.pos += 1;
            return Some(());
        }
        None
    }

    fn consume_value(&mut self) -> Option<Value> {
        match self.current() {
            Some(Token::Value(value)) => {
                let value = value.clone();
                self.pos += 1;
                Some(value)
            }
            _ => None,
        }
    }

    fn consume_comparison(&mut self) -> Option<Comparison> {
        match self.current() {
            Some(Token::Comparison(cmp)) => {
                let cmp = *cmp;
                self.pos += 1;
                Some(cmp)
            }
            _ => None,
        }
    }

    fn is_ident(&self, ident: &str) -> bool {
        matches!(self.current(), Some(Token::Value(Value::Ident(s))) if s == ident)
    }

    /// `[only]? <media-type> [and <condition>]?` or a bare condition
    fn parse_query(&mut self) -> Option<bool> {
        if self.is_ident("only") {
            self.pos += 1;
        }

        let media_type = match self.current() {
            Some(Token::Value(Value::Ident(ident))) if ident != "not" => ident.clone(),
            _ => return self.parse_condition(),
        };
        self.pos += 1;

        let type_matches = match media_type.as_str() {
            "all" | "screen" => true,
            "print" | "speech" => false,
            _ => return None,
        };

        if self.eof() {
            return Some(type_matches);
        }

        if !self.is_ident("and") {
            return None;
        }
        self.pos += 1;

        let condition = self.parse_condition()?;
        Some(type_matches && condition)
    }

    /// `not <in-parens>` or `<in-parens>` chained with only `and` or only `or`
    fn parse_condition(&mut self) -> Option<bool> {
        if self.is_ident("not") {
            self.pos += 1;
            return self.parse_in_parens().map(|result| !result);
        }

        let mut result = self.parse_in_parens()?;

        let combinator = if self.is_ident("and") {
            "and"
        } else if self.is_ident("or") {
            "or"
        } else {
            return Some(result);
        };

        while self.is_ident(combinator) {
            self.pos += 1;
            let next = self.parse_in_parens()?;
            result = if combinator == "and" {
                result && next
            } else {
                result || next
            };
        }

        // Mixing `and` and `or` without parentheses is not allowed
        if self.is_ident("and") || self.is_ident("or") {
            return None;
        }

        Some(result)
    }

    /// `( <condition> )` or `( <feature> )`. Gives up past [`MAX_NESTING`] levels.
    fn parse_in_parens(&mut self) -> Option<bool> {
        if self.depth >= MAX_NESTING {
            return None;
        }

        self.depth += 1;
        let result = self.parse_in_parens_body();
        self.depth -= 1;
        result
    }

    fn parse_in_parens_body(&mut self) -> Option<bool> {
        self.consume(&Token::LParen)?;

        let result = match self.current() {
            Some(Token::LParen) => self.parse_condition()?,
            Some(Token::Value(Value::Ident(ident))) if ident == "not" => self.parse_condition()?,
            _ => self.parse_feature()?,
        };

        self.consume(&Token::RParen)?;
        Some(result)
    }

    /// `<name>`, `<name>: <value>` or one of the range forms
    fn parse_feature(&mut self) -> Option<bool> {
        let first = self.consume_value()?;
        let next = self.current().cloned();

        match (first, next) {
            (Value::Ident(name), Some(Token::Colon)) => {
                self.pos += 1;
                let value = self.consume_value()?;
                self.evaluate_plain(&name, &value)
            }
            (Value::Ident(name), Some(Token::RParen)) => self.evaluate_boolean(&name),
            (Value::Ident(name), Some(Token::Comparison(_))) => {
                // <name> <op> <value>
                let cmp = self.consume_comparison()?;
                let value = self.consume_value()?;
                let actual = self.viewport.dimension(&name)?;
                Some(cmp.matches(actual, self.viewport.resolve(&value)?))
            }
            (value, Some(Token::Comparison(_))) => {
                // <value> <op> <name> [<op> <value>]
                let cmp = self.consume_comparison()?;
                let name = match self.consume_value()? {
                    Value::Ident(name) => name,
                    _ => return None,
                };
                let actual = self.viewport.dimension(&name)?;
                let mut result = cmp.flip().matches(actual, self.viewport.resolve(&value)?);

                if let Some(second) = self.consume_comparison() {
                    // Both operators must point the same way, and `=` cannot be chained
                    if cmp.is_less().is_none() || cmp.is_less() != second.is_less() {
                        return None;
                    }
                    let cmp = second;
                    let value = self.consume_value()?;
                    result = result && cmp.matches(actual, self.viewport.resolve(&value)?);
                }
                Some(result)
            }
            _ => None,
        }
    }

    fn evaluate_plain(&self, name: &str, value: &Value) -> Option<bool> {
        if name == "orientation" {
            let portrait = self.viewport.height >= self.viewport.width;
            return match value {
                Value::Ident(v) if v == "portrait" => Some(portrait),
                Value::Ident(v) if v == "landscape" => Some(!portrait),
                _ => None,
            };
        }

        let (cmp, feature) = if let Some(feature) = name.strip_prefix("min-") {
            (Comparison::Ge, feature)
        } else if let Some(feature) = name.strip_prefix("max-") {
            (Comparison::Le, feature)
        } else {
            (Comparison::Eq, name)
        };

        let actual = self.viewport.dimension(feature)?;
        Some(cmp.matches(actual, self.viewport.resolve(value)?))
    }

    /// A feature without a value matches when it would not be zero
    fn evaluate_boolean(&self, name: &str) -> Option<bool> {
        match name {
            "orientation" => Some(true),
            _ => self.viewport.dimension(name).map(|value| value != 0.0),
        }
    }
}
