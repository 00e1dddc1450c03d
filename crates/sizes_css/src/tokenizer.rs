//! Splits a sizes attribute into comma separated groups of component values.
//!
//! This is a simplified take on the css-syntax tokenizer: there are no typed tokens, only
//! textual runs. Whitespace and comments separate values at the top level, while inside
//! parentheses whitespace is collapsed into a single space and kept, so `calc(1px + 2px)`
//! survives as one value.
use crate::parser_config::{CommaSplitting, SizesConfig};
use std::iter::Peekable;
use std::str::Chars;

/// A single comma separated group of component values
pub type ComponentGroup = Vec<String>;

/// Tokenizes the input with the default configuration
#[must_use]
pub fn tokenize(input: &str) -> Vec<ComponentGroup> {
    tokenize_with(input, &SizesConfig::default())
}

/// Tokenizes the input according to the given configuration
#[must_use]
pub fn tokenize_with(input: &str, config: &SizesConfig) -> Vec<ComponentGroup> {
    log::trace!("tokenize: {input:?}");

    Tokenizer::new(input, config.comma_splitting).run()
}

/// Returns true when the char is css whitespace (space, tab, newline, form feed, carriage return)
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

struct Tokenizer<'input> {
    /// Remaining characters of the input
    chars: Peekable<Chars<'input>>,
    comma_splitting: CommaSplitting,
    /// Current nesting of parentheses. Unbalanced input may drive it below zero.
    paren_depth: isize,
    /// Component value being built
    token: String,
    /// A collapsed whitespace run inside parentheses that is written once the token continues
    pending_space: bool,
    /// Group being built
    group: ComponentGroup,
    /// Finished, non-empty groups
    groups: Vec<ComponentGroup>,
}

impl<'input> Tokenizer<'input> {
    fn new(input: &'input str, comma_splitting: CommaSplitting) -> Self {
        Self {
            chars: input.chars().peekable(),
            comma_splitting,
            paren_depth: 0,
            token: String::new(),
            pending_space: false,
            group: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<ComponentGroup> {
        while let Some(c) = self.chars.next() {
            match c {
                c if is_whitespace(c) => self.consume_whitespace(),
                '/' if self.chars.peek() == Some(&'*') => {
                    self.chars.next();
                    self.consume_comment();
                }
                ',' if self.splits_on_comma() => self.flush_group(),
                '(' => {
                    self.paren_depth += 1;
                    self.push_char(c);
                }
                ')' => {
                    self.paren_depth -= 1;
                    self.push_char(c);
                }
                _ => self.push_char(c),
            }
        }

        self.flush_group();
        self.groups
    }

    fn splits_on_comma(&self) -> bool {
        match self.comma_splitting {
            CommaSplitting::Everywhere => true,
            CommaSplitting::TopLevelOnly => self.paren_depth <= 0,
        }
    }

    /// Consumes a run of whitespace. The first whitespace char has already been consumed.
    fn consume_whitespace(&mut self) {
        while self.chars.next_if(|c| is_whitespace(*c)).is_some() {}

        if self.paren_depth > 0 {
            // Leading whitespace never makes it into a token
            if !self.token.is_empty() {
                self.pending_space = true;
            }
        } else {
            self.flush_token();
        }
    }

    /// Consumes everything up to and including `*/`. The opening `/*` has already been
    /// consumed. An unterminated comment runs to the end of the input.
    fn consume_comment(&mut self) {
        self.flush_token();

        while let Some(c) = self.chars.next() {
            if c == '*' && self.chars.next_if_eq(&'/').is_some() {
                break;
            }
        }
    }

    fn push_char(&mut self, c: char) {
        if self.pending_space {
            self.token.push(' ');
            self.pending_space = false;
        }
        self.token.push(c);
    }

    fn flush_token(&mut self) {
        self.pending_space = false;
        if self.token.is_empty() {
            return;
        }

        self.group.push(std::mem::take(&mut self.token));
    }

    fn flush_group(&mut self) {
        self.flush_token();
        if self.group.is_empty() {
            return;
        }

        self.groups.push(std::mem::take(&mut self.group));
    }
}
