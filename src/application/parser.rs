//! Input adapter: `symbol:freq` tokens to a symbol/frequency alphabet.
//!
//! Input looks like `a:5;b:9;c:12`. Tokens are separated by the delimiter
//! (default `;`); inside a token the first character is the symbol, followed by
//! the separator (default `:`) and a decimal frequency.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::DomainError;

/// Parallel symbol and frequency sequences, index `i` of one pairs with index `i` of the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    pub symbols: Vec<char>,
    pub frequencies: Vec<u64>,
}

impl Alphabet {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.symbols.iter().copied().zip(self.frequencies.iter().copied())
    }

    /// Sum of all frequencies, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.frequencies
            .iter()
            .try_fold(0u64, |acc, &f| acc.checked_add(f))
    }
}

fn frequency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([+-]?)([0-9]+)$").expect("frequency pattern compiles"))
}

/// Parses frequency lists.
#[derive(Debug, Clone, Copy)]
pub struct InputParser {
    delimiter: char,
    separator: char,
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new(';', ':')
    }
}

impl InputParser {
    pub fn new(delimiter: char, separator: char) -> Self {
        Self {
            delimiter,
            separator,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.delimiter, settings.separator)
    }

    /// Parse `input` into an alphabet.
    ///
    /// Blank tokens (e.g. from a trailing delimiter) are skipped. Surrounding
    /// whitespace is trimmed from every token, so whitespace cannot be a symbol.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, input: &str) -> ApplicationResult<Alphabet> {
        let tokens: Vec<&str> = input
            .split(self.delimiter)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let mut alphabet = Alphabet {
            symbols: Vec::with_capacity(tokens.len()),
            frequencies: Vec::with_capacity(tokens.len()),
        };
        for (i, token) in tokens.iter().enumerate() {
            let (symbol, frequency) = self.parse_token(i + 1, token)?;
            alphabet.symbols.push(symbol);
            alphabet.frequencies.push(frequency);
        }
        debug!(pairs = alphabet.len(), "parsed frequency list");
        Ok(alphabet)
    }

    fn parse_token(&self, position: usize, token: &str) -> ApplicationResult<(char, u64)> {
        let malformed = |reason: String| ApplicationError::Parse {
            position,
            token: token.to_string(),
            reason,
        };

        let mut chars = token.chars();
        let symbol = chars
            .next()
            .ok_or_else(|| malformed("empty token".to_string()))?;
        let value = chars
            .as_str()
            .strip_prefix(self.separator)
            .ok_or_else(|| malformed(format!("expected '{}' after symbol", self.separator)))?
            .trim();
        if value.is_empty() {
            return Err(malformed("missing frequency".to_string()));
        }

        let caps = frequency_pattern()
            .captures(value)
            .ok_or_else(|| malformed(format!("frequency {:?} is not an integer", value)))?;
        let magnitude: u64 = caps[2]
            .parse()
            .map_err(|_| malformed(format!("frequency {} is out of range", value)))?;

        if &caps[1] == "-" && magnitude != 0 {
            return Err(ApplicationError::Domain(DomainError::invalid_input(format!(
                "negative frequency {} for {:?}",
                value, symbol
            ))));
        }
        Ok((symbol, magnitude))
    }
}
