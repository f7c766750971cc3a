//! Format string tokenizer.
//!
//! [`tokenize`] and [`scan`] never fail: anything that is not a well-formed
//! placeholder becomes a literal or a [`Token::Stray`] percent sign. Deciding
//! whether a stray `%` is an error is left to the substitution step.

use regex::Regex;
use std::sync::OnceLock;

/// Where a placeholder takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgRef {
    /// Next argument, left to right
    Next,
    /// Explicit 1-based index (`%2$s`)
    Index(usize),
    /// Key (possibly dotted) into a single mapping argument (`%(name)s`)
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub arg: ArgRef,
    pub plus_sign: bool,
    pub left_align: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    /// `%%`
    Percent,
    Placeholder(Placeholder),
    /// A `%` that starts no known placeholder; carries its byte offset
    Stray(usize),
}

/// Shape of a leading format argument, decided before any substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatShape {
    /// No placeholders at all (a lone `%%` included): pass through untouched
    Literal,
    /// Only `%s`-style placeholders; carries how many
    Positional(usize),
    /// At least one `%N$s`; carries the number of arguments consumed, i.e. the
    /// larger of the highest index and the count of unindexed placeholders
    Indexed(usize),
    /// `%(key)s` placeholders, fed from one mapping argument
    Named,
}

impl FormatShape {
    /// Number of arguments after the format string that substitution consumes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            FormatShape::Literal => 0,
            FormatShape::Positional(n) | FormatShape::Indexed(n) => n,
            FormatShape::Named => 1,
        }
    }

    #[must_use]
    pub fn is_literal(self) -> bool {
        self == FormatShape::Literal
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^%(?:(?P<index>[1-9][0-9]*)\$|\((?P<key>[^)]+)\))?(?P<flags>[-+0]*)(?P<width>[0-9]+)?(?:\.(?P<precision>[0-9]+))?(?P<conversion>[sdifjxXob])",
        )
        .expect("placeholder regex is valid")
    })
}

/// Split a format string into literal text, escapes and placeholders.
#[must_use]
pub fn tokenize(format: &str) -> Vec<Token> {
    let re = placeholder_regex();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(offset) = format[pos..].find('%') {
        let start = pos + offset;
        literal.push_str(&format[pos..start]);

        if format[start..].starts_with("%%") {
            flush(&mut literal, &mut tokens);
            tokens.push(Token::Percent);
            pos = start + 2;
            continue;
        }

        flush(&mut literal, &mut tokens);
        match re
            .captures(&format[start..])
            .and_then(|caps| Some((caps.get(0)?.end(), placeholder_from(&caps)?)))
        {
            Some((len, placeholder)) => {
                tokens.push(Token::Placeholder(placeholder));
                pos = start + len;
            }
            None => {
                tokens.push(Token::Stray(start));
                pos = start + 1;
            }
        }
    }

    literal.push_str(&format[pos..]);
    flush(&mut literal, &mut tokens);
    tokens
}

/// Largest index, width or precision a placeholder may carry.
pub const MAX_PLACEHOLDER_NUMBER: usize = u16::MAX as usize;

fn bounded(m: Option<regex::Match<'_>>) -> Option<Option<usize>> {
    match m {
        None => Some(None),
        Some(m) => m
            .as_str()
            .parse::<usize>()
            .ok()
            .filter(|n| *n <= MAX_PLACEHOLDER_NUMBER)
            .map(Some),
    }
}

/// `None` when a number is out of range; the `%` is then treated as stray.
fn placeholder_from(caps: &regex::Captures<'_>) -> Option<Placeholder> {
    let flags = caps.name("flags").map_or("", |m| m.as_str());
    let arg = if let Some(index) = bounded(caps.name("index"))? {
        ArgRef::Index(index)
    } else if let Some(key) = caps.name("key") {
        ArgRef::Key(key.as_str().to_string())
    } else {
        ArgRef::Next
    };
    Some(Placeholder {
        arg,
        plus_sign: flags.contains('+'),
        left_align: flags.contains('-'),
        zero_pad: flags.contains('0'),
        width: bounded(caps.name("width"))?,
        precision: bounded(caps.name("precision"))?,
        conversion: caps.name("conversion")?.as_str().chars().next()?,
    })
}

fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

/// Classify a format string by the placeholders it contains.
#[must_use]
pub fn scan(format: &str) -> FormatShape {
    let mut next_count = 0;
    let mut highest_index = 0;
    let mut named = false;

    for token in tokenize(format) {
        if let Token::Placeholder(p) = token {
            match p.arg {
                ArgRef::Next => next_count += 1,
                ArgRef::Index(i) => highest_index = highest_index.max(i),
                ArgRef::Key(_) => named = true,
            }
        }
    }

    if named {
        FormatShape::Named
    } else if highest_index > 0 {
        FormatShape::Indexed(highest_index.max(next_count))
    } else if next_count > 0 {
        FormatShape::Positional(next_count)
    } else {
        FormatShape::Literal
    }
}
