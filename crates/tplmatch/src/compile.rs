//! Translation of template patterns into regular expressions.
//!
//! Template authors write plain text with a little sugar on top:
//!
//! | syntax       | matches                                              |
//! |--------------|------------------------------------------------------|
//! | `#`          | one or more digits                                   |
//! | `#{min-max}` | one or more digits whose value lies in `min..=max`   |
//! | `*`          | as little text as possible, never a `+` or line break |
//! | leading `^`  | only at the very start of the text                   |
//! | whitespace   | any run of whitespace                                |
//!
//! Everything else matches itself, case-insensitively.
//!
//! Compilation happens in two steps. [`transpile`] tokenizes the pattern
//! into a [`SmartPattern`] without touching the regex engine, and
//! [`Compiler::smart`] renders that into a [`CompiledRule`]. The same
//! sub-pattern can also be taken verbatim as a regex with
//! [`Compiler::raw`].

use regex::{Captures, Match, Regex, RegexBuilder};
use thiserror::Error;
use winnow::ascii::digit1;
use winnow::combinator::{alt, repeat};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to tokenize pattern: {message}")]
    Syntax { message: String },
    #[error("range bound in '{token}' is too large")]
    RangeBound { token: String },
    #[error("failed to build pattern regex: {0}")]
    Regex(#[from] regex::Error),
}

/// Numeric bounds checked against one capture group after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValidator {
    pub group: usize,
    pub min: u64,
    pub max: u64,
}

impl RangeValidator {
    pub fn accepts(&self, digits: &str) -> bool {
        digits
            .parse::<u64>()
            .map_or(false, |n| (self.min..=self.max).contains(&n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Whitespace,
    Digits,
    Range { min: u64, max: u64 },
    Wildcard,
}

/// A tokenized smart pattern, independent of any regex engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartPattern {
    anchored: bool,
    segments: Vec<Segment>,
}

impl SmartPattern {
    pub fn anchored(&self) -> bool {
        self.anchored
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Range validators in capture group order, starting at group 1.
    pub fn ranges(&self) -> Vec<RangeValidator> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Range { min, max } => Some((*min, *max)),
                _ => None,
            })
            .enumerate()
            .map(|(i, (min, max))| RangeValidator {
                group: i + 1,
                min,
                max,
            })
            .collect()
    }

    pub fn regex_source(&self) -> String {
        let mut source = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Whitespace => source.push_str(r"\s+"),
                Segment::Digits => source.push_str("[0-9]+"),
                Segment::Range { .. } => source.push_str("([0-9]+)"),
                Segment::Wildcard => source.push_str(r"[^+\r\n]*?"),
            }
        }

        // Start of the whole text: multi-line mode stays off.
        if self.anchored {
            source.insert(0, '^');
        }

        source
    }
}

/// An executable rule for one sub-pattern.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    validators: Vec<RangeValidator>,
    anchored: bool,
}

impl CompiledRule {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn validators(&self) -> &[RangeValidator] {
        &self.validators
    }

    pub fn anchored(&self) -> bool {
        self.anchored
    }

    fn accepts(&self, caps: &Captures) -> bool {
        self.validators.iter().all(|validator| {
            caps.get(validator.group)
                .map_or(false, |m| validator.accepts(m.as_str()))
        })
    }

    /// All occurrences in `haystack` that pass the range validators, scanning
    /// from the start every time.
    pub fn find_all<'h>(&self, haystack: &'h str) -> Vec<Match<'h>> {
        self.regex
            .captures_iter(haystack)
            .filter(|caps| self.accepts(caps))
            .filter_map(|caps| caps.get(0))
            .collect()
    }
}

/// Builds case-insensitive rules, optionally capping compiled regex size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    size_limit: Option<usize>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = Some(bytes);
        self
    }

    /// Compiles the sugared interpretation of `pattern`.
    pub fn smart(&self, pattern: &str) -> Result<CompiledRule, CompileError> {
        let smart = transpile(pattern)?;
        let regex = self.build(&smart.regex_source())?;

        Ok(CompiledRule {
            regex,
            validators: smart.ranges(),
            anchored: smart.anchored,
        })
    }

    /// Compiles `pattern` verbatim as a regular expression.
    ///
    /// Only syntax the `regex` crate accepts is supported. Look-around such
    /// as `run(?= fast)` and backreferences fail to compile, so the raw form
    /// of such a sub-pattern never matches; the smart form still runs. The
    /// `explain` command of the CLI shows the compile error for a pattern.
    pub fn raw(&self, pattern: &str) -> Result<CompiledRule, CompileError> {
        let regex = self.build(pattern)?;

        Ok(CompiledRule {
            regex,
            validators: Vec::new(),
            anchored: pattern.starts_with('^'),
        })
    }

    fn build(&self, source: &str) -> Result<Regex, regex::Error> {
        let mut builder = RegexBuilder::new(source);
        builder.case_insensitive(true);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        builder.build()
    }
}

pub fn compile_smart(pattern: &str) -> Result<CompiledRule, CompileError> {
    Compiler::default().smart(pattern)
}

pub fn compile_raw(pattern: &str) -> Result<CompiledRule, CompileError> {
    Compiler::default().raw(pattern)
}

/// Tokenizes a smart pattern.
pub fn transpile(pattern: &str) -> Result<SmartPattern, CompileError> {
    let (anchored, body) = match pattern.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };

    let parsed = tokens.parse(body).map_err(|e| CompileError::Syntax {
        message: format!("{:?}", e),
    })?;

    let segments = parsed
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => Ok(Segment::Literal(text.to_string())),
            Token::Whitespace => Ok(Segment::Whitespace),
            Token::Digits => Ok(Segment::Digits),
            Token::Wildcard => Ok(Segment::Wildcard),
            Token::Range { min, max } => {
                let bound = |digits: &str| {
                    digits.parse::<u64>().map_err(|_| CompileError::RangeBound {
                        token: format!("#{{{}-{}}}", min, max),
                    })
                };
                Ok(Segment::Range {
                    min: bound(min)?,
                    max: bound(max)?,
                })
            }
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    Ok(SmartPattern { anchored, segments })
}

// ============ Winnow Parsers ============

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Literal(&'a str),
    Whitespace,
    Digits,
    Range { min: &'a str, max: &'a str },
    Wildcard,
}

fn is_special(c: char) -> bool {
    c == '#' || c == '*' || c.is_whitespace()
}

fn range<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    ("#{", digit1, '-', digit1, '}')
        .map(|(_, min, _, max, _)| Token::Range { min, max })
        .parse_next(input)
}

fn digits<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    '#'.value(Token::Digits).parse_next(input)
}

fn wildcard<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    '*'.value(Token::Wildcard).parse_next(input)
}

fn whitespace<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace())
        .value(Token::Whitespace)
        .parse_next(input)
}

fn literal<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    take_till(1.., is_special).map(Token::Literal).parse_next(input)
}

// Ranges go first so a bare `#` never swallows the start of one.
fn token<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    alt((range, digits, wildcard, whitespace, literal)).parse_next(input)
}

fn tokens<'a>(input: &mut &'a str) -> ModalResult<Vec<Token<'a>>> {
    repeat(0.., token).parse_next(input)
}
