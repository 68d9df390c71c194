//! Detect which workout templates apply to a piece of free text.
//!
//! A template's pattern is plain text with a little sugar: `#` for a number,
//! `#{min-max}` for a number within bounds, `*` for a short stretch of text
//! and a leading `^` to pin the pattern to the start. Several alternatives
//! can be separated with `;`. Matching is case-insensitive and tolerant of
//! spacing differences.
//!
//! # Example
//!
//! ```
//! use tplmatch::match_templates;
//!
//! let templates = ["Run #{5-10} km", "Stretch*", "Swim # laps"];
//!
//! let found = match_templates(&templates, "Morning: run 7 km + stretching");
//! assert_eq!(found, vec![&"Run #{5-10} km", &"Stretch*"]);
//!
//! // 12 is outside 5..=10
//! assert!(match_templates(&templates, "Run 12 km").is_empty());
//! ```
//!
//! Overlapping hits are resolved left to right: the earliest match wins,
//! and at the same position the longer one does.

mod compile;
mod matcher;
mod resolve;
mod scan;
mod template;

pub use compile::{
    compile_raw, compile_smart, transpile, CompileError, CompiledRule, Compiler, RangeValidator,
    Segment, SmartPattern,
};
pub use matcher::{match_templates, match_templates_with_details, Matcher, TemplateMatch};
pub use resolve::{highlight, resolve, Span};
pub use scan::{scan, CandidateMatch};
pub use template::{sub_patterns, Template};
