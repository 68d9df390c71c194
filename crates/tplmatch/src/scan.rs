//! Running every template's sub-patterns over a text.

use crate::compile::{CompiledRule, Compiler};
use crate::template::{sub_patterns, Template};
use std::collections::HashSet;

/// One occurrence of a template in the text.
///
/// `start` and `len` are byte offsets into the scanned text.
#[derive(Debug, PartialEq, Eq)]
pub struct CandidateMatch<'t, T> {
    pub template: &'t T,
    pub start: usize,
    pub len: usize,
    pub text: String,
}

impl<'t, T> CandidateMatch<'t, T> {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Start and length counted in chars rather than bytes, for consumers
    /// that index text by character. `None` if `haystack` is not the text
    /// this match came from.
    pub fn char_span(&self, haystack: &str) -> Option<(usize, usize)> {
        let before = haystack.get(..self.start)?;
        let covered = haystack.get(self.start..self.end())?;
        Some((before.chars().count(), covered.chars().count()))
    }
}

impl<T> Clone for CandidateMatch<'_, T> {
    fn clone(&self) -> Self {
        Self {
            template: self.template,
            start: self.start,
            len: self.len,
            text: self.text.clone(),
        }
    }
}

/// Collects candidate matches for all templates, in template order.
///
/// Each sub-pattern is tried in its smart form and then verbatim as a
/// regex. A template contributes at most one candidate per start index.
/// Sub-patterns that fail to compile in one form are logged and skipped
/// for that form only.
pub fn scan<'t, T: Template>(
    compiler: &Compiler,
    templates: &'t [T],
    text: &str,
) -> Vec<CandidateMatch<'t, T>> {
    let mut candidates = Vec::new();

    for (index, template) in templates.iter().enumerate() {
        let Some(pattern) = template.match_pattern() else {
            continue;
        };

        let mut seen = HashSet::new();

        for sub in sub_patterns(pattern) {
            match compiler.smart(sub) {
                Ok(rule) => collect(&rule, template, text, &mut seen, &mut candidates),
                Err(error) => {
                    tracing::warn!(template = index, pattern = sub, %error, "skipping smart pattern");
                }
            }

            match compiler.raw(sub) {
                Ok(rule) => collect(&rule, template, text, &mut seen, &mut candidates),
                Err(error) => {
                    tracing::debug!(template = index, pattern = sub, %error, "skipping raw pattern");
                }
            }
        }
    }

    candidates
}

fn collect<'t, T>(
    rule: &CompiledRule,
    template: &'t T,
    text: &str,
    seen: &mut HashSet<usize>,
    candidates: &mut Vec<CandidateMatch<'t, T>>,
) {
    for m in rule.find_all(text) {
        if m.is_empty() || !seen.insert(m.start()) {
            continue;
        }

        candidates.push(CandidateMatch {
            template,
            start: m.start(),
            len: m.len(),
            text: m.as_str().to_string(),
        });
    }
}
