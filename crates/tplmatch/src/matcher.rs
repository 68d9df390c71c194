//! Template matching entry points.

use crate::compile::Compiler;
use crate::resolve::resolve;
use crate::scan::{scan, CandidateMatch};
use crate::template::Template;

/// A resolved match: one template occurrence that survived overlap resolution.
pub type TemplateMatch<'t, T> = CandidateMatch<'t, T>;

/// Finds templates in free text.
///
/// Nothing is cached between calls: every call compiles the patterns it
/// needs and discards them afterwards, so a `Matcher` can be shared freely.
///
/// # Example
///
/// ```
/// use tplmatch::Matcher;
///
/// let templates = ["Run #{5-10} km", "Run"];
/// let matcher = Matcher::new().size_limit(1 << 20);
///
/// let found = matcher.match_templates_with_details(&templates, "Run 7 km");
/// assert_eq!(found.len(), 1);
/// assert_eq!(*found[0].template, "Run #{5-10} km");
/// assert_eq!((found[0].start, found[0].len), (0, 8));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    compiler: Compiler,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the compiled size of each pattern's regex, in bytes. Patterns
    /// over the limit are treated as not compiling.
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.compiler = self.compiler.size_limit(bytes);
        self
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// All candidate matches before overlap resolution.
    pub fn scan<'t, T: Template>(&self, templates: &'t [T], text: &str) -> Vec<CandidateMatch<'t, T>> {
        scan(&self.compiler, templates, text)
    }

    /// Non-overlapping matches ordered by position in `text`.
    pub fn match_templates_with_details<'t, T: Template>(
        &self,
        templates: &'t [T],
        text: &str,
    ) -> Vec<TemplateMatch<'t, T>> {
        resolve(self.scan(templates, text))
    }

    /// The template behind each accepted match, in position order. A template
    /// that wins several disjoint spans appears once per span.
    pub fn match_templates<'t, T: Template>(&self, templates: &'t [T], text: &str) -> Vec<&'t T> {
        self.match_templates_with_details(templates, text)
            .into_iter()
            .map(|m| m.template)
            .collect()
    }
}

pub fn match_templates_with_details<'t, T: Template>(
    templates: &'t [T],
    text: &str,
) -> Vec<TemplateMatch<'t, T>> {
    Matcher::default().match_templates_with_details(templates, text)
}

pub fn match_templates<'t, T: Template>(templates: &'t [T], text: &str) -> Vec<&'t T> {
    Matcher::default().match_templates(templates, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Record {
        id: u32,
        pattern: Option<String>,
    }

    impl Template for Record {
        fn match_pattern(&self) -> Option<&str> {
            self.pattern.as_deref()
        }
    }

    fn record(id: u32, pattern: &str) -> Record {
        Record {
            id,
            pattern: Some(pattern.to_string()),
        }
    }

    fn ids(found: &[&Record]) -> Vec<u32> {
        found.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(match_templates(&["RUN"], "morning run").len(), 1);
        assert_eq!(match_templates(&["run"], "MORNING RUN").len(), 1);
    }

    #[test]
    fn test_range_token() {
        let templates = ["#{5-10} km"];
        assert_eq!(match_templates(&templates, "Run 7 km").len(), 1);
        assert!(match_templates(&templates, "Run 4 km").is_empty());
        assert!(match_templates(&templates, "Run 12 km").is_empty());
    }

    #[test]
    fn test_start_anchor() {
        let templates = ["^Morning"];
        assert_eq!(match_templates(&templates, "Morning run").len(), 1);
        assert!(match_templates(&templates, "Good Morning").is_empty());
    }

    #[test]
    fn test_bare_digit_wildcard() {
        let templates = ["Run # km"];
        assert_eq!(match_templates(&templates, "Run 10 km").len(), 1);
        assert!(match_templates(&templates, "Run fast km").is_empty());
    }

    #[test]
    fn test_longest_match_tie_break() {
        let templates = [record(1, "Run"), record(2, "Run fast")];
        let found = match_templates(&templates, "Run fast match");
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn test_earliest_first_no_overlap() {
        let templates = [record(1, "World"), record(2, "Hello")];
        let found = match_templates(&templates, "Hello World");
        assert_eq!(ids(&found), vec![2, 1]);

        let templates = [record(1, "fast"), record(2, "Run fast")];
        let found = match_templates(&templates, "Run fast");
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn test_multi_pattern_template() {
        let templates = [record(1, "foo bar;hello # km")];
        let found = match_templates_with_details(&templates, "hello 5 km");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "hello 5 km");
    }

    #[test]
    fn test_broken_template_does_not_block_others() {
        let templates = [record(1, "("), record(2, "Tempo run")];
        let found = match_templates(&templates, "Tempo run 8 km");
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn test_idempotent() {
        let templates = [
            record(1, "Run #"),
            record(2, "* km"),
            record(3, "^Warm up;Stretch"),
        ];
        let text = "Warm up + Run 5 km + Stretch 10 min";
        let first = match_templates_with_details(&templates, text);
        let second = match_templates_with_details(&templates, text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dedup_across_modes() {
        let templates = [record(1, "Run fast")];
        let found = match_templates_with_details(&templates, "Run fast");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].start, found[0].len), (0, 8));
    }

    #[test]
    fn test_wildcard_stays_within_sub_phrase() {
        let templates = [record(1, "Squats * reps")];
        assert!(match_templates(&templates, "Squats 3x10 + Lunges 20 reps").is_empty());
        assert!(match_templates(&templates, "Squats 3x10\nLunges 20 reps").is_empty());
        assert_eq!(ids(&match_templates(&templates, "Squats 3x10 reps")), vec![1]);
    }

    #[test]
    fn test_raw_regex_pattern() {
        let templates = [record(1, r"intervals? \d+x\d+")];
        let found = match_templates_with_details(&templates, "Track: Intervals 6x400");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Intervals 6x400");
    }

    #[test]
    fn test_same_template_wins_disjoint_spans() {
        let templates = [record(1, "# km")];
        let found = match_templates(&templates, "5 km run + 3 km walk");
        assert_eq!(ids(&found), vec![1, 1]);
    }

    #[test]
    fn test_template_without_pattern_never_matches() {
        let templates = [
            Record { id: 1, pattern: None },
            record(2, ""),
            record(3, "run"),
        ];
        assert_eq!(ids(&match_templates(&templates, "run")), vec![3]);
    }

    #[test]
    fn test_size_limit_skips_large_patterns() {
        let templates = [record(1, "long run # km")];
        let matcher = Matcher::new().size_limit(16);
        assert!(matcher.match_templates(&templates, "long run 12 km").is_empty());
        assert_eq!(Matcher::new().match_templates(&templates, "long run 12 km").len(), 1);
    }
}
