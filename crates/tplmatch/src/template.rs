//! The view of a template that the matcher needs.

/// Anything that carries a template match pattern.
///
/// A pattern is a `;`-separated list of sub-patterns; any one of them
/// matching makes the template a hit. `None` or an empty pattern never
/// matches. Callers implement this for their own records so the matcher
/// can hand those records back unchanged.
pub trait Template {
    fn match_pattern(&self) -> Option<&str>;
}

impl Template for str {
    fn match_pattern(&self) -> Option<&str> {
        Some(self)
    }
}

impl Template for String {
    fn match_pattern(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Template for Option<String> {
    fn match_pattern(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl<T: Template + ?Sized> Template for &T {
    fn match_pattern(&self) -> Option<&str> {
        (**self).match_pattern()
    }
}

/// Splits a template pattern into its trimmed, non-empty sub-patterns.
pub fn sub_patterns(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split(';').map(str::trim).filter(|p| !p.is_empty())
}
