use crate::error::{Error, Result};
use crate::templates::TemplateRecord;
use rayon::prelude::*;
use std::io::Read;
use tplmatch::{sub_patterns, Matcher, RangeValidator, TemplateMatch};

/// Matches found in one line of a multi-line input.
#[derive(Debug)]
pub struct LineMatches<'t> {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
    pub matches: Vec<TemplateMatch<'t, TemplateRecord>>,
}

/// Returns `arg` itself, or everything on stdin when it is "-".
pub fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(Error::ReadStdin)?;
    Ok(text)
}

/// Matches each line independently. Lines are processed in parallel; the
/// result keeps input order and only lists lines with at least one match.
pub fn match_lines<'t>(
    matcher: &Matcher,
    templates: &'t [TemplateRecord],
    text: &str,
) -> Vec<LineMatches<'t>> {
    let lines: Vec<&str> = text.lines().collect();

    lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| LineMatches {
            line: i + 1,
            text: line.to_string(),
            matches: matcher.match_templates_with_details(templates, line),
        })
        .filter(|result| !result.matches.is_empty())
        .collect()
}

/// How one sub-pattern compiles in each mode.
#[derive(Debug)]
pub struct SubPatternReport {
    pub pattern: String,
    pub smart: std::result::Result<SmartReport, String>,
    pub raw: std::result::Result<(), String>,
}

#[derive(Debug)]
pub struct SmartReport {
    pub regex: String,
    pub anchored: bool,
    pub ranges: Vec<RangeValidator>,
}

pub fn explain(matcher: &Matcher, pattern: &str) -> Vec<SubPatternReport> {
    let compiler = matcher.compiler();

    sub_patterns(pattern)
        .map(|sub| SubPatternReport {
            pattern: sub.to_string(),
            smart: compiler
                .smart(sub)
                .map(|rule| SmartReport {
                    regex: rule.regex().as_str().to_string(),
                    anchored: rule.anchored(),
                    ranges: rule.validators().to_vec(),
                })
                .map_err(|e| e.to_string()),
            raw: compiler.raw(sub).map(|_| ()).map_err(|e| e.to_string()),
        })
        .collect()
}
