use crate::run::{LineMatches, SubPatternReport};
use crate::templates::{TemplateId, TemplateRecord};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tplmatch::{highlight, Span, TemplateMatch};

const SPAN_COLORS: [Color; 4] = [Color::Green, Color::Cyan, Color::Yellow, Color::Magenta];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchJson<'a> {
    id: &'a TemplateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    index: usize,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    char_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    char_length: Option<usize>,
    matched_text: &'a str,
}

impl<'a> MatchJson<'a> {
    fn new(m: &'a TemplateMatch<'_, TemplateRecord>, text: &str) -> Self {
        let chars = m.char_span(text);
        Self {
            id: &m.template.id,
            name: m.template.name.as_deref(),
            index: m.start,
            length: m.len,
            char_index: chars.map(|(index, _)| index),
            char_length: chars.map(|(_, length)| length),
            matched_text: &m.text,
        }
    }
}

#[derive(Serialize)]
struct LineJson<'a> {
    line: usize,
    matches: Vec<MatchJson<'a>>,
}

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_fg(Some(color)))
    }

    fn set_bold(&mut self) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_bold(true))
    }

    fn set_dim(&mut self) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_dimmed(true))
    }

    fn reset(&mut self) -> io::Result<()> {
        self.stdout.reset()
    }

    pub fn print_matches(
        &mut self,
        text: &str,
        matches: &[TemplateMatch<'_, TemplateRecord>],
        details: bool,
        highlighted: bool,
    ) -> io::Result<()> {
        if highlighted {
            self.print_highlighted(text, matches)?;
        }

        for m in matches {
            if details {
                self.set_dim()?;
                write!(self.stdout, "{:>5} {:>4}  ", m.start, m.len)?;
                self.reset()?;
                self.set_bold()?;
                write!(self.stdout, "{}", m.template.label())?;
                self.reset()?;
                writeln!(self.stdout, "  {:?}", m.text)?;
            } else {
                writeln!(self.stdout, "{}", m.template.label())?;
            }
        }

        self.stdout.flush()
    }

    pub fn print_line_matches(
        &mut self,
        results: &[LineMatches<'_>],
        details: bool,
        highlighted: bool,
    ) -> io::Result<()> {
        for result in results {
            self.set_bold()?;
            writeln!(self.stdout, "line {}:", result.line)?;
            self.reset()?;
            self.print_matches(&result.text, &result.matches, details, highlighted)?;
        }
        Ok(())
    }

    fn print_highlighted(
        &mut self,
        text: &str,
        matches: &[TemplateMatch<'_, TemplateRecord>],
    ) -> io::Result<()> {
        for span in highlight(text, matches) {
            match span {
                Span::Plain(plain) => write!(self.stdout, "{}", plain)?,
                Span::Matched { text, index } => {
                    self.set_color(SPAN_COLORS[index % SPAN_COLORS.len()])?;
                    write!(self.stdout, "[{}]", text)?;
                    self.reset()?;
                }
            }
        }
        if !text.ends_with('\n') {
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    pub fn print_json(
        &mut self,
        text: &str,
        matches: &[TemplateMatch<'_, TemplateRecord>],
    ) -> io::Result<()> {
        let json: Vec<_> = matches.iter().map(|m| MatchJson::new(m, text)).collect();
        serde_json::to_writer_pretty(&mut self.stdout, &json)?;
        writeln!(self.stdout)
    }

    pub fn print_line_json(&mut self, results: &[LineMatches<'_>]) -> io::Result<()> {
        let json: Vec<_> = results
            .iter()
            .map(|result| LineJson {
                line: result.line,
                matches: result
                    .matches
                    .iter()
                    .map(|m| MatchJson::new(m, &result.text))
                    .collect(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut self.stdout, &json)?;
        writeln!(self.stdout)
    }

    pub fn print_explanation(&mut self, reports: &[SubPatternReport]) -> io::Result<()> {
        if reports.is_empty() {
            self.set_dim()?;
            writeln!(self.stdout, "(empty pattern, never matches)")?;
            return self.reset();
        }

        for report in reports {
            self.set_bold()?;
            writeln!(self.stdout, "{}", report.pattern)?;
            self.reset()?;

            match &report.smart {
                Ok(smart) => {
                    writeln!(self.stdout, "  smart: {}", smart.regex)?;
                    if smart.anchored {
                        writeln!(self.stdout, "  anchored to start of text")?;
                    }
                    for range in &smart.ranges {
                        writeln!(
                            self.stdout,
                            "  group {}: {}..={}",
                            range.group, range.min, range.max
                        )?;
                    }
                }
                Err(e) => {
                    self.set_color(Color::Red)?;
                    writeln!(self.stdout, "  smart: never matches ({})", e)?;
                    self.reset()?;
                }
            }

            match &report.raw {
                Ok(()) => writeln!(self.stdout, "  raw: valid regex")?,
                Err(e) => {
                    self.set_dim()?;
                    writeln!(self.stdout, "  raw: not a valid regex ({})", e)?;
                    self.reset()?;
                }
            }
        }

        self.stdout.flush()
    }
}
