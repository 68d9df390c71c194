use clap::Parser;
use tplmatch::Matcher;
use tplmatch_cli::cli::{Cli, Command, MatchArgs};
use tplmatch_cli::output::Output;
use tplmatch_cli::run::{explain, match_lines, read_text};
use tplmatch_cli::templates::load_templates;
use tracing_subscriber::EnvFilter;

fn main() {
    // Reset SIGPIPE handler to default (terminate) so piping to head/tail works correctly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(found) => std::process::exit(if found { 0 } else { 1 }),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether anything matched.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let use_color = !cli.no_color && atty::is(atty::Stream::Stdout);
    let mut output = Output::new(use_color);

    let mut matcher = Matcher::new();
    if let Some(limit) = cli.size_limit {
        matcher = matcher.size_limit(limit);
    }

    match cli.command {
        Command::Match(args) => run_match(&args, &matcher, &mut output),
        Command::Explain { pattern } => {
            output.print_explanation(&explain(&matcher, &pattern))?;
            Ok(true)
        }
    }
}

fn run_match(args: &MatchArgs, matcher: &Matcher, output: &mut Output) -> anyhow::Result<bool> {
    let templates = load_templates(&args.templates)?;
    let text = read_text(&args.text)?;
    tracing::debug!(
        templates = templates.len(),
        bytes = text.len(),
        "matching text"
    );

    if args.lines {
        let results = match_lines(matcher, &templates, &text);
        if args.json {
            output.print_line_json(&results)?;
        } else {
            output.print_line_matches(&results, args.details, args.highlight)?;
        }
        return Ok(!results.is_empty());
    }

    let matches = matcher.match_templates_with_details(&templates, &text);
    if args.json {
        output.print_json(&text, &matches)?;
    } else {
        output.print_matches(&text, &matches, args.details, args.highlight)?;
    }
    Ok(!matches.is_empty())
}
