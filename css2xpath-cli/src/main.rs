//! css2xpath CLI
//!
//! Translates CSS selectors into XPath 1.0 expressions, one per line.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use css2xpath::{MalformedSelector, Rule, parse_group, translate};
use css2xpath_common::warning::{clear_warnings, set_color_enabled};
use owo_colors::OwoColorize;
use serde::Serialize;

/// css2xpath: translate CSS selectors into XPath 1.0 expressions
#[derive(Parser, Debug)]
#[command(name = "css2xpath")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Translate a selector
    css2xpath '#main > ul li.active'

    # Translate several selectors, one result per line
    css2xpath 'a[href^="https"]' 'li:nth-child(2n + 1)'

    # Translate every line of a file as JSON
    css2xpath --json -f selectors.txt

    # Show how a selector is scanned
    css2xpath --rules 'a.nav:not(.hidden)'

    # Read selectors from stdin
    echo 'div p' | css2xpath
"#)]
struct Cli {
    /// Selectors to translate (read from stdin when none are given)
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Read selectors from a file, one per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "selectors")]
    file: Option<PathBuf>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,

    /// Print the scanned rules as JSON instead of XPath
    #[arg(long)]
    rules: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// One entry of `--json` output.
#[derive(Serialize)]
struct Translation<'a> {
    selector: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    xpath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// One entry of `--rules` output.
#[derive(Serialize)]
struct Scanned<'a> {
    selector: &'a str,
    members: Vec<Vec<Rule>>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    set_color_enabled(!cli.no_color);

    let selectors = read_selectors(&cli)?;
    let ok = if cli.rules {
        print_rules(&cli, &selectors)?
    } else if cli.json {
        print_json(&selectors)?
    } else {
        print_xpaths(&cli, &selectors)
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Collect selectors from the file, the arguments, or stdin
fn read_selectors(cli: &Cli) -> Result<Vec<String>> {
    if let Some(ref path) = cli.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read selectors from {}", path.display()))?;
        Ok(non_blank(content.lines().map(str::to_owned)))
    } else if !cli.selectors.is_empty() {
        Ok(cli.selectors.clone())
    } else {
        let lines = io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read selectors from stdin")?;
        Ok(non_blank(lines))
    }
}

fn non_blank(lines: impl IntoIterator<Item = String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Print one XPath per selector; returns `false` if any selector failed
fn print_xpaths(cli: &Cli, selectors: &[String]) -> bool {
    let mut ok = true;
    for selector in selectors {
        clear_warnings();
        match translate(selector) {
            Ok(xpath) => println!("{xpath}"),
            Err(e) => {
                report(cli, selector, &e);
                ok = false;
            }
        }
    }
    ok
}

/// Print all translations as one JSON array; returns `false` if any failed
fn print_json(selectors: &[String]) -> Result<bool> {
    let results: Vec<Translation<'_>> = selectors
        .iter()
        .map(|selector| {
            clear_warnings();
            match translate(selector) {
                Ok(xpath) => Translation {
                    selector,
                    xpath: Some(xpath),
                    error: None,
                },
                Err(e) => Translation {
                    selector,
                    xpath: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(results.iter().all(|r| r.error.is_none()))
}

/// Print the scanned rule model as JSON; returns `false` if any selector failed
fn print_rules(cli: &Cli, selectors: &[String]) -> Result<bool> {
    let mut ok = true;
    let mut scanned = Vec::with_capacity(selectors.len());
    for selector in selectors {
        clear_warnings();
        match parse_group(selector) {
            Ok(members) => scanned.push(Scanned { selector, members }),
            Err(e) => {
                report(cli, selector, &e);
                ok = false;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&scanned)?);
    Ok(ok)
}

fn report(cli: &Cli, selector: &str, err: &MalformedSelector) {
    if cli.no_color {
        eprintln!("error: {selector}: {err}");
    } else {
        eprintln!("{}: {selector}: {err}", "error".red().bold());
    }
}
