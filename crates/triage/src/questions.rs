use crate::input::read_input;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use triage_core::questions::{parse_response, validate_selection, ClarifyingQuestion};

#[derive(Debug, clap::Parser)]
#[command(name = "questions")]
#[command(about = "Inspect the clarifying-question catalog")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the questions the assistant may ask, in order
    #[clap(name = "list")]
    List(ListOptions),

    /// Check an assistant reply only picks catalog questions, in order, once each
    #[clap(name = "check")]
    Check(CheckOptions),
}

#[derive(Debug, clap::Args)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct CheckOptions {
    /// Reply file holding {"missing_data": [...]} ("-" for stdin)
    #[arg(default_value = "-")]
    response: PathBuf,
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    position: usize,
    id: ClarifyingQuestion,
    text: &'static str,
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list(options),
        Commands::Check(options) => check(options, global),
    }
}

fn list(options: ListOptions) -> Result<()> {
    let entries: Vec<CatalogEntry> = ClarifyingQuestion::ALL
        .into_iter()
        .map(|q| CatalogEntry {
            position: q.position() + 1,
            id: q,
            text: q.text(),
        })
        .collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["#", "QUESTION"]);
    for entry in &entries {
        table.add_row(prettytable::row![entry.position, entry.text]);
    }
    table.printstd();

    Ok(())
}

fn check(options: CheckOptions, global: crate::Global) -> Result<()> {
    let text = read_input(&options.response)?;

    if global.verbose {
        eprintln!("Response length: {} chars", text.len());
    }

    let accepted = check_response(&text)?;

    if accepted.is_empty() {
        println!("{}", "No questions asked: the report is actionable.".green());
        return Ok(());
    }

    println!(
        "{}",
        f!("Accepted {} question(s):", accepted.len()).green()
    );
    for question in accepted {
        println!("  {}. {}", question.position() + 1, question);
    }

    Ok(())
}

/// Parse a reply and check its questions against the catalog.
fn check_response(text: &str) -> Result<Vec<ClarifyingQuestion>> {
    let response = parse_response(text).map_err(Error::from)?;
    let accepted = validate_selection(&response.missing_data).map_err(Error::from)?;
    Ok(accepted)
}
