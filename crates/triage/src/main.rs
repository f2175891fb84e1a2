#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod bug_report;
mod error;
mod files;
mod input;
mod prelude;
mod questions;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Assemble bug-report triage prompts for coding assistants"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "TRIAGE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Render the project file listing
    Files(crate::files::App),

    /// Compose a bug-report triage prompt
    BugReport(crate::bug_report::App),

    /// Clarifying-question catalog operations
    Questions(crate::questions::App),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Files(sub_app) => crate::files::run(sub_app, app.global),
        SubCommands::BugReport(sub_app) => crate::bug_report::run(sub_app, app.global),
        SubCommands::Questions(sub_app) => crate::questions::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
