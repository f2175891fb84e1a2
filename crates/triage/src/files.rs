use crate::input::ContextArgs;
use crate::prelude::{eprintln, println, *};
use log::debug;
use triage_core::render_file_listing;

#[derive(Debug, clap::Parser)]
#[command(name = "files")]
#[command(about = "Render the project file listing")]
pub struct App {
    #[command(flatten)]
    pub input: ContextArgs,
}

pub fn run(app: App, global: crate::Global) -> Result<()> {
    let ctx = app.input.load_context()?;
    let files = app.input.resolve_files(&ctx)?;

    if files.is_empty() {
        debug!("no files known and no relevance filter, nothing to list");
        return Ok(());
    }

    let listing = render_file_listing(&files);

    if global.verbose {
        eprintln!("Known files: {}", files.files.len());
        eprintln!(
            "Relevant files: {}",
            files
                .relevant
                .as_ref()
                .map_or_else(|| "(all)".to_string(), |r| r.len().to_string())
        );
        eprintln!("Listing length: {} chars", listing.len());
    }

    println!("{}", listing);

    Ok(())
}
