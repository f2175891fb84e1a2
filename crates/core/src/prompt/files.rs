use super::types::{FileContext, FileRecord};

/// Opening delimiter of the file dump. Downstream parsers split on it.
pub const START_OF_FILES: &str = "---START_OF_FILES---";
/// Closing delimiter of the file dump.
pub const END_OF_FILES: &str = "---END_OF_FILES---";

const FENCE: &str = "```";

/// Render the project file listing.
///
/// With a relevance filter, every known path is listed as a bullet and only the
/// relevant files are dumped; the delimited block is emitted even when nothing is
/// relevant. Without a filter, all known files are dumped. With no files and no filter
/// the result is empty.
pub fn render_file_listing(ctx: &FileContext) -> String {
    let mut parts = Vec::new();

    match &ctx.relevant {
        Some(relevant) => {
            if !ctx.files.is_empty() {
                let bullets = ctx.files.iter().map(file_bullet).collect::<Vec<_>>();
                parts.push(format!(
                    "These files are currently implemented in the project:\n{}",
                    bullets.join("\n")
                ));
            }
            parts.push(format!(
                "Here are the complete contents of files relevant to this task:\n{}",
                files_block(relevant)
            ));
        }
        None if !ctx.files.is_empty() => {
            parts.push(format!(
                "These files are currently implemented in the project:\n{}",
                files_block(&ctx.files)
            ));
        }
        None => {}
    }

    parts.join("\n\n")
}

/// `` * `path: description` `` or `` * `path` ``.
fn file_bullet(file: &FileRecord) -> String {
    match file.description() {
        Some(description) => format!("* `{}: {}`", file.path, description),
        None => format!("* `{}`", file.path),
    }
}

fn files_block(files: &[FileRecord]) -> String {
    let entries = files.iter().map(file_entry).collect::<Vec<_>>();

    if entries.is_empty() {
        return format!("{START_OF_FILES}\n{END_OF_FILES}");
    }

    format!("{START_OF_FILES}\n{}\n{END_OF_FILES}", entries.join("\n\n"))
}

fn file_entry(file: &FileRecord) -> String {
    let separator = if file.content.is_empty() || file.content.ends_with('\n') {
        ""
    } else {
        "\n"
    };

    format!(
        "**`{}`** ({}):\n{FENCE}\n{}{}{FENCE}",
        file.path,
        lines_label(file.line_count()),
        file.content,
        separator
    )
}

fn lines_label(count: usize) -> String {
    if count == 1 {
        "1 line of code".to_string()
    } else {
        format!("{count} lines of code")
    }
}
