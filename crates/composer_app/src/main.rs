//! Headless rehearsal binary: reads draft text on stdin, assembles the
//! article, and prints the editor-action script as JSON lines on stdout.

mod logging;
mod script;

use std::io::Read;

use anyhow::Context;
use composer_core::{assemble_draft, DraftOverrides, DraftSettings};
use composer_logging::composer_info;

use crate::logging::LogDestination;

fn main() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading draft text from stdin")?;

    let draft = assemble_draft(
        &text,
        None,
        &[],
        &DraftOverrides::default(),
        &DraftSettings::default(),
    )
    .context("assembling the draft")?;
    composer_info!(
        "Assembled draft: title {:?}, {} body chars, {} tags",
        draft.title,
        draft.body.chars().count(),
        draft.tags.len()
    );

    let stdout = std::io::stdout();
    script::write_script(stdout.lock(), &draft)?;
    Ok(())
}
