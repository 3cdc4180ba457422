//! Serializes an assembled draft into the editor-action script consumed at
//! the driver boundary: one JSON value per line, header first.

use std::io::Write;

use anyhow::Context;
use composer_core::{classify_blocks, translate_blocks, DraftArticle, ThumbnailSource};
use serde::Serialize;

/// First line of the script: what the actions that follow will compose.
#[derive(Debug, Serialize)]
struct ScriptHeader<'a> {
    title: &'a str,
    tags: &'a [String],
    thumbnail: Option<String>,
    actions: usize,
}

pub(crate) fn write_script(mut out: impl Write, draft: &DraftArticle) -> anyhow::Result<()> {
    let blocks = classify_blocks(&draft.body);
    let actions = translate_blocks(&blocks);

    let header = ScriptHeader {
        title: &draft.title,
        tags: &draft.tags,
        thumbnail: draft.thumbnail.as_ref().map(thumbnail_target),
        actions: actions.len(),
    };
    let line = serde_json::to_string(&header).context("serializing the script header")?;
    writeln!(out, "{line}").context("writing the script header")?;

    for action in &actions {
        let line = serde_json::to_string(action).context("serializing an editor action")?;
        writeln!(out, "{line}").context("writing an editor action")?;
    }
    Ok(())
}

fn thumbnail_target(source: &ThumbnailSource) -> String {
    match source {
        ThumbnailSource::Local(path) => path.display().to_string(),
        ThumbnailSource::Remote(url) => url.to_string(),
    }
}
