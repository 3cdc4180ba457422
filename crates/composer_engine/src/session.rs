use std::time::Duration;

use composer_core::{DraftArticle, ThumbnailSource};
use composer_logging::{composer_info, composer_warn};

use crate::locator::{locate_visible, Located, LocatorSettings};
use crate::surface::{PageSurface, SurfaceError};
use crate::typist::{surface_fault, Typist, TypistSettings};
use crate::types::{
    ComposeError, ComposeEvent, ComposeFailure, ComposeOutcome, ComposeProgress, JobId, Stage,
};

/// Candidate selectors for each surface the composition touches, in
/// preference order. The strings are opaque to the engine.
#[derive(Debug, Clone)]
pub struct SurfaceSelectors {
    pub readiness: Vec<String>,
    pub title: Vec<String>,
    pub body: Vec<String>,
    pub tag_input: Vec<String>,
    pub thumbnail_input: Vec<String>,
}

impl Default for SurfaceSelectors {
    fn default() -> Self {
        Self {
            readiness: vec![
                "div[data-editor-ready='true']".to_string(),
                ".editor-shell".to_string(),
            ],
            title: vec![
                "textarea[name='title']".to_string(),
                "input[name='title']".to_string(),
                ".post-title textarea".to_string(),
            ],
            body: vec![
                "div.ProseMirror[contenteditable='true']".to_string(),
                "div[contenteditable='true']".to_string(),
            ],
            tag_input: vec![
                "input[name='tags']".to_string(),
                ".tag-editor input".to_string(),
            ],
            thumbnail_input: vec![
                "input[type='file'][accept*='image']".to_string(),
                "input[type='file']".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComposeSettings {
    pub selectors: SurfaceSelectors,
    pub locator: LocatorSettings,
    pub typist: TypistSettings,
    /// How long the editor gets to become visible after navigation.
    pub ready_timeout: Duration,
    /// How long each individual field gets to appear.
    pub field_timeout: Duration,
    /// Replay shortcut formatting in the body instead of literal text.
    pub use_shortcut_formatting: bool,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            selectors: SurfaceSelectors::default(),
            locator: LocatorSettings::default(),
            typist: TypistSettings::default(),
            ready_timeout: Duration::from_secs(20),
            field_timeout: Duration::from_secs(5),
            use_shortcut_formatting: true,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ComposeEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<ComposeEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<ComposeEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ComposeEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs one full composition against the page: wait for the editor, type
/// title and body, enter tags, attach the thumbnail.
///
/// Missing readiness, title, or body surfaces are fatal; a missing tag
/// input or thumbnail input downgrades to a logged skip. Every located
/// handle is disposed before this function returns.
pub async fn compose_article(
    surface: &dyn PageSurface,
    job_id: JobId,
    draft: &DraftArticle,
    settings: &ComposeSettings,
    sink: &dyn ProgressSink,
) -> Result<ComposeOutcome, ComposeError> {
    let typist = Typist::new(settings.typist.clone());

    progress(sink, job_id, Stage::WaitingEditor, None);
    let ready = locate(
        surface,
        &settings.selectors.readiness,
        settings.ready_timeout,
        &settings.locator,
    )
    .await?;
    let Some(ready) = ready else {
        return Err(ComposeError::new(
            ComposeFailure::EditorNotReady,
            "editor surface never became visible",
        ));
    };
    composer_info!("Job {} editor ready via {}", job_id, ready.selector);
    ready.handle.dispose().await;

    progress(sink, job_id, Stage::TypingTitle, Some(draft.title.clone()));
    let field = require_field(
        locate(
            surface,
            &settings.selectors.title,
            settings.field_timeout,
            &settings.locator,
        )
        .await?,
        "title input",
    )?;
    let result = typist.fill_field(surface, &field, &draft.title).await;
    field.handle.dispose().await;
    let title = result?;

    progress(sink, job_id, Stage::TypingBody, None);
    let field = require_field(
        locate(
            surface,
            &settings.selectors.body,
            settings.field_timeout,
            &settings.locator,
        )
        .await?,
        "body editor",
    )?;
    let result = typist
        .fill_rich_body(
            surface,
            &field,
            &draft.body,
            settings.use_shortcut_formatting,
        )
        .await;
    field.handle.dispose().await;
    let body = result?;

    progress(sink, job_id, Stage::ApplyingTags, None);
    let tags_entered = apply_tags(surface, job_id, draft, settings, &typist).await?;

    progress(sink, job_id, Stage::AttachingThumbnail, None);
    let thumbnail_attached = attach_thumbnail(surface, job_id, draft, settings).await?;

    progress(sink, job_id, Stage::Done, None);
    Ok(ComposeOutcome {
        title,
        body,
        tags_entered,
        thumbnail_attached,
    })
}

async fn apply_tags(
    surface: &dyn PageSurface,
    job_id: JobId,
    draft: &DraftArticle,
    settings: &ComposeSettings,
    typist: &Typist,
) -> Result<usize, ComposeError> {
    if draft.tags.is_empty() {
        return Ok(0);
    }
    let located = locate(
        surface,
        &settings.selectors.tag_input,
        settings.field_timeout,
        &settings.locator,
    )
    .await?;
    let Some(field) = located else {
        composer_warn!("Job {} tag input not found; tags skipped", job_id);
        return Ok(0);
    };
    let result = typist.enter_tags(surface, &field, &draft.tags).await;
    field.handle.dispose().await;
    match result {
        Ok(count) => Ok(count),
        Err(err) if matches!(err.kind, ComposeFailure::Driver) => Err(err),
        Err(err) => {
            composer_warn!("Job {} tag entry skipped: {}", job_id, err);
            Ok(0)
        }
    }
}

async fn attach_thumbnail(
    surface: &dyn PageSurface,
    job_id: JobId,
    draft: &DraftArticle,
    settings: &ComposeSettings,
) -> Result<bool, ComposeError> {
    let path = match &draft.thumbnail {
        None => return Ok(false),
        Some(ThumbnailSource::Remote(url)) => {
            composer_warn!(
                "Job {} thumbnail {} is remote; attach skipped, downloads happen upstream",
                job_id,
                url
            );
            return Ok(false);
        }
        Some(ThumbnailSource::Local(path)) => path.clone(),
    };
    let located = locate(
        surface,
        &settings.selectors.thumbnail_input,
        settings.field_timeout,
        &settings.locator,
    )
    .await?;
    let Some(field) = located else {
        composer_warn!("Job {} thumbnail input not found; attach skipped", job_id);
        return Ok(false);
    };
    let result = field.handle.set_files(&[path]).await;
    field.handle.dispose().await;
    match result {
        Ok(()) => Ok(true),
        Err(SurfaceError::Driver(message)) => {
            Err(ComposeError::new(ComposeFailure::Driver, message))
        }
        Err(SurfaceError::Detached) => {
            composer_warn!("Job {} thumbnail input detached; attach skipped", job_id);
            Ok(false)
        }
    }
}

async fn locate(
    surface: &dyn PageSurface,
    candidates: &[String],
    timeout: Duration,
    settings: &LocatorSettings,
) -> Result<Option<Located>, ComposeError> {
    let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
    locate_visible(surface, &refs, timeout, settings)
        .await
        .map_err(surface_fault)
}

fn require_field(located: Option<Located>, target: &str) -> Result<Located, ComposeError> {
    located.ok_or_else(|| {
        ComposeError::new(
            ComposeFailure::SurfaceMissing {
                target: target.to_string(),
            },
            format!("no {target} selector matched a visible element"),
        )
    })
}

fn progress(sink: &dyn ProgressSink, job_id: JobId, stage: Stage, detail: Option<String>) {
    sink.emit(ComposeEvent::Progress(ComposeProgress {
        job_id,
        stage,
        detail,
    }));
}
