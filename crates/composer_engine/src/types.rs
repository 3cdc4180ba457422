use std::fmt;

use crate::verify::TypedOutcome;

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Queued,
    WaitingEditor,
    TypingTitle,
    TypingBody,
    ApplyingTags,
    AttachingThumbnail,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeProgress {
    pub job_id: JobId,
    pub stage: Stage,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeEvent {
    Progress(ComposeProgress),
    JobCompleted {
        job_id: JobId,
        result: Result<ComposeOutcome, ComposeError>,
    },
}

/// What a finished composition left on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOutcome {
    pub title: TypedOutcome,
    pub body: TypedOutcome,
    pub tags_entered: usize,
    pub thumbnail_attached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeError {
    pub kind: ComposeFailure,
    pub message: String,
}

impl ComposeError {
    pub(crate) fn new(kind: ComposeFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ComposeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeFailure {
    /// The readiness probe never reported a visible editor.
    EditorNotReady,
    /// A surface the composition cannot proceed without was not found.
    SurfaceMissing { target: String },
    /// A located field vanished before the fallback path could reach it.
    FieldLost,
    /// The underlying driver reported a fault.
    Driver,
}

impl fmt::Display for ComposeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeFailure::EditorNotReady => write!(f, "editor not ready"),
            ComposeFailure::SurfaceMissing { target } => write!(f, "{target} not found"),
            ComposeFailure::FieldLost => write!(f, "field lost"),
            ComposeFailure::Driver => write!(f, "driver fault"),
        }
    }
}
