//! Composer engine: surface discovery and the synthetic typing pipeline.
mod engine;
mod locator;
mod session;
mod surface;
mod typist;
mod types;
mod verify;

pub use engine::ComposerHandle;
pub use locator::{locate_visible, Located, LocatorSettings};
pub use session::{
    compose_article, ChannelProgressSink, ComposeSettings, ProgressSink, SurfaceSelectors,
};
pub use surface::{Bounds, ElementHandle, PageSurface, Point, SurfaceError};
pub use typist::{Typist, TypistSettings};
pub use types::{
    ComposeError, ComposeEvent, ComposeFailure, ComposeOutcome, ComposeProgress, JobId, Stage,
};
pub use verify::{body_meets_ratio, flatten_visible_text, normalize_ws, title_matches, TypedOutcome};
