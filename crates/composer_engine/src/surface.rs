use std::path::PathBuf;

use composer_core::KeyCombo;
use thiserror::Error;

/// Fault reported by the rendering driver behind the surface traits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("driver fault: {0}")]
    Driver(String),
    #[error("element handle detached")]
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Rendered box of a page element. A zero-area box means the element
/// exists in the tree but is not visible yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Page-global input and query surface.
///
/// Keyboard and pointer state is shared across the whole page, which is why
/// everything above this trait runs strictly sequentially. Selector strings
/// are opaque here; only the driver interprets them.
#[async_trait::async_trait]
pub trait PageSurface: Send + Sync {
    /// Resolves a selector to a handle, or `None` when nothing matches.
    async fn query(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>, SurfaceError>;
    async fn click(&self, point: Point) -> Result<(), SurfaceError>;
    async fn press(&self, combo: &KeyCombo) -> Result<(), SurfaceError>;
    /// Types text at the current focus as synthetic keystrokes.
    async fn type_text(&self, text: &str) -> Result<(), SurfaceError>;
}

/// One resolved page element. Handles hold page-side resources and must be
/// disposed after use; they never survive a navigation.
#[async_trait::async_trait]
pub trait ElementHandle: Send + Sync {
    /// Rendered box, or `None` when the element has no box at all.
    async fn bounds(&self) -> Result<Option<Bounds>, SurfaceError>;
    /// Current value of an input or textarea element.
    async fn input_value(&self) -> Result<String, SurfaceError>;
    /// Current markup of a rich-text editor element.
    async fn inner_html(&self) -> Result<String, SurfaceError>;
    /// Programmatic value assignment with synthetic input/change events.
    async fn set_value(&self, text: &str) -> Result<(), SurfaceError>;
    /// Assigns files to a file-input element.
    async fn set_files(&self, paths: &[PathBuf]) -> Result<(), SurfaceError>;
    async fn dispose(&self);
}
