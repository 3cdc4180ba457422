use std::time::{Duration, Instant};

use composer_logging::composer_trace;

use crate::surface::{ElementHandle, PageSurface, SurfaceError};

#[derive(Debug, Clone)]
pub struct LocatorSettings {
    /// Pause between poll rounds over the candidate list.
    pub poll_interval: Duration,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// A qualifying element together with the candidate selector that found it.
pub struct Located {
    pub selector: String,
    pub handle: Box<dyn ElementHandle>,
}

impl std::fmt::Debug for Located {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Located")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Polls the candidate selectors in order until one resolves to an element
/// with a non-zero rendered box.
///
/// A timeout is an `Ok(None)` outcome, never an error; only driver faults
/// propagate. One full round over the candidates always runs after the
/// deadline passes, so the call returns no earlier than `timeout` and no
/// later than `timeout` plus one poll interval. Handles inspected but not
/// returned are disposed here; the returned handle is the caller's to
/// dispose.
pub async fn locate_visible(
    surface: &dyn PageSurface,
    candidates: &[&str],
    timeout: Duration,
    settings: &LocatorSettings,
) -> Result<Option<Located>, SurfaceError> {
    let deadline = Instant::now() + timeout;
    loop {
        for selector in candidates {
            let Some(handle) = surface.query(selector).await? else {
                continue;
            };
            match handle.bounds().await {
                Ok(Some(bounds)) if bounds.is_visible() => {
                    return Ok(Some(Located {
                        selector: (*selector).to_string(),
                        handle,
                    }));
                }
                Ok(_) => handle.dispose().await,
                // The element vanished between query and bounds; poll again.
                Err(SurfaceError::Detached) => handle.dispose().await,
                Err(err) => {
                    handle.dispose().await;
                    return Err(err);
                }
            }
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        composer_trace!(
            "None of {} candidate selectors visible yet; polling again",
            candidates.len()
        );
        tokio::time::sleep(settings.poll_interval).await;
    }
}
