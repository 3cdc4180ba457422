use std::time::Duration;

use composer_core::{
    classify_blocks, translate_blocks, visible_text, EditorAction, Key, KeyCombo, ShortcutMap,
};
use composer_logging::{composer_trace, composer_warn};

use crate::locator::Located;
use crate::surface::{PageSurface, SurfaceError};
use crate::types::{ComposeError, ComposeFailure};
use crate::verify::{body_meets_ratio, flatten_visible_text, title_matches, TypedOutcome};

#[derive(Debug, Clone)]
pub struct TypistSettings {
    pub shortcuts: ShortcutMap,
    /// Characters typed per burst on the literal path.
    pub chunk_chars: usize,
    /// Pause between bursts, pacing input like a human typing.
    pub chunk_pause: Duration,
    /// Pause after clicks and tag submissions, letting the page react.
    pub settle_pause: Duration,
    /// Minimum fraction of the intended body the read-back must show.
    pub min_body_ratio: f64,
}

impl Default for TypistSettings {
    fn default() -> Self {
        Self {
            shortcuts: ShortcutMap::default(),
            chunk_chars: 200,
            chunk_pause: Duration::from_millis(40),
            settle_pause: Duration::from_millis(150),
            min_body_ratio: 0.85,
        }
    }
}

/// Drives synthetic input against located fields and verifies the result,
/// falling back to programmatic assignment when keystrokes did not land.
pub struct Typist {
    settings: TypistSettings,
}

impl Typist {
    pub fn new(settings: TypistSettings) -> Self {
        Self { settings }
    }

    /// Fills a plain input field: focus, clear, type, verify by equality.
    pub async fn fill_field(
        &self,
        surface: &dyn PageSurface,
        located: &Located,
        text: &str,
    ) -> Result<TypedOutcome, ComposeError> {
        self.focus(surface, located).await?;
        self.clear_selection(surface).await?;
        self.type_in_chunks(surface, text)
            .await
            .map_err(surface_fault)?;
        tokio::time::sleep(self.settings.settle_pause).await;

        match located.handle.input_value().await {
            Ok(value) if title_matches(text, &value) => Ok(TypedOutcome::Typed),
            Ok(value) => {
                composer_warn!(
                    "Field {} read back {} chars instead of {}; assigning value directly",
                    located.selector,
                    value.chars().count(),
                    text.chars().count()
                );
                self.inject(located, text).await
            }
            Err(SurfaceError::Detached) => self.inject(located, text).await,
            Err(err) => Err(surface_fault(err)),
        }
    }

    /// Fills the rich body editor: focus, clear, then either replay the
    /// translated action sequence or type the literal text. Verification
    /// compares the editor's flattened visible text by length ratio.
    pub async fn fill_rich_body(
        &self,
        surface: &dyn PageSurface,
        located: &Located,
        body: &str,
        use_shortcuts: bool,
    ) -> Result<TypedOutcome, ComposeError> {
        let blocks = classify_blocks(body);
        let intended = visible_text(&blocks);

        self.focus(surface, located).await?;
        self.clear_selection(surface).await?;
        if use_shortcuts {
            let actions = translate_blocks(&blocks);
            self.run_actions(surface, &actions)
                .await
                .map_err(surface_fault)?;
        } else {
            self.type_in_chunks(surface, body)
                .await
                .map_err(surface_fault)?;
        }
        tokio::time::sleep(self.settings.settle_pause).await;

        match located.handle.inner_html().await {
            Ok(html) => {
                let seen = flatten_visible_text(&html);
                if body_meets_ratio(&intended, &seen, self.settings.min_body_ratio) {
                    Ok(TypedOutcome::Typed)
                } else {
                    composer_warn!(
                        "Body {} shows {} of {} chars; assigning plain text directly",
                        located.selector,
                        seen.chars().count(),
                        intended.chars().count()
                    );
                    self.inject(located, &intended).await
                }
            }
            Err(SurfaceError::Detached) => self.inject(located, &intended).await,
            Err(err) => Err(surface_fault(err)),
        }
    }

    /// Types each tag followed by Enter. Tags are trimmed and duplicates
    /// dropped before anything is typed. Returns the number entered.
    pub async fn enter_tags(
        &self,
        surface: &dyn PageSurface,
        located: &Located,
        tags: &[String],
    ) -> Result<usize, ComposeError> {
        let mut distinct: Vec<&str> = Vec::new();
        for tag in tags {
            let tag = tag.trim();
            if tag.is_empty() || distinct.contains(&tag) {
                continue;
            }
            distinct.push(tag);
        }
        if distinct.is_empty() {
            return Ok(0);
        }

        self.focus(surface, located).await?;
        for tag in &distinct {
            surface.type_text(tag).await.map_err(surface_fault)?;
            surface
                .press(&KeyCombo::plain(Key::Enter))
                .await
                .map_err(surface_fault)?;
            tokio::time::sleep(self.settings.settle_pause).await;
        }
        Ok(distinct.len())
    }

    async fn focus(
        &self,
        surface: &dyn PageSurface,
        located: &Located,
    ) -> Result<(), ComposeError> {
        let bounds = located.handle.bounds().await.map_err(surface_fault)?;
        let Some(bounds) = bounds else {
            return Err(ComposeError::new(
                ComposeFailure::FieldLost,
                format!("{} lost its rendered box before focus", located.selector),
            ));
        };
        surface
            .click(bounds.center())
            .await
            .map_err(surface_fault)?;
        tokio::time::sleep(self.settings.settle_pause).await;
        Ok(())
    }

    async fn clear_selection(&self, surface: &dyn PageSurface) -> Result<(), ComposeError> {
        surface
            .press(&self.settings.shortcuts.select_all())
            .await
            .map_err(surface_fault)?;
        surface
            .press(&KeyCombo::plain(Key::Delete))
            .await
            .map_err(surface_fault)?;
        Ok(())
    }

    async fn run_actions(
        &self,
        surface: &dyn PageSurface,
        actions: &[EditorAction],
    ) -> Result<(), SurfaceError> {
        for action in actions {
            match action {
                EditorAction::BlockShortcut(kind) => {
                    surface.press(&self.settings.shortcuts.block(*kind)).await?;
                }
                EditorAction::InlineToggle(style) => {
                    surface
                        .press(&self.settings.shortcuts.inline(*style))
                        .await?;
                }
                EditorAction::TypeText(text) => self.type_in_chunks(surface, text).await?,
                EditorAction::PressEnter => {
                    surface.press(&KeyCombo::plain(Key::Enter)).await?;
                }
            }
        }
        Ok(())
    }

    async fn type_in_chunks(
        &self,
        surface: &dyn PageSurface,
        text: &str,
    ) -> Result<(), SurfaceError> {
        let chars: Vec<char> = text.chars().collect();
        for (index, chunk) in chars.chunks(self.settings.chunk_chars.max(1)).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.settings.chunk_pause).await;
            }
            let piece: String = chunk.iter().collect();
            composer_trace!("Typing chunk of {} chars", piece.chars().count());
            surface.type_text(&piece).await?;
        }
        Ok(())
    }

    async fn inject(
        &self,
        located: &Located,
        text: &str,
    ) -> Result<TypedOutcome, ComposeError> {
        match located.handle.set_value(text).await {
            Ok(()) => Ok(TypedOutcome::Injected),
            Err(SurfaceError::Detached) => Err(ComposeError::new(
                ComposeFailure::FieldLost,
                format!("fallback assignment unreachable for {}", located.selector),
            )),
            Err(SurfaceError::Driver(message)) => {
                Err(ComposeError::new(ComposeFailure::Driver, message))
            }
        }
    }
}

pub(crate) fn surface_fault(err: SurfaceError) -> ComposeError {
    match err {
        SurfaceError::Driver(message) => ComposeError::new(ComposeFailure::Driver, message),
        SurfaceError::Detached => {
            ComposeError::new(ComposeFailure::FieldLost, "element handle detached")
        }
    }
}
