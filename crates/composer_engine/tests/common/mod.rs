#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use composer_core::{Key, KeyCombo};
use composer_engine::{Bounds, ElementHandle, PageSurface, Point, SurfaceError};

/// One recorded input operation against the fake page.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Click(Point),
    Press(KeyCombo),
    Type(String),
    SetValue { selector: String, text: String },
    SetFiles { selector: String, paths: Vec<PathBuf> },
}

/// Scripted behaviour for one selector on the fake page.
#[derive(Debug, Clone, Default)]
pub struct FieldScript {
    /// Queries answered with "no match" before the element appears.
    pub appear_after_queries: usize,
    /// Successive `bounds()` results; the last entry repeats. Empty means
    /// the default visible box.
    pub bounds: Vec<Option<Bounds>>,
    /// Fixed `input_value()` read-back; `None` echoes the typed buffer.
    pub input_value: Option<String>,
    /// Fixed `inner_html()` read-back; `None` echoes the typed buffer.
    pub inner_html: Option<String>,
    pub bounds_fault: bool,
    /// Initial `bounds()` calls that fail with `Detached` before the
    /// scripted results apply.
    pub detached_bounds_first: usize,
    pub reads_detached: bool,
    pub set_value_detached: bool,
    pub set_files_detached: bool,
}

impl FieldScript {
    pub fn visible() -> Self {
        Self::default()
    }

    pub fn visible_after(queries: usize) -> Self {
        Self {
            appear_after_queries: queries,
            ..Self::default()
        }
    }

    pub fn zero_box() -> Self {
        Self {
            bounds: vec![Some(Bounds {
                width: 0.0,
                height: 0.0,
                ..FakeSurface::DEFAULT_BOX
            })],
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct State {
    scripts: Mutex<HashMap<String, FieldScript>>,
    query_counts: Mutex<HashMap<String, usize>>,
    bounds_counts: Mutex<HashMap<String, usize>>,
    ops: Mutex<Vec<Op>>,
    disposed: Mutex<Vec<String>>,
    typed: Mutex<String>,
    pending_select: Mutex<bool>,
    query_fault: Mutex<Option<String>>,
    type_fault: Mutex<Option<String>>,
}

/// In-memory page double. Selectors resolve according to installed
/// [`FieldScript`]s; every input operation is recorded, and typed text is
/// accumulated in a buffer so read-backs can echo what really "landed".
#[derive(Clone, Default)]
pub struct FakeSurface {
    state: Arc<State>,
}

impl FakeSurface {
    pub const DEFAULT_BOX: Bounds = Bounds {
        x: 10.0,
        y: 20.0,
        width: 200.0,
        height: 40.0,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, selector: &str, script: FieldScript) {
        self.state
            .scripts
            .lock()
            .unwrap()
            .insert(selector.to_string(), script);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.ops.lock().unwrap().clone()
    }

    pub fn typed_text(&self) -> String {
        self.state.typed.lock().unwrap().clone()
    }

    pub fn query_count(&self, selector: &str) -> usize {
        self.state
            .query_counts
            .lock()
            .unwrap()
            .get(selector)
            .copied()
            .unwrap_or(0)
    }

    pub fn disposed(&self) -> Vec<String> {
        self.state.disposed.lock().unwrap().clone()
    }

    pub fn disposed_count(&self, selector: &str) -> usize {
        self.state
            .disposed
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.as_str() == selector)
            .count()
    }

    pub fn fail_queries(&self, message: &str) {
        *self.state.query_fault.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_typing(&self, message: &str) {
        *self.state.type_fault.lock().unwrap() = Some(message.to_string());
    }

    fn script(&self, selector: &str) -> Option<FieldScript> {
        self.state.scripts.lock().unwrap().get(selector).cloned()
    }
}

#[async_trait]
impl PageSurface for FakeSurface {
    async fn query(
        &self,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>, SurfaceError> {
        if let Some(message) = self.state.query_fault.lock().unwrap().clone() {
            return Err(SurfaceError::Driver(message));
        }
        let count = {
            let mut counts = self.state.query_counts.lock().unwrap();
            let count = counts.entry(selector.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        let Some(script) = self.script(selector) else {
            return Ok(None);
        };
        if count <= script.appear_after_queries {
            return Ok(None);
        }
        Ok(Some(Box::new(FakeHandle {
            selector: selector.to_string(),
            state: self.state.clone(),
        })))
    }

    async fn click(&self, point: Point) -> Result<(), SurfaceError> {
        self.state.ops.lock().unwrap().push(Op::Click(point));
        Ok(())
    }

    async fn press(&self, combo: &KeyCombo) -> Result<(), SurfaceError> {
        self.state.ops.lock().unwrap().push(Op::Press(*combo));
        let mut typed = self.state.typed.lock().unwrap();
        let mut pending = self.state.pending_select.lock().unwrap();
        let select_all = (combo.ctrl || combo.meta) && combo.key == Key::Char('a');
        if select_all {
            *pending = true;
        } else if *pending && combo.key == Key::Delete {
            typed.clear();
            *pending = false;
        } else {
            *pending = false;
            let unmodified = !combo.ctrl && !combo.meta && !combo.alt && !combo.shift;
            if unmodified && combo.key == Key::Enter {
                typed.push('\n');
            }
        }
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), SurfaceError> {
        if let Some(message) = self.state.type_fault.lock().unwrap().clone() {
            return Err(SurfaceError::Driver(message));
        }
        self.state
            .ops
            .lock()
            .unwrap()
            .push(Op::Type(text.to_string()));
        self.state.typed.lock().unwrap().push_str(text);
        Ok(())
    }
}

struct FakeHandle {
    selector: String,
    state: Arc<State>,
}

impl FakeHandle {
    fn script(&self) -> FieldScript {
        self.state
            .scripts
            .lock()
            .unwrap()
            .get(&self.selector)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ElementHandle for FakeHandle {
    async fn bounds(&self) -> Result<Option<Bounds>, SurfaceError> {
        let script = self.script();
        if script.bounds_fault {
            return Err(SurfaceError::Driver("bounds fault".to_string()));
        }
        let index = {
            let mut counts = self.state.bounds_counts.lock().unwrap();
            let count = counts.entry(self.selector.clone()).or_insert(0);
            let index = *count;
            *count += 1;
            index
        };
        if index < script.detached_bounds_first {
            return Err(SurfaceError::Detached);
        }
        let index = index - script.detached_bounds_first;
        if script.bounds.is_empty() {
            return Ok(Some(FakeSurface::DEFAULT_BOX));
        }
        let clamped = index.min(script.bounds.len() - 1);
        Ok(script.bounds[clamped])
    }

    async fn input_value(&self) -> Result<String, SurfaceError> {
        let script = self.script();
        if script.reads_detached {
            return Err(SurfaceError::Detached);
        }
        match script.input_value {
            Some(value) => Ok(value),
            None => Ok(self.state.typed.lock().unwrap().clone()),
        }
    }

    async fn inner_html(&self) -> Result<String, SurfaceError> {
        let script = self.script();
        if script.reads_detached {
            return Err(SurfaceError::Detached);
        }
        if let Some(html) = script.inner_html {
            return Ok(html);
        }
        let typed = self.state.typed.lock().unwrap().clone();
        let paragraphs: Vec<String> = typed
            .split('\n')
            .map(|line| format!("<p>{line}</p>"))
            .collect();
        Ok(paragraphs.concat())
    }

    async fn set_value(&self, text: &str) -> Result<(), SurfaceError> {
        let script = self.script();
        if script.set_value_detached {
            return Err(SurfaceError::Detached);
        }
        self.state.ops.lock().unwrap().push(Op::SetValue {
            selector: self.selector.clone(),
            text: text.to_string(),
        });
        *self.state.typed.lock().unwrap() = text.to_string();
        Ok(())
    }

    async fn set_files(&self, paths: &[PathBuf]) -> Result<(), SurfaceError> {
        let script = self.script();
        if script.set_files_detached {
            return Err(SurfaceError::Detached);
        }
        self.state.ops.lock().unwrap().push(Op::SetFiles {
            selector: self.selector.clone(),
            paths: paths.to_vec(),
        });
        Ok(())
    }

    async fn dispose(&self) {
        self.state.disposed.lock().unwrap().push(self.selector.clone());
    }
}
