use serde::{Deserialize, Serialize};

use crate::blocks::BlockKind;
use crate::inline::InlineStyle;

/// Target platform; decides whether the primary modifier is Meta or Control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    MacOs,
    #[default]
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
}

/// One synthetic key press with its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: Key,
}

impl KeyCombo {
    pub fn plain(key: Key) -> Self {
        Self {
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
            key,
        }
    }

    fn primary(platform: Platform, key: Key) -> Self {
        let mut combo = Self::plain(key);
        match platform {
            Platform::MacOs => combo.meta = true,
            Platform::Generic => combo.ctrl = true,
        }
        combo
    }
}

/// Fixed key-combination table for the target editor, resolved per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShortcutMap {
    platform: Platform,
}

impl ShortcutMap {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Combination that switches the current block to `kind`.
    pub fn block(&self, kind: BlockKind) -> KeyCombo {
        match kind {
            BlockKind::Paragraph => self.primary_alt('0'),
            BlockKind::Heading2 => self.primary_alt('2'),
            BlockKind::Heading3 => self.primary_alt('3'),
            BlockKind::Bulleted => self.primary_shift('8'),
            BlockKind::Numbered => self.primary_shift('7'),
            BlockKind::Quote => self.primary_shift('9'),
            BlockKind::Code => self.primary_alt('6'),
        }
    }

    /// Combination that flips one inline emphasis toggle.
    pub fn inline(&self, style: InlineStyle) -> KeyCombo {
        match style {
            InlineStyle::Bold => KeyCombo::primary(self.platform, Key::Char('b')),
            InlineStyle::Strike => self.primary_shift('x'),
        }
    }

    pub fn select_all(&self) -> KeyCombo {
        KeyCombo::primary(self.platform, Key::Char('a'))
    }

    fn primary_alt(&self, ch: char) -> KeyCombo {
        let mut combo = KeyCombo::primary(self.platform, Key::Char(ch));
        combo.alt = true;
        combo
    }

    fn primary_shift(&self, ch: char) -> KeyCombo {
        let mut combo = KeyCombo::primary(self.platform, Key::Char(ch));
        combo.shift = true;
        combo
    }
}
