use egui::Key;

/// Keys the planning screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl ShortcutKey {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Delete => Some(Self::Delete),
            Key::Backspace => Some(Self::Backspace),
            Key::ArrowUp => Some(Self::ArrowUp),
            Key::ArrowDown => Some(Self::ArrowDown),
            Key::ArrowLeft => Some(Self::ArrowLeft),
            Key::ArrowRight => Some(Self::ArrowRight),
            Key::Escape => Some(Self::Escape),
            _ => None,
        }
    }

    /// Nudge direction in percent points, for arrow keys.
    pub fn nudge(self) -> Option<(f32, f32)> {
        match self {
            Self::ArrowUp => Some((0.0, -1.0)),
            Self::ArrowDown => Some((0.0, 1.0)),
            Self::ArrowLeft => Some((-1.0, 0.0)),
            Self::ArrowRight => Some((1.0, 0.0)),
            _ => None,
        }
    }
}

/// Window-wide key subscription owned by the planning screen.
///
/// Attached on creation and detached on drop, so keys stop reaching the
/// planner as soon as the screen is torn down.
#[derive(Debug)]
pub struct KeyListener {
    attached: bool,
}

impl KeyListener {
    pub fn attach() -> Self {
        log::debug!("Planning key listener attached");
        Self { attached: true }
    }

    pub fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            log::debug!("Planning key listener detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Filters pressed keys down to shortcuts; yields nothing once detached.
    pub fn collect<I>(&self, pressed: I) -> Vec<ShortcutKey>
    where
        I: IntoIterator<Item = Key>,
    {
        if !self.is_attached() {
            return Vec::new();
        }
        pressed.into_iter().filter_map(ShortcutKey::from_key).collect()
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.detach();
    }
}
