use shoji_ipc::{ButtonRemap, MapInfo, Rect, SizeHints};

use super::Tag;

pub type WindowId = u32;
pub type MonitorId = usize;

#[derive(Debug, Clone)]
pub struct Client {
    pub id: WindowId,
    pub name: String,
    pub class: String,
    pub instance: String,
    /// Inner geometry, border excluded
    pub frame: Rect,
    pub old_frame: Rect,
    pub border_width: i32,
    /// Border the window had before it was managed
    pub old_border_width: i32,
    /// Border to restore when leaving fullscreen
    pub saved_border_width: i32,
    pub hints: SizeHints,
    pub tags: Tag,
    pub is_floating: bool,
    pub is_urgent: bool,
    pub is_fixed: bool,
    pub never_focus: bool,
    pub no_focus: bool,
    pub no_border: bool,
    pub is_fullscreen: bool,
    /// Floating state to restore when leaving fullscreen
    pub was_floating: bool,
    pub opacity: f32,
    pub monitor: MonitorId,
    pub transient_for: Option<WindowId>,
    pub mouse_remap: Vec<ButtonRemap>,
}

impl Client {
    pub fn from_map_info(info: &MapInfo, monitor: MonitorId) -> Self {
        let hints = info.size_hints.normalized();
        Self {
            id: info.window,
            name: info.title.clone(),
            class: info.class.clone(),
            instance: info.instance.clone(),
            frame: info.frame,
            old_frame: info.frame,
            border_width: info.border_width,
            old_border_width: info.border_width,
            saved_border_width: info.border_width,
            hints,
            tags: Tag::default(),
            is_floating: false,
            is_urgent: info.is_urgent,
            is_fixed: hints.is_fixed(),
            never_focus: info.never_focus,
            no_focus: false,
            no_border: false,
            is_fullscreen: false,
            was_floating: false,
            opacity: 1.0,
            monitor,
            transient_for: info.transient_for,
            mouse_remap: Vec::new(),
        }
    }

    /// Width including the border on both sides
    pub fn outer_width(&self) -> i32 {
        self.frame.width + 2 * self.border_width
    }

    pub fn outer_height(&self) -> i32 {
        self.frame.height + 2 * self.border_width
    }

    pub fn outer_frame(&self) -> Rect {
        Rect::new(
            self.frame.x,
            self.frame.y,
            self.outer_width(),
            self.outer_height(),
        )
    }

    pub fn is_visible_in(&self, tagset: Tag) -> bool {
        self.tags.intersects(tagset)
    }

    /// Candidate for keyboard focus when visible
    pub fn is_focusable(&self) -> bool {
        !self.no_focus
    }

    /// Takes part in arrange passes when visible
    pub fn is_tileable(&self) -> bool {
        !self.is_floating && !self.is_fullscreen && !self.no_focus
    }

    pub fn remapped_button(&self, button: u8) -> Option<u8> {
        self.mouse_remap
            .iter()
            .find(|r| r.from == button)
            .map(|r| r.to)
    }

    pub fn update_size_hints(&mut self, hints: SizeHints) {
        self.hints = hints.normalized();
        self.is_fixed = self.hints.is_fixed();
    }
}
