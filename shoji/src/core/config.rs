use std::collections::HashMap;

use shoji_ipc::{
    AttachMode, ButtonBinding, KeyBinding, LayoutAxis, LayoutKind, LayoutSpec, Rule,
};

use super::{Tag, ViewParams};

/// Typed configuration the core runs with.
/// Produced by `crate::config` from the on-disk file, or `Default`.
#[derive(Debug, Clone)]
pub struct Config {
    pub tags: Vec<String>,
    pub layouts: Vec<LayoutSpec>,
    /// Zero-based tag index to layout index, used the first time a tag is viewed
    pub tag_layouts: HashMap<u32, usize>,
    pub rules: Vec<Rule>,
    pub keys: Vec<KeyBinding>,
    pub buttons: Vec<ButtonBinding>,
    pub border_width: i32,
    pub snap: i32,
    pub mfact: f32,
    pub msplit: u32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub bar_height: i32,
    pub resize_hints: bool,
    pub lock_fullscreen: bool,
    pub attach_mode: AttachMode,
    pub default_axis: LayoutAxis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: (1..=9).map(|i| i.to_string()).collect(),
            layouts: vec![
                LayoutSpec::new(LayoutKind::Tile),
                LayoutSpec::new(LayoutKind::Floating),
                LayoutSpec::new(LayoutKind::Monocle),
                LayoutSpec::new(LayoutKind::Varimono),
            ],
            tag_layouts: HashMap::new(),
            rules: Vec::new(),
            keys: Vec::new(),
            buttons: Vec::new(),
            border_width: 1,
            snap: 32,
            mfact: 0.55,
            msplit: 1,
            show_bar: true,
            top_bar: true,
            bar_height: 18,
            resize_hints: false,
            lock_fullscreen: true,
            attach_mode: AttachMode::Head,
            default_axis: LayoutAxis::default(),
        }
    }
}

impl Config {
    pub fn num_tags(&self) -> u32 {
        self.tags.len() as u32
    }

    /// Mask of every valid tag
    pub fn tag_mask(&self) -> Tag {
        Tag::full(self.num_tags())
    }

    pub fn layout(&self, index: usize) -> Option<&LayoutSpec> {
        self.layouts.get(index)
    }

    pub fn layout_kind(&self, index: usize) -> LayoutKind {
        self.layout(index)
            .map(|l| l.kind)
            .unwrap_or(LayoutKind::Floating)
    }

    /// Presentation state of a freshly created monitor
    pub fn default_params(&self) -> ViewParams {
        let second = if self.layouts.len() > 1 { 1 } else { 0 };
        ViewParams {
            layouts: [0, second],
            sel_layout: 0,
            mfact: self.mfact,
            msplit: self.msplit,
            axis: self.default_axis,
            show_bar: self.show_bar,
        }
    }

    /// Configured layout for a one-based tag number
    pub fn layout_for_tag(&self, tag: u32) -> Option<usize> {
        if tag == 0 {
            return None;
        }
        self.tag_layouts
            .get(&(tag - 1))
            .copied()
            .filter(|i| *i < self.layouts.len())
    }
}
