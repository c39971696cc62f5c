use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::event::ClickRegion;
use crate::layout::{LayoutAxis, LayoutKind, LayoutSpec};

// X11 modifier masks
pub const MOD_SHIFT: u32 = 1 << 0;
pub const MOD_LOCK: u32 = 1 << 1;
pub const MOD_CONTROL: u32 = 1 << 2;
pub const MOD_1: u32 = 1 << 3;
pub const MOD_2: u32 = 1 << 4;
pub const MOD_3: u32 = 1 << 5;
pub const MOD_4: u32 = 1 << 6;
pub const MOD_5: u32 = 1 << 7;

/// Modifiers that take part in binding lookup. Lock and NumLock (Mod2) are ignored.
pub const MODIFIER_MASK: u32 = MOD_SHIFT | MOD_CONTROL | MOD_1 | MOD_3 | MOD_4 | MOD_5;

pub fn clean_mask(modifiers: u32) -> u32 {
    modifiers & MODIFIER_MASK
}

pub fn parse_modifier(name: &str) -> Option<u32> {
    match name.to_ascii_lowercase().as_str() {
        "shift" => Some(MOD_SHIFT),
        "lock" => Some(MOD_LOCK),
        "control" | "ctrl" => Some(MOD_CONTROL),
        "mod1" | "alt" => Some(MOD_1),
        "mod2" => Some(MOD_2),
        "mod3" => Some(MOD_3),
        "mod4" | "super" | "win" => Some(MOD_4),
        "mod5" => Some(MOD_5),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRemap {
    pub from: u8,
    pub to: u8,
}

/// Placement policy for a newly managed client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: u32,
    #[serde(default)]
    pub is_floating: Option<bool>,
    #[serde(default)]
    pub no_focus: Option<bool>,
    #[serde(default)]
    pub no_border: Option<bool>,
    #[serde(default)]
    pub monitor: Option<usize>,
    #[serde(default)]
    pub opacity: Option<f32>,
    #[serde(default)]
    pub mouse_remap: Vec<ButtonRemap>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub modifiers: u32,
    pub keysym: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonBinding {
    pub click: ClickRegion,
    pub modifiers: u32,
    pub button: u8,
    pub action: Action,
}

/// Binding entry as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawKeyBinding {
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub key: String,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawButtonBinding {
    pub click: ClickRegion,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub button: u8,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachMode {
    #[default]
    Head,
    Above,
}

/// On-disk configuration. Rules, layouts and bindings stay raw JSON so a
/// malformed entry can be reported and skipped without rejecting the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub tags: Vec<String>,
    pub layouts: Vec<serde_json::Value>,
    /// Zero-based tag index to layout index
    pub tag_layouts: HashMap<u32, usize>,
    pub rules: Vec<serde_json::Value>,
    pub keys: Option<Vec<serde_json::Value>>,
    pub buttons: Option<Vec<serde_json::Value>>,
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

impl Default for ConfigFile {
    fn default() -> Self {
        let layouts = [
            LayoutKind::Tile,
            LayoutKind::Floating,
            LayoutKind::Monocle,
            LayoutKind::Varimono,
        ]
        .into_iter()
        .filter_map(|kind| serde_json::to_value(LayoutSpec::new(kind)).ok())
        .collect();

        Self {
            tags: (1..=9).map(|i| i.to_string()).collect(),
            layouts,
            tag_layouts: HashMap::new(),
            rules: Vec::new(),
            keys: None,
            buttons: None,
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
