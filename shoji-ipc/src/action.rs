use serde::{Deserialize, Serialize};

use crate::layout::AxisTarget;

/// Everything a key binding, button binding or control client can ask for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // Process
    Spawn { command: Vec<String> },
    Quit,

    // Focus and stacking
    FocusStack { delta: i32 },
    Zoom,
    KillClient,

    // Layout parameters
    ToggleBar,
    IncMasterSplit { delta: i32 },
    /// Below 1.0 the value is added to the current factor; from 1.0 up it sets `value - 1.0`
    SetMasterFactor { value: f32 },
    /// `None` toggles between the two most recent layouts
    SetLayout {
        #[serde(default)]
        index: Option<usize>,
    },
    RotateAxis { target: AxisTarget },
    MirrorLayout,

    // Tags
    View { tags: u32 },
    ViewAll,
    ToggleView { tags: u32 },
    Tag { tags: u32 },
    TagAll,
    ToggleTag { tags: u32 },
    Rewind,

    // Monitors
    FocusMonitor { delta: i32 },
    SendToMonitor { delta: i32 },
    MoveTagsetToMonitor {
        delta: i32,
        #[serde(default)]
        all: bool,
    },
    RotateMonitors {
        #[serde(default)]
        all_views: bool,
    },

    // Client state
    ToggleFloating,
    ToggleFullscreen,
    MoveMouse,
    ResizeMouse,
}

impl Action {
    /// Tag-bar clicks carry the clicked tag into tag actions bound with an empty mask.
    pub fn with_clicked_tag(&self, mask: u32) -> Action {
        match self {
            Action::View { tags: 0 } => Action::View { tags: mask },
            Action::ToggleView { tags: 0 } => Action::ToggleView { tags: mask },
            Action::Tag { tags: 0 } => Action::Tag { tags: mask },
            Action::ToggleTag { tags: 0 } => Action::ToggleTag { tags: mask },
            other => other.clone(),
        }
    }
}
