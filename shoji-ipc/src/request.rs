use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderScheme {
    Normal,
    Selected,
    Urgent,
}

/// ICCCM WM_STATE values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientState {
    Normal,
    Iconic,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Normal,
    Move,
    Resize,
}

/// Everything the bar renderer needs for one monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarState {
    pub tag_names: Vec<String>,
    pub selected_tags: u32,
    pub occupied_tags: u32,
    pub urgent_tags: u32,
    pub layout_symbol: String,
    pub title: Option<String>,
    pub title_floating: bool,
    /// Only the selected monitor shows the status text
    pub status: Option<String>,
    pub is_selected_monitor: bool,
}

/// Calls the core makes into the display service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayRequest {
    Map {
        window: u32,
    },
    /// `frame` is the inner geometry, border excluded
    Configure {
        window: u32,
        frame: Rect,
        border_width: i32,
    },
    Move {
        window: u32,
        x: i32,
        y: i32,
    },
    /// Synthetic configure notify telling a client its unchanged geometry
    SendConfigure {
        window: u32,
        frame: Rect,
        border_width: i32,
    },
    /// Pass-through for configure requests of unmanaged windows
    ConfigureUnmanaged {
        window: u32,
        x: Option<i32>,
        y: Option<i32>,
        width: Option<i32>,
        height: Option<i32>,
        border_width: Option<i32>,
    },
    SetBorderWidth {
        window: u32,
        border_width: i32,
    },
    SetBorder {
        window: u32,
        scheme: BorderScheme,
    },
    SetOpacity {
        window: u32,
        opacity: f32,
    },
    Raise {
        window: u32,
    },
    /// Bottom-to-top order below the bar for tiled clients
    Restack {
        windows: Vec<u32>,
    },
    /// `None` gives focus back to the root window
    SetFocus {
        window: Option<u32>,
    },
    SetActiveWindow {
        window: Option<u32>,
    },
    SetUrgency {
        window: u32,
        urgent: bool,
    },
    Close {
        window: u32,
    },
    SetClientState {
        window: u32,
        state: ClientState,
    },
    SetFullscreenState {
        window: u32,
        fullscreen: bool,
    },
    SetClientList {
        windows: Vec<u32>,
    },
    DrawBar {
        monitor: usize,
        bar: BarState,
    },
    /// `None` hides the bar
    MoveBar {
        monitor: usize,
        frame: Option<Rect>,
    },
    GrabPointer {
        cursor: Cursor,
    },
    UngrabPointer,
    WarpPointer {
        x: i32,
        y: i32,
    },
    SendButton {
        window: u32,
        button: u8,
    },
}

impl DisplayRequest {
    /// Window a request targets, if any
    pub fn window(&self) -> Option<u32> {
        match self {
            DisplayRequest::Map { window }
            | DisplayRequest::Configure { window, .. }
            | DisplayRequest::Move { window, .. }
            | DisplayRequest::SendConfigure { window, .. }
            | DisplayRequest::ConfigureUnmanaged { window, .. }
            | DisplayRequest::SetBorderWidth { window, .. }
            | DisplayRequest::SetBorder { window, .. }
            | DisplayRequest::SetOpacity { window, .. }
            | DisplayRequest::Raise { window }
            | DisplayRequest::SetUrgency { window, .. }
            | DisplayRequest::Close { window }
            | DisplayRequest::SetClientState { window, .. }
            | DisplayRequest::SetFullscreenState { window, .. }
            | DisplayRequest::SendButton { window, .. } => Some(*window),
            DisplayRequest::SetFocus { window } | DisplayRequest::SetActiveWindow { window } => {
                *window
            }
            _ => None,
        }
    }
}
