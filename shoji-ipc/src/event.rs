use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, SizeHints};

/// Where a button press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickRegion {
    TagBar,
    LayoutSymbol,
    StatusText,
    WindowTitle,
    ClientWindow,
    RootWindow,
}

/// Attributes of a window the display service is about to map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub window: u32,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub title: String,
    pub frame: Rect,
    #[serde(default)]
    pub border_width: i32,
    #[serde(default)]
    pub size_hints: SizeHints,
    #[serde(default)]
    pub transient_for: Option<u32>,
    #[serde(default)]
    pub is_dialog: bool,
    #[serde(default)]
    pub wants_fullscreen: bool,
    #[serde(default)]
    pub never_focus: bool,
    #[serde(default)]
    pub is_urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    Title { title: String },
    SizeHints { hints: SizeHints },
    Hints { urgent: bool, never_focus: bool },
    WindowType { dialog: bool, fullscreen: bool },
    TransientFor { parent: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullscreenAction {
    Add,
    Remove,
    Toggle,
}

/// Notifications delivered by the display service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayEvent {
    Map(MapInfo),
    Unmap {
        window: u32,
    },
    Destroy {
        window: u32,
    },
    ConfigureRequest {
        window: u32,
        x: Option<i32>,
        y: Option<i32>,
        width: Option<i32>,
        height: Option<i32>,
        border_width: Option<i32>,
    },
    PropertyChanged {
        window: u32,
        property: Property,
    },
    FullscreenRequest {
        window: u32,
        action: FullscreenAction,
    },
    ActivateRequest {
        window: u32,
    },
    Enter {
        window: Option<u32>,
        x: i32,
        y: i32,
    },
    Motion {
        x: i32,
        y: i32,
    },
    KeyPress {
        modifiers: u32,
        keysym: String,
    },
    ButtonPress {
        click: ClickRegion,
        modifiers: u32,
        button: u8,
        #[serde(default)]
        window: Option<u32>,
        x: i32,
        y: i32,
        /// Zero-based tag index when the press hit the tag bar
        #[serde(default)]
        tag: Option<u32>,
    },
    ButtonRelease {
        button: u8,
        x: i32,
        y: i32,
    },
    OutputsChanged {
        screen: Rect,
        outputs: Vec<Rect>,
    },
    StatusText {
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_event_deserialization_with_defaults() {
        let json = r#"{"type":"map","window":7,"class":"Gimp","frame":{"x":0,"y":0,"width":640,"height":480}}"#;
        let event: DisplayEvent = serde_json::from_str(json).unwrap();
        match event {
            DisplayEvent::Map(info) => {
                assert_eq!(info.window, 7);
                assert_eq!(info.class, "Gimp");
                assert_eq!(info.instance, "");
                assert_eq!(info.frame.width, 640);
                assert_eq!(info.transient_for, None);
                assert!(!info.never_focus);
                assert_eq!(info.size_hints, SizeHints::default());
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_configure_request_partial_fields() {
        let json = r#"{"type":"configure_request","window":3,"width":200}"#;
        let event: DisplayEvent = serde_json::from_str(json).unwrap();
        match event {
            DisplayEvent::ConfigureRequest {
                window,
                x,
                width,
                height,
                ..
            } => {
                assert_eq!(window, 3);
                assert_eq!(x, None);
                assert_eq!(width, Some(200));
                assert_eq!(height, None);
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_property_changed_serialization() {
        let event = DisplayEvent::PropertyChanged {
            window: 9,
            property: Property::Hints {
                urgent: true,
                never_focus: false,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"property_changed\""));
        assert!(json.contains("\"kind\":\"hints\""));

        let deserialized: DisplayEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_button_press_serialization() {
        let json = r#"{"type":"button_press","click":"tag_bar","modifiers":0,"button":1,"x":5,"y":2,"tag":3}"#;
        let event: DisplayEvent = serde_json::from_str(json).unwrap();
        match event {
            DisplayEvent::ButtonPress {
                click, tag, window, ..
            } => {
                assert_eq!(click, ClickRegion::TagBar);
                assert_eq!(tag, Some(3));
                assert_eq!(window, None);
            }
            _ => panic!("Wrong variant"),
        }
    }
}
