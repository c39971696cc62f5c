//! Loading the on-disk configuration into the core's typed `Config`.
//!
//! The file is JSON. Rules, layouts and bindings are parsed entry by entry so
//! that a malformed one is reported and skipped instead of rejecting the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use shoji_ipc::config::{MOD_1, MOD_CONTROL, MOD_SHIFT};
use shoji_ipc::{
    parse_modifier, Action, AxisTarget, ButtonBinding, ClickRegion, ConfigFile, KeyBinding,
    LayoutSpec, RawButtonBinding, RawKeyBinding, Rule,
};
use thiserror::Error;

use crate::core::{Config, MAX_TAGS};

const MODKEY: u32 = MOD_1;
const TERMINAL: &str = "xterm";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("expected between 1 and 31 tags, found {0}")]
    TagCount(usize),
    #[error("no usable layout configured")]
    NoLayouts,
    #[error("bar height must be positive, got {0}")]
    BarHeight(i32),
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("shoji").join("config.json"))
}

/// Load from `path`, or from the default location when `None`.
/// A missing default file yields the built-in configuration.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => {
                tracing::info!("No config file, using defaults");
                return Ok(from_file(ConfigFile::default())?);
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::info!(
        "Loaded config {}: {} tags, {} layouts, {} rules, {} keys",
        path.display(),
        config.tags.len(),
        config.layouts.len(),
        config.rules.len(),
        config.keys.len()
    );
    Ok(config)
}

pub fn parse(content: &str) -> Result<Config> {
    let file: ConfigFile = serde_json::from_str(content)?;
    Ok(from_file(file)?)
}

pub fn from_file(file: ConfigFile) -> Result<Config, ConfigError> {
    if file.tags.is_empty() || file.tags.len() > MAX_TAGS as usize {
        return Err(ConfigError::TagCount(file.tags.len()));
    }
    if file.bar_height <= 0 {
        return Err(ConfigError::BarHeight(file.bar_height));
    }

    let layouts: Vec<LayoutSpec> = parse_entries("layout", file.layouts);
    if layouts.is_empty() {
        return Err(ConfigError::NoLayouts);
    }

    let mfact = shoji_layout::clamp_mfact(file.mfact);
    if mfact != file.mfact {
        tracing::warn!("mfact {} out of range, using {}", file.mfact, mfact);
    }

    let num_tags = file.tags.len() as u32;
    let keys = match file.keys {
        Some(values) => parse_entries::<RawKeyBinding>("key binding", values)
            .into_iter()
            .filter_map(|raw| match parse_modifiers(&raw.modifiers) {
                Ok(modifiers) => Some(KeyBinding {
                    modifiers,
                    keysym: raw.key,
                    action: raw.action,
                }),
                Err(e) => {
                    tracing::warn!("Skipping key binding {}: {}", raw.key, e);
                    None
                }
            })
            .collect(),
        None => default_keys(num_tags),
    };
    let buttons = match file.buttons {
        Some(values) => parse_entries::<RawButtonBinding>("button binding", values)
            .into_iter()
            .filter_map(|raw| match parse_modifiers(&raw.modifiers) {
                Ok(modifiers) => Some(ButtonBinding {
                    click: raw.click,
                    modifiers,
                    button: raw.button,
                    action: raw.action,
                }),
                Err(e) => {
                    tracing::warn!("Skipping button binding {}: {}", raw.button, e);
                    None
                }
            })
            .collect(),
        None => default_buttons(),
    };

    let mut tag_layouts = file.tag_layouts;
    tag_layouts.retain(|tag, layout| {
        let valid = *tag < num_tags && *layout < layouts.len();
        if !valid {
            tracing::warn!("Ignoring tag layout {} -> {}", tag, layout);
        }
        valid
    });

    Ok(Config {
        tags: file.tags,
        layouts,
        tag_layouts,
        rules: parse_entries::<Rule>("rule", file.rules),
        keys,
        buttons,
        border_width: file.border_width.max(0),
        snap: file.snap.max(0),
        mfact,
        msplit: file.msplit,
        show_bar: file.show_bar,
        top_bar: file.top_bar,
        bar_height: file.bar_height,
        resize_hints: file.resize_hints,
        lock_fullscreen: file.lock_fullscreen,
        attach_mode: file.attach_mode,
        default_axis: file.default_axis,
    })
}

fn parse_entries<T: DeserializeOwned>(kind: &str, values: Vec<serde_json::Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping {} #{}: {}", kind, i, e);
                None
            }
        })
        .collect()
}

fn parse_modifiers(names: &[String]) -> Result<u32, ConfigError> {
    names.iter().try_fold(0, |mask, name| {
        parse_modifier(name)
            .map(|m| mask | m)
            .ok_or_else(|| ConfigError::UnknownModifier(name.clone()))
    })
}

fn key(modifiers: u32, keysym: &str, action: Action) -> KeyBinding {
    KeyBinding {
        modifiers,
        keysym: keysym.to_string(),
        action,
    }
}

pub fn default_keys(num_tags: u32) -> Vec<KeyBinding> {
    let spawn = |program: &str| Action::Spawn {
        command: vec![program.to_string()],
    };
    let mut keys = vec![
        key(MODKEY | MOD_SHIFT, "Return", spawn(TERMINAL)),
        key(MODKEY, "p", spawn("dmenu_run")),
        key(MODKEY, "b", Action::ToggleBar),
        key(MODKEY, "j", Action::FocusStack { delta: 1 }),
        key(MODKEY, "k", Action::FocusStack { delta: -1 }),
        key(MODKEY, "i", Action::IncMasterSplit { delta: 1 }),
        key(MODKEY, "d", Action::IncMasterSplit { delta: -1 }),
        key(MODKEY, "h", Action::SetMasterFactor { value: -0.05 }),
        key(MODKEY, "l", Action::SetMasterFactor { value: 0.05 }),
        key(MODKEY, "Return", Action::Zoom),
        key(MODKEY, "Tab", Action::View { tags: 0 }),
        key(MODKEY, "BackSpace", Action::Rewind),
        key(MODKEY | MOD_SHIFT, "c", Action::KillClient),
        key(MODKEY, "t", Action::SetLayout { index: Some(0) }),
        key(MODKEY, "f", Action::SetLayout { index: Some(1) }),
        key(MODKEY, "m", Action::SetLayout { index: Some(2) }),
        key(MODKEY, "v", Action::SetLayout { index: Some(3) }),
        key(MODKEY, "space", Action::SetLayout { index: None }),
        key(
            MODKEY | MOD_CONTROL,
            "t",
            Action::RotateAxis {
                target: AxisTarget::Split,
            },
        ),
        key(
            MODKEY | MOD_CONTROL,
            "Tab",
            Action::RotateAxis {
                target: AxisTarget::Master,
            },
        ),
        key(
            MODKEY | MOD_CONTROL | MOD_SHIFT,
            "Tab",
            Action::RotateAxis {
                target: AxisTarget::Stack,
            },
        ),
        key(MODKEY | MOD_CONTROL, "m", Action::MirrorLayout),
        key(MODKEY | MOD_SHIFT, "space", Action::ToggleFloating),
        key(MODKEY | MOD_SHIFT, "f", Action::ToggleFullscreen),
        key(MODKEY, "0", Action::ViewAll),
        key(MODKEY | MOD_SHIFT, "0", Action::TagAll),
        key(MODKEY, "comma", Action::FocusMonitor { delta: -1 }),
        key(MODKEY, "period", Action::FocusMonitor { delta: 1 }),
        key(MODKEY | MOD_SHIFT, "comma", Action::SendToMonitor { delta: -1 }),
        key(MODKEY | MOD_SHIFT, "period", Action::SendToMonitor { delta: 1 }),
        key(
            MODKEY | MOD_CONTROL,
            "comma",
            Action::MoveTagsetToMonitor {
                delta: -1,
                all: false,
            },
        ),
        key(
            MODKEY | MOD_CONTROL,
            "period",
            Action::MoveTagsetToMonitor {
                delta: 1,
                all: false,
            },
        ),
        key(MODKEY, "r", Action::RotateMonitors { all_views: false }),
        key(MODKEY | MOD_SHIFT, "r", Action::RotateMonitors { all_views: true }),
        key(MODKEY | MOD_SHIFT, "q", Action::Quit),
    ];

    // Number keys only reach the first nine tags
    for i in 0..num_tags.min(9) {
        let keysym = (i + 1).to_string();
        let tags = 1 << i;
        keys.push(key(MODKEY, &keysym, Action::View { tags }));
        keys.push(key(MODKEY | MOD_CONTROL, &keysym, Action::ToggleView { tags }));
        keys.push(key(MODKEY | MOD_SHIFT, &keysym, Action::Tag { tags }));
        keys.push(key(
            MODKEY | MOD_CONTROL | MOD_SHIFT,
            &keysym,
            Action::ToggleTag { tags },
        ));
    }
    keys
}

pub fn default_buttons() -> Vec<ButtonBinding> {
    let button = |click, modifiers, button, action| ButtonBinding {
        click,
        modifiers,
        button,
        action,
    };
    vec![
        button(ClickRegion::LayoutSymbol, 0, 1, Action::SetLayout { index: None }),
        button(ClickRegion::LayoutSymbol, 0, 3, Action::SetLayout { index: Some(2) }),
        button(ClickRegion::WindowTitle, 0, 2, Action::Zoom),
        button(
            ClickRegion::StatusText,
            0,
            2,
            Action::Spawn {
                command: vec![TERMINAL.to_string()],
            },
        ),
        button(ClickRegion::ClientWindow, MODKEY, 1, Action::MoveMouse),
        button(ClickRegion::ClientWindow, MODKEY, 2, Action::ToggleFloating),
        button(ClickRegion::ClientWindow, MODKEY, 3, Action::ResizeMouse),
        button(ClickRegion::TagBar, 0, 1, Action::View { tags: 0 }),
        button(ClickRegion::TagBar, 0, 3, Action::ToggleView { tags: 0 }),
        button(ClickRegion::TagBar, MODKEY, 1, Action::Tag { tags: 0 }),
        button(ClickRegion::TagBar, MODKEY, 3, Action::ToggleTag { tags: 0 }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoji_ipc::config::MOD_4;
    use shoji_ipc::{AttachMode, LayoutKind};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config.tags.len(), 9);
        assert_eq!(config.layouts.len(), 4);
        assert_eq!(config.layouts[0].kind, LayoutKind::Tile);
        assert_eq!(config.mfact, 0.55);
        assert_eq!(config.attach_mode, AttachMode::Head);
        assert!(!config.buttons.is_empty());
        // 35 fixed bindings plus four per tag
        assert_eq!(config.keys.len(), 35 + 9 * 4);
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let json = r#"{
            "rules": [
                {"class": "Gimp", "tags": 16, "is_floating": true},
                {"class": 42}
            ],
            "layouts": [{"kind": "monocle"}, {"kind": "spiral"}],
            "keys": [
                {"modifiers": ["super"], "key": "Return", "action": {"type": "zoom"}},
                {"modifiers": ["hyper"], "key": "x", "action": {"type": "quit"}},
                {"key": "y", "action": {"type": "explode"}}
            ]
        }"#;
        let config = parse(json).unwrap();
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].class.as_deref(), Some("Gimp"));
        assert_eq!(config.layouts, vec![LayoutSpec::new(LayoutKind::Monocle)]);
        assert_eq!(
            config.keys,
            vec![KeyBinding {
                modifiers: MOD_4,
                keysym: "Return".to_string(),
                action: Action::Zoom,
            }]
        );
    }

    #[test]
    fn test_tag_count_limits() {
        let file = ConfigFile {
            tags: vec![],
            ..Default::default()
        };
        assert_eq!(from_file(file).unwrap_err(), ConfigError::TagCount(0));

        let file = ConfigFile {
            tags: (0..32).map(|i| i.to_string()).collect(),
            ..Default::default()
        };
        assert_eq!(from_file(file).unwrap_err(), ConfigError::TagCount(32));

        let file = ConfigFile {
            tags: (0..MAX_TAGS).map(|i| i.to_string()).collect(),
            ..Default::default()
        };
        assert_eq!(from_file(file).unwrap().num_tags(), MAX_TAGS);
    }

    #[test]
    fn test_no_valid_layout_is_an_error() {
        let file = ConfigFile {
            layouts: vec![serde_json::json!({"kind": "spiral"})],
            ..Default::default()
        };
        assert_eq!(from_file(file).unwrap_err(), ConfigError::NoLayouts);
    }

    #[test]
    fn test_mfact_is_clamped() {
        let config = parse(r#"{"mfact": 0.95}"#).unwrap();
        assert_eq!(config.mfact, 0.9);
    }

    #[test]
    fn test_invalid_tag_layouts_dropped() {
        let config = parse(r#"{"tag_layouts": {"0": 2, "1": 9, "40": 0}}"#).unwrap();
        assert_eq!(config.tag_layouts.len(), 1);
        assert_eq!(config.layout_for_tag(1), Some(2));
    }

    #[test]
    fn test_default_keys_follow_tag_count() {
        let keys = default_keys(3);
        assert!(keys
            .iter()
            .any(|k| k.keysym == "3" && k.action == Action::View { tags: 0b100 }));
        assert!(!keys.iter().any(|k| k.keysym == "4"));
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let result = load(Some(Path::new("/nonexistent/shoji/config.json")));
        assert!(result.is_err());
    }
}
