pub mod action;
pub mod command;
pub mod config;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod request;

pub use action::Action;
pub use command::{ClientInfo, Command, MonitorInfo, Response, StateInfo};
pub use config::{
    clean_mask, parse_modifier, AttachMode, ButtonBinding, ButtonRemap, ConfigFile, KeyBinding,
    RawButtonBinding, RawKeyBinding, Rule,
};
pub use event::{ClickRegion, DisplayEvent, FullscreenAction, MapInfo, Property};
pub use geometry::{Rect, SizeHints};
pub use layout::{Arrangement, AxisTarget, LayoutAxis, LayoutKind, LayoutSpec, SplitAxis};
pub use request::{BarState, BorderScheme, ClientState, Cursor, DisplayRequest};
