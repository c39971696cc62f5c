use std::collections::HashMap;

use super::{Client, Config, Monitor, MonitorId, RulesEngine, Tag, WindowId};
use crate::effect::Effect;
use shoji_ipc::{Action, ClientInfo, DisplayEvent, DisplayRequest, MonitorInfo, Rect, StateInfo};

mod actions;
mod arrange;
mod bar;
mod events;
mod focus;
mod mouse;
mod registry;
mod rules;
mod tags;
mod topology;

pub use mouse::Drag;

/// The whole window-manager state. Every mutation runs to completion inside
/// one event or command; display requests pile up in `effects` until the
/// caller drains them.
pub struct State {
    pub clients: HashMap<WindowId, Client>,
    pub monitors: Vec<Monitor>,
    pub selmon: MonitorId,
    pub screen: Rect,
    pub config: Config,
    pub rules_engine: RulesEngine,
    pub status_text: String,
    /// Last known pointer position in root coordinates
    pub pointer: (i32, i32),
    pub drag: Option<Drag>,
    pub running: bool,
    /// Monitor the pointer was last seen on by a motion event
    pub(crate) motion_monitor: Option<MonitorId>,
    /// Set while monitors are being rotated; arrange passes are skipped
    pub(crate) topology_busy: bool,
    effects: Vec<Effect>,
}

impl State {
    pub fn new(mut config: Config, screen: Rect) -> Self {
        let rules = std::mem::take(&mut config.rules);
        let monitor = Monitor::new(0, screen, &config);
        let mut state = Self {
            clients: HashMap::new(),
            monitors: vec![monitor],
            selmon: 0,
            screen,
            config,
            rules_engine: RulesEngine::with_rules(rules),
            status_text: format!("shoji-{}", env!("CARGO_PKG_VERSION")),
            pointer: (0, 0),
            drag: None,
            running: true,
            motion_monitor: None,
            topology_busy: false,
            effects: Vec::new(),
        };
        bar::update_bars(&mut state);
        arrange::arrange(&mut state, None);
        state
    }

    pub(crate) fn request(&mut self, request: DisplayRequest) {
        self.effects.push(Effect::Request(request));
    }

    pub(crate) fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Drain everything queued since the last call, in emission order.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // Event and action entry points - delegated to state/events.rs and state/actions.rs

    pub fn handle_event(&mut self, event: DisplayEvent) {
        events::handle_event(self, event);
    }

    pub fn dispatch(&mut self, action: &Action) {
        actions::dispatch(self, action);
    }

    // Queries

    pub fn selected_client(&self) -> Option<WindowId> {
        self.monitors.get(self.selmon).and_then(|m| m.sel)
    }

    /// Whether the client shares a tag with its monitor's current view
    pub fn is_visible(&self, id: WindowId) -> bool {
        let Some(client) = self.clients.get(&id) else {
            return false;
        };
        self.monitors
            .get(client.monitor)
            .is_some_and(|m| client.is_visible_in(m.tagset))
    }

    /// Visible clients of `mon` in ownership order
    pub fn visible_clients(&self, mon: MonitorId) -> Vec<WindowId> {
        let Some(monitor) = self.monitors.get(mon) else {
            return vec![];
        };
        monitor
            .clients
            .iter()
            .filter(|id| {
                self.clients
                    .get(id)
                    .is_some_and(|c| c.is_visible_in(monitor.tagset))
            })
            .copied()
            .collect()
    }

    /// Visible clients taking part in the arrange pass, in ownership order
    pub fn tiled_clients(&self, mon: MonitorId) -> Vec<WindowId> {
        self.visible_clients(mon)
            .into_iter()
            .filter(|id| self.clients.get(id).is_some_and(|c| c.is_tileable()))
            .collect()
    }

    /// Union of the tags of every client on `mon`
    pub fn occupied_tags(&self, mon: MonitorId) -> Tag {
        let Some(monitor) = self.monitors.get(mon) else {
            return Tag::default();
        };
        monitor
            .clients
            .iter()
            .filter_map(|id| self.clients.get(id))
            .fold(Tag::default(), |acc, c| acc.union(c.tags))
    }

    /// Whether the active layout of `mon` positions clients itself
    pub fn arranges(&self, mon: MonitorId) -> bool {
        self.monitors
            .get(mon)
            .is_some_and(|m| self.config.layout_kind(m.layout_index()).arranges())
    }

    pub fn state_info(&self) -> StateInfo {
        let monitor = self.monitors.get(self.selmon);
        StateInfo {
            selected_monitor: self.selmon,
            tagset: monitor.map(|m| m.tagset.mask()).unwrap_or(0),
            selected_client: self.selected_client(),
            client_count: self.clients.len(),
            monitor_count: self.monitors.len(),
            layout_symbol: monitor.map(|m| m.layout_symbol.clone()).unwrap_or_default(),
        }
    }

    /// Clients grouped by monitor, each in ownership order
    pub fn client_infos(&self) -> Vec<ClientInfo> {
        let selected = self.selected_client();
        self.monitors
            .iter()
            .flat_map(|m| m.clients.iter())
            .filter_map(|id| self.clients.get(id))
            .map(|c| ClientInfo {
                id: c.id,
                title: c.name.clone(),
                class: c.class.clone(),
                instance: c.instance.clone(),
                monitor: c.monitor,
                tags: c.tags.mask(),
                x: c.frame.x,
                y: c.frame.y,
                width: c.frame.width,
                height: c.frame.height,
                is_floating: c.is_floating,
                is_fullscreen: c.is_fullscreen,
                is_urgent: c.is_urgent,
                is_selected: selected == Some(c.id),
            })
            .collect()
    }

    pub fn monitor_infos(&self) -> Vec<MonitorInfo> {
        self.monitors
            .iter()
            .enumerate()
            .map(|(i, m)| MonitorInfo {
                num: i,
                x: m.frame.x,
                y: m.frame.y,
                width: m.frame.width,
                height: m.frame.height,
                tagset: m.tagset.mask(),
                cur_tag: m.cur_tag,
                layout_symbol: m.layout_symbol.clone(),
                client_count: m.clients.len(),
                views: m.views.tagsets(),
                is_selected: i == self.selmon,
            })
            .collect()
    }
}
