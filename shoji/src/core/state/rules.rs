use shoji_ipc::{BorderScheme, ClientState, DisplayRequest, MapInfo};

use super::super::{Client, Tag, WindowId};
use super::arrange::{arrange, update_client_list};
use super::bar::draw_bar;
use super::focus::{focus, set_urgent, unfocus};
use super::mouse::set_fullscreen;
use super::registry::{attach_new, attach_stack, detach, detach_stack};
use super::tags::{clear_tags, view_on_monitor};
use super::State;

/// Resolve tags, floating state and monitor of a freshly created client.
/// Clients without a matching tag land on their monitor's current view.
pub fn apply_rules(state: &mut State, id: WindowId) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let outcome = state
        .rules_engine
        .apply(&client.class, &client.instance, &client.name);
    let monitor = outcome
        .monitor
        .filter(|m| *m < state.monitors.len())
        .unwrap_or(client.monitor);
    let tags = Tag::from_mask(outcome.tags).intersection(state.config.tag_mask());
    let tags = if tags.is_empty() {
        state.monitors[monitor].tagset
    } else {
        tags
    };

    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    client.monitor = monitor;
    client.tags = tags;
    if let Some(floating) = outcome.is_floating {
        client.is_floating = floating;
    }
    if let Some(no_focus) = outcome.no_focus {
        client.no_focus = no_focus;
    }
    if let Some(no_border) = outcome.no_border {
        client.no_border = no_border;
    }
    if let Some(opacity) = outcome.opacity {
        client.opacity = opacity;
    }
    if let Some(remap) = outcome.mouse_remap {
        client.mouse_remap = remap;
    }
    tracing::debug!(
        "Rules for {:#x} ({}/{}): tags={:#x} monitor={} floating={}",
        id,
        client.class,
        client.instance,
        tags.mask(),
        monitor,
        client.is_floating
    );
}

/// Start managing a mapped window.
pub fn manage(state: &mut State, info: MapInfo) {
    let id = info.window;
    if state.clients.contains_key(&id) {
        tracing::debug!("Window {:#x} is already managed", id);
        return;
    }

    let mut client = Client::from_map_info(&info, state.selmon);
    let parent = info
        .transient_for
        .and_then(|p| state.clients.get(&p))
        .map(|p| (p.monitor, p.tags));
    if let Some((monitor, tags)) = parent {
        client.monitor = monitor;
        client.tags = tags;
    }
    state.clients.insert(id, client);
    if parent.is_none() {
        apply_rules(state, id);
    }

    let screen = state.screen;
    let border_width = state.config.border_width;
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    let mon = client.monitor;
    let area = state.monitors[mon].work_area;

    client.border_width = if client.no_border { 0 } else { border_width };
    if client.frame.x + client.outer_width() > area.right() {
        client.frame.x = area.right() - client.outer_width();
    }
    if client.frame.y + client.outer_height() > area.bottom() {
        client.frame.y = area.bottom() - client.outer_height();
    }
    client.frame.x = client.frame.x.max(area.x);
    client.frame.y = client.frame.y.max(area.y);
    if !client.is_floating {
        client.is_floating = info.transient_for.is_some() || client.is_fixed || info.is_dialog;
    }

    let (frame, bw, opacity, floating) = (
        client.frame,
        client.border_width,
        client.opacity,
        client.is_floating,
    );
    tracing::info!(
        "Manage {:#x} ({}) on monitor {}: {:?} tags={:#x} floating={}",
        id,
        client.class,
        mon,
        frame,
        client.tags.mask(),
        floating
    );

    state.request(DisplayRequest::SetBorderWidth {
        window: id,
        border_width: bw,
    });
    state.request(DisplayRequest::SetBorder {
        window: id,
        scheme: BorderScheme::Normal,
    });
    state.request(DisplayRequest::SendConfigure {
        window: id,
        frame,
        border_width: bw,
    });
    if opacity < 1.0 {
        state.request(DisplayRequest::SetOpacity {
            window: id,
            opacity,
        });
    }
    if floating {
        state.request(DisplayRequest::Raise { window: id });
    }

    if let Err(e) = attach_new(state, id).and_then(|_| attach_stack(state, id)) {
        tracing::warn!("Failed to attach {:#x}: {}", id, e);
    }
    update_client_list(state);
    // Off screen until the arrange pass places it
    state.request(DisplayRequest::Move {
        window: id,
        x: frame.x + 2 * screen.width,
        y: frame.y,
    });
    state.request(DisplayRequest::SetClientState {
        window: id,
        state: ClientState::Normal,
    });

    reveal_or_flag(state, id);

    let focusable = state.clients.get(&id).is_some_and(|c| c.is_focusable());
    if state.is_visible(id) && focusable {
        if mon == state.selmon {
            if let Some(previous) = state.selected_client() {
                unfocus(state, previous, false);
            }
        }
        state.monitors[mon].sel = Some(id);
    }

    arrange(state, Some(mon));
    state.request(DisplayRequest::Map { window: id });
    focus(state, None);

    if info.wants_fullscreen {
        set_fullscreen(state, id, true);
    }
}

/// A client landing outside the view either brings its tags into view when
/// nothing else lives there, or gets flagged urgent.
fn reveal_or_flag(state: &mut State, id: WindowId) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let mon = client.monitor;
    let tags = client.tags;
    if client.no_focus || state.is_visible(id) {
        return;
    }

    let shared = state.monitors[mon].clients.iter().any(|other| {
        *other != id
            && state
                .clients
                .get(other)
                .is_some_and(|c| c.is_focusable() && c.tags.intersects(tags))
    });
    if shared {
        tracing::debug!("Client {:#x} mapped on hidden busy tags, flagging", id);
        set_urgent(state, id, true);
        draw_bar(state, mon);
    } else {
        let tagset = state.monitors[mon].tagset.union(tags);
        view_on_monitor(state, mon, tagset);
    }
}

/// Stop managing a window. Withdrawn windows get their border back.
pub fn unmanage(state: &mut State, id: WindowId, destroyed: bool) {
    let Some(client) = state.clients.get(&id) else {
        tracing::debug!("Unmanage of unknown window {:#x}", id);
        return;
    };
    let mon = client.monitor;
    let old_border_width = client.old_border_width;

    if state.drag.is_some_and(|d| d.window == id) {
        state.drag = None;
        state.request(DisplayRequest::UngrabPointer);
    }
    if let Err(e) = detach(state, id).and_then(|_| detach_stack(state, id)) {
        tracing::warn!("Failed to detach {:#x}: {}", id, e);
    }
    if !destroyed {
        state.request(DisplayRequest::SetBorderWidth {
            window: id,
            border_width: old_border_width,
        });
        state.request(DisplayRequest::SetClientState {
            window: id,
            state: ClientState::Withdrawn,
        });
    }
    state.clients.remove(&id);
    tracing::info!("Unmanaged {:#x} (destroyed: {})", id, destroyed);

    focus(state, None);
    update_client_list(state);
    arrange(state, Some(mon));
    clear_tags(state, mon);
}
