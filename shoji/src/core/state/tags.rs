use shoji_ipc::DisplayRequest;

use super::super::{derive_cur_tag, MonitorId, Tag};
use super::arrange::arrange;
use super::focus::focus;
use super::registry::refresh_selection;
use super::State;

/// Switch the selected monitor to `mask`. Zero toggles back to the
/// previous distinct view.
pub fn view(state: &mut State, mask: u32) {
    let mon = state.selmon;
    let all = state.config.tag_mask();
    let current = state.monitors[mon].tagset;

    let target = if mask == 0 {
        let occupied = state.occupied_tags(mon);
        match state.monitors[mon]
            .views
            .find_toggle_tagset(current, occupied, state.config.num_tags())
        {
            Some(tagset) => tagset,
            None => {
                tracing::debug!("No previous view on monitor {}", mon);
                return;
            }
        }
    } else {
        Tag::from_mask(mask).intersection(all)
    };

    if !view_on_monitor(state, mon, target) {
        return;
    }
    focus(state, None);
    arrange(state, Some(mon));
}

/// Make `tagset` the visible view of `mon`, recording the outgoing view.
/// Returns false when nothing changed.
pub fn view_on_monitor(state: &mut State, mon: MonitorId, tagset: Tag) -> bool {
    let all = state.config.tag_mask();
    let tagset = tagset.intersection(all);
    let Some(monitor) = state.monitors.get(mon) else {
        return false;
    };
    if tagset.is_empty() || monitor.tagset == tagset {
        return false;
    }

    let cur_tag = derive_cur_tag(tagset, monitor.cur_tag, all);
    let mut defaults = monitor.params();
    if let Some(layout) = state.config.layout_for_tag(cur_tag) {
        defaults.layouts = [layout, defaults.layout()];
        defaults.sel_layout = 0;
    }

    let bar_height = state.config.bar_height;
    let monitor = &mut state.monitors[mon];
    tracing::info!(
        "View on monitor {}: {:#x} -> {:#x} (tag {} -> {})",
        mon,
        monitor.tagset.mask(),
        tagset.mask(),
        monitor.cur_tag,
        cur_tag
    );

    let outgoing = monitor.params();
    let previous = monitor.tagset;
    monitor.views.push(previous, outgoing, false);
    let params = monitor.views.push(tagset, defaults, true).params;

    monitor.tagset = tagset;
    monitor.cur_tag = cur_tag;
    monitor.set_params(params);
    monitor.update_bar_pos(bar_height);
    let frame = monitor.bar_frame(bar_height);
    state.request(DisplayRequest::MoveBar { monitor: mon, frame });

    refresh_selection(state, mon);
    true
}

pub fn toggle_view(state: &mut State, mask: u32) {
    let mon = state.selmon;
    let toggled = Tag::from_mask(mask).intersection(state.config.tag_mask());
    let tagset = state.monitors[mon].tagset.toggle(toggled);
    if tagset.is_empty() {
        tracing::debug!("Refusing to toggle monitor {} to an empty view", mon);
        return;
    }
    if !view_on_monitor(state, mon, tagset) {
        return;
    }
    focus(state, None);
    arrange(state, Some(mon));
}

/// Replace the tags of the selected client.
pub fn tag(state: &mut State, mask: u32) {
    let tags = Tag::from_mask(mask).intersection(state.config.tag_mask());
    if tags.is_empty() {
        return;
    }
    let Some(id) = state.selected_client() else {
        return;
    };
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    tracing::info!(
        "Tag client {:#x}: {:#x} -> {:#x}",
        id,
        client.tags.mask(),
        tags.mask()
    );
    client.tags = tags;

    let mon = state.selmon;
    focus(state, None);
    arrange(state, Some(mon));
    clear_tags(state, mon);
}

/// Toggle tags of the selected client. A result without any tag is refused.
pub fn toggle_tag(state: &mut State, mask: u32) {
    let toggled = Tag::from_mask(mask).intersection(state.config.tag_mask());
    let Some(id) = state.selected_client() else {
        return;
    };
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    let tags = client.tags.toggle(toggled);
    if tags.is_empty() {
        tracing::debug!("Refusing to leave client {:#x} without tags", id);
        return;
    }
    tracing::info!(
        "Toggle tags of client {:#x}: {:#x} -> {:#x}",
        id,
        client.tags.mask(),
        tags.mask()
    );
    client.tags = tags;

    let mon = state.selmon;
    focus(state, None);
    arrange(state, Some(mon));
    clear_tags(state, mon);
}

/// Return to the view below the current one in the history.
pub fn rewind(state: &mut State) {
    let mon = state.selmon;
    let all = state.config.tag_mask();
    let bar_height = state.config.bar_height;
    let monitor = &mut state.monitors[mon];
    let Some(view) = monitor.views.rewind().cloned() else {
        tracing::debug!("Nothing to rewind on monitor {}", mon);
        return;
    };

    tracing::info!(
        "Rewind monitor {}: {:#x} -> {:#x}",
        mon,
        monitor.tagset.mask(),
        view.tagset.mask()
    );
    monitor.cur_tag = derive_cur_tag(view.tagset, monitor.cur_tag, all);
    monitor.tagset = view.tagset;
    monitor.set_params(view.params);
    monitor.update_bar_pos(bar_height);
    let frame = monitor.bar_frame(bar_height);
    state.request(DisplayRequest::MoveBar { monitor: mon, frame });

    refresh_selection(state, mon);
    focus(state, None);
    arrange(state, Some(mon));
}

/// Narrow the view of `mon` to the tags its visible clients actually use.
/// An all-tags view is left alone. An emptied view falls back to a spare one.
pub fn clear_tags(state: &mut State, mon: MonitorId) {
    let Some(monitor) = state.monitors.get(mon) else {
        return;
    };
    if monitor.cur_tag == 0 {
        return;
    }

    let tagset = monitor.tagset;
    let used = monitor
        .clients
        .iter()
        .filter_map(|id| state.clients.get(id))
        .filter(|c| c.is_focusable())
        .fold(Tag::default(), |acc, c| {
            acc.union(c.tags.intersection(tagset))
        });

    let changed = if used.is_empty() {
        fallback_if_empty(state, mon)
    } else if used != tagset {
        tracing::debug!(
            "Clearing unused tags on monitor {}: {:#x} -> {:#x}",
            mon,
            tagset.mask(),
            used.mask()
        );
        view_on_monitor(state, mon, used)
    } else {
        false
    };

    if changed {
        focus(state, None);
        arrange(state, Some(mon));
    }
}

/// Switch an empty view to a spare tagset that has clients.
/// Returns whether the view changed.
pub fn fallback_if_empty(state: &mut State, mon: MonitorId) -> bool {
    let Some(monitor) = state.monitors.get(mon) else {
        return false;
    };
    let tagset = monitor.tagset;
    let has_visible = monitor.clients.iter().any(|id| {
        state
            .clients
            .get(id)
            .is_some_and(|c| c.is_focusable() && c.is_visible_in(tagset))
    });
    if has_visible {
        return false;
    }

    let occupied = state.occupied_tags(mon);
    let Some(spare) = monitor
        .views
        .find_spare_tagset(tagset, occupied, state.config.num_tags())
    else {
        return false;
    };
    if !spare.intersects(occupied) {
        return false;
    }
    tracing::debug!(
        "Monitor {} view {:#x} is empty, falling back to {:#x}",
        mon,
        tagset.mask(),
        spare.mask()
    );
    view_on_monitor(state, mon, spare)
}
