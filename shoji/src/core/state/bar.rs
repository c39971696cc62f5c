use shoji_ipc::{BarState, DisplayRequest};

use super::super::{MonitorId, Tag};
use super::arrange::arrange;
use super::State;

/// Publish the bar contents of one monitor.
pub fn draw_bar(state: &mut State, mon: MonitorId) {
    let Some(monitor) = state.monitors.get(mon) else {
        return;
    };
    if !monitor.show_bar {
        return;
    }

    let (occupied, urgent) = monitor
        .clients
        .iter()
        .filter_map(|id| state.clients.get(id))
        .fold((Tag::default(), Tag::default()), |(occ, urg), c| {
            let urg = if c.is_urgent { urg.union(c.tags) } else { urg };
            (occ.union(c.tags), urg)
        });
    let selected = monitor.sel.and_then(|id| state.clients.get(&id));
    let is_selected_monitor = mon == state.selmon;

    let bar = BarState {
        tag_names: state.config.tags.clone(),
        selected_tags: monitor.tagset.mask(),
        occupied_tags: occupied.mask(),
        urgent_tags: urgent.mask(),
        layout_symbol: monitor.layout_symbol.clone(),
        title: selected.map(|c| c.name.clone()),
        title_floating: selected.is_some_and(|c| c.is_floating),
        status: is_selected_monitor.then(|| state.status_text.clone()),
        is_selected_monitor,
    };
    state.request(DisplayRequest::DrawBar { monitor: mon, bar });
}

pub fn draw_bars(state: &mut State) {
    for mon in 0..state.monitors.len() {
        draw_bar(state, mon);
    }
}

/// Recompute the work area of `mon` and move its bar window.
pub fn update_bar_pos(state: &mut State, mon: MonitorId) {
    let bar_height = state.config.bar_height;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return;
    };
    monitor.update_bar_pos(bar_height);
    let frame = monitor.bar_frame(bar_height);
    state.request(DisplayRequest::MoveBar { monitor: mon, frame });
}

pub fn update_bars(state: &mut State) {
    for mon in 0..state.monitors.len() {
        update_bar_pos(state, mon);
    }
}

/// Show or hide the bar of the selected monitor for the current view.
pub fn toggle_bar(state: &mut State) {
    let mon = state.selmon;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return;
    };
    monitor.show_bar = !monitor.show_bar;
    tracing::info!("Bar on monitor {}: shown={}", mon, monitor.show_bar);

    let params = monitor.params();
    let tagset = monitor.tagset;
    monitor.views.push(tagset, params, false);

    update_bar_pos(state, mon);
    arrange(state, Some(mon));
}
