use shoji_ipc::Rect;

use super::super::{derive_cur_tag, Monitor, MonitorId, Tag, ViewParams, ViewStack, WindowId};
use super::arrange::arrange;
use super::focus::{focus, unfocus};
use super::registry::{attach, attach_stack, detach, detach_stack, refresh_selection};
use super::tags::{clear_tags, fallback_if_empty, view_on_monitor};
use super::State;

/// Reconcile monitors with the reported outputs. Duplicate outputs collapse
/// into one monitor and an empty list means a single screen-sized monitor.
/// Returns whether anything changed.
pub fn update_geometry(state: &mut State, screen: Rect, outputs: &[Rect]) -> bool {
    let mut unique: Vec<Rect> = Vec::new();
    for output in outputs {
        if !unique.contains(output) {
            unique.push(*output);
        }
    }
    if unique.is_empty() {
        unique.push(screen);
    }

    let mut dirty = state.screen != screen;
    state.screen = screen;
    let bar_height = state.config.bar_height;

    while state.monitors.len() < unique.len() {
        let num = state.monitors.len();
        tracing::info!("Monitor {} added: {:?}", num, unique[num]);
        state
            .monitors
            .push(Monitor::new(num, unique[num], &state.config));
        dirty = true;
    }

    for (monitor, frame) in state.monitors.iter_mut().zip(&unique) {
        if monitor.frame != *frame {
            tracing::info!(
                "Monitor {} geometry: {:?} -> {:?}",
                monitor.num,
                monitor.frame,
                frame
            );
            monitor.frame = *frame;
            monitor.update_bar_pos(bar_height);
            dirty = true;
        }
    }

    if state.monitors.len() > unique.len() {
        dirty = true;
        let removed: Vec<Monitor> = state.monitors.drain(unique.len()..).collect();
        for monitor in removed {
            tracing::info!(
                "Monitor {} removed, {} clients move to monitor 0",
                monitor.num,
                monitor.clients.len()
            );
            for id in &monitor.clients {
                if let Some(client) = state.clients.get_mut(id) {
                    client.monitor = 0;
                }
            }
            let first = &mut state.monitors[0];
            first.clients.extend(monitor.clients);
            first.stack.extend(monitor.stack);
        }
        refresh_selection(state, 0);
        if state.selmon >= state.monitors.len() {
            let (x, y) = state.pointer;
            state.selmon = monitor_at(state, Rect::new(x, y, 1, 1));
        }
    }

    dirty
}

/// Monitor whose work area overlaps `rect` the most, the selected one on ties
/// at zero.
pub fn monitor_at(state: &State, rect: Rect) -> MonitorId {
    let mut best = state.selmon.min(state.monitors.len().saturating_sub(1));
    let mut best_area = 0;
    for (i, monitor) in state.monitors.iter().enumerate() {
        let area = monitor.work_area.intersect_area(&rect);
        if area > best_area {
            best = i;
            best_area = area;
        }
    }
    best
}

pub fn dir_to_monitor(state: &State, delta: i32) -> MonitorId {
    let n = state.monitors.len() as i64;
    if n == 0 {
        return 0;
    }
    (state.selmon as i64 + i64::from(delta)).rem_euclid(n) as usize
}

/// Shift a floating client's frame from one monitor origin to another.
fn carry_floating(state: &mut State, id: WindowId, from: Rect, to: Rect) {
    if let Some(client) = state.clients.get_mut(&id) {
        if client.is_floating {
            client.frame.x += to.x - from.x;
            client.frame.y += to.y - from.y;
        }
    }
}

/// Re-home a client on `target`, at the head of both lists. With `carry` a
/// floating client keeps its offset relative to the monitor origin.
pub fn change_monitor(state: &mut State, id: WindowId, target: MonitorId, carry: bool) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let src = client.monitor;
    if src == target || target >= state.monitors.len() {
        return;
    }

    if let Err(e) = detach(state, id).and_then(|_| detach_stack(state, id)) {
        tracing::warn!("Moving {:#x} off monitor {}: {}", id, src, e);
    }
    if carry {
        let (from, to) = (state.monitors[src].frame, state.monitors[target].frame);
        carry_floating(state, id, from, to);
    }
    if let Some(client) = state.clients.get_mut(&id) {
        client.monitor = target;
    }
    if let Err(e) = attach(state, id).and_then(|_| attach_stack(state, id)) {
        tracing::warn!("Moving {:#x} onto monitor {}: {}", id, target, e);
    }
}

/// Move a client to `target`, adopting the tags that monitor currently shows.
pub fn send_client_to_monitor(state: &mut State, id: WindowId, target: MonitorId, carry: bool) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let src = client.monitor;
    if src == target || target >= state.monitors.len() {
        return;
    }

    tracing::info!("Send client {:#x}: monitor {} -> {}", id, src, target);
    unfocus(state, id, true);
    change_monitor(state, id, target, carry);
    let tagset = state.monitors[target].tagset;
    if let Some(client) = state.clients.get_mut(&id) {
        client.tags = tagset;
    }
    focus(state, None);
    arrange(state, None);
    clear_tags(state, src);
}

pub fn send_to_monitor(state: &mut State, delta: i32) {
    let Some(sel) = state.selected_client() else {
        return;
    };
    if state.monitors.len() < 2 {
        return;
    }
    let target = dir_to_monitor(state, delta);
    send_client_to_monitor(state, sel, target, true);
}

/// Move every client visible in the selected view, or every client of the
/// selected monitor when `all`, to the monitor `delta` steps away. The view
/// travels along and the destination becomes selected.
pub fn move_tagset_to_monitor(state: &mut State, delta: i32, all: bool) {
    if state.monitors.len() < 2 {
        return;
    }
    let src = state.selmon;
    let dst = dir_to_monitor(state, delta);
    if src == dst {
        return;
    }

    let mask = if all {
        state.config.tag_mask()
    } else {
        state.monitors[src].tagset
    };
    let clients = &state.clients;
    let matches = |id: &WindowId| clients.get(id).is_some_and(|c| c.tags.intersects(mask));
    let source = &state.monitors[src];
    let moving: Vec<WindowId> = source.clients.iter().copied().filter(matches).collect();
    let moving_stack: Vec<WindowId> = source.stack.iter().copied().filter(matches).collect();
    tracing::info!(
        "Move tagset {:#x} ({} clients): monitor {} -> {}",
        mask.mask(),
        moving.len(),
        src,
        dst
    );

    let (from, to) = (state.monitors[src].frame, state.monitors[dst].frame);
    for id in &moving {
        carry_floating(state, *id, from, to);
        if let Some(client) = state.clients.get_mut(id) {
            client.monitor = dst;
        }
    }

    let source = &mut state.monitors[src];
    source.clients.retain(|id| !moving.contains(id));
    source.stack.retain(|id| !moving.contains(id));
    let (src_tagset, src_cur_tag, src_params) = (source.tagset, source.cur_tag, source.params());
    let src_views = all.then(|| source.views.clone());

    let dest = &mut state.monitors[dst];
    dest.clients.splice(0..0, moving);
    dest.stack.splice(0..0, moving_stack);

    match src_views {
        Some(views) => {
            let bar_height = state.config.bar_height;
            let dest = &mut state.monitors[dst];
            dest.views = views;
            dest.tagset = src_tagset;
            dest.cur_tag = src_cur_tag;
            dest.set_params(src_params);
            dest.update_bar_pos(bar_height);
        }
        None => {
            view_on_monitor(state, dst, mask);
            let bar_height = state.config.bar_height;
            let dest = &mut state.monitors[dst];
            dest.set_params(src_params);
            let tagset = dest.tagset;
            dest.views.push(tagset, src_params, false);
            dest.update_bar_pos(bar_height);
        }
    }

    refresh_selection(state, src);
    refresh_selection(state, dst);
    fallback_if_empty(state, src);
    state.selmon = dst;
    focus(state, None);
    arrange(state, None);
}

/// Everything that travels with a monitor's contents during rotation.
struct Payload {
    clients: Vec<WindowId>,
    stack: Vec<WindowId>,
    sel: Option<WindowId>,
    tagset: Tag,
    cur_tag: u32,
    params: ViewParams,
    views: Option<ViewStack>,
    origin: Rect,
}

/// Remove the entries selected by `moves` from `list`, keeping the order of both halves.
fn split_off(list: &mut Vec<WindowId>, moves: impl Fn(&WindowId) -> bool) -> Vec<WindowId> {
    let (moving, kept): (Vec<WindowId>, Vec<WindowId>) =
        list.iter().copied().partition(|id| moves(id));
    *list = kept;
    moving
}

/// Shift the contents of every monitor to the next one, the last wrapping to
/// the first. With `all_views` every client and the view history move along;
/// otherwise only clients of the visible tagset move and the destination
/// shows the arriving tagset through its own history.
pub fn rotate_monitors(state: &mut State, all_views: bool) {
    let n = state.monitors.len();
    if n < 2 {
        return;
    }
    tracing::info!("Rotate {} monitors (all views: {})", n, all_views);

    state.topology_busy = true;
    let clients = &state.clients;
    let payloads: Vec<Payload> = state
        .monitors
        .iter_mut()
        .map(|m| {
            let tagset = m.tagset;
            let moves = |id: &WindowId| {
                all_views || clients.get(id).is_some_and(|c| c.tags.intersects(tagset))
            };
            let moving = split_off(&mut m.clients, moves);
            let stack = split_off(&mut m.stack, moves);
            let sel = m.sel.filter(|sel| moving.contains(sel));
            if sel.is_some() {
                m.sel = None;
            }
            Payload {
                clients: moving,
                stack,
                sel,
                tagset,
                cur_tag: m.cur_tag,
                params: m.params(),
                views: all_views.then(|| m.views.take()),
                origin: m.frame,
            }
        })
        .collect();

    let all = state.config.tag_mask();
    let bar_height = state.config.bar_height;
    for (i, payload) in payloads.into_iter().enumerate() {
        let dst = (i + 1) % n;
        let to = state.monitors[dst].frame;
        for id in &payload.clients {
            carry_floating(state, *id, payload.origin, to);
            if let Some(client) = state.clients.get_mut(id) {
                client.monitor = dst;
            }
        }

        let dest = &mut state.monitors[dst];
        dest.clients.splice(0..0, payload.clients);
        dest.stack.splice(0..0, payload.stack);
        if payload.sel.is_some() {
            dest.sel = payload.sel;
        }
        match payload.views {
            Some(views) => {
                dest.views = views;
                dest.tagset = payload.tagset;
                dest.cur_tag = derive_cur_tag(payload.tagset, payload.cur_tag, all);
                dest.set_params(payload.params);
                dest.update_bar_pos(bar_height);
            }
            None => {
                view_on_monitor(state, dst, payload.tagset);
            }
        }
    }
    state.topology_busy = false;

    for mon in 0..n {
        refresh_selection(state, mon);
        fallback_if_empty(state, mon);
    }
    focus(state, None);
    arrange(state, None);
}
