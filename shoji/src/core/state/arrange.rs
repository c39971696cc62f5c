use shoji_ipc::{DisplayRequest, LayoutKind, LayoutSpec, Rect};
use shoji_layout::{FitContext, LayoutParams};

use super::super::{MonitorId, WindowId};
use super::bar::draw_bar;
use super::State;

/// Re-apply visibility, layout and stacking for one monitor, or all of them.
/// Suppressed while a topology change is in progress.
pub fn arrange(state: &mut State, mon: Option<MonitorId>) {
    if state.topology_busy {
        tracing::trace!("Arrange suppressed during topology change");
        return;
    }

    let targets: Vec<MonitorId> = match mon {
        Some(m) if m < state.monitors.len() => vec![m],
        Some(_) => return,
        None => (0..state.monitors.len()).collect(),
    };

    for m in &targets {
        show_hide(state, *m);
    }
    for m in targets {
        arrange_monitor(state, m);
        restack(state, m);
    }
}

/// Place visible clients at their frames and park hidden ones off screen.
fn show_hide(state: &mut State, mon: MonitorId) {
    let monitor = &state.monitors[mon];
    let tagset = monitor.tagset;
    let arranges = state.arranges(mon);
    let stack = monitor.stack.clone();

    // Top-down for visible clients
    for id in &stack {
        let Some(client) = state.clients.get(id) else {
            continue;
        };
        if !client.is_visible_in(tagset) {
            continue;
        }
        let frame = client.frame;
        let free = (!arranges || client.is_floating) && !client.is_fullscreen;
        state.request(DisplayRequest::Move {
            window: *id,
            x: frame.x,
            y: frame.y,
        });
        if free {
            resize(state, *id, frame, false, false);
        }
    }

    // Bottom-up for hidden clients
    for id in stack.iter().rev() {
        let Some(client) = state.clients.get(id) else {
            continue;
        };
        if client.is_visible_in(tagset) {
            continue;
        }
        let (x, y) = (-2 * client.outer_width(), client.frame.y);
        state.request(DisplayRequest::Move { window: *id, x, y });
    }
}

fn arrange_monitor(state: &mut State, mon: MonitorId) {
    let monitor = &state.monitors[mon];
    let spec = state
        .config
        .layout(monitor.layout_index())
        .cloned()
        .unwrap_or_else(|| LayoutSpec::new(LayoutKind::Floating));

    let tiled = state.tiled_clients(mon);
    let params = LayoutParams {
        area: monitor.work_area,
        mfact: monitor.mfact,
        msplit: monitor.msplit,
        axis: monitor.axis,
        bar_height: state.config.bar_height,
        visible: state.visible_clients(mon).len(),
    };
    let work_area = monitor.work_area;

    let symbol = match shoji_layout::arrange(spec.kind, &params, tiled.len()) {
        Some(layout) => {
            tracing::debug!(
                "Arrange monitor {} with {:?}: {} tiled clients",
                mon,
                spec.kind,
                tiled.len()
            );
            for (id, cell) in tiled.iter().zip(layout.rects) {
                place_in_cell(state, *id, cell, work_area);
            }
            layout.symbol
        }
        None => shoji_layout::default_symbol(spec.kind, &params.axis),
    };

    state.monitors[mon].layout_symbol = spec.symbol.unwrap_or(symbol);
}

/// Fit a client into an outer cell. Cells on the right or bottom edge of the
/// work area re-center a client that came out smaller.
fn place_in_cell(state: &mut State, id: WindowId, cell: Rect, work_area: Rect) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let bw = client.border_width;
    let inner = Rect::new(cell.x, cell.y, cell.width - 2 * bw, cell.height - 2 * bw);
    let center = cell.right() == work_area.right() || cell.bottom() == work_area.bottom();
    resize(state, id, inner, false, center);
}

/// Fit `rect` against the client's size hints and apply it when it changed.
pub fn resize(state: &mut State, id: WindowId, rect: Rect, interact: bool, center: bool) {
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    let honor_hints =
        state.config.resize_hints || client.is_floating || !state.arranges(client.monitor);
    let ctx = FitContext {
        screen: state.screen,
        work_area: state.monitors[client.monitor].work_area,
        interact,
        bar_height: state.config.bar_height,
        honor_hints,
        center,
    };

    let (fitted, changed) =
        shoji_layout::fit(client.frame, client.border_width, &client.hints, rect, &ctx);
    if changed {
        resize_client(state, id, fitted);
    }
}

/// Apply an inner geometry unconditionally.
pub fn resize_client(state: &mut State, id: WindowId, rect: Rect) {
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    tracing::debug!("Configure {:#x}: {:?} -> {:?}", id, client.frame, rect);
    client.old_frame = client.frame;
    client.frame = rect;
    let border_width = client.border_width;
    state.request(DisplayRequest::Configure {
        window: id,
        frame: rect,
        border_width,
    });
}

/// Raise the floating selection and stack tiled clients in focus order.
pub fn restack(state: &mut State, mon: MonitorId) {
    draw_bar(state, mon);

    let Some(monitor) = state.monitors.get(mon) else {
        return;
    };
    let Some(sel) = monitor.sel else {
        return;
    };
    let arranges = state.arranges(mon);
    let floating = state.clients.get(&sel).is_some_and(|c| c.is_floating);
    let tagset = monitor.tagset;
    let windows: Vec<WindowId> = monitor
        .stack
        .iter()
        .copied()
        .filter(|id| {
            state
                .clients
                .get(id)
                .is_some_and(|c| !c.is_floating && c.is_visible_in(tagset))
        })
        .collect();

    if floating || !arranges {
        state.request(DisplayRequest::Raise { window: sel });
    }
    if arranges {
        state.request(DisplayRequest::Restack { windows });
    }
}

/// Publish every managed window, monitor by monitor in ownership order.
pub fn update_client_list(state: &mut State) {
    let windows: Vec<WindowId> = state
        .monitors
        .iter()
        .flat_map(|m| m.clients.iter().copied())
        .collect();
    state.request(DisplayRequest::SetClientList { windows });
}
