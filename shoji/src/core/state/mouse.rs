use shoji_ipc::{Cursor, DisplayRequest, Rect};

use super::super::WindowId;
use super::arrange::{arrange, resize, resize_client, restack};
use super::focus::focus;
use super::registry::swap;
use super::topology::{monitor_at, send_client_to_monitor};
use super::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// An interactive pointer drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub kind: DragKind,
    pub window: WindowId,
    /// Pointer position when the drag started
    pub pointer_origin: (i32, i32),
    /// Client frame when the drag started
    pub frame_origin: Rect,
}

/// Grab the pointer for moving or resizing the selected client.
pub fn begin_drag(state: &mut State, kind: DragKind) {
    if state.drag.is_some() {
        return;
    }
    let Some(id) = state.selected_client() else {
        return;
    };
    let Some(client) = state.clients.get(&id) else {
        return;
    };
    if client.is_fullscreen {
        return;
    }
    let frame = client.frame;
    let bw = client.border_width;

    let mon = state.selmon;
    restack(state, mon);

    let cursor = match kind {
        DragKind::Move => Cursor::Move,
        DragKind::Resize => Cursor::Resize,
    };
    state.request(DisplayRequest::GrabPointer { cursor });
    if kind == DragKind::Resize {
        let corner = (
            frame.x + frame.width + bw - 1,
            frame.y + frame.height + bw - 1,
        );
        state.request(DisplayRequest::WarpPointer {
            x: corner.0,
            y: corner.1,
        });
        state.pointer = corner;
    }

    tracing::debug!("Begin {:?} drag of {:#x}", kind, id);
    state.drag = Some(Drag {
        kind,
        window: id,
        pointer_origin: state.pointer,
        frame_origin: frame,
    });
}

/// Feed a pointer position into the active drag.
pub fn drag_motion(state: &mut State, x: i32, y: i32) {
    state.pointer = (x, y);
    let Some(drag) = state.drag else {
        return;
    };
    if !state.clients.contains_key(&drag.window) {
        state.drag = None;
        state.request(DisplayRequest::UngrabPointer);
        return;
    }

    match drag.kind {
        DragKind::Move => move_motion(state, &drag, x, y),
        DragKind::Resize => resize_motion(state, &drag, x, y),
    }
}

fn move_motion(state: &mut State, drag: &Drag, x: i32, y: i32) {
    let mon = state.selmon;
    let area = state.monitors[mon].work_area;
    let snap = state.config.snap;
    let Some(client) = state.clients.get(&drag.window) else {
        return;
    };
    let (outer_width, outer_height) = (client.outer_width(), client.outer_height());

    let mut nx = drag.frame_origin.x + (x - drag.pointer_origin.0);
    let mut ny = drag.frame_origin.y + (y - drag.pointer_origin.1);
    if (area.x - nx).abs() < snap {
        nx = area.x;
    } else if (area.right() - (nx + outer_width)).abs() < snap {
        nx = area.right() - outer_width;
    }
    if (area.y - ny).abs() < snap {
        ny = area.y;
    } else if (area.bottom() - (ny + outer_height)).abs() < snap {
        ny = area.bottom() - outer_height;
    }

    let tiled = !client.is_floating && state.arranges(mon);
    let frame = client.frame;
    if tiled {
        // Tiled clients stay in the layout and trade places with whatever is under the pointer
        if (nx - frame.x).abs() <= snap && (ny - frame.y).abs() <= snap {
            return;
        }
        let under = state.tiled_clients(mon).into_iter().find(|other| {
            *other != drag.window
                && state
                    .clients
                    .get(other)
                    .is_some_and(|c| c.outer_frame().contains_point(x, y))
        });
        if let Some(other) = under {
            tracing::debug!("Drag swaps {:#x} with {:#x}", drag.window, other);
            if let Err(e) = swap(state, drag.window, other) {
                tracing::warn!("Drag swap failed: {}", e);
                return;
            }
            arrange(state, Some(mon));
        }
        return;
    }

    resize(
        state,
        drag.window,
        Rect::new(nx, ny, frame.width, frame.height),
        true,
        false,
    );
}

fn resize_motion(state: &mut State, drag: &Drag, x: i32, y: i32) {
    let mon = state.selmon;
    let snap = state.config.snap;
    let Some(client) = state.clients.get(&drag.window) else {
        return;
    };
    let bw = client.border_width;
    let origin = drag.frame_origin;
    let nw = (x - origin.x - 2 * bw + 1).max(1);
    let nh = (y - origin.y - 2 * bw + 1).max(1);

    let sel_area = state.monitors[mon].work_area;
    let own_area = state.monitors[client.monitor].work_area;
    let inside = own_area.x + nw >= sel_area.x
        && own_area.x + nw <= sel_area.right()
        && own_area.y + nh >= sel_area.y
        && own_area.y + nh <= sel_area.bottom();
    let arranges = state.arranges(mon);
    let grown = (nw - client.frame.width).abs() > snap || (nh - client.frame.height).abs() > snap;
    if inside && !client.is_floating && arranges && grown {
        set_floating(state, drag.window, true);
    }

    let floating = state.clients.get(&drag.window).is_some_and(|c| c.is_floating);
    if !arranges || floating {
        resize(
            state,
            drag.window,
            Rect::new(origin.x, origin.y, nw, nh),
            true,
            false,
        );
    }
}

/// Release the pointer and hand a client dropped on another monitor over to it.
pub fn end_drag(state: &mut State, x: i32, y: i32) {
    state.pointer = (x, y);
    let Some(drag) = state.drag.take() else {
        return;
    };
    state.request(DisplayRequest::UngrabPointer);

    let Some(client) = state.clients.get(&drag.window) else {
        return;
    };
    if drag.kind == DragKind::Resize {
        let frame = client.frame;
        let bw = client.border_width;
        state.request(DisplayRequest::WarpPointer {
            x: frame.x + frame.width + bw - 1,
            y: frame.y + frame.height + bw - 1,
        });
    }

    tracing::debug!("End {:?} drag of {:#x}", drag.kind, drag.window);
    let Some(client) = state.clients.get(&drag.window) else {
        return;
    };
    let target = monitor_at(state, client.frame);
    if target != client.monitor {
        send_client_to_monitor(state, drag.window, target, false);
        state.selmon = target;
        focus(state, None);
    }
}

pub fn set_floating(state: &mut State, id: WindowId, floating: bool) {
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    if client.is_fullscreen {
        return;
    }
    client.is_floating = floating || client.is_fixed;
    tracing::info!("Client {:#x} floating={}", id, client.is_floating);
    let (frame, mon, floating) = (client.frame, client.monitor, client.is_floating);
    if floating {
        resize(state, id, frame, false, false);
    }
    arrange(state, Some(mon));
}

pub fn toggle_floating(state: &mut State) {
    let Some(id) = state.selected_client() else {
        return;
    };
    let floating = state.clients.get(&id).is_some_and(|c| c.is_floating);
    set_floating(state, id, !floating);
}

/// Enter or leave fullscreen. Leaving restores the floating state, border and
/// geometry the client had before.
pub fn set_fullscreen(state: &mut State, id: WindowId, fullscreen: bool) {
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    if client.is_fullscreen == fullscreen {
        return;
    }
    let mon = client.monitor;

    if fullscreen {
        client.is_fullscreen = true;
        client.was_floating = client.is_floating;
        client.saved_border_width = client.border_width;
        client.border_width = 0;
        client.is_floating = true;
        tracing::info!("Client {:#x} enters fullscreen", id);

        let frame = state.monitors[mon].frame;
        state.request(DisplayRequest::SetFullscreenState {
            window: id,
            fullscreen: true,
        });
        resize_client(state, id, frame);
        state.request(DisplayRequest::Raise { window: id });
    } else {
        client.is_fullscreen = false;
        client.is_floating = client.was_floating;
        client.border_width = client.saved_border_width;
        let restore = client.old_frame;
        tracing::info!("Client {:#x} leaves fullscreen", id);

        state.request(DisplayRequest::SetFullscreenState {
            window: id,
            fullscreen: false,
        });
        resize_client(state, id, restore);
        arrange(state, Some(mon));
    }
}

pub fn toggle_fullscreen(state: &mut State) {
    let Some(id) = state.selected_client() else {
        return;
    };
    let fullscreen = state.clients.get(&id).is_some_and(|c| c.is_fullscreen);
    set_fullscreen(state, id, !fullscreen);
}

pub fn kill_client(state: &mut State) {
    let Some(id) = state.selected_client() else {
        return;
    };
    tracing::info!("Closing client {:#x}", id);
    state.request(DisplayRequest::Close { window: id });
}
