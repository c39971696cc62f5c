use shoji_ipc::{BorderScheme, DisplayRequest};

use super::super::WindowId;
use super::arrange::{arrange, restack};
use super::bar::draw_bars;
use super::registry::{attach, attach_stack, detach, detach_stack, first_focusable};
use super::topology::dir_to_monitor;
use super::State;

/// Focus `target`, or the first visible focusable client of the selected
/// monitor when `target` is missing or cannot take focus.
pub fn focus(state: &mut State, target: Option<WindowId>) {
    let target = target
        .filter(|id| state.is_visible(*id))
        .filter(|id| state.clients.get(id).is_some_and(|c| c.is_focusable()))
        .or_else(|| first_focusable(state, state.selmon));

    let previous = state.selected_client();
    if let Some(previous) = previous.filter(|p| Some(*p) != target) {
        unfocus(state, previous, false);
    }

    match target {
        Some(id) => {
            let Some(client) = state.clients.get(&id) else {
                return;
            };
            let (mon, urgent) = (client.monitor, client.is_urgent);
            if mon != state.selmon {
                tracing::debug!("Focus follows client {:#x} to monitor {}", id, mon);
                state.selmon = mon;
            }
            if urgent {
                set_urgent(state, id, false);
            }
            if let Err(e) = detach_stack(state, id).and_then(|_| attach_stack(state, id)) {
                tracing::warn!("Failed to raise {:#x} in focus order: {}", id, e);
            }
            state.request(DisplayRequest::SetBorder {
                window: id,
                scheme: BorderScheme::Selected,
            });
            set_focus(state, id);
        }
        None => {
            state.request(DisplayRequest::SetFocus { window: None });
            state.request(DisplayRequest::SetActiveWindow { window: None });
        }
    }

    if previous != target {
        tracing::debug!("Focus: {:?} -> {:?}", previous, target);
    }
    let selmon = state.selmon;
    state.monitors[selmon].sel = target;
    draw_bars(state);
}

/// Drop the selected border, optionally handing input focus back to the root.
pub fn unfocus(state: &mut State, id: WindowId, set_focus: bool) {
    if !state.clients.contains_key(&id) {
        return;
    }
    state.request(DisplayRequest::SetBorder {
        window: id,
        scheme: BorderScheme::Normal,
    });
    if set_focus {
        state.request(DisplayRequest::SetFocus { window: None });
        state.request(DisplayRequest::SetActiveWindow { window: None });
    }
}

fn set_focus(state: &mut State, id: WindowId) {
    let never_focus = state.clients.get(&id).is_some_and(|c| c.never_focus);
    if !never_focus {
        state.request(DisplayRequest::SetFocus { window: Some(id) });
    }
    state.request(DisplayRequest::SetActiveWindow { window: Some(id) });
}

pub fn set_urgent(state: &mut State, id: WindowId, urgent: bool) {
    let Some(client) = state.clients.get_mut(&id) else {
        return;
    };
    if client.is_urgent == urgent {
        return;
    }
    client.is_urgent = urgent;
    state.request(DisplayRequest::SetUrgency { window: id, urgent });
}

/// Move focus through the visible clients of the selected monitor in
/// ownership order, wrapping at either end.
pub fn focus_stack(state: &mut State, delta: i32) {
    let mon = state.selmon;
    let Some(sel) = state.monitors[mon].sel else {
        return;
    };
    let fullscreen = state.clients.get(&sel).is_some_and(|c| c.is_fullscreen);
    if fullscreen && state.config.lock_fullscreen {
        tracing::debug!("Focus locked to fullscreen client {:#x}", sel);
        return;
    }

    let candidates = state.visible_clients(mon);
    let candidates: Vec<WindowId> = candidates
        .into_iter()
        .filter(|id| state.clients.get(id).is_some_and(|c| c.is_focusable()))
        .collect();
    let Some(pos) = candidates.iter().position(|id| *id == sel) else {
        return;
    };
    let len = candidates.len() as i64;
    let next = candidates[(pos as i64 + i64::from(delta)).rem_euclid(len) as usize];
    if next == sel {
        return;
    }

    focus(state, Some(next));
    restack(state, mon);
}

/// Select the monitor `delta` steps away and focus its selection.
pub fn focus_monitor(state: &mut State, delta: i32) {
    if state.monitors.len() < 2 {
        return;
    }
    let target = dir_to_monitor(state, delta);
    if target == state.selmon {
        return;
    }

    tracing::info!("Focus monitor {} -> {}", state.selmon, target);
    if let Some(sel) = state.selected_client() {
        unfocus(state, sel, false);
    }
    state.selmon = target;
    focus(state, None);
}

/// Promote the selection to the master slot. A selection already there
/// swaps with the next tileable client.
pub fn zoom(state: &mut State) {
    let mon = state.selmon;
    let Some(sel) = state.monitors[mon].sel else {
        return;
    };
    if !state.arranges(mon) || state.clients.get(&sel).is_some_and(|c| c.is_floating) {
        return;
    }

    let tiled = state.tiled_clients(mon);
    let target = if tiled.first() == Some(&sel) {
        match tiled.get(1) {
            Some(next) => *next,
            None => return,
        }
    } else {
        sel
    };

    tracing::info!("Zoom {:#x} to master on monitor {}", target, mon);
    if let Err(e) = detach(state, target).and_then(|_| attach(state, target)) {
        tracing::warn!("Zoom failed for {:#x}: {}", target, e);
        return;
    }
    focus(state, Some(target));
    arrange(state, Some(mon));
}
