use thiserror::Error;

use shoji_ipc::AttachMode;

use super::super::{MonitorId, WindowId};
use super::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("window {0:#x} is not managed")]
    UnknownClient(WindowId),
    #[error("window {window:#x} is not in the {list} list of monitor {monitor}")]
    NotFound {
        window: WindowId,
        monitor: MonitorId,
        list: &'static str,
    },
    #[error("windows {0:#x} and {1:#x} belong to different monitors")]
    DifferentMonitors(WindowId, WindowId),
}

fn owner(state: &State, id: WindowId) -> Result<MonitorId, RegistryError> {
    state
        .clients
        .get(&id)
        .map(|c| c.monitor)
        .filter(|m| *m < state.monitors.len())
        .ok_or(RegistryError::UnknownClient(id))
}

/// Insert at the head of the owning monitor's client list.
pub fn attach(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, id)?;
    state.monitors[mon].clients.insert(0, id);
    Ok(())
}

/// Insert right before the selection, or at the head when the selection is
/// missing, floating or already the head.
pub fn attach_above(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, id)?;
    let monitor = &state.monitors[mon];
    let position = monitor
        .sel
        .filter(|sel| *sel != id && monitor.clients.first() != Some(sel))
        .filter(|sel| state.clients.get(sel).is_some_and(|c| !c.is_floating))
        .and_then(|sel| monitor.clients.iter().position(|c| *c == sel));

    let monitor = &mut state.monitors[mon];
    match position {
        Some(pos) => monitor.clients.insert(pos, id),
        None => monitor.clients.insert(0, id),
    }
    Ok(())
}

/// Attach following the configured placement for new clients.
pub fn attach_new(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    match state.config.attach_mode {
        AttachMode::Head => attach(state, id),
        AttachMode::Above => attach_above(state, id),
    }
}

fn position(
    list: &[WindowId],
    id: WindowId,
    monitor: MonitorId,
    name: &'static str,
) -> Result<usize, RegistryError> {
    list.iter()
        .position(|c| *c == id)
        .ok_or(RegistryError::NotFound {
            window: id,
            monitor,
            list: name,
        })
}

pub fn detach(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, id)?;
    let clients = &mut state.monitors[mon].clients;
    let pos = position(clients, id, mon, "client")?;
    clients.remove(pos);
    Ok(())
}

pub fn attach_stack(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, id)?;
    state.monitors[mon].stack.insert(0, id);
    Ok(())
}

/// Remove from the focus list. A removed selection is replaced by the first
/// visible, focusable client in focus order.
pub fn detach_stack(state: &mut State, id: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, id)?;
    let stack = &mut state.monitors[mon].stack;
    let pos = position(stack, id, mon, "focus")?;
    stack.remove(pos);

    if state.monitors[mon].sel == Some(id) {
        state.monitors[mon].sel = first_focusable(state, mon);
    }
    Ok(())
}

/// Exchange two clients of one monitor in both lists. Geometry is untouched.
/// Both lists are left as they were when either client is missing from one.
pub fn swap(state: &mut State, a: WindowId, b: WindowId) -> Result<(), RegistryError> {
    let mon = owner(state, a)?;
    if owner(state, b)? != mon {
        return Err(RegistryError::DifferentMonitors(a, b));
    }

    let monitor = &mut state.monitors[mon];
    let (ca, cb) = (
        position(&monitor.clients, a, mon, "client")?,
        position(&monitor.clients, b, mon, "client")?,
    );
    let (sa, sb) = (
        position(&monitor.stack, a, mon, "focus")?,
        position(&monitor.stack, b, mon, "focus")?,
    );
    monitor.clients.swap(ca, cb);
    monitor.stack.swap(sa, sb);
    Ok(())
}

/// First visible, focusable client in focus order
pub fn first_focusable(state: &State, mon: MonitorId) -> Option<WindowId> {
    let monitor = state.monitors.get(mon)?;
    monitor.stack.iter().copied().find(|id| {
        state
            .clients
            .get(id)
            .is_some_and(|c| c.is_focusable() && c.is_visible_in(monitor.tagset))
    })
}

/// Drop a selection that is no longer visible or focusable.
pub fn refresh_selection(state: &mut State, mon: MonitorId) {
    let Some(monitor) = state.monitors.get(mon) else {
        return;
    };
    let valid = monitor.sel.is_some_and(|sel| {
        monitor.contains(sel)
            && state
                .clients
                .get(&sel)
                .is_some_and(|c| c.is_focusable() && c.is_visible_in(monitor.tagset))
    });
    if !valid && monitor.sel.is_some() {
        let sel = first_focusable(state, mon);
        tracing::debug!("Monitor {} selection re-derived: {:?}", mon, sel);
        state.monitors[mon].sel = sel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{create_test_state, map_event};

    fn state_with(ids: &[WindowId]) -> State {
        let mut state = create_test_state();
        for id in ids {
            state.handle_event(map_event(*id, "XTerm"));
        }
        state
    }

    #[test]
    fn test_attach_inserts_at_head() {
        let state = state_with(&[1, 2, 3]);
        assert_eq!(state.monitors[0].clients, vec![3, 2, 1]);
        assert_eq!(state.monitors[0].stack, vec![3, 2, 1]);
    }

    #[test]
    fn test_attach_above_selection() {
        let mut state = state_with(&[1, 2, 3]);
        // Select the middle client, then attach a new one above it
        crate::core::state::focus::focus(&mut state, Some(2));
        state.config.attach_mode = AttachMode::Above;
        state.handle_event(map_event(4, "XTerm"));
        assert_eq!(state.monitors[0].clients, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_attach_above_head_selection_behaves_like_attach() {
        let mut state = state_with(&[1, 2]);
        state.config.attach_mode = AttachMode::Above;
        assert_eq!(state.monitors[0].sel, Some(2));
        state.handle_event(map_event(3, "XTerm"));
        assert_eq!(state.monitors[0].clients, vec![3, 2, 1]);
    }

    #[test]
    fn test_detach_non_member_is_not_found() {
        let mut state = state_with(&[1]);
        assert_eq!(detach(&mut state, 1), Ok(()));
        assert_eq!(
            detach(&mut state, 1),
            Err(RegistryError::NotFound {
                window: 1,
                monitor: 0,
                list: "client"
            })
        );
        assert_eq!(detach(&mut state, 99), Err(RegistryError::UnknownClient(99)));
    }

    #[test]
    fn test_detach_stack_rederives_selection() {
        let mut state = state_with(&[1, 2, 3]);
        assert_eq!(state.monitors[0].sel, Some(3));

        detach_stack(&mut state, 3).unwrap();
        assert_eq!(state.monitors[0].sel, Some(2));
    }

    #[test]
    fn test_detach_stack_skips_hidden_and_no_focus() {
        let mut state = state_with(&[1, 2, 3]);
        state.clients.get_mut(&2).unwrap().no_focus = true;
        state.clients.get_mut(&1).unwrap().tags = crate::core::Tag::new(5);

        detach_stack(&mut state, 3).unwrap();
        assert_eq!(state.monitors[0].sel, None);
    }

    #[test]
    fn test_swap_exchanges_both_lists() {
        let mut state = state_with(&[1, 2, 3]);
        let frame_before = state.clients[&1].frame;

        swap(&mut state, 1, 3).unwrap();
        assert_eq!(state.monitors[0].clients, vec![1, 2, 3]);
        assert_eq!(state.monitors[0].stack, vec![1, 2, 3]);
        assert_eq!(state.clients[&1].frame, frame_before);
    }

    #[test]
    fn test_swap_missing_from_focus_list_changes_nothing() {
        let mut state = state_with(&[1, 2, 3]);
        detach_stack(&mut state, 3).unwrap();
        let (clients, stack) = (
            state.monitors[0].clients.clone(),
            state.monitors[0].stack.clone(),
        );

        let err = swap(&mut state, 1, 3).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                window: 3,
                monitor: 0,
                list: "focus"
            }
        );
        assert_eq!(state.monitors[0].clients, clients);
        assert_eq!(state.monitors[0].stack, stack);
    }
}
