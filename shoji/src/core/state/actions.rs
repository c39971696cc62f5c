use shoji_ipc::Action;
use shoji_layout::{MFACT_MAX, MFACT_MIN};

use super::super::Tag;
use super::arrange::arrange;
use super::bar::toggle_bar;
use super::focus::{focus_monitor, focus_stack, zoom};
use super::mouse::{begin_drag, kill_client, toggle_floating, toggle_fullscreen, DragKind};
use super::tags::{rewind, tag, toggle_tag, toggle_view, view};
use super::topology::{move_tagset_to_monitor, rotate_monitors, send_to_monitor};
use super::State;
use crate::effect::Effect;

/// Run one bound or remotely requested action.
pub fn dispatch(state: &mut State, action: &Action) {
    tracing::debug!("Dispatch: {:?}", action);
    match action {
        Action::Spawn { command } => {
            if command.is_empty() {
                tracing::warn!("Ignoring spawn with an empty command");
                return;
            }
            state.push_effect(Effect::Spawn {
                command: command.clone(),
            });
        }
        Action::Quit => {
            tracing::info!("Quit requested");
            state.running = false;
            state.push_effect(Effect::Quit);
        }
        Action::FocusStack { delta } => focus_stack(state, *delta),
        Action::Zoom => zoom(state),
        Action::KillClient => kill_client(state),
        Action::ToggleBar => toggle_bar(state),
        Action::IncMasterSplit { delta } => inc_master_split(state, *delta),
        Action::SetMasterFactor { value } => set_master_factor(state, *value),
        Action::SetLayout { index } => set_layout(state, *index),
        Action::RotateAxis { target } => {
            let mon = state.selmon;
            let monitor = &mut state.monitors[mon];
            monitor.axis = monitor.axis.rotated(*target);
            tracing::info!("Monitor {} axis: {:?}", mon, monitor.axis);
            arrange(state, Some(mon));
        }
        Action::MirrorLayout => {
            let mon = state.selmon;
            let monitor = &mut state.monitors[mon];
            monitor.axis = monitor.axis.mirrored();
            tracing::info!("Monitor {} mirrored: {}", mon, monitor.axis.mirror);
            arrange(state, Some(mon));
        }
        Action::View { tags } => view(state, *tags),
        Action::ViewAll => view(state, Tag::ALL.mask()),
        Action::ToggleView { tags } => toggle_view(state, *tags),
        Action::Tag { tags } => tag(state, *tags),
        Action::TagAll => tag(state, Tag::ALL.mask()),
        Action::ToggleTag { tags } => toggle_tag(state, *tags),
        Action::Rewind => rewind(state),
        Action::FocusMonitor { delta } => focus_monitor(state, *delta),
        Action::SendToMonitor { delta } => send_to_monitor(state, *delta),
        Action::MoveTagsetToMonitor { delta, all } => move_tagset_to_monitor(state, *delta, *all),
        Action::RotateMonitors { all_views } => rotate_monitors(state, *all_views),
        Action::ToggleFloating => toggle_floating(state),
        Action::ToggleFullscreen => toggle_fullscreen(state),
        Action::MoveMouse => begin_drag(state, DragKind::Move),
        Action::ResizeMouse => begin_drag(state, DragKind::Resize),
    }
}

/// `None` flips between the two remembered layouts; an index replaces the
/// layout in the slot being switched to.
fn set_layout(state: &mut State, index: Option<usize>) {
    if let Some(index) = index {
        if index >= state.config.layouts.len() {
            tracing::warn!("Unknown layout index {}", index);
            return;
        }
    }

    let mon = state.selmon;
    let monitor = &mut state.monitors[mon];
    if index.is_none() || index != Some(monitor.layout_index()) {
        monitor.sel_layout ^= 1;
    }
    if let Some(index) = index {
        monitor.layouts[monitor.sel_layout] = index;
    }
    tracing::info!(
        "Monitor {} layout: {} (slots {:?})",
        mon,
        monitor.layout_index(),
        monitor.layouts
    );

    // Also refreshes the symbol on an empty monitor
    arrange(state, Some(mon));
}

fn set_master_factor(state: &mut State, value: f32) {
    let mon = state.selmon;
    if !state.arranges(mon) {
        return;
    }
    let monitor = &mut state.monitors[mon];
    let mfact = if value < 1.0 {
        value + monitor.mfact
    } else {
        value - 1.0
    };
    if !(MFACT_MIN..=MFACT_MAX).contains(&mfact) {
        tracing::debug!("Master factor {} out of range", mfact);
        return;
    }
    monitor.mfact = mfact;
    tracing::info!("Monitor {} master factor: {}", mon, mfact);
    arrange(state, Some(mon));
}

fn inc_master_split(state: &mut State, delta: i32) {
    let mon = state.selmon;
    let monitor = &mut state.monitors[mon];
    monitor.msplit = monitor.msplit.saturating_add_signed(delta);
    tracing::info!("Monitor {} master split: {}", mon, monitor.msplit);
    arrange(state, Some(mon));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{create_test_state, map_event};
    use shoji_ipc::AxisTarget;

    #[test]
    fn test_set_layout_toggles_slots() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        assert_eq!(state.monitors[0].layout_index(), 0);

        dispatch(&mut state, &Action::SetLayout { index: Some(2) });
        assert_eq!(state.monitors[0].layout_index(), 2);
        assert_eq!(state.monitors[0].layout_symbol, "[1]");

        dispatch(&mut state, &Action::SetLayout { index: None });
        assert_eq!(state.monitors[0].layout_index(), 0);

        // Selecting the current layout again keeps the slot
        dispatch(&mut state, &Action::SetLayout { index: Some(0) });
        assert_eq!(state.monitors[0].layouts, [0, 2]);
        assert_eq!(state.monitors[0].sel_layout, 0);
    }

    #[test]
    fn test_set_layout_invalid_index_is_ignored() {
        let mut state = create_test_state();
        dispatch(&mut state, &Action::SetLayout { index: Some(42) });
        assert_eq!(state.monitors[0].layouts, [0, 1]);
        assert_eq!(state.monitors[0].sel_layout, 0);
    }

    #[test]
    fn test_set_layout_without_clients_updates_symbol() {
        let mut state = create_test_state();
        dispatch(&mut state, &Action::SetLayout { index: None });
        assert_eq!(state.monitors[0].layout_symbol, "><>");
    }

    #[test]
    fn test_set_master_factor() {
        let mut state = create_test_state();
        dispatch(&mut state, &Action::SetMasterFactor { value: 1.25 });
        assert_eq!(state.monitors[0].mfact, 0.25);

        // Relative change outside the range is refused
        dispatch(&mut state, &Action::SetMasterFactor { value: -0.2 });
        assert_eq!(state.monitors[0].mfact, 0.25);

        dispatch(&mut state, &Action::SetMasterFactor { value: 0.25 });
        assert_eq!(state.monitors[0].mfact, 0.5);
    }

    #[test]
    fn test_inc_master_split_floors_at_zero() {
        let mut state = create_test_state();
        dispatch(&mut state, &Action::IncMasterSplit { delta: -3 });
        assert_eq!(state.monitors[0].msplit, 0);
        dispatch(&mut state, &Action::IncMasterSplit { delta: 2 });
        assert_eq!(state.monitors[0].msplit, 2);
    }

    #[test]
    fn test_inc_master_split_saturates() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        dispatch(&mut state, &Action::IncMasterSplit { delta: i32::MAX });
        dispatch(&mut state, &Action::IncMasterSplit { delta: i32::MAX });
        assert_eq!(state.monitors[0].msplit, u32::MAX);
        dispatch(&mut state, &Action::IncMasterSplit { delta: i32::MIN });
        dispatch(&mut state, &Action::IncMasterSplit { delta: i32::MIN });
        dispatch(&mut state, &Action::IncMasterSplit { delta: i32::MIN });
        assert_eq!(state.monitors[0].msplit, 0);
    }

    #[test]
    fn test_rotate_axis_and_mirror() {
        let mut state = create_test_state();
        dispatch(
            &mut state,
            &Action::RotateAxis {
                target: AxisTarget::Split,
            },
        );
        assert_eq!(
            state.monitors[0].axis.split,
            shoji_ipc::SplitAxis::Horizontal
        );
        dispatch(&mut state, &Action::MirrorLayout);
        assert!(state.monitors[0].axis.mirror);
    }

    #[test]
    fn test_spawn_and_quit_are_effects() {
        let mut state = create_test_state();
        dispatch(
            &mut state,
            &Action::Spawn {
                command: vec!["xterm".to_string()],
            },
        );
        dispatch(&mut state, &Action::Quit);
        assert!(!state.running);
        assert_eq!(
            state.take_effects(),
            vec![
                Effect::Spawn {
                    command: vec!["xterm".to_string()]
                },
                Effect::Quit
            ]
        );
    }

    #[test]
    fn test_view_all_and_tag_all() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        dispatch(&mut state, &Action::TagAll);
        assert_eq!(state.clients[&1].tags.mask(), 0x1ff);
        dispatch(&mut state, &Action::ViewAll);
        assert_eq!(state.monitors[0].tagset.mask(), 0x1ff);
        assert_eq!(state.monitors[0].cur_tag, 0);
    }
}
