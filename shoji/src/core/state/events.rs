use shoji_ipc::{
    clean_mask, Action, ClickRegion, DisplayEvent, DisplayRequest, FullscreenAction, Property, Rect,
};

use super::super::WindowId;
use super::actions::dispatch;
use super::arrange::{arrange, restack};
use super::bar::{draw_bar, draw_bars, update_bars};
use super::focus::{focus, set_urgent, unfocus};
use super::mouse::{drag_motion, end_drag, set_fullscreen};
use super::rules::{manage, unmanage};
use super::topology::{monitor_at, update_geometry};
use super::State;

pub fn handle_event(state: &mut State, event: DisplayEvent) {
    tracing::trace!("Display event: {:?}", event);
    match event {
        DisplayEvent::Map(info) => manage(state, info),
        DisplayEvent::Unmap { window } => {
            if state.clients.contains_key(&window) {
                unmanage(state, window, false);
            }
        }
        DisplayEvent::Destroy { window } => {
            if state.clients.contains_key(&window) {
                unmanage(state, window, true);
            }
        }
        DisplayEvent::ConfigureRequest {
            window,
            x,
            y,
            width,
            height,
            border_width,
        } => configure_request(state, window, x, y, width, height, border_width),
        DisplayEvent::PropertyChanged { window, property } => {
            property_changed(state, window, property)
        }
        DisplayEvent::FullscreenRequest { window, action } => {
            let Some(client) = state.clients.get(&window) else {
                tracing::debug!("Fullscreen request for unmanaged {:#x}", window);
                return;
            };
            let fullscreen = match action {
                FullscreenAction::Add => true,
                FullscreenAction::Remove => false,
                FullscreenAction::Toggle => !client.is_fullscreen,
            };
            set_fullscreen(state, window, fullscreen);
        }
        DisplayEvent::ActivateRequest { window } => {
            let Some(client) = state.clients.get(&window) else {
                return;
            };
            if state.selected_client() != Some(window) && !client.is_urgent {
                set_urgent(state, window, true);
                draw_bars(state);
            }
        }
        DisplayEvent::Enter { window, x, y } => enter(state, window, x, y),
        DisplayEvent::Motion { x, y } => motion(state, x, y),
        DisplayEvent::KeyPress { modifiers, keysym } => {
            let actions: Vec<Action> = state
                .config
                .keys
                .iter()
                .filter(|b| b.keysym == keysym && clean_mask(b.modifiers) == clean_mask(modifiers))
                .map(|b| b.action.clone())
                .collect();
            if actions.is_empty() {
                tracing::trace!("No binding for {:#x}+{}", modifiers, keysym);
            }
            for action in actions {
                dispatch(state, &action);
            }
        }
        DisplayEvent::ButtonPress {
            click,
            modifiers,
            button,
            window,
            x,
            y,
            tag,
        } => button_press(state, click, modifiers, button, window, (x, y), tag),
        DisplayEvent::ButtonRelease { x, y, .. } => end_drag(state, x, y),
        DisplayEvent::OutputsChanged { screen, outputs } => {
            if update_geometry(state, screen, &outputs) {
                tracing::info!("Outputs changed: {} monitors", state.monitors.len());
                update_bars(state);
                focus(state, None);
                arrange(state, None);
            }
        }
        DisplayEvent::StatusText { text } => {
            state.status_text = text;
            let mon = state.selmon;
            draw_bar(state, mon);
        }
    }
}

fn configure_request(
    state: &mut State,
    window: WindowId,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    border_width: Option<i32>,
) {
    let arranges = state.arranges(state.selmon);
    let Some(client) = state.clients.get_mut(&window) else {
        state.request(DisplayRequest::ConfigureUnmanaged {
            window,
            x,
            y,
            width,
            height,
            border_width,
        });
        return;
    };

    if let Some(bw) = border_width {
        client.border_width = bw;
        state.request(DisplayRequest::SetBorderWidth {
            window,
            border_width: bw,
        });
        return;
    }

    if !client.is_floating && arranges {
        let (frame, bw) = (client.frame, client.border_width);
        state.request(DisplayRequest::SendConfigure {
            window,
            frame,
            border_width: bw,
        });
        return;
    }

    let monitor = state.monitors[client.monitor].frame;
    client.old_frame = client.frame;
    if let Some(x) = x {
        client.frame.x = monitor.x + x;
    }
    if let Some(y) = y {
        client.frame.y = monitor.y + y;
    }
    if let Some(width) = width {
        client.frame.width = width;
    }
    if let Some(height) = height {
        client.frame.height = height;
    }
    if client.is_floating && client.frame.x + client.frame.width > monitor.right() {
        client.frame.x = monitor.x + (monitor.width / 2 - client.outer_width() / 2);
    }
    if client.is_floating && client.frame.y + client.frame.height > monitor.bottom() {
        client.frame.y = monitor.y + (monitor.height / 2 - client.outer_height() / 2);
    }

    let (frame, bw, tags, mon) = (
        client.frame,
        client.border_width,
        client.tags,
        client.monitor,
    );
    let moved_only = (x.is_some() || y.is_some()) && width.is_none() && height.is_none();
    if moved_only {
        state.request(DisplayRequest::SendConfigure {
            window,
            frame,
            border_width: bw,
        });
    }
    if tags.intersects(state.monitors[mon].tagset) {
        state.request(DisplayRequest::Configure {
            window,
            frame,
            border_width: bw,
        });
    }
}

fn property_changed(state: &mut State, window: WindowId, property: Property) {
    let selected = state.selected_client() == Some(window);
    let Some(client) = state.clients.get_mut(&window) else {
        tracing::debug!("Property change on unmanaged {:#x}", window);
        return;
    };
    let mon = client.monitor;

    match property {
        Property::Title { title } => {
            client.name = title;
            if state.monitors[mon].sel == Some(window) {
                draw_bar(state, mon);
            }
        }
        Property::SizeHints { hints } => client.update_size_hints(hints),
        Property::Hints {
            urgent,
            never_focus,
        } => {
            client.never_focus = never_focus;
            if selected && urgent {
                state.request(DisplayRequest::SetUrgency {
                    window,
                    urgent: false,
                });
            } else {
                client.is_urgent = urgent;
            }
            draw_bars(state);
        }
        Property::WindowType { dialog, fullscreen } => {
            if dialog && !client.is_floating {
                client.is_floating = true;
                arrange(state, Some(mon));
            }
            if fullscreen {
                set_fullscreen(state, window, true);
            }
        }
        Property::TransientFor { parent } => {
            client.transient_for = Some(parent);
            if !client.is_floating && state.clients.contains_key(&parent) {
                if let Some(client) = state.clients.get_mut(&window) {
                    client.is_floating = true;
                }
                arrange(state, Some(mon));
            }
        }
    }
}

/// Focus follows the pointer into clients and across monitors.
fn enter(state: &mut State, window: Option<WindowId>, x: i32, y: i32) {
    state.pointer = (x, y);
    if state.drag.is_some() {
        return;
    }

    let client = window.filter(|id| state.clients.contains_key(id));
    let mon = match client.and_then(|id| state.clients.get(&id)) {
        Some(c) => c.monitor,
        None => monitor_at(state, Rect::new(x, y, 1, 1)),
    };

    if mon != state.selmon {
        if let Some(sel) = state.selected_client() {
            unfocus(state, sel, true);
        }
        state.selmon = mon;
    } else if client.is_none() || client == state.selected_client() {
        return;
    }
    focus(state, client);
}

fn motion(state: &mut State, x: i32, y: i32) {
    if state.drag.is_some() {
        drag_motion(state, x, y);
        return;
    }
    state.pointer = (x, y);

    let mon = monitor_at(state, Rect::new(x, y, 1, 1));
    if state.motion_monitor.is_some_and(|m| m != mon) {
        tracing::debug!("Pointer crossed to monitor {}", mon);
        if let Some(sel) = state.selected_client() {
            unfocus(state, sel, true);
        }
        state.selmon = mon;
        focus(state, None);
    }
    state.motion_monitor = Some(mon);
}

fn button_press(
    state: &mut State,
    click: ClickRegion,
    modifiers: u32,
    button: u8,
    window: Option<WindowId>,
    (x, y): (i32, i32),
    tag: Option<u32>,
) {
    state.pointer = (x, y);

    let mon = monitor_at(state, Rect::new(x, y, 1, 1));
    if mon != state.selmon && click != ClickRegion::ClientWindow {
        if let Some(sel) = state.selected_client() {
            unfocus(state, sel, true);
        }
        state.selmon = mon;
        focus(state, None);
    }

    if click == ClickRegion::ClientWindow {
        let Some(id) = window.filter(|id| state.clients.contains_key(id)) else {
            return;
        };
        focus(state, Some(id));
        let selmon = state.selmon;
        restack(state, selmon);

        let remapped = state
            .clients
            .get(&id)
            .and_then(|c| c.remapped_button(button));
        if let Some(to) = remapped {
            tracing::debug!("Remap button {} -> {} for {:#x}", button, to, id);
            state.request(DisplayRequest::SendButton { window: id, button: to });
            return;
        }
    }

    let clicked = match (click, tag) {
        (ClickRegion::TagBar, Some(index)) if index < state.config.num_tags() => Some(1 << index),
        _ => None,
    };
    let actions: Vec<Action> = state
        .config
        .buttons
        .iter()
        .filter(|b| {
            b.click == click
                && b.button == button
                && clean_mask(b.modifiers) == clean_mask(modifiers)
        })
        .map(|b| match clicked {
            Some(mask) => b.action.with_clicked_tag(mask),
            None => b.action.clone(),
        })
        .collect();
    for action in actions {
        dispatch(state, &action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::platform::mock::{create_test_output, create_test_state, map_event};
    use shoji_ipc::config::{MOD_4, MOD_LOCK, MOD_SHIFT};
    use shoji_ipc::{ButtonBinding, KeyBinding};

    #[test]
    fn test_key_press_ignores_lock_modifiers() {
        let mut state = create_test_state();
        state.config.keys.push(KeyBinding {
            modifiers: MOD_4,
            keysym: "3".to_string(),
            action: Action::View { tags: 0b100 },
        });

        // Extra modifiers do not match
        state.handle_event(DisplayEvent::KeyPress {
            modifiers: MOD_4 | MOD_SHIFT,
            keysym: "3".to_string(),
        });
        assert_eq!(state.monitors[0].tagset.mask(), 0b1);

        state.handle_event(DisplayEvent::KeyPress {
            modifiers: MOD_4 | MOD_LOCK,
            keysym: "3".to_string(),
        });
        assert_eq!(state.monitors[0].tagset.mask(), 0b100);
    }

    #[test]
    fn test_tag_bar_click_uses_clicked_tag() {
        let mut state = create_test_state();
        state.config.buttons.push(ButtonBinding {
            click: ClickRegion::TagBar,
            modifiers: 0,
            button: 1,
            action: Action::View { tags: 0 },
        });

        state.handle_event(DisplayEvent::ButtonPress {
            click: ClickRegion::TagBar,
            modifiers: 0,
            button: 1,
            window: None,
            x: 30,
            y: 5,
            tag: Some(3),
        });
        assert_eq!(state.monitors[0].tagset.mask(), 0b1000);
    }

    #[test]
    fn test_remapped_button_is_forwarded() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "Game"));
        state.clients.get_mut(&1).unwrap().mouse_remap =
            vec![shoji_ipc::ButtonRemap { from: 2, to: 3 }];
        state.take_effects();

        state.handle_event(DisplayEvent::ButtonPress {
            click: ClickRegion::ClientWindow,
            modifiers: 0,
            button: 2,
            window: Some(1),
            x: 100,
            y: 100,
            tag: None,
        });
        assert!(state.take_effects().iter().any(|e| matches!(
            e,
            Effect::Request(DisplayRequest::SendButton {
                window: 1,
                button: 3
            })
        )));
    }

    #[test]
    fn test_enter_focuses_client() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.handle_event(map_event(2, "XTerm"));
        assert_eq!(state.monitors[0].sel, Some(2));

        state.handle_event(DisplayEvent::Enter {
            window: Some(1),
            x: 10,
            y: 10,
        });
        assert_eq!(state.monitors[0].sel, Some(1));
    }

    #[test]
    fn test_motion_switches_monitor() {
        let mut state = create_test_state();
        let (screen, outputs) = create_test_output(2);
        state.handle_event(DisplayEvent::OutputsChanged { screen, outputs });
        assert_eq!(state.monitors.len(), 2);

        state.handle_event(DisplayEvent::Motion { x: 100, y: 500 });
        assert_eq!(state.selmon, 0);
        state.handle_event(DisplayEvent::Motion { x: 2500, y: 500 });
        assert_eq!(state.selmon, 1);
    }

    #[test]
    fn test_unmanaged_configure_request_passes_through() {
        let mut state = create_test_state();
        state.handle_event(DisplayEvent::ConfigureRequest {
            window: 77,
            x: Some(5),
            y: None,
            width: Some(300),
            height: None,
            border_width: None,
        });
        assert_eq!(
            state.take_effects(),
            vec![Effect::Request(DisplayRequest::ConfigureUnmanaged {
                window: 77,
                x: Some(5),
                y: None,
                width: Some(300),
                height: None,
                border_width: None,
            })]
        );
    }

    #[test]
    fn test_tiled_configure_request_is_answered_with_current_geometry() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        let frame = state.clients[&1].frame;
        state.take_effects();

        state.handle_event(DisplayEvent::ConfigureRequest {
            window: 1,
            x: Some(0),
            y: Some(0),
            width: Some(10),
            height: Some(10),
            border_width: None,
        });
        assert_eq!(state.clients[&1].frame, frame);
        assert_eq!(
            state.take_effects(),
            vec![Effect::Request(DisplayRequest::SendConfigure {
                window: 1,
                frame,
                border_width: 1,
            })]
        );
    }

    #[test]
    fn test_floating_configure_request_is_applied() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.clients.get_mut(&1).unwrap().is_floating = true;

        state.handle_event(DisplayEvent::ConfigureRequest {
            window: 1,
            x: Some(50),
            y: Some(60),
            width: Some(300),
            height: Some(200),
            border_width: None,
        });
        assert_eq!(state.clients[&1].frame, Rect::new(50, 60, 300, 200));
    }

    #[test]
    fn test_urgency_hint_on_selected_client_is_cleared() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.handle_event(map_event(2, "XTerm"));

        let hints = |window| DisplayEvent::PropertyChanged {
            window,
            property: Property::Hints {
                urgent: true,
                never_focus: false,
            },
        };
        state.handle_event(hints(2));
        assert!(!state.clients[&2].is_urgent);
        state.handle_event(hints(1));
        assert!(state.clients[&1].is_urgent);
    }

    #[test]
    fn test_title_change_and_unknown_window() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.handle_event(DisplayEvent::PropertyChanged {
            window: 1,
            property: Property::Title {
                title: "vim".to_string(),
            },
        });
        assert_eq!(state.clients[&1].name, "vim");

        state.take_effects();
        state.handle_event(DisplayEvent::Unmap { window: 99 });
        state.handle_event(DisplayEvent::ActivateRequest { window: 99 });
        assert!(state.take_effects().is_empty());
    }

    #[test]
    fn test_fullscreen_request() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "Video"));
        state.handle_event(DisplayEvent::FullscreenRequest {
            window: 1,
            action: FullscreenAction::Toggle,
        });
        assert!(state.clients[&1].is_fullscreen);
        state.handle_event(DisplayEvent::FullscreenRequest {
            window: 1,
            action: FullscreenAction::Remove,
        });
        assert!(!state.clients[&1].is_fullscreen);
    }
}
