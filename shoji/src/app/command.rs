use shoji_ipc::{Action, Command, Response};

use crate::core::State;
use crate::effect::CommandResult;

/// Handle one control-socket command against the state.
pub fn handle_command(state: &mut State, cmd: Command) -> CommandResult {
    match cmd {
        Command::Dispatch { action } => {
            if let Some(message) = validate(state, &action) {
                return CommandResult::error(message);
            }
            state.dispatch(&action);
            CommandResult::ok_with_effects(state.take_effects())
        }
        Command::GetState => CommandResult::with_response(Response::State {
            state: state.state_info(),
        }),
        Command::ListClients => CommandResult::with_response(Response::Clients {
            clients: state.client_infos(),
        }),
        Command::ListMonitors => CommandResult::with_response(Response::Monitors {
            monitors: state.monitor_infos(),
        }),
        Command::Quit => {
            tracing::info!("Quit command received");
            state.dispatch(&Action::Quit);
            CommandResult::ok_with_effects(state.take_effects())
        }
    }
}

/// Largest step a remote caller may ask for in one relative action
const MAX_DELTA: u32 = 64;

/// Reject requests a remote caller got wrong, where a key binding would
/// just be a silent no-op.
fn validate(state: &State, action: &Action) -> Option<String> {
    let all = state.config.tag_mask().mask();
    match action {
        Action::FocusStack { delta }
        | Action::IncMasterSplit { delta }
        | Action::FocusMonitor { delta }
        | Action::SendToMonitor { delta }
        | Action::MoveTagsetToMonitor { delta, .. }
            if delta.unsigned_abs() > MAX_DELTA =>
        {
            Some(format!("Step {} exceeds {}", delta, MAX_DELTA))
        }
        Action::View { tags } | Action::ToggleView { tags } if tags & !all != 0 => {
            Some(format!("Tag mask {:#x} exceeds {} tags", tags, all.count_ones()))
        }
        Action::Tag { tags } | Action::ToggleTag { tags } if *tags == 0 || tags & !all != 0 => {
            Some(format!("Invalid tag mask {:#x}", tags))
        }
        Action::SetLayout { index: Some(index) } if *index >= state.config.layouts.len() => {
            Some(format!("No layout at index {}", index))
        }
        Action::Spawn { command } if command.is_empty() => Some("Empty command".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::platform::mock::{create_test_state, map_event};
    use shoji_ipc::DisplayRequest;

    #[test]
    fn test_dispatch_returns_effects() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.take_effects();

        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::KillClient,
            },
        );
        assert!(matches!(result.response, Response::Ok));
        assert_eq!(
            result.effects,
            vec![Effect::Request(DisplayRequest::Close { window: 1 })]
        );
    }

    #[test]
    fn test_out_of_range_tags_rejected() {
        let mut state = create_test_state();
        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::View { tags: 1 << 12 },
            },
        );
        assert!(matches!(result.response, Response::Error { .. }));
        assert_eq!(state.monitors[0].tagset.mask(), 1);

        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::Tag { tags: 0 },
            },
        );
        assert!(matches!(result.response, Response::Error { .. }));
    }

    #[test]
    fn test_out_of_range_delta_rejected() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        let msplit = state.monitors[0].msplit;

        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::IncMasterSplit { delta: i32::MAX },
            },
        );
        assert!(matches!(result.response, Response::Error { .. }));
        assert_eq!(state.monitors[0].msplit, msplit);

        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::FocusStack { delta: i32::MIN },
            },
        );
        assert!(matches!(result.response, Response::Error { .. }));

        let result = handle_command(
            &mut state,
            Command::Dispatch {
                action: Action::IncMasterSplit { delta: 1 },
            },
        );
        assert!(matches!(result.response, Response::Ok));
    }

    #[test]
    fn test_queries() {
        let mut state = create_test_state();
        state.handle_event(map_event(1, "XTerm"));
        state.handle_event(map_event(2, "Firefox"));

        match handle_command(&mut state, Command::ListClients).response {
            Response::Clients { clients } => {
                assert_eq!(clients.len(), 2);
                assert_eq!(clients[0].id, 2);
                assert!(clients[0].is_selected);
            }
            _ => panic!("Wrong response"),
        }
        match handle_command(&mut state, Command::ListMonitors).response {
            Response::Monitors { monitors } => assert_eq!(monitors.len(), 1),
            _ => panic!("Wrong response"),
        }
        match handle_command(&mut state, Command::GetState).response {
            Response::State { state } => assert_eq!(state.client_count, 2),
            _ => panic!("Wrong response"),
        }
    }

    #[test]
    fn test_quit_stops_state() {
        let mut state = create_test_state();
        let result = handle_command(&mut state, Command::Quit);
        assert!(!state.running);
        assert_eq!(result.effects, vec![Effect::Quit]);
    }
}
