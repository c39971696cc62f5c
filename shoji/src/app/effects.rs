use crate::effect::Effect;
use crate::platform::DisplayService;

/// Execute side effects in order. Returns false once a quit was requested.
pub fn execute_effects<D: DisplayService>(effects: Vec<Effect>, display: &mut D) -> bool {
    let mut keep_running = true;
    for effect in effects {
        match effect {
            Effect::Request(request) => {
                if let Err(e) = display.send(&request) {
                    tracing::error!("Failed to send {:?}: {}", request, e);
                }
            }
            Effect::Spawn { command } => {
                if let Err(e) = display.spawn(&command) {
                    tracing::warn!("Failed to spawn {:?}: {}", command, e);
                }
            }
            Effect::Quit => {
                keep_running = false;
            }
        }
    }
    keep_running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockDisplayService;
    use shoji_ipc::DisplayRequest;

    #[test]
    fn test_requests_reach_display_in_order() {
        let mut display = MockDisplayService::new();
        let effects = vec![
            Effect::Request(DisplayRequest::Raise { window: 1 }),
            Effect::Spawn {
                command: vec!["xterm".to_string()],
            },
            Effect::Request(DisplayRequest::Close { window: 2 }),
        ];

        assert!(execute_effects(effects, &mut display));
        assert_eq!(
            display.requests,
            vec![
                DisplayRequest::Raise { window: 1 },
                DisplayRequest::Close { window: 2 }
            ]
        );
        assert_eq!(display.spawned, vec![vec!["xterm".to_string()]]);
    }

    #[test]
    fn test_quit_still_flushes_requests() {
        let mut display = MockDisplayService::new();
        let effects = vec![
            Effect::Quit,
            Effect::Request(DisplayRequest::Raise { window: 1 }),
        ];
        assert!(!execute_effects(effects, &mut display));
        assert_eq!(display.requests.len(), 1);
    }

    #[test]
    fn test_failed_spawn_is_not_fatal() {
        let mut display = MockDisplayService::new().with_failing_spawn();
        let effects = vec![Effect::Spawn {
            command: vec!["nope".to_string()],
        }];
        assert!(execute_effects(effects, &mut display));
        assert!(display.spawned.is_empty());
    }
}
