use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Requests accepted on the control socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Dispatch { action: Action },

    // Queries
    GetState,
    ListClients,
    ListMonitors,

    // Control
    Quit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    State { state: StateInfo },
    Clients { clients: Vec<ClientInfo> },
    Monitors { monitors: Vec<MonitorInfo> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub id: u32,
    pub title: String,
    pub class: String,
    pub instance: String,
    pub monitor: usize,
    pub tags: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_floating: bool,
    pub is_fullscreen: bool,
    pub is_urgent: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub num: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub tagset: u32,
    pub cur_tag: u32,
    pub layout_symbol: String,
    pub client_count: usize,
    /// Tagsets in the view history, most recent first
    pub views: Vec<u32>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateInfo {
    pub selected_monitor: usize,
    pub tagset: u32,
    pub selected_client: Option<u32>,
    pub client_count: usize,
    pub monitor_count: usize,
    pub layout_symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_dispatch_serialization() {
        let cmd = Command::Dispatch {
            action: Action::View { tags: 1 },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"dispatch\""));
        assert!(json.contains("\"action\":{\"type\":\"view\",\"tags\":1}"));

        let deserialized: Command = serde_json::from_str(&json).unwrap();
        match deserialized {
            Command::Dispatch { action } => assert_eq!(action, Action::View { tags: 1 }),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_response_ok_serialization() {
        let resp = Response::Ok;
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, "{\"type\":\"ok\"}");
    }

    #[test]
    fn test_response_error_serialization() {
        let resp = Response::Error {
            message: "no such monitor".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();

        let deserialized: Response = serde_json::from_str(&json).unwrap();
        match deserialized {
            Response::Error { message } => assert_eq!(message, "no such monitor"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_response_monitors_serialization() {
        let resp = Response::Monitors {
            monitors: vec![MonitorInfo {
                num: 1,
                x: 1920,
                y: 0,
                width: 1280,
                height: 1024,
                tagset: 0b0110,
                cur_tag: 2,
                layout_symbol: "[]=".to_string(),
                client_count: 3,
                views: vec![0b0110, 0b0001],
                is_selected: false,
            }],
        };
        let json = serde_json::to_string(&resp).unwrap();

        let deserialized: Response = serde_json::from_str(&json).unwrap();
        match deserialized {
            Response::Monitors { monitors } => {
                assert_eq!(monitors.len(), 1);
                assert_eq!(monitors[0].num, 1);
                assert_eq!(monitors[0].views, vec![0b0110, 0b0001]);
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_response_state_serialization() {
        let resp = Response::State {
            state: StateInfo {
                selected_monitor: 0,
                tagset: 0b0011,
                selected_client: Some(42),
                client_count: 5,
                monitor_count: 2,
                layout_symbol: "[2]".to_string(),
            },
        };
        let json = serde_json::to_string(&resp).unwrap();

        let deserialized: Response = serde_json::from_str(&json).unwrap();
        match deserialized {
            Response::State { state } => {
                assert_eq!(state.tagset, 0b0011);
                assert_eq!(state.selected_client, Some(42));
                assert_eq!(state.monitor_count, 2);
            }
            _ => panic!("Wrong variant"),
        }
    }
}
