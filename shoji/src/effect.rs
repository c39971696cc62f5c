use shoji_ipc::{DisplayRequest, Response};

/// Side effects queued by the core and executed by the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(DisplayRequest),
    /// Fire-and-forget child process
    Spawn {
        command: Vec<String>,
    },
    Quit,
}

pub struct CommandResult {
    pub response: Response,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    pub fn ok_with_effects(effects: Vec<Effect>) -> Self {
        Self {
            response: Response::Ok,
            effects,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: Response::Error {
                message: message.into(),
            },
            effects: vec![],
        }
    }

    pub fn with_response(response: Response) -> Self {
        Self {
            response,
            effects: vec![],
        }
    }
}
