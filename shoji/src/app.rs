mod command;
mod effects;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use shoji_ipc::{DisplayEvent, Rect};

use crate::core::{Config, State};
use crate::ipc::{socket_path, CommandWithResponse, IpcServer};
use crate::platform::{ignore_child_exits, StdioDisplayService};

use command::handle_command;
use effects::execute_effects;

pub struct App {}

impl App {
    /// Run the daemon until the event stream closes or a quit is requested.
    pub fn run(config: Config, screen: Rect) -> Result<()> {
        ignore_child_exits()?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;
        rt.block_on(Self::run_async(config, screen))
    }

    async fn run_async(config: Config, screen: Rect) -> Result<()> {
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<CommandWithResponse>(256);

        let ipc_server = IpcServer::new(socket_path(), cmd_tx);
        let server_task = tokio::spawn(async move {
            if let Err(e) = ipc_server.run().await {
                tracing::error!("IPC server error: {}", e);
            }
        });

        let mut display = StdioDisplayService::stdout();
        let mut state = State::new(config, screen);
        execute_effects(state.take_effects(), &mut display);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        tracing::info!("Entering event loop");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("Failed to read display events")? {
                        Some(line) => handle_line(&mut state, &line),
                        None => {
                            tracing::info!("Display service closed the event stream");
                            break;
                        }
                    }
                }
                Some((cmd, resp_tx)) = cmd_rx.recv() => {
                    tracing::debug!("Received IPC command: {:?}", cmd);
                    let result = handle_command(&mut state, cmd);
                    let _ = resp_tx.send(result.response).await;
                    if !execute_effects(result.effects, &mut display) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }

            if !execute_effects(state.take_effects(), &mut display) || !state.running {
                break;
            }
        }

        server_task.abort();
        tracing::info!("Event loop exited");
        Ok(())
    }
}

/// Feed one JSON line from the display service into the state.
fn handle_line(state: &mut State, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<DisplayEvent>(line) {
        Ok(event) => state.handle_event(event),
        Err(e) => tracing::warn!("Invalid display event: {}", e),
    }
}
