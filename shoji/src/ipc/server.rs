use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use shoji_ipc::{Command, Response};

pub type CommandWithResponse = (Command, mpsc::Sender<Response>);

pub struct IpcServer {
    socket_path: PathBuf,
    cmd_tx: mpsc::Sender<CommandWithResponse>,
}

impl IpcServer {
    pub fn new(socket_path: PathBuf, cmd_tx: mpsc::Sender<CommandWithResponse>) -> Self {
        Self {
            socket_path,
            cmd_tx,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // A previous instance may have left its socket behind
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }

        let listener = UnixListener::bind(&self.socket_path)
            .with_context(|| format!("Failed to bind {:?}", self.socket_path))?;
        tracing::info!("IPC server listening on {:?}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let cmd_tx = self.cmd_tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = Self::handle_connection(stream, cmd_tx).await {
                            tracing::error!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Accept error: {}", e);
                }
            }
        }
    }

    async fn handle_connection(
        stream: UnixStream,
        cmd_tx: mpsc::Sender<CommandWithResponse>,
    ) -> Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        loop {
            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                break; // EOF
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = Self::handle_line(line, &cmd_tx).await;
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    async fn handle_line(line: &str, cmd_tx: &mpsc::Sender<CommandWithResponse>) -> Response {
        let cmd = match serde_json::from_str::<Command>(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                return Response::Error {
                    message: format!("Invalid command: {}", e),
                }
            }
        };

        tracing::debug!("Received command: {:?}", cmd);
        let (resp_tx, mut resp_rx) = mpsc::channel(1);
        if cmd_tx.send((cmd, resp_tx)).await.is_err() {
            return Response::Error {
                message: "Internal error: command channel closed".to_string(),
            };
        }
        resp_rx.recv().await.unwrap_or(Response::Error {
            message: "Internal error: no response".to_string(),
        })
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}
