use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

use anyhow::{Context, Result};

use shoji_ipc::{Command, Response};

pub struct IpcClient {
    stream: UnixStream,
}

impl IpcClient {
    pub fn connect() -> Result<Self> {
        let path = super::socket_path();
        let stream = UnixStream::connect(&path)
            .with_context(|| format!("Failed to connect to shoji daemon at {:?}", path))?;
        Ok(Self { stream })
    }

    pub fn send(&mut self, cmd: &Command) -> Result<Response> {
        let json = serde_json::to_string(cmd)?;
        writeln!(self.stream, "{}", json)?;
        self.stream.flush()?;

        let mut reader = BufReader::new(&self.stream);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if line.is_empty() {
            anyhow::bail!("Connection closed");
        }

        let response: Response = serde_json::from_str(&line)?;
        Ok(response)
    }
}
