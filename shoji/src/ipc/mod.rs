mod client;
mod server;

use std::path::PathBuf;

pub use client::IpcClient;
pub use server::{CommandWithResponse, IpcServer};

const SOCKET_NAME: &str = "shoji.sock";

/// Control socket in the runtime directory, `/tmp` when there is none.
pub fn socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(SOCKET_NAME)
}
