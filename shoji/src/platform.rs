use std::io::Write;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use shoji_ipc::DisplayRequest;

/// Trait for talking to the display service (side effects).
/// This abstraction allows mocking in tests.
pub trait DisplayService {
    fn send(&mut self, request: &DisplayRequest) -> Result<()>;
    fn spawn(&mut self, command: &[String]) -> Result<()>;
}

/// Display service reached through JSON lines on a writer, stdout in practice.
pub struct StdioDisplayService<W: Write> {
    writer: W,
}

impl StdioDisplayService<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StdioDisplayService<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DisplayService for StdioDisplayService<W> {
    fn send(&mut self, request: &DisplayRequest) -> Result<()> {
        let json = serde_json::to_string(request)?;
        writeln!(self.writer, "{}", json).context("Failed to write display request")?;
        self.writer.flush()?;
        Ok(())
    }

    fn spawn(&mut self, command: &[String]) -> Result<()> {
        let Some((program, args)) = command.split_first() else {
            bail!("Empty command");
        };
        // stdout carries display requests, keep children off it
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .process_group(0)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", program))?;
        tracing::info!("Spawned {} (pid {})", program, child.id());
        Ok(())
    }
}

/// Let the kernel reap spawned children.
pub fn ignore_child_exits() -> Result<()> {
    use nix::sys::signal::{signal, SigHandler, Signal};

    // SAFETY: installs SIG_IGN, no handler code runs
    unsafe { signal(Signal::SIGCHLD, SigHandler::SigIgn) }
        .context("Failed to ignore SIGCHLD")?;
    Ok(())
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::core::{Config, State};
    use shoji_ipc::{DisplayEvent, MapInfo, Rect, SizeHints};

    #[derive(Default)]
    pub struct MockDisplayService {
        pub requests: Vec<DisplayRequest>,
        pub spawned: Vec<Vec<String>>,
        pub fail_spawn: bool,
    }

    impl MockDisplayService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_failing_spawn(mut self) -> Self {
            self.fail_spawn = true;
            self
        }
    }

    impl DisplayService for MockDisplayService {
        fn send(&mut self, request: &DisplayRequest) -> Result<()> {
            self.requests.push(request.clone());
            Ok(())
        }

        fn spawn(&mut self, command: &[String]) -> Result<()> {
            if self.fail_spawn {
                bail!("spawn disabled");
            }
            self.spawned.push(command.to_vec());
            Ok(())
        }
    }

    pub fn create_test_state() -> State {
        create_test_state_with_screen(Rect::new(0, 0, 1920, 1080))
    }

    pub fn create_test_state_with_screen(screen: Rect) -> State {
        let mut state = State::new(Config::default(), screen);
        state.take_effects();
        state
    }

    /// `n` outputs of 1920x1080 side by side, plus the screen spanning them
    pub fn create_test_output(n: usize) -> (Rect, Vec<Rect>) {
        let outputs: Vec<Rect> = (0..n)
            .map(|i| Rect::new(1920 * i as i32, 0, 1920, 1080))
            .collect();
        let screen = Rect::new(0, 0, 1920 * n as i32, 1080);
        (screen, outputs)
    }

    pub fn map_info(window: u32, class: &str) -> MapInfo {
        MapInfo {
            window,
            class: class.to_string(),
            instance: class.to_lowercase(),
            title: format!("{} {}", class, window),
            frame: Rect::new(100, 100, 400, 300),
            border_width: 0,
            size_hints: SizeHints::default(),
            transient_for: None,
            is_dialog: false,
            wants_fullscreen: false,
            never_focus: false,
            is_urgent: false,
        }
    }

    pub fn map_event(window: u32, class: &str) -> DisplayEvent {
        DisplayEvent::Map(map_info(window, class))
    }
}
