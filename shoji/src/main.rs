mod app;
mod config;
mod core;
mod effect;
mod ipc;
mod platform;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use ipc::IpcClient;
use shoji_ipc::{Action, Command, Rect, Response};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shoji - tag-based tiling window manager
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartCmd),
    Version(VersionCmd),
    Dispatch(DispatchCmd),
    ViewTag(ViewTagCmd),
    ToggleViewTag(ToggleViewTagCmd),
    MoveToTag(MoveToTagCmd),
    ToggleWindowTag(ToggleWindowTagCmd),
    Rewind(RewindCmd),
    FocusStack(FocusStackCmd),
    FocusMonitor(FocusMonitorCmd),
    SendToMonitor(SendToMonitorCmd),
    MoveTagset(MoveTagsetCmd),
    RotateMonitors(RotateMonitorsCmd),
    SetLayout(SetLayoutCmd),
    ToggleBar(ToggleBarCmd),
    ListClients(ListClientsCmd),
    ListMonitors(ListMonitorsCmd),
    GetState(GetStateCmd),
    Quit(QuitCmd),
}

/// Start the shoji daemon; display events are read from stdin
#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
struct StartCmd {
    /// config file (default: $XDG_CONFIG_HOME/shoji/config.json)
    #[argh(option)]
    config: Option<PathBuf>,
    /// initial screen size until outputs are reported, e.g. 1920x1080
    #[argh(option, default = "String::from(\"1920x1080\")")]
    screen: String,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

/// Run an action given as JSON, e.g. '{"type":"zoom"}'
#[derive(FromArgs)]
#[argh(subcommand, name = "dispatch")]
struct DispatchCmd {
    /// action in JSON
    #[argh(positional)]
    action: String,
}

/// Switch to a specific tag
#[derive(FromArgs)]
#[argh(subcommand, name = "view-tag")]
struct ViewTagCmd {
    /// tag number (1-31)
    #[argh(positional)]
    tag: u32,
}

/// Toggle visibility of a tag
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-view-tag")]
struct ToggleViewTagCmd {
    /// tag number (1-31)
    #[argh(positional)]
    tag: u32,
}

/// Move the selected client to a tag
#[derive(FromArgs)]
#[argh(subcommand, name = "move-to-tag")]
struct MoveToTagCmd {
    /// tag number (1-31)
    #[argh(positional)]
    tag: u32,
}

/// Toggle a tag on the selected client
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-window-tag")]
struct ToggleWindowTagCmd {
    /// tag number (1-31)
    #[argh(positional)]
    tag: u32,
}

/// Go back to the previously viewed tagset
#[derive(FromArgs)]
#[argh(subcommand, name = "rewind")]
struct RewindCmd {}

/// Focus the next or previous client
#[derive(FromArgs)]
#[argh(subcommand, name = "focus-stack")]
struct FocusStackCmd {
    /// direction: next, prev
    #[argh(positional)]
    direction: String,
}

/// Focus the next or previous monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "focus-monitor")]
struct FocusMonitorCmd {
    /// direction: next, prev
    #[argh(positional)]
    direction: String,
}

/// Send the selected client to the next or previous monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "send-to-monitor")]
struct SendToMonitorCmd {
    /// direction: next, prev
    #[argh(positional)]
    direction: String,
}

/// Move the visible tagset to the next or previous monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "move-tagset")]
struct MoveTagsetCmd {
    /// direction: next, prev
    #[argh(positional)]
    direction: String,
    /// move every client and the whole view history
    #[argh(switch)]
    all: bool,
}

/// Shift every monitor's contents to the next monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "rotate-monitors")]
struct RotateMonitorsCmd {
    /// carry each monitor's view history along
    #[argh(switch)]
    all: bool,
}

/// Select a layout by index, or toggle the previous one
#[derive(FromArgs)]
#[argh(subcommand, name = "set-layout")]
struct SetLayoutCmd {
    /// layout index from the config
    #[argh(positional)]
    index: Option<usize>,
}

/// Show or hide the bar
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-bar")]
struct ToggleBarCmd {}

/// List all managed clients
#[derive(FromArgs)]
#[argh(subcommand, name = "list-clients")]
struct ListClientsCmd {}

/// List monitors
#[derive(FromArgs)]
#[argh(subcommand, name = "list-monitors")]
struct ListMonitorsCmd {}

/// Get current window manager state
#[derive(FromArgs)]
#[argh(subcommand, name = "get-state")]
struct GetStateCmd {}

/// Quit the shoji daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "quit")]
struct QuitCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["shoji", "--help"];
            if let Err(e) = Cli::from_args(&args[..1], &args[1..]) {
                println!("{}", e.output);
            }
            Ok(())
        }
        Some(SubCommand::Start(cmd)) => {
            // stdout carries display requests
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            tracing::info!("shoji {} starting", VERSION);
            let screen = parse_screen(&cmd.screen)?;
            let config = config::load(cmd.config.as_deref())?;
            app::App::run(config, screen)
        }
        Some(SubCommand::Version(_)) => {
            println!("shoji {}", VERSION);
            Ok(())
        }
        Some(subcmd) => run_cli(subcmd),
    }
}

fn run_cli(subcmd: SubCommand) -> Result<()> {
    let cmd = to_command(subcmd)?;
    let mut client = IpcClient::connect()?;
    let response = client.send(&cmd)?;

    match response {
        Response::Ok => {}
        Response::Error { message } => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
        Response::Clients { clients } => {
            for c in clients {
                println!(
                    "{:#x}: {} - {} [monitor={}, tags={:#x}, {}x{} @ ({},{})]{}{}",
                    c.id,
                    c.class,
                    c.title,
                    c.monitor,
                    c.tags,
                    c.width,
                    c.height,
                    c.x,
                    c.y,
                    if c.is_floating { " floating" } else { "" },
                    if c.is_selected { " *" } else { "" }
                );
            }
        }
        Response::Monitors { monitors } => {
            for m in monitors {
                println!(
                    "{}: {}x{} @ ({},{}) tags={:#x} {} clients={} views={:?}{}",
                    m.num,
                    m.width,
                    m.height,
                    m.x,
                    m.y,
                    m.tagset,
                    m.layout_symbol,
                    m.client_count,
                    m.views,
                    if m.is_selected { " *" } else { "" }
                );
            }
        }
        Response::State { state } => {
            println!("Selected monitor: {}", state.selected_monitor);
            println!("Tagset: {:#x}", state.tagset);
            println!("Layout: {}", state.layout_symbol);
            println!("Selected client: {:?}", state.selected_client);
            println!("Client count: {}", state.client_count);
            println!("Monitor count: {}", state.monitor_count);
        }
    }

    Ok(())
}

fn dispatch(action: Action) -> Command {
    Command::Dispatch { action }
}

fn to_command(subcmd: SubCommand) -> Result<Command> {
    let command = match subcmd {
        SubCommand::Start(_) | SubCommand::Version(_) => {
            bail!("Not a control command")
        }
        SubCommand::Dispatch(cmd) => {
            let action: Action = serde_json::from_str(&cmd.action)
                .with_context(|| format!("Invalid action: {}", cmd.action))?;
            dispatch(action)
        }
        SubCommand::ViewTag(cmd) => dispatch(Action::View {
            tags: tag_mask(cmd.tag)?,
        }),
        SubCommand::ToggleViewTag(cmd) => dispatch(Action::ToggleView {
            tags: tag_mask(cmd.tag)?,
        }),
        SubCommand::MoveToTag(cmd) => dispatch(Action::Tag {
            tags: tag_mask(cmd.tag)?,
        }),
        SubCommand::ToggleWindowTag(cmd) => dispatch(Action::ToggleTag {
            tags: tag_mask(cmd.tag)?,
        }),
        SubCommand::Rewind(_) => dispatch(Action::Rewind),
        SubCommand::FocusStack(cmd) => dispatch(Action::FocusStack {
            delta: parse_direction(&cmd.direction)?,
        }),
        SubCommand::FocusMonitor(cmd) => dispatch(Action::FocusMonitor {
            delta: parse_direction(&cmd.direction)?,
        }),
        SubCommand::SendToMonitor(cmd) => dispatch(Action::SendToMonitor {
            delta: parse_direction(&cmd.direction)?,
        }),
        SubCommand::MoveTagset(cmd) => dispatch(Action::MoveTagsetToMonitor {
            delta: parse_direction(&cmd.direction)?,
            all: cmd.all,
        }),
        SubCommand::RotateMonitors(cmd) => dispatch(Action::RotateMonitors { all_views: cmd.all }),
        SubCommand::SetLayout(cmd) => dispatch(Action::SetLayout { index: cmd.index }),
        SubCommand::ToggleBar(_) => dispatch(Action::ToggleBar),
        SubCommand::ListClients(_) => Command::ListClients,
        SubCommand::ListMonitors(_) => Command::ListMonitors,
        SubCommand::GetState(_) => Command::GetState,
        SubCommand::Quit(_) => Command::Quit,
    };
    Ok(command)
}

fn tag_mask(tag: u32) -> Result<u32> {
    if !(1..=crate::core::MAX_TAGS).contains(&tag) {
        bail!("Tag must be between 1 and {}, got {}", crate::core::MAX_TAGS, tag);
    }
    Ok(1 << (tag - 1))
}

fn parse_direction(s: &str) -> Result<i32> {
    match s.to_lowercase().as_str() {
        "next" => Ok(1),
        "prev" => Ok(-1),
        _ => bail!("Unknown direction: {} (use next or prev)", s),
    }
}

fn parse_screen(s: &str) -> Result<Rect> {
    let Some((w, h)) = s.split_once('x') else {
        bail!("Screen size must look like WIDTHxHEIGHT, got {}", s);
    };
    let width: i32 = w.trim().parse().with_context(|| format!("Bad width in {}", s))?;
    let height: i32 = h.trim().parse().with_context(|| format!("Bad height in {}", s))?;
    if width <= 0 || height <= 0 {
        bail!("Screen size must be positive, got {}", s);
    }
    Ok(Rect::new(0, 0, width, height))
}
