mod client;
mod config;
mod monitor;
mod rules_engine;
mod state;
mod tag;
mod view_stack;

pub use client::*;
pub use config::*;
pub use monitor::*;
pub use rules_engine::*;
pub use state::*;
pub use tag::*;
pub use view_stack::*;
