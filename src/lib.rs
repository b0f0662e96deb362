//! Tabfill command-line host
//!
//! Wires the autofill engine to a page fixture, a clipboard source and a
//! terminal notice channel.

pub mod cli;
pub mod config;
pub mod notice;
pub mod trigger;

pub use config::{load_config, LoadedConfig, TabfillConfig};
pub use notice::ConsoleNotice;
pub use trigger::{launch, Launch, LaunchError, Trigger};
