pub mod config;
pub mod matching;
pub mod output;
pub mod run;
pub mod runtime;

pub use config::{cmd_config, ConfigArgs};
pub use matching::{cmd_match, MatchArgs};
pub use output::OutputFormat;
pub use run::{cmd_run, RunArgs};
pub use runtime::init_logging;
