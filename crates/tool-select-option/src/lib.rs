pub mod api;
pub mod errors;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod policy;

mod runner;
mod wait;

pub use api::{SelectTool, SelectToolBuilder};
pub use matcher::{best_match, MatchHit};
pub use model::{MatchKey, MatchTier, SelectOutcome, SelectReport};
pub use normalize::normalize;
pub use policy::SelectConfig;
