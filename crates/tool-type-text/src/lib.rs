pub mod api;
pub mod errors;
pub mod keys;
pub mod model;
pub mod policy;

mod runner;

pub use api::{TypeTextTool, TypeTextToolBuilder};
pub use keys::{char_strokes, tab_strokes};
pub use model::TypeReport;
pub use policy::TypePolicyView;
