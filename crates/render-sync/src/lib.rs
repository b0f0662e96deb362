//! Render synchronization primitives.
//!
//! The host offers no "render finished" signal, so every wait here is
//! best-effort: a deterministic minimum (one yield, one frame) and, for the
//! option-list wait, a hard upper bound.

mod frames;
mod policy;
mod sync;

pub use frames::IntervalFrames;
pub use policy::StabilityWindow;
pub use sync::{OptionsSettle, RenderSync};
