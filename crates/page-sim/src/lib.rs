//! In-memory stand-in for a rendered form.
//!
//! `SimPage` keeps a flat list of controls in document order and reacts to
//! value notifications through declarative [`ChangeRule`]s, which is enough to
//! reproduce the page behaviors the engine has to survive: fields appearing
//! after an earlier field is filled, lists populated late, and choice fields
//! reset by page code right after a programmatic change.

mod clipboard;
mod fixture;
mod journal;
mod page;

pub use clipboard::SimClipboard;
pub use fixture::{ChangeRule, Effect, FieldFixture, PageFixture, SimError};
pub use journal::JournalEntry;
pub use page::SimPage;
