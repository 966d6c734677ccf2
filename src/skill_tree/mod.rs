//! Skill tree engine: prerequisite-gated skill selection with a shared point budget.
//!
//! Branches are split into rows of mutually exclusive choices. Picking a skill
//! in a row requires a pick in the row above, and a pick can only be undone
//! while nothing below it depends on it.

pub mod error;
pub mod layout;
pub mod logic;
pub mod types;

pub use error::*;
pub use layout::*;
pub use logic::*;
pub use types::*;
