//! Skill Tree - prerequisite-gated skill selection with a terminal front end
//!
//! The [`skill_tree`] engine is independent of the terminal; `input` and `ui`
//! drive it from key presses and draw its state.

pub mod cli;
pub mod input;
pub mod logging;
pub mod skill_tree;
pub mod ui;
