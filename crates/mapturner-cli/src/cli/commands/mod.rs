//! CLI command handlers, one per file.

pub(crate) mod check;
pub(crate) mod turn;

pub use check::run_check;
pub use turn::{run_turn, TurnOptions};
