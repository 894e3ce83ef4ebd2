//! CLI command handlers.

mod check;
mod encode;
mod fetch;

pub use check::run_check;
pub use encode::run_encode;
pub use fetch::run_fetch;
