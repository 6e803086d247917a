//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `bootstrap.rs`: setup/run/up, the mutating bootstrap and launch path.
//! - `inspect.rs`: check/env/dockerfile, read-only reports and recipe rendering.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod bootstrap;
pub mod inspect;

pub use bootstrap::handle_bootstrap_commands;
pub use inspect::handle_inspect_commands;
