//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: project config sections, install state, report/output structs.
//! - `constants.rs`: defaults for every config field and well-known variable names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! Report structs are the `--json` output schema. Keep field renames explicit.

pub mod constants;
pub mod models;
