//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `project.rs`: project root + `ltboot.toml` loading and path resolution.
//! - `runtime.rs`: interpreter/package-manager discovery on `PATH`.
//! - `venv.rs`: isolated environment creation and manifest install.
//! - `envfile.rs`: `.env` parsing, template materialization, redaction.
//! - `storage.rs`: storage directory + install state persistence.
//! - `setup.rs`: the fail-fast setup sequence.
//! - `launch.rs`: environment resolution, launch plans, process hand-off.
//! - `doctor.rs`: read-only prerequisite report.
//! - `container.rs`: container recipe rendering.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod container;
pub mod doctor;
pub mod envfile;
pub mod launch;
pub mod output;
pub mod project;
pub mod runtime;
pub mod setup;
pub mod storage;
pub mod venv;
