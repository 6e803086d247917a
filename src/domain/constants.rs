//! Stable defaults mirrored by `ltboot.toml`.

pub const PROJECT_CONFIG_FILE: &str = "ltboot.toml";
pub const STATE_DIR: &str = ".ltboot";
pub const STATE_FILE: &str = "state.json";

pub const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];
pub const DEFAULT_VENV_DIR: &str = "venv";
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_ENV_TEMPLATE: &str = ".env.example";
pub const DEFAULT_REQUIRED_KEYS: &[&str] = &["OPENAI_API_KEY"];

pub const DEFAULT_STORAGE_DIR: &str = "tmp/travel-pdfs";

pub const DEFAULT_ENTRYPOINT: &str = "Luxury_Travel_Bot.py";
pub const DEFAULT_APP: &str = "Luxury_Travel_Bot:app";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKERS: u32 = 2;
pub const DEFAULT_THREADS: u32 = 8;
pub const DEFAULT_PROCESS_MANAGER: &str = "gunicorn";

pub const DEFAULT_BASE_IMAGE: &str = "python:3.11-slim";
pub const DEFAULT_CONTAINER_WORKDIR: &str = "/app";
/// Native headers for pycairo (PDF/graphics) and PyGObject (desktop integration).
pub const DEFAULT_SYSTEM_PACKAGES: &[&str] = &[
    "build-essential",
    "pkg-config",
    "libcairo2-dev",
    "libgirepository1.0-dev",
];

pub const PORT_VAR: &str = "PORT";
pub const STORAGE_DIR_VAR: &str = "STORAGE_DIR";

/// Key fragments whose values are never printed.
pub const SECRET_MARKERS: &[&str] = &["KEY", "SECRET", "TOKEN", "PASSWORD"];
