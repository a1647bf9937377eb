//! Dotfiles package manager engine.
//!
//! Deploys a declarative package — a directory of configuration files plus
//! a YAML manifest — into platform-specific locations, collects live files
//! back into the package, or previews the resolved transfers.
//!
//! The public API is organised in layers:
//!
//! - **[`manifest`]** — parse and validate `package.yml`
//! - **[`resolve`]** — destination resolution, glob expansion, path composition
//! - **[`shell`]** — OS-family path expansion and copy/link command rendering
//! - **[`executor`]** — verb dispatch over resolved transfers
//! - **[`commands`]** — top-level run orchestration for the CLI
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod exec;
pub mod executor;
pub mod logging;
pub mod manifest;
pub mod platform;
pub mod resolve;
pub mod session;
pub mod shell;

/// Version reported by `--version`: the build-time override when present,
/// otherwise the crate version.
pub const VERSION: &str = match option_env!("DPM_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
