//! # CLI Module
//!
//! User-facing operations of the `vkbackup` binary.
//!
//! - [`backup`] - Loads `tokens.ini`, downloads the selected photo sets and
//!   uploads the folder to the selected sinks
//! - [`run`] - The same pipeline for an already loaded [`crate::config::Settings`]
//! - [`auth_url`] - Prints the VK authorization URL used to obtain a token
//! - [`BackupArgs`] - Flags of the `backup` subcommand, converted into
//!   [`BackupOptions`]
//!
//! Every step of a run lands in a [`RunReport`]; the binary prints it as a
//! table and exits with status 1 if any step recorded a failure.
//!
//! ## Usage Patterns
//!
//! ```bash
//! vkbackup auth-url                                   # Get a VK token
//! vkbackup backup --owner-id 783464 --profile 10 --yandex
//! vkbackup backup --owner-id 783464 --album sweden --album BK --wall --google
//! vkbackup backup --owner-id 783464 --all-albums --yandex --google --fail-fast
//! ```

mod args;
mod auth_url;
mod backup;
mod report;

pub use args::BackupArgs;
pub use auth_url::auth_url;
pub use backup::BackupOptions;
pub use backup::backup;
pub use backup::run;
pub use report::RunReport;
pub use report::StepResult;
