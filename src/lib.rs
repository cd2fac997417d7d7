//! Create, enable, start and remove a single systemd service unit by driving
//! `systemctl`.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod svcmgr;

pub use config::Config;
pub use error::Error;
pub use svcmgr::{EnsureOutcome, ServiceDescriptor};
