#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use tracing_subscriber as _;

pub mod bootstrap;
pub mod browse;
pub mod commands;
pub mod handlers;
pub mod presentation;

pub use bootstrap::{bootstrap, CliConfig, CliContext, DEFAULT_MANIFEST_URL};
pub use commands::{Cli, Commands};
