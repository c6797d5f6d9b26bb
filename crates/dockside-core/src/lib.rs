//! Core types and configuration for dockside.
//!
//! This crate defines the `dockside.toml` schema ([`DocksideConfig`]),
//! the fixed nine-step deploy plan ([`DeployPlan`]), and shared error types.

pub mod config;
pub mod error;
pub mod plan;

pub use config::{
    BuildConfig, ContainerConfig, DocksideConfig, ImageConfig, OutputConfig, OutputMode,
    ProjectConfig, ToolsConfig,
};
pub use error::{Error, Result};
pub use plan::{CommandLine, DeployPlan, Step, StepKind};
